//! Common types and utilities shared across treefile.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and [`StoreConfig`]
//! - Error types
//! - [`Link`], the on-disk node identifier

pub mod config;
pub mod error;
mod link;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use link::Link;
