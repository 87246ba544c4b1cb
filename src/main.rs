//! Interactive menu over a file-backed tree of people.
//!
//! Usage: `treefile [PATH]`. Without `PATH`, `$TREEFILE_PATH` or
//! `persons.db` is used. Logging is controlled by `RUST_LOG`.

use std::io::{self, BufRead, Lines, StdinLock, Write};
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use treefile::codec::{compare_by_id, Person, PersonCodec};
use treefile::common::config::{DEFAULT_TREE_PATH, TREE_PATH_ENV};
use treefile::{Error, FileTree, Result};

type Input<'a> = Lines<StdinLock<'a>>;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "treefile=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(TREE_PATH_ENV).ok())
        .unwrap_or_else(|| DEFAULT_TREE_PATH.to_string());

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{path}: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> Result<()> {
    let mut tree = FileTree::open(path, PersonCodec, compare_by_id)?;
    let mut input = io::stdin().lock().lines();

    while let Some(choice) = menu(&mut input)? {
        match choice {
            '1' => {
                let Some(person) = input_person(&mut input)? else {
                    continue;
                };
                let id = person.id;
                match tree.insert(person) {
                    Ok(()) => println!("Added person {id}."),
                    Err(Error::DuplicateKey) => println!("A person with id {id} already exists."),
                    Err(e) => return Err(e),
                }
            }
            '2' => {
                for person in tree.traverse() {
                    println!("{}", person?);
                }
            }
            'Q' => break,
            _ => println!("Unknown option."),
        }
    }

    tree.close()
}

/// Show the menu and read a choice. `None` on end of input.
fn menu(input: &mut Input<'_>) -> Result<Option<char>> {
    println!("Select:");
    println!("1. Add a person");
    println!("2. List persons");
    println!("Q. Quit");

    let Some(line) = prompt(input, "> ")? else {
        return Ok(None);
    };
    Ok(Some(
        line.trim().chars().next().map_or(' ', |c| c.to_ascii_uppercase()),
    ))
}

/// Ask for the fields of a person. `None` if input ended or a number is invalid.
fn input_person(input: &mut Input<'_>) -> Result<Option<Person>> {
    let Some(id) = prompt_number(input, "ID number: ")? else {
        return Ok(None);
    };
    let Some(name) = prompt(input, "Name: ")? else {
        return Ok(None);
    };
    let Some(age) = prompt_number(input, "Age: ")? else {
        return Ok(None);
    };
    Ok(Some(Person::new(id, name.trim(), age)))
}

fn prompt(input: &mut Input<'_>, label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    Ok(input.next().transpose()?)
}

fn prompt_number(input: &mut Input<'_>, label: &str) -> Result<Option<i32>> {
    let Some(line) = prompt(input, label)? else {
        return Ok(None);
    };
    match line.trim().parse() {
        Ok(n) => Ok(Some(n)),
        Err(_) => {
            println!("'{}' is not a number.", line.trim());
            Ok(None)
        }
    }
}
