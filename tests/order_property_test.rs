//! Property tests: the file-backed tree against the in-memory tree.
//!
//! Both trees run the same insertion algorithm, so for any key sequence they
//! must agree on which inserts fail and on the traversal order.

use proptest::prelude::*;
use tempfile::tempdir;
use treefile::codec::{compare_by_id, Person, PersonCodec};
use treefile::{FileTree, MemoryTree, StoreConfig};

fn person(id: i32) -> Person {
    Person::new(id, format!("p{id}"), id.rem_euclid(120))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn traversal_matches_memory_tree(keys in prop::collection::vec(-500i32..500, 0..60)) {
        let dir = tempdir().unwrap();
        let mut file_tree = FileTree::open_with_config(
            dir.path().join("prop.db"),
            PersonCodec,
            compare_by_id,
            StoreConfig { sync_writes: false },
        )
        .unwrap();
        let mut memory_tree = MemoryTree::new(compare_by_id);

        for &id in &keys {
            let on_file = file_tree.insert(person(id));
            let in_memory = memory_tree.insert(person(id));
            prop_assert_eq!(
                on_file.map_err(|e| e.is_duplicate_key()),
                in_memory.map_err(|e| e.is_duplicate_key())
            );
        }

        let from_file: Vec<Person> = file_tree.traverse().map(|p| p.unwrap()).collect();
        let from_memory: Vec<Person> = memory_tree.traverse().cloned().collect();
        prop_assert_eq!(&from_file, &from_memory);

        // Strictly ascending: no duplicates, no disorder.
        for pair in from_file.windows(2) {
            prop_assert!(pair[0].id < pair[1].id);
        }

        // One block per distinct key.
        prop_assert_eq!(file_tree.node_count().unwrap(), memory_tree.len() as u64);
    }

    #[test]
    fn first_value_reads_only_leftmost_path(keys in prop::collection::hash_set(0i32..1000, 1..40)) {
        let order: Vec<i32> = keys.into_iter().collect();
        let dir = tempdir().unwrap();
        let mut tree = FileTree::open_with_config(
            dir.path().join("lazy.db"),
            PersonCodec,
            compare_by_id,
            StoreConfig { sync_writes: false },
        )
        .unwrap();
        for &id in &order {
            tree.insert(person(id)).unwrap();
        }

        // A key lies on the leftmost path exactly when it is smaller than
        // every key inserted before it.
        let mut leftmost_path = 0u64;
        let mut smallest_so_far = i32::MAX;
        for &id in &order {
            if id < smallest_so_far {
                smallest_so_far = id;
                leftmost_path += 1;
            }
        }

        let before = tree.stats();
        let smallest = tree.traverse().next().unwrap().unwrap();
        let reads = tree.stats().since(&before).blocks_read;

        prop_assert_eq!(smallest.id, smallest_so_far);
        prop_assert_eq!(reads, leftmost_path);
    }
}
