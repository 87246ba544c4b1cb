//! Insertion and traversal benchmarks for the file-backed tree.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tempfile::tempdir;
use treefile::codec::{compare_by_id, Person, PersonCodec};
use treefile::{FileTree, StoreConfig};

const KEYS: i32 = 500;

/// Keys in a scrambled but repeatable order so the tree stays bushy.
fn scrambled_keys() -> Vec<i32> {
    (0..KEYS).map(|i| (i * 7919) % KEYS).collect()
}

fn bench_insert(c: &mut Criterion) {
    let keys = scrambled_keys();

    c.bench_function("insert_500_scrambled", |b| {
        b.iter_batched(
            || tempdir().unwrap(),
            |dir| {
                let mut tree = FileTree::open_with_config(
                    dir.path().join("bench.db"),
                    PersonCodec,
                    compare_by_id,
                    StoreConfig { sync_writes: false },
                )
                .unwrap();
                for &id in &keys {
                    tree.insert(Person::new(id, "bench", 1)).unwrap();
                }
                dir
            },
            BatchSize::PerIteration,
        )
    });
}

fn bench_traverse(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let mut tree = FileTree::open_with_config(
        dir.path().join("bench.db"),
        PersonCodec,
        compare_by_id,
        StoreConfig { sync_writes: false },
    )
    .unwrap();
    for id in scrambled_keys() {
        tree.insert(Person::new(id, "bench", 1)).unwrap();
    }

    c.bench_function("traverse_500", |b| {
        b.iter(|| {
            for person in tree.traverse() {
                black_box(person.unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_insert, bench_traverse);
criterion_main!(benches);
