//! Insertion and query benchmarks on a synthetic corpus.
//!
//! Run with: `cargo bench`
//! Save baseline: `cargo bench -- --save-baseline main`
//! Compare: `cargo bench -- --baseline main`

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sxi::index::{RecordId, SuffixIndex, SuffixIndexConfig};

/// Deterministic pseudo-words; content only needs to be varied enough to
/// spread keys across the list.
fn synthetic_records(count: usize) -> Vec<(RecordId, String)> {
    let words = [
        "quartz", "sphinx", "jumped", "wizard", "liquor", "boxing", "vowels", "zephyr",
    ];
    (0..count)
        .map(|i| {
            let text = format!(
                "{} {} {} {}",
                words[i % words.len()],
                words[(i / 3 + 1) % words.len()],
                words[(i / 7 + 2) % words.len()],
                i
            );
            ((i + 1) as RecordId, text)
        })
        .collect()
}

fn build(records: &[(RecordId, String)]) -> SuffixIndex {
    let mut index = SuffixIndex::new(SuffixIndexConfig {
        seed: Some(42),
        ..Default::default()
    });
    for (id, text) in records {
        index.insert_record(*id, text).unwrap();
    }
    index
}

fn bench_insert(c: &mut Criterion) {
    let records = synthetic_records(200);
    c.bench_function("insert_200_records", |b| {
        b.iter(|| black_box(build(&records)))
    });
}

fn bench_query(c: &mut Criterion) {
    let records = synthetic_records(500);
    let index = build(&records);
    c.bench_function("query_common_substring", |b| {
        b.iter(|| black_box(index.query("qua", 20).unwrap()))
    });
    c.bench_function("query_absent_substring", |b| {
        b.iter(|| black_box(index.query("missingno", 20).unwrap()))
    });
}

fn bench_delete_reinsert(c: &mut Criterion) {
    let records = synthetic_records(200);
    c.bench_function("delete_and_reinsert_record", |b| {
        let mut index = build(&records);
        let (id, text) = records[100].clone();
        b.iter(|| {
            index.delete_record(id, &text).unwrap();
            index.insert_record(id, &text).unwrap();
        })
    });
}

criterion_group!(benches, bench_insert, bench_query, bench_delete_reinsert);
criterion_main!(benches);
