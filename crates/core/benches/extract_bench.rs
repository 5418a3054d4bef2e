use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use postab_core::api::{BatchOptions, PageWords, extract_pages};
use postab_core::table::{ColumnSet, ExtractSettings, RawWord, Word, extract_positional_table};

/// A synthetic borelog page: `rows` rows with one word per preset column,
/// each row's words jittered around its baseline.
fn synthetic_page(rows: usize) -> Vec<Word> {
    let columns = ColumnSet::borelog_preset();
    let mut words = Vec::with_capacity(rows * columns.len());
    for r in 0..rows {
        let base = 165.0 + r as f64 * 12.0;
        for (c, spec) in columns.specs().enumerate() {
            let jitter = ((r * 7 + c * 3) % 5) as f64 * 0.3;
            words.push(Word::new(format!("r{r}c{c}"), spec.xmin + 1.0, base + jitter));
        }
    }
    words
}

fn bench_extract_page(c: &mut Criterion) {
    let columns = ColumnSet::borelog_preset();
    let settings = ExtractSettings::new(2.0, 160.0, 100_000.0);

    let mut group = c.benchmark_group("extract_positional_table");
    for rows in [30usize, 300, 3000] {
        let words = synthetic_page(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &words, |b, words| {
            b.iter(|| extract_positional_table(black_box(words), &columns, &settings))
        });
    }
    group.finish();
}

fn bench_extract_pages(c: &mut Criterion) {
    let columns = ColumnSet::borelog_preset();
    let settings = ExtractSettings::new(2.0, 160.0, 570.0);
    let pages: Vec<PageWords> = (1..=64)
        .map(|n| PageWords {
            page_number: n,
            words: synthetic_page(30).into_iter().map(RawWord::from).collect(),
        })
        .collect();

    c.bench_function("extract_pages_64", |b| {
        b.iter(|| {
            extract_pages(
                black_box(&pages),
                &columns,
                &settings,
                &BatchOptions::default(),
            )
        })
    });
}

criterion_group!(benches, bench_extract_page, bench_extract_pages);
criterion_main!(benches);
