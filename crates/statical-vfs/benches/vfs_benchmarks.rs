//! Benchmarks for building and browsing the static file tree.
//!
//! Measures tree construction from extracted entries, path lookup and
//! paged directory listing across archive sizes.
//!
//! # Run Benchmarks
//!
//! ```bash
//! cargo bench --bench vfs_benchmarks
//! ```
//!
//! # View Results
//!
//! ```bash
//! open target/criterion/report/index.html
//! ```

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use statical_archive::{ArchiveEntry, FlatEntries};
use statical_vfs::{StaticFs, read_dir_paged};
use std::hint::black_box;

/// Flat entries spread over `dirs` directories, two levels deep, with no
/// directory records so every ancestor has to be synthesized.
fn site_entries(files: usize, dirs: usize) -> FlatEntries {
    (0..files)
        .map(|i| {
            let name = format!("page{i}.html");
            let path = format!("/site/section{}/part{}/{name}", i % dirs, i % 3);
            let body = format!("<html><body>page {i}</body></html>").into_bytes();
            (path, ArchiveEntry::file(name, body))
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for files in [10, 100, 1_000] {
        let entries = site_entries(files, 10);
        group.bench_with_input(BenchmarkId::new("from_flat_entries", files), &entries, |b, entries| {
            b.iter_batched(
                || entries.clone(),
                |entries| StaticFs::from_flat_entries(black_box(entries)).unwrap(),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_open(c: &mut Criterion) {
    let fs = StaticFs::from_flat_entries(site_entries(1_000, 10)).unwrap();
    let mut group = c.benchmark_group("open");

    group.bench_function("hit", |b| {
        b.iter(|| fs.open(black_box("/site/section4/part1/page994.html")).unwrap());
    });
    group.bench_function("double_slash", |b| {
        b.iter(|| fs.open(black_box("/site//section4//part1/page994.html")).unwrap());
    });
    group.bench_function("miss", |b| {
        b.iter(|| fs.open(black_box("/site/section4/part1/missing.html")).unwrap_err());
    });

    group.finish();
}

fn bench_read_dir(c: &mut Criterion) {
    let fs = StaticFs::from_flat_entries(site_entries(3_000, 1)).unwrap();
    let mut group = c.benchmark_group("read_dir");

    for page in [0, 10, 100] {
        group.bench_with_input(BenchmarkId::new("paged", page), &page, |b, &page| {
            b.iter(|| read_dir_paged(&fs, black_box("/site/section0/part0"), page).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_open, bench_read_dir);
criterion_main!(benches);
