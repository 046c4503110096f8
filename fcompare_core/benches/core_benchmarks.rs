use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fcompare_common::DiffAlgorithm;
use fcompare_core::{ComparisonEngine, SequenceDiffer};
use std::fs;
use tempfile::TempDir;

// Helper to build a document and a lightly edited copy of it
fn create_line_pair(count: usize, edit_every: usize) -> (Vec<String>, Vec<String>) {
    let left: Vec<String> = (0..count).map(|i| format!("row {i},value {}", i * 7)).collect();
    let right = left
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i % edit_every == 0 {
                format!("{line} (edited)")
            } else {
                line.clone()
            }
        })
        .collect();
    (left, right)
}

fn bench_sequence_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_diff");

    for count in [100, 1000, 3000] {
        let (left, right) = create_line_pair(count, 50);

        for algorithm in [DiffAlgorithm::Lcs, DiffAlgorithm::Myers, DiffAlgorithm::Patience] {
            let differ = SequenceDiffer::new(algorithm);
            group.bench_with_input(
                BenchmarkId::new(format!("{algorithm:?}"), count),
                &count,
                |b, _| {
                    b.iter(|| {
                        let entries = differ.diff(black_box(&left), black_box(&right));
                        black_box(entries);
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_compare_text_files(c: &mut Criterion) {
    c.bench_function("compare_text_files_2000_lines", |b| {
        let temp = TempDir::new().unwrap();
        let (left, right) = create_line_pair(2000, 100);
        let left_path = temp.path().join("left.txt");
        let right_path = temp.path().join("right.txt");
        fs::write(&left_path, left.join("\n")).unwrap();
        fs::write(&right_path, right.join("\n")).unwrap();

        let engine = ComparisonEngine::new();
        b.iter(|| {
            let result = engine.compare(black_box(&left_path), black_box(&right_path)).unwrap();
            black_box(result);
        });
    });
}

fn bench_identical_binary(c: &mut Criterion) {
    c.bench_function("compare_identical_binary_1mb", |b| {
        let temp = TempDir::new().unwrap();
        let data: Vec<u8> = (0..1024 * 1024).map(|i| (i % 251) as u8).collect();
        let left_path = temp.path().join("left.bin");
        let right_path = temp.path().join("right.bin");
        fs::write(&left_path, &data).unwrap();
        fs::write(&right_path, &data).unwrap();

        let engine = ComparisonEngine::new();
        b.iter(|| {
            let result = engine.compare(black_box(&left_path), black_box(&right_path)).unwrap();
            black_box(result);
        });
    });
}

criterion_group!(
    benches,
    bench_sequence_diff,
    bench_compare_text_files,
    bench_identical_binary
);
criterion_main!(benches);
