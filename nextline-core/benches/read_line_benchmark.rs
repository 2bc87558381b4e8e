//! Benchmarks for line reading throughput across chunk sizes

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nextline_core::{LineReader, LineStream, ReaderConfig, SourceTable};
use std::hint::black_box;
use std::io::Cursor;

/// Generate test text of roughly `size_kb` kilobytes
fn generate_test_text(size_kb: usize) -> Vec<u8> {
    let base_text = b"The quick brown fox jumps over the lazy dog.\nShort\n\n";
    let repetitions = size_kb * 1024 / base_text.len();
    base_text.repeat(repetitions)
}

fn benchmark_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_line_chunk_size");
    let text = generate_test_text(256);
    group.throughput(Throughput::Bytes(text.len() as u64));

    for chunk_size in [1i64, 42, 4096, 65536] {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let config = ReaderConfig::builder()
                        .chunk_size(chunk_size)
                        .build()
                        .unwrap();
                    let mut reader = LineReader::with_config(config, SourceTable::new());
                    let fd = reader.source_mut().insert(Cursor::new(text.clone()));
                    let mut count = 0usize;
                    while let Some(line) = reader.read_line(fd).unwrap() {
                        count += black_box(line).len();
                    }
                    count
                });
            },
        );
    }

    group.finish();
}

fn benchmark_single_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_stream");
    let text = generate_test_text(1024);
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("1MB_chunk_4096", |b| {
        b.iter(|| {
            LineStream::with_chunk_size(Cursor::new(black_box(text.clone())), 4096)
                .map(|line| line.unwrap().len())
                .sum::<usize>()
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_chunk_sizes, benchmark_single_stream);
criterion_main!(benches);
