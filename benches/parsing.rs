//! Benchmarks for chatpluck classification, cataloging and extraction.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- extract`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatpluck::Transcript;
use chatpluck::core::output::Document;
use chatpluck::core::{SenderCatalog, extract_checked, extract_messages};
use chatpluck::parsing::{Grammar, classify_line};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Records from four senders with a system notice and a continuation line
/// every tenth record.
fn generate_transcript(count: usize) -> String {
    const SENDERS: [&str; 4] = ["Alice", "Bob", "Mary Ann", "Иван"];
    let mut lines = Vec::with_capacity(count + count / 5);
    for i in 0..count {
        let sender = SENDERS[i % SENDERS.len()];
        let hour = (i / 60) % 12 + 1;
        let minute = i % 60;
        let marker = if (i / 720) % 2 == 0 { "AM" } else { "PM" };
        lines.push(format!(
            "1/15/24, {}:{:02} {} - {}: Message number {} with: a colon",
            hour, minute, marker, sender, i
        ));
        if i % 10 == 9 {
            lines.push("Bob added Carol".to_string());
            lines.push("continued from the previous line".to_string());
        }
    }
    lines.join("\n")
}

// =============================================================================
// Classification Benchmarks
// =============================================================================

fn bench_classify_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_line");
    let cases = [
        ("record", "12/5/24, 9:41 PM - Alice: Hello there, how are you: fine"),
        ("notice", "Messages and calls are end-to-end encrypted."),
        ("near_miss", "12/5/24, 9:41 PM - Alice changed the group description"),
    ];

    for (name, line) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), line, |b, line| {
            b.iter(|| black_box(classify_line(black_box(line))));
        });
    }
    group.finish();
}

// =============================================================================
// Catalog and Extraction Benchmarks
// =============================================================================

fn bench_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let transcript = Transcript::from_text(&generate_transcript(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &transcript, |b, t| {
            b.iter(|| black_box(SenderCatalog::from_transcript(black_box(t))));
        });
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let transcript = Transcript::from_text(&generate_transcript(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("timestamped", size),
            &transcript,
            |b, t| {
                b.iter(|| black_box(extract_messages(black_box(t), "Alice", Grammar::Timestamped)));
            },
        );
        group.bench_with_input(BenchmarkId::new("legacy", size), &transcript, |b, t| {
            b.iter(|| black_box(extract_messages(black_box(t), "Alice", Grammar::Legacy)));
        });
    }
    group.finish();
}

// =============================================================================
// Full Pipeline Benchmark
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");

    for size in [1_000_usize, 10_000] {
        let text = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let transcript = Transcript::from_text(black_box(text));
                let catalog = SenderCatalog::from_transcript(&transcript);
                let extraction = extract_checked(&transcript, &catalog, "Mary Ann").unwrap();
                black_box(Document::from_extraction(&extraction, None).to_text())
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_classify_line,
    bench_catalog,
    bench_extract,
    bench_full_pipeline,
);

criterion_main!(benches);
