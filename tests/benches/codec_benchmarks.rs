//! # Cipher-Post Codec Benchmarks
//!
//! | Operation | Dominant cost |
//! |-----------|---------------|
//! | encrypt | 100,000 PBKDF2 rounds |
//! | decrypt | 100,000 PBKDF2 rounds |
//! | Envelope::from_json | JSON parse, no crypto |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::time::Duration;

use cp_01_envelope_codec::{decrypt, encrypt, Envelope};

const PASSWORD: &str = "benchmark password";

fn random_text(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| rng.gen_range(b'a'..=b'z') as char)
        .collect()
}

fn bench_seal_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("cp-01-seal-open");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    for len in [16usize, 1024] {
        let text = random_text(len);
        let envelope = encrypt(&text, PASSWORD).unwrap();
        group.throughput(Throughput::Bytes(len as u64));

        group.bench_with_input(BenchmarkId::new("encrypt", len), &text, |b, text| {
            b.iter(|| encrypt(black_box(text), black_box(PASSWORD)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("decrypt", len), &envelope, |b, envelope| {
            b.iter(|| decrypt(black_box(envelope), black_box(PASSWORD)).unwrap())
        });
    }

    group.finish();
}

fn bench_envelope_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("cp-01-envelope-parse");

    for len in [16usize, 4096] {
        let json = encrypt(&random_text(len), PASSWORD)
            .unwrap()
            .to_json()
            .unwrap();
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::new("from_json", len), &json, |b, json| {
            b.iter(|| Envelope::from_json(black_box(json)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_seal_open, bench_envelope_parse);
criterion_main!(benches);
