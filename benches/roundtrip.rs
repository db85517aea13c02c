use binfile::BinaryFile;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::io::Cursor;

fn bench_integer_roundtrip(c: &mut Criterion) {
    c.bench_function("integer_roundtrip_4_bytes", |b| {
        let mut file = BinaryFile::new(Cursor::new(Vec::with_capacity(8)));
        b.iter(|| {
            file.goto(0).unwrap();
            file.write_integer(black_box(-123_456_789), 4).unwrap();
            file.goto(0).unwrap();
            black_box(file.read_integer(4).unwrap())
        });
    });
}

fn bench_string_roundtrip(c: &mut Criterion) {
    let payload = "The quick brown fox jumps over the lazy dog".repeat(8);
    c.bench_function("string_roundtrip_344_bytes", |b| {
        let mut file = BinaryFile::new(Cursor::new(Vec::with_capacity(512)));
        b.iter(|| {
            file.goto(0).unwrap();
            file.write_string(black_box(&payload)).unwrap();
            file.goto(0).unwrap();
            black_box(file.read_string().unwrap())
        });
    });
}

criterion_group!(benches, bench_integer_roundtrip, bench_string_roundtrip);
criterion_main!(benches);
