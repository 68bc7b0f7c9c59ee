use criterion::{criterion_group, criterion_main, Criterion};
use google_location_sharing::decoder::decode_response;

fn criterion_benchmark(c: &mut Criterion) {
    let body = include_str!("../src/decoder/fixtures/shared_people.txt");

    c.bench_function("decodes shared people", |b| b.iter(|| {
        decode_response(body).ok();
    }));
}

criterion_group!{
    name = benches;
    config = Criterion::default().sample_size(100);
    targets = criterion_benchmark
}

criterion_main!(benches);
