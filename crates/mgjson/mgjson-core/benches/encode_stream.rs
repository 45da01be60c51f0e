use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mgjson_core::{Config, Document, Sample, StreamEncoder, StreamOptions};

fn telemetry(len: usize) -> Vec<Sample> {
    (0..len)
        .map(|i| {
            let t = i as f64 / 60.0;
            Sample::new(t, (t * 3.0).sin() * 40.0 + 20.0)
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let encoder = StreamEncoder::from_config(&Config::default());
    let mut group = c.benchmark_group("encode_stream");
    for len in [60usize, 3_600, 36_000] {
        let samples = telemetry(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &samples, |b, samples| {
            b.iter(|| {
                encoder
                    .encode("speed", black_box(samples.clone()), StreamOptions::default())
                    .expect("encode")
            })
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut doc = Document::new();
    doc.add_property("rider", "Alex").expect("property");
    doc.add_stream("speed", telemetry(3_600)).expect("stream");
    c.bench_function("render_document_3600", |b| {
        b.iter(|| black_box(doc.serialize()).to_json_string().expect("render"))
    });
}

criterion_group!(benches, bench_encode, bench_render);
criterion_main!(benches);
