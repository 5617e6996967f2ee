//! Output Gate Per-Sample Cost Benchmark
//!
//! The gate sits on the per-sample hot path between decoder and sink, so
//! its overhead has to stay trivial next to decoding. Measures pass-through
//! and each special mode over 10 seconds of 44.1kHz stereo.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tagdeck_core::audio::AudioFrame;
use tagdeck_core::output::{NullSink, OutputGate};

const SAMPLES: u32 = 441_000;

fn bench_gate_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("output_gate");

    group.bench_function(BenchmarkId::new("mode", "normal"), |b| {
        let mut gate = OutputGate::new(NullSink);
        b.iter(|| {
            for i in 0..SAMPLES {
                let s = (i as f32 * 0.001).sin() * 0.25;
                black_box(gate.consume_sample(AudioFrame::new(s, s)));
            }
        });
    });

    group.bench_function(BenchmarkId::new("mode", "interrupt"), |b| {
        let mut gate = OutputGate::new(NullSink);
        b.iter(|| {
            gate.set_timeout(SAMPLES);
            for i in 0..SAMPLES {
                let s = (i as f32 * 0.001).sin() * 0.25;
                black_box(gate.consume_sample(AudioFrame::new(s, s)));
            }
        });
    });

    group.bench_function(BenchmarkId::new("mode", "fade_out"), |b| {
        let mut gate = OutputGate::new(NullSink);
        b.iter(|| {
            gate.fade_out(SAMPLES);
            for i in 0..SAMPLES {
                let s = (i as f32 * 0.001).sin() * 0.25;
                black_box(gate.consume_sample(AudioFrame::new(s, s)));
            }
        });
    });

    group.bench_function(BenchmarkId::new("mode", "swallow"), |b| {
        let mut gate = OutputGate::new(NullSink);
        b.iter(|| {
            gate.set_swallow(SAMPLES);
            for i in 0..SAMPLES {
                let s = (i as f32 * 0.001).sin() * 0.25;
                black_box(gate.consume_sample(AudioFrame::new(s, s)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_gate_modes);
criterion_main!(benches);
