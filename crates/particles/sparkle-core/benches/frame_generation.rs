use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sparkle_core::shapes::{circle, line, spiral};
use sparkle_core::{chain_frames, morph_frames, Easing, Location, ParticlePath, Shape};

fn bench_morph(c: &mut Criterion) {
    let from = circle(2.0, 64).sample();
    let to = spiral(1.5, 4, 48).sample();
    c.bench_function("morph_frames circle->spiral x40", |b| {
        b.iter(|| morph_frames(black_box(&from), black_box(&to), 40, Easing::EaseInOut))
    });
}

fn bench_chain(c: &mut Criterion) {
    let samples = vec![
        circle(2.0, 64).sample(),
        spiral(1.5, 4, 48).sample(),
        line(3.0, 32).sample(),
        circle(0.5, 16).sample(),
    ];
    let transitions = vec![None, Some(10), None];
    c.bench_function("chain_frames 4 shapes x120", |b| {
        b.iter(|| chain_frames(black_box(&samples), &transitions, 120, Easing::Linear))
    });
}

fn bench_path(c: &mut Criterion) {
    let path = ParticlePath::between(
        Location::new(0.0, 64.0, 0.0),
        Location::new(100.0, 80.0, -20.0).with_rotation(180.0, 45.0),
    )
    .ease(Easing::EaseOut);
    c.bench_function("path frames x400", |b| {
        b.iter(|| path.generate_frames(black_box(400)))
    });
}

criterion_group!(benches, bench_morph, bench_chain, bench_path);
criterion_main!(benches);
