use color_space::{make_linear, rgb_to_lab, rgb_u8, sample_palette};
use criterion::{criterion_group, criterion_main, Bencher, Criterion, Throughput};

fn bench_color_space(c: &mut Criterion) {
    const MAG: u32 = 100_000;
    let mut group = c.benchmark_group("color related stuff");
    group.throughput(Throughput::Elements(MAG.into()));

    let positions: Vec<f64> = (0..MAG).map(|v| f64::from(v) / f64::from(MAG)).collect();
    let positions_ref: &[f64] = &positions;
    let palette = make_linear(256, &[[0.0, 0.0, 0.2], [1.0, 0.9, 0.5]], Some([0.0, 0.0, 0.0]));

    group.bench_with_input(
        "palette sampling",
        positions_ref,
        |b: &mut Bencher, positions: &[f64]| {
            b.iter(|| {
                positions
                    .iter()
                    .map(|t| std::hint::black_box(sample_palette(&palette, *t)))
                    .collect::<Vec<_>>()
            })
        },
    );

    let colors: Vec<[f64; 3]> = positions.iter().map(|t| sample_palette(&palette, *t)).collect();
    let colors_ref: &[[f64; 3]] = &colors;

    group.bench_with_input(
        "rgb to u8 quantization",
        colors_ref,
        |b: &mut Bencher, colors: &[[f64; 3]]| {
            b.iter(|| {
                colors
                    .iter()
                    .map(|c| std::hint::black_box(rgb_u8(*c)))
                    .collect::<Vec<_>>()
            })
        },
    );

    group.bench_with_input(
        "rgb to lab conversion",
        colors_ref,
        |b: &mut Bencher, colors: &[[f64; 3]]| {
            b.iter(|| {
                colors
                    .iter()
                    .map(|c| std::hint::black_box(rgb_to_lab(*c)))
                    .collect::<Vec<_>>()
            })
        },
    );

    group.finish();
}

criterion_group!(benches, bench_color_space);
criterion_main!(benches);
