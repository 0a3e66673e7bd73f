use core::num::NonZeroU32;
use core::sync::atomic::AtomicBool;

use criterion::{criterion_group, criterion_main, Criterion};
use fractallib::{palette_from_hex, render, Driver, Fractal, RenderSettings, View};

fn inputs(width: u32, height: u32, zoom: f64, max_iter: u32) -> (Fractal, View, NonZeroU32, NonZeroU32) {
    let fractal = Fractal::Mandelbrot {
        max_iter: NonZeroU32::new(max_iter).unwrap(),
    };
    let distance_imag = 3.0 / 2.0_f64.powf(zoom);
    let distance_real = 1.5 * distance_imag;
    let view = View::new((-0.75 - distance_real / 2.0, -distance_imag / 2.0), (distance_real, distance_imag));
    (fractal, view, NonZeroU32::new(width).unwrap(), NonZeroU32::new(height).unwrap())
}

fn fast(c: &mut Criterion) {
    let palette = palette_from_hex(256, &["#000000", "#ffffff"], None).unwrap();
    let settings = RenderSettings::default();
    let cancel = AtomicBool::new(false);
    let mut group = c.benchmark_group("fast renders");

    for &(width, height) in &[(320, 214), (480, 320), (720, 480)] {
        let (fractal, view, w, h) = inputs(width, height, 0.0, 255);
        group.bench_function(format!("{width}x{height} vectorized render of full set"), |b| {
            b.iter(|| render(&fractal, view, &palette, &settings, w, h, Driver::Vectorized, None, &cancel));
        });
        group.bench_function(format!("{width}x{height} sqem-recursive render of full set"), |b| {
            b.iter(|| render(&fractal, view, &palette, &settings, w, h, Driver::SqemRecursive, None, &cancel));
        });
    }
}

fn slow(c: &mut Criterion) {
    let palette = palette_from_hex(256, &["#000000", "#ffffff"], None).unwrap();
    let settings = RenderSettings::default();
    let cancel = AtomicBool::new(false);
    let mut group = c.benchmark_group("slow renders");
    group.sample_size(10);

    let (fractal, view, w, h) = inputs(1440, 960, 0.0, 500);
    group.bench_function(format!("{w}x{h} render of full set", w = w.get(), h = h.get()), |b| {
        b.iter(|| render(&fractal, view, &palette, &settings, w, h, Driver::Vectorized, None, &cancel));
    });

    let (fractal, view, w, h) = inputs(1080, 720, 12.0, 1000);
    group.bench_function("zoomed deep render: 'Mandelsun'", |b| {
        b.iter(|| render(&fractal, view, &palette, &settings, w, h, Driver::SqemRecursive, None, &cancel));
    });
}

criterion_group!(benches, fast, slow);
criterion_main!(benches);
