use core::num::NonZeroU32;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use itertools::Itertools;
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;

use crate::compositor::{composite, ColorPar};
use crate::error::{RenderOutcome, ResourceError};
use crate::fractal::{Fractal, RenderSettings};
use crate::kernel::{self, KernelParams};
use crate::u32_and_usize::U32AndUsize;
use crate::view::View;
use color_space::Palette;
use image::{ImageBuffer, Rgb, RgbImage};

/// Which of the three driver strategies lays out the render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Vectorized,
    SqemRecursive,
    SqemLinear,
}

/// A progress update emitted by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    pub drawing: bool,
    pub progress: f64,
}

/// Renders `fractal` over `view` at `width x height`, using `palette` and
/// `settings`, with the given driver strategy.
///
/// `on_status`, if given, is called between work items with a progress
/// update. For the vectorized and iterative SQEM drivers this is always the
/// calling thread; the recursive SQEM driver calls it from whichever worker
/// thread finishes a leaf rectangle, so it must tolerate concurrent calls.
/// `cancel` is polled cooperatively; once it reads `true` the renderer stops
/// scheduling new work and returns a `Partial` outcome with whatever has
/// been drawn so far.
///
/// # Errors
/// Returns [`ResourceError::AllocationFailed`] if the oversampled buffer
/// (`width * oversampling` by `height * oversampling`, three bytes per
/// pixel) does not fit in this platform's `usize`.
#[allow(clippy::too_many_arguments)]
pub fn render(
    fractal: &Fractal,
    view: View,
    palette: &Palette,
    settings: &RenderSettings,
    width: NonZeroU32,
    height: NonZeroU32,
    driver: Driver,
    on_status: Option<&(dyn Fn(Status) + Sync)>,
    cancel: &AtomicBool,
) -> Result<RenderOutcome, ResourceError> {
    let view = view.with_aspect_ratio(width, height);
    let factor = settings.oversampling.factor();
    let alloc_failed = || ResourceError::AllocationFailed {
        width: width.get(),
        height: height.get(),
    };

    let ow_val = width.get().checked_mul(factor).ok_or_else(alloc_failed)?;
    let oh_val = height.get().checked_mul(factor).ok_or_else(alloc_failed)?;
    let ow = NonZeroU32::new(ow_val).ok_or_else(alloc_failed)?;
    let oh = NonZeroU32::new(oh_val).ok_or_else(alloc_failed)?;

    // Confirm the oversampled dimensions, and the byte buffer they imply,
    // fit in `usize` before any pixel work starts.
    let ow_fits: U32AndUsize = ow.try_into().map_err(|_| alloc_failed())?;
    let oh_fits: U32AndUsize = oh.try_into().map_err(|_| alloc_failed())?;
    let ow_usize: usize = ow_fits.into();
    let oh_usize: usize = oh_fits.into();
    ow_usize
        .checked_mul(oh_usize)
        .and_then(|px| px.checked_mul(3))
        .ok_or_else(alloc_failed)?;

    let max_iter = settings.effective_max_iter(fractal.max_iter());
    let kparams = KernelParams {
        max_iter: max_iter.get(),
        bailout: settings.bailout(),
        orbits_on: settings.options.orbits(),
        need_dz: settings.needs_dz(),
        stripe_s: f64::from(settings.stripes),
        cardioid_check: matches!(fractal, Fractal::Mandelbrot { .. }),
    };
    let color_par = ColorPar {
        stripe_s: f64::from(settings.stripes),
        step_s: f64::from(settings.steps),
        ncycle: settings.ncycle,
        diag: view.size.0.hypot(view.size.1),
    };

    let eval = |x: u32, y: u32, hist: &mut Vec<(f64, f64)>| -> [u8; 3] {
        let c = view.map_xy(x, y, ow, oh);
        let out = match fractal {
            Fractal::Mandelbrot { .. } => kernel::mandelbrot(c, &kparams, hist),
            Fractal::Julia { seed, .. } => kernel::julia(c, *seed, &kparams, hist),
        };
        composite(&out, palette, settings, &color_par, max_iter.get())
    };

    let (buffer, completed, cancelled) = match driver {
        Driver::Vectorized => render_vectorized(ow, oh, &eval, on_status, cancel),
        Driver::SqemRecursive => render_sqem_recursive(ow, oh, &eval, on_status, cancel),
        Driver::SqemLinear => render_sqem_linear(ow, oh, &eval, on_status, cancel),
    };

    let downsampled = downsample(&buffer, ow, oh, width, height, factor);
    let flipped = flip_vertical(downsampled);

    Ok(if cancelled {
        RenderOutcome::Partial {
            image: flipped,
            completed_pixels: completed,
        }
    } else {
        RenderOutcome::Complete(flipped)
    })
}

type Eval<'a> = dyn Fn(u32, u32, &mut Vec<(f64, f64)>) -> [u8; 3] + Sync + 'a;

fn render_vectorized(ow: NonZeroU32, oh: NonZeroU32, eval: &Eval<'_>, on_status: Option<&(dyn Fn(Status) + Sync)>, cancel: &AtomicBool) -> (Vec<u8>, usize, bool) {
    let w = ow.get() as usize;
    let h = oh.get() as usize;
    let mut buffer = vec![0u8; w * h * 3];
    let completed = AtomicUsize::new(0);
    let cancelled = AtomicBool::new(false);

    buffer.par_chunks_mut(w * 3).enumerate().for_each(|(y, row)| {
        if cancel.load(Ordering::Acquire) {
            cancelled.store(true, Ordering::Relaxed);
            return;
        }
        let mut hist = Vec::new();
        for x in 0..ow.get() {
            let color = eval(x, y as u32, &mut hist);
            let offset = x as usize * 3;
            row[offset..offset + 3].copy_from_slice(&color);
        }
        completed.fetch_add(w, Ordering::Relaxed);
        if let Some(cb) = on_status {
            cb(Status {
                drawing: true,
                progress: (y as f64 + 1.0) / h as f64,
            });
        }
    });

    (buffer, completed.load(Ordering::Relaxed), cancelled.load(Ordering::Relaxed))
}

/// An image patch produced by one SQEM work item, merged into the full
/// buffer once every sibling has finished.
struct Patch {
    x1: u32,
    y1: u32,
    width: u32,
    data: Vec<u8>,
}

impl Patch {
    /// Copies this patch into `full`, an image of `full_width` pixels whose
    /// origin is at `(origin_x, origin_y)` in this patch's own coordinates.
    fn write_into(&self, full: &mut [u8], full_width: u32, origin_x: u32, origin_y: u32) {
        let h = self.data.len() / (self.width as usize * 3);
        for row in 0..h {
            let src = &self.data[row * self.width as usize * 3..(row + 1) * self.width as usize * 3];
            let dst_y = (self.y1 - origin_y) as usize + row;
            let dst_start = (dst_y * full_width as usize + (self.x1 - origin_x) as usize) * 3;
            full[dst_start..dst_start + self.width as usize * 3].copy_from_slice(src);
        }
    }
}

#[derive(Clone)]
struct Edge {
    colors: Vec<[u8; 3]>,
}

impl Edge {
    fn uniform(&self) -> Option<[u8; 3]> {
        if self.colors.is_empty() {
            return None;
        }
        if self.colors.iter().all_equal() {
            Some(self.colors[0])
        } else {
            None
        }
    }

    fn split(&self, at: usize) -> (Self, Self) {
        (
            Edge { colors: self.colors[..=at].to_vec() },
            Edge { colors: self.colors[at..].to_vec() },
        )
    }
}

fn sample_horizontal(eval: &Eval<'_>, hist: &mut Vec<(f64, f64)>, y: u32, x1: u32, x2: u32) -> Edge {
    Edge {
        colors: (x1..=x2).map(|x| eval(x, y, hist)).collect(),
    }
}

fn sample_vertical(eval: &Eval<'_>, hist: &mut Vec<(f64, f64)>, x: u32, y1: u32, y2: u32) -> Edge {
    Edge {
        colors: (y1..=y2).map(|y| eval(x, y, hist)).collect(),
    }
}

fn square_len(x1: u32, y1: u32, x2: u32, y2: u32) -> u32 {
    (x2 - x1).min(y2 - y1)
}

fn report(on_status: Option<&(dyn Fn(Status) + Sync)>, completed: &AtomicUsize, total: f64) {
    if let Some(cb) = on_status {
        cb(Status {
            drawing: true,
            progress: (completed.load(Ordering::Relaxed) as f64 / total).min(1.0),
        });
    }
}

/// Computes the four outer edges of `(x1,y1)-(x2,y2)` and writes them into a
/// freshly allocated patch, then fills the interior either uniformly,
/// vectorized, or by recursive subdivision.
#[allow(clippy::too_many_arguments)]
fn sqem_rect(
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
    top: Edge,
    bottom: Edge,
    left: Edge,
    right: Edge,
    eval: &Eval<'_>,
    cancel: &AtomicBool,
    completed: &AtomicUsize,
    total: f64,
    on_status: Option<&(dyn Fn(Status) + Sync)>,
    use_rayon_join: bool,
    max_len: u32,
    min_len: u32,
) -> Patch {
    let width = x2 - x1 + 1;
    let height = y2 - y1 + 1;
    let mut data = vec![0u8; width as usize * height as usize * 3];

    let put = |data: &mut [u8], x: u32, y: u32, color: [u8; 3]| {
        let offset = ((y - y1) as usize * width as usize + (x - x1) as usize) * 3;
        data[offset..offset + 3].copy_from_slice(&color);
    };

    for (i, &c) in top.colors.iter().enumerate() {
        put(&mut data, x1 + i as u32, y1, c);
    }
    for (i, &c) in bottom.colors.iter().enumerate() {
        put(&mut data, x1 + i as u32, y2, c);
    }
    for (i, &c) in left.colors.iter().enumerate() {
        put(&mut data, x1, y1 + i as u32, c);
    }
    for (i, &c) in right.colors.iter().enumerate() {
        put(&mut data, x2, y1 + i as u32, c);
    }
    completed.fetch_add(2 * (width + height) as usize, Ordering::Relaxed);

    let min_side = square_len(x1, y1, x2, y2);

    let uniform = top.uniform().zip(bottom.uniform()).zip(left.uniform()).zip(right.uniform()).and_then(
        |(((t, b), l), r)| if t == b && b == l && l == r { Some(t) } else { None },
    );

    if min_side < max_len {
        if let Some(color) = uniform {
            for y in (y1 + 1)..y2 {
                for x in (x1 + 1)..x2 {
                    put(&mut data, x, y, color);
                }
            }
            completed.fetch_add(((width.saturating_sub(2)) * (height.saturating_sub(2))) as usize, Ordering::Relaxed);
            report(on_status, completed, total);
            return Patch { x1, y1, width, data };
        }
    }

    if min_side < min_len || cancel.load(Ordering::Acquire) {
        let mut hist = Vec::new();
        for y in (y1 + 1)..y2 {
            for x in (x1 + 1)..x2 {
                put(&mut data, x, y, eval(x, y, &mut hist));
            }
        }
        completed.fetch_add(((width.saturating_sub(2)) * (height.saturating_sub(2))) as usize, Ordering::Relaxed);
        report(on_status, completed, total);
        return Patch { x1, y1, width, data };
    }

    let mid_x = x1 + (x2 - x1) / 2;
    let mid_y = y1 + (y2 - y1) / 2;

    let mut hist = Vec::new();
    let h_mid = sample_horizontal(eval, &mut hist, mid_y, x1, x2);
    let v_mid = sample_vertical(eval, &mut hist, mid_x, y1, y2);

    let (e8, e9) = h_mid.split((mid_x - x1) as usize);
    let (e10, e11) = v_mid.split((mid_y - y1) as usize);
    let (e0, e1) = top.split((mid_x - x1) as usize);
    let (e2, e3) = bottom.split((mid_x - x1) as usize);
    let (e4, e5) = left.split((mid_y - y1) as usize);
    let (e6, e7) = right.split((mid_y - y1) as usize);

    let build = |x1: u32, y1: u32, x2: u32, y2: u32, top: Edge, bottom: Edge, left: Edge, right: Edge| {
        move || sqem_rect(x1, y1, x2, y2, top, bottom, left, right, eval, cancel, completed, total, on_status, use_rayon_join, max_len, min_len)
    };

    let r1 = build(x1, y1, mid_x, mid_y, e0, e8.clone(), e4, e10.clone());
    let r2 = build(mid_x, y1, x2, mid_y, e1, e9.clone(), e10, e6);
    let r3 = build(x1, mid_y, mid_x, y2, e8, e2, e5, e11.clone());
    let r4 = build(mid_x, mid_y, x2, y2, e9, e3, e11, e7);

    let (patches_top, patches_bottom) = if use_rayon_join {
        let ((p1, p2), (p3, p4)) = rayon::join(|| rayon::join(r1, r2), || rayon::join(r3, r4));
        ((p1, p2), (p3, p4))
    } else {
        ((r1(), r2()), (r3(), r4()))
    };

    let mut full_data = vec![0u8; width as usize * height as usize * 3];
    patches_top.0.write_into(&mut full_data, width, x1, y1);
    patches_top.1.write_into(&mut full_data, width, x1, y1);
    patches_bottom.0.write_into(&mut full_data, width, x1, y1);
    patches_bottom.1.write_into(&mut full_data, width, x1, y1);

    Patch { x1, y1, width, data: full_data }
}

fn render_sqem_recursive(ow: NonZeroU32, oh: NonZeroU32, eval: &Eval<'_>, on_status: Option<&(dyn Fn(Status) + Sync)>, cancel: &AtomicBool) -> (Vec<u8>, usize, bool) {
    let w = ow.get();
    let h = oh.get();
    let completed = AtomicUsize::new(0);
    let mut hist = Vec::new();

    let top = sample_horizontal(eval, &mut hist, 0, 0, w - 1);
    let bottom = sample_horizontal(eval, &mut hist, h - 1, 0, w - 1);
    let left = sample_vertical(eval, &mut hist, 0, 0, h - 1);
    let right = sample_vertical(eval, &mut hist, w - 1, 0, h - 1);

    let total = f64::from(w) * f64::from(h);
    let min_wh = w.min(h);
    let max_len = (min_wh / 2).max(16);
    let min_len = (min_wh / 8).max(16);
    let patch = sqem_rect(0, 0, w - 1, h - 1, top, bottom, left, right, eval, cancel, &completed, total, on_status, true, max_len, min_len);

    (patch.data, completed.load(Ordering::Relaxed), cancel.load(Ordering::Acquire))
}

struct PendingRect {
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
    top: Edge,
    bottom: Edge,
    left: Edge,
    right: Edge,
}

/// Same splitting algorithm as [`render_sqem_recursive`], but driven by an
/// explicit stack instead of the call stack, for images that would recurse
/// too deeply.
fn render_sqem_linear(ow: NonZeroU32, oh: NonZeroU32, eval: &Eval<'_>, on_status: Option<&(dyn Fn(Status) + Sync)>, cancel: &AtomicBool) -> (Vec<u8>, usize, bool) {
    let w = ow.get() as usize;
    let h = oh.get() as usize;
    let mut buffer = vec![0u8; w * h * 3];
    let mut completed = 0usize;
    let mut hist = Vec::new();
    let mut cancelled = false;

    let put = |buffer: &mut [u8], x: u32, y: u32, color: [u8; 3]| {
        let offset = (y as usize * w + x as usize) * 3;
        buffer[offset..offset + 3].copy_from_slice(&color);
    };

    let top = sample_horizontal(eval, &mut hist, 0, 0, ow.get() - 1);
    let bottom = sample_horizontal(eval, &mut hist, oh.get() - 1, 0, ow.get() - 1);
    let left = sample_vertical(eval, &mut hist, 0, 0, oh.get() - 1);
    let right = sample_vertical(eval, &mut hist, ow.get() - 1, 0, oh.get() - 1);

    let mut stack = vec![PendingRect {
        x1: 0,
        y1: 0,
        x2: ow.get() - 1,
        y2: oh.get() - 1,
        top,
        bottom,
        left,
        right,
    }];

    let total = (w * h) as f64;
    let min_wh = w.min(h) as u32;
    let max_len = (min_wh / 2).max(16);
    let min_len = (min_wh / 8).max(16);

    while let Some(rect) = stack.pop() {
        if cancel.load(Ordering::Acquire) {
            cancelled = true;
            break;
        }

        for (i, &c) in rect.top.colors.iter().enumerate() {
            put(&mut buffer, rect.x1 + i as u32, rect.y1, c);
        }
        for (i, &c) in rect.bottom.colors.iter().enumerate() {
            put(&mut buffer, rect.x1 + i as u32, rect.y2, c);
        }
        for (i, &c) in rect.left.colors.iter().enumerate() {
            put(&mut buffer, rect.x1, rect.y1 + i as u32, c);
        }
        for (i, &c) in rect.right.colors.iter().enumerate() {
            put(&mut buffer, rect.x2, rect.y1 + i as u32, c);
        }
        let width = rect.x2 - rect.x1 + 1;
        let height = rect.y2 - rect.y1 + 1;
        completed += 2 * (width + height) as usize;

        let min_side = square_len(rect.x1, rect.y1, rect.x2, rect.y2);

        let uniform = rect
            .top
            .uniform()
            .zip(rect.bottom.uniform())
            .zip(rect.left.uniform())
            .zip(rect.right.uniform())
            .and_then(|(((t, b), l), r)| if t == b && b == l && l == r { Some(t) } else { None });

        if min_side < max_len {
            if let Some(color) = uniform {
                for y in (rect.y1 + 1)..rect.y2 {
                    for x in (rect.x1 + 1)..rect.x2 {
                        put(&mut buffer, x, y, color);
                    }
                }
                completed += ((width.saturating_sub(2)) * (height.saturating_sub(2))) as usize;
                continue;
            }
        }

        if min_side < min_len {
            for y in (rect.y1 + 1)..rect.y2 {
                for x in (rect.x1 + 1)..rect.x2 {
                    put(&mut buffer, x, y, eval(x, y, &mut hist));
                }
            }
            completed += ((width.saturating_sub(2)) * (height.saturating_sub(2))) as usize;
            continue;
        }

        let mid_x = rect.x1 + (rect.x2 - rect.x1) / 2;
        let mid_y = rect.y1 + (rect.y2 - rect.y1) / 2;

        let h_mid = sample_horizontal(eval, &mut hist, mid_y, rect.x1, rect.x2);
        let v_mid = sample_vertical(eval, &mut hist, mid_x, rect.y1, rect.y2);

        let (e8, e9) = h_mid.split((mid_x - rect.x1) as usize);
        let (e10, e11) = v_mid.split((mid_y - rect.y1) as usize);
        let (e0, e1) = rect.top.split((mid_x - rect.x1) as usize);
        let (e2, e3) = rect.bottom.split((mid_x - rect.x1) as usize);
        let (e4, e5) = rect.left.split((mid_y - rect.y1) as usize);
        let (e6, e7) = rect.right.split((mid_y - rect.y1) as usize);

        stack.push(PendingRect { x1: rect.x1, y1: rect.y1, x2: mid_x, y2: mid_y, top: e0, bottom: e8.clone(), left: e4, right: e10.clone() });
        stack.push(PendingRect { x1: mid_x, y1: rect.y1, x2: rect.x2, y2: mid_y, top: e1, bottom: e9.clone(), left: e10, right: e6 });
        stack.push(PendingRect { x1: rect.x1, y1: mid_y, x2: mid_x, y2: rect.y2, top: e8, bottom: e2, left: e5, right: e11.clone() });
        stack.push(PendingRect { x1: mid_x, y1: mid_y, x2: rect.x2, y2: rect.y2, top: e9, bottom: e3, left: e11, right: e7 });

        if let Some(cb) = on_status {
            cb(Status { drawing: true, progress: completed as f64 / total });
        }
    }

    (buffer, completed, cancelled)
}

fn downsample(buffer: &[u8], ow: NonZeroU32, oh: NonZeroU32, width: NonZeroU32, height: NonZeroU32, factor: u32) -> RgbImage {
    let ow = ow.get();
    let w = width.get();
    let h = height.get();
    if factor == 1 {
        return ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(w, h, buffer.to_vec()).expect("buffer sized for w*h*3");
    }

    let mut out = vec![0u8; w as usize * h as usize * 3];
    for y in 0..h {
        for x in 0..w {
            let mut sum = [0u32; 3];
            for dy in 0..factor {
                for dx in 0..factor {
                    let sx = x * factor + dx;
                    let sy = y * factor + dy;
                    let offset = (sy as usize * ow as usize + sx as usize) * 3;
                    sum[0] += u32::from(buffer[offset]);
                    sum[1] += u32::from(buffer[offset + 1]);
                    sum[2] += u32::from(buffer[offset + 2]);
                }
            }
            let count = factor * factor;
            let out_offset = (y as usize * w as usize + x as usize) * 3;
            out[out_offset] = (sum[0] / count) as u8;
            out[out_offset + 1] = (sum[1] / count) as u8;
            out[out_offset + 2] = (sum[2] / count) as u8;
        }
    }
    ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(w, h, out).expect("buffer sized for w*h*3")
}

/// Flips the image vertically: row 0 of the render buffer is the bottom of
/// the complex-plane view, but row 0 of an on-disk image is the top.
fn flip_vertical(mut image: RgbImage) -> RgbImage {
    let height = image.height();
    let width = image.width();
    let row_bytes = width as usize * 3;
    let mut buffer = image.as_mut();
    for y in 0..height / 2 {
        let top = (y * width) as usize * 3;
        let bottom = ((height - 1 - y) * width) as usize * 3;
        let (a, b) = buffer.split_at_mut(bottom);
        a[top..top + row_bytes].swap_with_slice(&mut b[..row_bytes]);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fractal::RenderSettings;
    use color_space::make_linear;

    #[test]
    fn vectorized_and_sqem_agree_on_a_small_grey_image() {
        let fractal = Fractal::Mandelbrot {
            max_iter: NonZeroU32::new(64).unwrap(),
        };
        let view = View::new((-2.25, -1.5), (3.0, 3.0));
        let palette = make_linear(32, &[[80.0 / 255.0, 80.0 / 255.0, 80.0 / 255.0], [1.0, 1.0, 1.0]], None);
        let settings = RenderSettings::default();
        let width = NonZeroU32::new(48).unwrap();
        let height = NonZeroU32::new(48).unwrap();
        let cancel = AtomicBool::new(false);

        let vect = render(&fractal, view, &palette, &settings, width, height, Driver::Vectorized, None, &cancel).unwrap().into_image();
        let rec = render(&fractal, view, &palette, &settings, width, height, Driver::SqemRecursive, None, &cancel).unwrap().into_image();
        let lin = render(&fractal, view, &palette, &settings, width, height, Driver::SqemLinear, None, &cancel).unwrap().into_image();

        assert_eq!(vect.as_raw(), rec.as_raw());
        assert_eq!(vect.as_raw(), lin.as_raw());
    }

    #[test]
    fn oversampling_one_matches_plain_render() {
        let fractal = Fractal::Mandelbrot {
            max_iter: NonZeroU32::new(64).unwrap(),
        };
        let view = View::new((-2.25, -1.5), (3.0, 3.0));
        let palette = make_linear(32, &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]], None);
        let mut settings = RenderSettings::default();
        let width = NonZeroU32::new(32).unwrap();
        let height = NonZeroU32::new(32).unwrap();
        let cancel = AtomicBool::new(false);

        settings.oversampling = crate::fractal::Oversampling::X1;
        let plain = render(&fractal, view, &palette, &settings, width, height, Driver::Vectorized, None, &cancel).unwrap().into_image();
        let again = render(&fractal, view, &palette, &settings, width, height, Driver::Vectorized, None, &cancel).unwrap().into_image();
        assert_eq!(plain.as_raw(), again.as_raw());
    }

    #[test]
    fn cancellation_yields_partial_outcome() {
        let fractal = Fractal::Mandelbrot {
            max_iter: NonZeroU32::new(64).unwrap(),
        };
        let view = View::new((-2.25, -1.5), (3.0, 3.0));
        let palette = make_linear(32, &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]], None);
        let settings = RenderSettings::default();
        let width = NonZeroU32::new(64).unwrap();
        let height = NonZeroU32::new(64).unwrap();
        let cancel = AtomicBool::new(true);

        let outcome = render(&fractal, view, &palette, &settings, width, height, Driver::Vectorized, None, &cancel).unwrap();
        assert!(!outcome.is_complete());
    }

    #[test]
    fn allocation_overflow_is_reported_as_resource_error() {
        let fractal = Fractal::Mandelbrot {
            max_iter: NonZeroU32::new(16).unwrap(),
        };
        let view = View::new((-2.25, -1.5), (3.0, 3.0));
        let palette = make_linear(4, &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]], None);
        let mut settings = RenderSettings::default();
        settings.oversampling = crate::fractal::Oversampling::X3;
        let width = NonZeroU32::new(u32::MAX).unwrap();
        let height = NonZeroU32::new(u32::MAX).unwrap();
        let cancel = AtomicBool::new(false);

        let outcome = render(&fractal, view, &palette, &settings, width, height, Driver::Vectorized, None, &cancel);
        assert!(matches!(outcome, Err(ResourceError::AllocationFailed { .. })));
    }
}
