use color_space::hsb_to_rgb;

/// The constant `sigma` that weights the exponential-moving-average stripe
/// accumulator (see [`escape_time`] step 8). Fixed, not user-configurable.
const STRIPE_SIGMA: f64 = 0.9;

/// Parameters of a single kernel evaluation that stay constant across an
/// entire render (as opposed to the point `c`, which varies per pixel).
#[derive(Debug, Clone, Copy)]
pub struct KernelParams {
    pub max_iter: u32,
    pub bailout: f64,
    pub orbits_on: bool,
    pub need_dz: bool,
    pub stripe_s: f64,
    /// `true` only for the Mandelbrot kernel; skips iteration for points
    /// known to lie in the main cardioid or the period-2 bulb.
    pub cardioid_check: bool,
}

/// The result of iterating the kernel at a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KernelOutput {
    Escaped {
        i_smooth: f64,
        nz: f64,
        z: (f64, f64),
        dz: (f64, f64),
        stripe_a: f64,
        distance: f64,
        potential: f64,
    },
    Interior,
    InteriorOrbit {
        color: [f64; 3],
    },
}

impl KernelOutput {
    #[must_use]
    pub fn is_interior(&self) -> bool {
        !matches!(self, Self::Escaped { .. })
    }
}

#[inline]
fn cmul(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    (a.0 * b.0 - a.1 * b.1, a.0 * b.1 + a.1 * b.0)
}

#[inline]
fn cadd(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    (a.0 + b.0, a.1 + b.1)
}

#[inline]
fn cabs2(a: (f64, f64)) -> f64 {
    a.0 * a.0 + a.1 * a.1
}

#[inline]
fn cscale(a: (f64, f64), s: f64) -> (f64, f64) {
    (a.0 * s, a.1 * s)
}

/// Evaluates the Mandelbrot kernel at `c`: `z_0 = 0`, `z <- z^2 + c`.
///
/// The cardioid/bulb fast-reject is skipped whenever orbit coloring is on:
/// it would otherwise short-circuit to a flat [`KernelOutput::Interior`]
/// before the orbit search below ever runs, so every point inside the main
/// cardioid or the period-2 bulb would paint identically instead of by the
/// period of the orbit it actually converges to.
#[must_use]
pub fn mandelbrot(c: (f64, f64), params: &KernelParams, orbit_hist: &mut Vec<(f64, f64)>) -> KernelOutput {
    if params.cardioid_check && !params.orbits_on && in_main_cardioid_or_bulb(c) {
        return KernelOutput::Interior;
    }
    escape_time((0.0, 0.0), c, params, orbit_hist)
}

/// Evaluates the Julia kernel at pixel `z0`, with the fractal's fixed seed
/// `k`: `z <- z^2 + k`.
#[must_use]
pub fn julia(z0: (f64, f64), k: (f64, f64), params: &KernelParams, orbit_hist: &mut Vec<(f64, f64)>) -> KernelOutput {
    escape_time(z0, k, params, orbit_hist)
}

fn in_main_cardioid_or_bulb(c: (f64, f64)) -> bool {
    let (re, im) = c;
    let im2 = im * im;
    let nz = re * re + im2;
    (re + 1.0) * (re + 1.0) + im2 <= 0.0625 || nz * (8.0 * nz - 3.0) <= 0.09375 - re
}

/// The core escape-time loop shared by the Mandelbrot and Julia kernels.
///
/// `z0` is the iteration's starting value, `c` is the additive constant.
/// Tracks the derivative, stripe accumulator and orbit history only when
/// the caller's [`KernelParams`] ask for them, but keeps all of it fused
/// into a single loop body so the compiler can hoist the shared
/// loop-invariant work.
fn escape_time(z0: (f64, f64), c: (f64, f64), params: &KernelParams, orbit_hist: &mut Vec<(f64, f64)>) -> KernelOutput {
    orbit_hist.clear();

    let mut z = z0;
    let mut dz = (1.0, 0.0);
    let mut stripe_a = 0.0_f64;
    let mut nz1 = 0.0_f64;
    let mut potf = 1.0_f64;
    let mut i: u32 = 0;

    loop {
        if i >= params.max_iter {
            return KernelOutput::Interior;
        }

        if params.need_dz {
            dz = cadd(cscale(cmul(z, dz), 2.0), (1.0, 0.0));
        }
        z = cadd(cmul(z, z), c);

        let t = if params.stripe_s > 0.0 {
            (f64::sin(params.stripe_s * z.1.atan2(z.0)) + 1.0) / 2.0
        } else {
            0.0
        };

        let nz = cabs2(z);
        i += 1;
        potf *= 0.5;

        if nz > params.bailout {
            let a = nz.sqrt();
            let mu = 1.0 - ((a.ln() * 2.0 / params.bailout.ln()).ln()) / std::f64::consts::LN_2;
            let i_smooth = f64::from(i) + mu;
            let distance = a * a.ln() / cabs2(dz).sqrt() / 2.0;
            let potential = a.ln() * potf;

            let mut final_stripe = stripe_a;
            if params.stripe_s > 0.0 {
                let sigma = STRIPE_SIGMA;
                final_stripe = stripe_a * (1.0 + mu * (sigma - 1.0)) + t * mu * (1.0 - sigma);
                final_stripe /= 1.0 - sigma.powi(i as i32) * (1.0 + mu * (sigma - 1.0));
            }

            return KernelOutput::Escaped {
                i_smooth,
                nz,
                z,
                dz,
                stripe_a: final_stripe,
                distance,
                potential,
            };
        } else if params.orbits_on {
            if let Some(idx) = find_orbit(orbit_hist, z) {
                return KernelOutput::InteriorOrbit {
                    color: orbit_color(i, idx, params.max_iter),
                };
            }
            orbit_hist.push(z);
        } else {
            if (nz - nz1).abs() < 1e-10 {
                return KernelOutput::Interior;
            }
            if i % 20 == 0 {
                nz1 = nz;
            }
        }

        if params.stripe_s > 0.0 {
            stripe_a = stripe_a * STRIPE_SIGMA + t * (1.0 - STRIPE_SIGMA);
        }
    }
}

/// Searches the last `min(len, 100)` entries of the orbit history for the
/// most recent near-repeat of `z`, first with a tight tolerance to confirm
/// a period exists, then with a looser one to pin down the closest (and
/// therefore shortest) repeat.
fn find_orbit(hist: &[(f64, f64)], z: (f64, f64)) -> Option<usize> {
    let start = hist.len().saturating_sub(100);
    let window = &hist[start..];

    let dist2 = |p: (f64, f64)| {
        let d = (p.0 - z.0, p.1 - z.1);
        d.0 * d.0 + d.1 * d.1
    };

    window.iter().rposition(|&p| dist2(p) < 1e-15)?;
    window.iter().rposition(|&p| dist2(p) < 1e-11).map(|k| start + k)
}

fn orbit_color(i: u32, idx: usize, max_iter: u32) -> [f64; 3] {
    let period = f64::from(i) - idx as f64;
    let hue = (period / 10.0).min(1.0);
    let brightness = 1.0 - f64::from(i) / f64::from(max_iter);
    let [r, g, b] = hsb_to_rgb(hue, 1.0, brightness);
    [r, g, b]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(max_iter: u32, cardioid_check: bool) -> KernelParams {
        KernelParams {
            max_iter,
            bailout: 4.0,
            orbits_on: false,
            need_dz: false,
            stripe_s: 0.0,
            cardioid_check,
        }
    }

    #[test]
    fn origin_is_interior() {
        let mut hist = Vec::new();
        let out = mandelbrot((0.0, 0.0), &params(255, true), &mut hist);
        assert!(out.is_interior());
    }

    #[test]
    fn far_point_escapes_quickly() {
        let mut hist = Vec::new();
        let out = mandelbrot((2.0, 2.0), &params(255, true), &mut hist);
        assert!(!out.is_interior());
    }

    #[test]
    fn escape_iterations_monotonic_in_max_iter() {
        let c = (0.3, 0.5);
        let mut hist = Vec::new();
        let out_low = mandelbrot(c, &params(5, false), &mut hist);
        let out_high = mandelbrot(c, &params(50, false), &mut hist);
        let smooth = |o: &KernelOutput| match o {
            KernelOutput::Escaped { i_smooth, .. } => Some(*i_smooth),
            _ => None,
        };
        if let (Some(low), Some(high)) = (smooth(&out_low), smooth(&out_high)) {
            assert!(high >= low);
        }
    }

    #[test]
    fn cardioid_check_agrees_with_direct_iteration() {
        let c = (-0.5, 0.0);
        let mut hist = Vec::new();
        let checked = mandelbrot(c, &params(1000, true), &mut hist);
        let direct = mandelbrot(c, &params(1000, false), &mut hist);
        assert!(checked.is_interior());
        assert!(direct.is_interior());
    }

    #[test]
    fn orbit_coloring_distinguishes_cardioid_from_period_two_bulb() {
        let orbit_params = KernelParams {
            max_iter: 1000,
            bailout: 4.0,
            orbits_on: true,
            need_dz: false,
            stripe_s: 0.0,
            cardioid_check: true,
        };
        let mut hist = Vec::new();
        let cardioid = mandelbrot((-0.5, 0.0), &orbit_params, &mut hist);
        let bulb = mandelbrot((-1.0, 0.0), &orbit_params, &mut hist);

        let color = |o: &KernelOutput| match o {
            KernelOutput::InteriorOrbit { color } => *color,
            other => panic!("expected an orbit color, got {other:?}"),
        };
        let (cardioid_color, bulb_color) = (color(&cardioid), color(&bulb));
        assert_ne!(cardioid_color, bulb_color);
    }
}
