use crate::fractal::{Colorize, PaletteMode, RenderSettings, Shading};
use crate::kernel::KernelOutput;
use crate::shading::{blinn_phong_3d, simple_3d};
use color_space::{hard_light, hsb_to_rgb, lch_to_rgb, rgb_u8, Palette};

/// Color parameters derived once per render from the view and settings,
/// rather than recomputed per pixel.
#[derive(Debug, Clone, Copy)]
pub struct ColorPar {
    pub stripe_s: f64,
    pub step_s: f64,
    pub ncycle: u32,
    /// `|view.size|`, the length of the view's diagonal.
    pub diag: f64,
}

impl ColorPar {
    /// The continuous-phase cycle length used by the stripe/step sampler,
    /// as opposed to the integer period used by `Iterations + Modulo`.
    fn ncycle_continuous(&self) -> f64 {
        (f64::from(self.ncycle)).sqrt().max(1e-12)
    }
}

fn complex_div(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    let denom = b.0 * b.0 + b.1 * b.1;
    if denom <= 0.0 {
        return (0.0, 0.0);
    }
    ((a.0 * b.0 + a.1 * b.1) / denom, (a.1 * b.0 - a.0 * b.1) / denom)
}

/// Maps a single kernel result to a final `rgb8` pixel, following the
/// palette, coloring mode, shading and stripe/step overlay currently
/// configured in `settings`.
#[must_use]
pub fn composite(
    output: &KernelOutput,
    palette: &Palette,
    settings: &RenderSettings,
    color_par: &ColorPar,
    max_iter: u32,
) -> [u8; 3] {
    let (i_smooth, nz, z, dz, stripe_a, distance, potential) = match *output {
        KernelOutput::Interior => return rgb_u8(palette.sentinel().into()),
        KernelOutput::InteriorOrbit { color } => return rgb_u8(color),
        KernelOutput::Escaped {
            i_smooth,
            nz,
            z,
            dz,
            stripe_a,
            distance,
            potential,
        } => (i_smooth, nz, z, dz, stripe_a, distance, potential),
    };
    let _ = nz;

    let normal = complex_div(z, dz);
    let bright = match settings.options.shading() {
        Shading::None => 1.0,
        Shading::Simple3D => simple_3d(normal, &settings.light),
        Shading::BlinnPhong3D => blinn_phong_3d(normal, &settings.light),
    };

    let content_len = palette.content().len();
    let max_idx = content_len - 1;

    let mut color = if settings.stripes > 0 || settings.steps > 0 {
        stripe_step_color(palette, color_par, i_smooth, stripe_a, distance, bright, max_idx)
    } else {
        match (settings.colorize, settings.palette_mode) {
            (Colorize::Iterations, PaletteMode::Hue) => {
                let base = palette.get_content(0);
                hsb_to_rgb(base.r, base.g, bright)
            }
            (Colorize::Iterations, PaletteMode::HueDyn) => {
                let h = (i_smooth * 360.0).powf(1.5).rem_euclid(360.0);
                hsb_to_rgb(h / 360.0, 1.0, bright)
            }
            (Colorize::Iterations, PaletteMode::LchDyn) => {
                let v = 1.0 - (std::f64::consts::PI * i_smooth).cos().powi(2);
                let h = (360.0 * i_smooth).powf(1.5).rem_euclid(360.0);
                let [r, g, b] = lch_to_rgb([75.0 - 75.0 * v, 28.0 + 75.0 - 75.0 * v, h]);
                [r * bright, g * bright, b * bright]
            }
            (Colorize::Iterations, PaletteMode::Modulo) => {
                let raw = (content_len as f64 * i_smooth / f64::from(max_iter)).floor() as i64;
                let idx = raw.rem_euclid(color_par.ncycle.max(1) as i64) as usize;
                let c: [f64; 3] = palette.get_content(idx.min(max_idx)).into();
                c.map(|v| v * bright)
            }
            (Colorize::Iterations, PaletteMode::Linear) => {
                let idx = (i_smooth / f64::from(max_iter) * content_len as f64).floor() as i64;
                let c: [f64; 3] = palette.get_content(idx.clamp(0, max_idx as i64) as usize).into();
                c.map(|v| v * bright)
            }
            (Colorize::Distance, _) => {
                let idx = ((distance / color_par.diag.max(1e-300)).tanh() * content_len as f64).floor() as i64;
                let c: [f64; 3] = palette.get_content(idx.clamp(0, max_idx as i64) as usize).into();
                c.map(|v| v * bright)
            }
            (Colorize::Potential, _) => {
                let idx = (content_len as f64 * potential / f64::from(max_iter)).floor() as i64;
                let c: [f64; 3] = palette.get_content(idx.clamp(0, max_idx as i64) as usize).into();
                c.map(|v| v * bright)
            }
        }
    };

    if (settings.light.gamma - 1.0).abs() > 1e-12 {
        color = color.map(|c| c.max(0.0).powf(1.0 / settings.light.gamma));
    }

    rgb_u8(color)
}

#[allow(clippy::too_many_arguments)]
fn stripe_step_color(
    palette: &Palette,
    color_par: &ColorPar,
    i_smooth: f64,
    stripe_a: f64,
    distance: f64,
    bright: f64,
    max_idx: usize,
) -> [f64; 3] {
    let ncycle = color_par.ncycle_continuous();
    let u = i_smooth.sqrt().rem_euclid(ncycle) / ncycle;
    let idx = (u * max_idx as f64).round().clamp(0.0, max_idx as f64) as usize;

    let d_log = -(distance / color_par.diag.max(1e-300)).ln() / 12.0;
    let d_prime = 1.0 / (1.0 + (-10.0 * (2.0 * d_log - 1.0) / 2.0).exp());

    let mut shaders = Vec::with_capacity(2);
    let mut step_idx = idx;
    if color_par.stripe_s > 0.0 {
        shaders.push(stripe_a);
    }
    if color_par.step_s > 0.0 {
        let s = 1.0 / color_par.step_s;
        step_idx = ((u - u.rem_euclid(s)) * max_idx as f64).round().clamp(0.0, max_idx as f64) as usize;

        let x = (u.rem_euclid(s) / s).clamp(0.0, 1.0);
        let major = 6.0 * (1.0 - x.powi(5) - (1.0 - x).powf(100.0)) / 10.0;

        let s_minor = s / 8.0;
        let x_minor = (u.rem_euclid(s_minor) / s_minor).clamp(0.0, 1.0);
        let minor = 6.0 * (1.0 - x_minor.powi(5) - (1.0 - x_minor).powf(30.0)) / 10.0;

        shaders.push(hard_light(major, minor));
    }

    let shader_avg = if shaders.is_empty() {
        0.0
    } else {
        shaders.iter().sum::<f64>() / shaders.len() as f64
    };

    let overlay = (1.0 - d_prime) * shader_avg + d_prime * bright;
    let base_idx = if color_par.step_s > 0.0 { step_idx } else { idx };
    let base: [f64; 3] = palette.get_content(base_idx).into();
    base.map(|c| hard_light(c, overlay))
}
