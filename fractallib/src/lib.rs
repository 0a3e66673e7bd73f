#![forbid(unsafe_code)]

mod compositor;
mod error;
mod fractal;
mod kernel;
mod renderer;
mod shading;
mod u32_and_usize;
mod view;

pub use color_space::{
    make_cosine, make_linear, make_sinus, make_sinus_cosinus, parse_hex, sample_palette,
    HexParseError, Palette,
};
pub use error::{ConfigError, RenderError, RenderOutcome, ResourceError};
pub use fractal::{Colorize, Fractal, Light, Options, Oversampling, PaletteMode, RenderSettings, Shading};
pub use renderer::{render as render_image, Driver, Status};
pub use u32_and_usize::U32AndUsize;
pub use view::View;

use core::num::NonZeroU32;
use core::sync::atomic::AtomicBool;

/// Validates a view before it is handed to the renderer.
///
/// # Errors
/// Returns [`ConfigError::InvalidView`] if either extent of `view` is not
/// strictly positive.
pub fn check_view(view: View) -> Result<View, ConfigError> {
    if view.size.0 > 0.0 && view.size.1 > 0.0 {
        Ok(view)
    } else {
        Err(ConfigError::InvalidView {
            real_distance: view.size.0,
            imag_distance: view.size.1,
        })
    }
}

/// Builds a [`Palette`] from hex color strings, resolving each through
/// [`parse_hex`] before handing the points to [`make_linear`].
///
/// # Errors
/// Returns [`ConfigError::InvalidHex`] if any color string fails to parse,
/// or [`ConfigError::EmptyPalettePoints`] if `points` is empty.
pub fn palette_from_hex(
    len: usize,
    points: &[&str],
    default: Option<&str>,
) -> Result<Palette, ConfigError> {
    if points.is_empty() {
        return Err(ConfigError::EmptyPalettePoints);
    }
    let parsed: Vec<[f64; 3]> = points.iter().map(|s| parse_hex(s)).collect::<Result<_, _>>()?;
    let default = default.map(parse_hex).transpose()?;
    Ok(make_linear(len, &parsed, default))
}

/// Maps a pixel coordinate to the complex plane, delegating to [`View::map_xy`].
#[must_use]
pub fn map_xy(view: View, x: u32, y: u32, width: NonZeroU32, height: NonZeroU32) -> (f64, f64) {
    view.map_xy(x, y, width, height)
}

/// Maps a continuous sub-pixel coordinate to the complex plane, delegating to
/// [`View::map_wh`].
#[must_use]
pub fn map_wh(view: View, w: f64, h: f64, width: NonZeroU32, height: NonZeroU32) -> (f64, f64) {
    view.map_wh(w, h, width, height)
}

/// Zooms to a pixel rectangle, delegating to [`View::zoom_area`].
#[must_use]
pub fn zoom_area(view: View, pixel_rect: (u32, u32, u32, u32), width: NonZeroU32, height: NonZeroU32) -> View {
    view.zoom_area(pixel_rect, width, height)
}

/// Zooms by a percentage around a pixel center, delegating to
/// [`View::zoom_percent`].
#[must_use]
pub fn zoom_percent(
    view: View,
    pct: f64,
    width: NonZeroU32,
    height: NonZeroU32,
    center_px: Option<(u32, u32)>,
) -> View {
    view.zoom_percent(pct, width, height, center_px)
}

/// Renders `fractal` over `view` at `width x height`, following `settings`
/// and the chosen [`Driver`].
///
/// This is the single entry point a caller needs for a non-interactive
/// render: it validates the view, then hands everything to
/// [`renderer::render`].
///
/// # Errors
/// Returns [`ConfigError::InvalidView`] (via [`RenderError::Config`]) if
/// `view`'s extents are not strictly positive, or
/// [`ResourceError::AllocationFailed`] (via [`RenderError::Resource`]) if the
/// oversampled buffer the render needs does not fit in this platform's
/// `usize`. Both are reported before any pixel work starts.
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
) -> Result<RenderOutcome, RenderError> {
    let view = check_view(view)?;
    Ok(render_image(fractal, view, palette, settings, width, height, driver, on_status, cancel)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_view() {
        let view = View::new((0.0, 0.0), (0.0, 1.0));
        assert!(check_view(view).is_err());
    }

    #[test]
    fn palette_from_hex_roundtrips_black_and_white() {
        let palette = palette_from_hex(16, &["#000000", "#ffffff"], None).unwrap();
        assert_eq!(palette.content().len(), 16);
    }

    #[test]
    fn palette_from_hex_rejects_bad_color() {
        let err = palette_from_hex(16, &["nope"], None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHex(_)));
    }

    #[test]
    fn render_end_to_end_smoke() {
        let fractal = Fractal::Mandelbrot {
            max_iter: NonZeroU32::new(100).unwrap(),
        };
        let view = View::new((-2.25, -1.5), (3.0, 3.0));
        let palette = palette_from_hex(64, &["#000000", "#ffffff"], None).unwrap();
        let settings = RenderSettings::default();
        let width = NonZeroU32::new(32).unwrap();
        let height = NonZeroU32::new(32).unwrap();
        let cancel = AtomicBool::new(false);

        let outcome = render(&fractal, view, &palette, &settings, width, height, Driver::Vectorized, None, &cancel).unwrap();
        assert!(outcome.is_complete());
        let image = outcome.into_image();
        assert_eq!(image.width(), width.get());
        assert_eq!(image.height(), height.get());
    }
}
