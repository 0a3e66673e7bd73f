#![forbid(unsafe_code)]

//! Color spaces, palette generators and blend modes for fractal rendering.
//!
//! This crate is pure math: it knows nothing about images, files or fractals.
//! It converts between RGB and a handful of perceptual/linear color spaces,
//! builds [`Palette`]s from a small family of closed-form generators, and
//! provides the blend modes used to overlay shading onto a palette color.

/// Converts a point in the sRGB color space to a linear RGB triplet.
#[must_use]
pub fn srgb_to_linear_rgb(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Converts a linear RGB triplet into a point in the sRGB color space.
#[must_use]
pub fn linear_rgb_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Maps the range \[0.0, 1.0\] to the range \[0, 255\].
/// Clamps the input to the range before the conversion.
#[must_use]
pub fn quantize_srgb(srgb: f64) -> u8 {
    (f64::from(u8::MAX) * srgb.clamp(0.0, 1.0)).round() as u8
}

/// Quantizes a `[0,1]` RGB triplet to `rgb8`, clamping each channel first.
#[must_use]
pub fn rgb_u8(c: [f64; 3]) -> [u8; 3] {
    c.map(quantize_srgb)
}

/// Photoshop-style "hard light" blend of a base value `x` with an overlay `y`.
///
/// Used both to merge a palette color with a computed brightness and to
/// merge the major/minor step shaders (see [`crate::palette`] and the
/// fractal compositor that sits on top of this crate).
#[inline]
#[must_use]
pub fn hard_light(x: f64, y: f64) -> f64 {
    if y < 0.5 {
        2.0 * x * y
    } else {
        1.0 - 2.0 * (1.0 - x) * (1.0 - y)
    }
}

mod linear_rgb;
pub use linear_rgb::LinearRGB;

mod palette;
pub use palette::{make_cosine, make_linear, make_sinus, make_sinus_cosinus, sample_palette, Palette};

mod xyz_lab;
pub use xyz_lab::{lab_to_rgb, lch_to_rgb, rgb_to_lab, rgb_to_lch, rgb_to_xyz, xyz_to_rgb};

mod hsx;
pub use hsx::{hsb_to_rgb, hsl_to_rgb};

mod hex;
pub use hex::{parse_hex, HexParseError};
