use crate::{linear_rgb_to_srgb, srgb_to_linear_rgb};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

/// An RGB triplet whose underlying data is not in an sRGB format,
/// but in a linear format. This means that it can be multiplied by a scalar
/// and added to another `LinearRGB`.
///
/// Used as the intermediate type when converting sRGB to and from the
/// CIE XYZ/Lab/LCh color spaces, which are defined in terms of linear light.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LinearRGB {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl LinearRGB {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Converts an sRGB triplet into the linear color space.
    #[must_use]
    pub fn from_srgb(srgb: [f64; 3]) -> Self {
        srgb.map(srgb_to_linear_rgb).into()
    }

    /// Converts back into an sRGB triplet.
    #[must_use]
    pub fn to_srgb(self) -> [f64; 3] {
        [self.r, self.g, self.b].map(linear_rgb_to_srgb)
    }
}

impl Add for LinearRGB {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for LinearRGB {
    fn add_assign(&mut self, rhs: Self) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl Sub for LinearRGB {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b)
    }
}

impl SubAssign for LinearRGB {
    fn sub_assign(&mut self, rhs: Self) {
        self.r -= rhs.r;
        self.g -= rhs.g;
        self.b -= rhs.b;
    }
}

impl Mul<f64> for LinearRGB {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl MulAssign<f64> for LinearRGB {
    fn mul_assign(&mut self, rhs: f64) {
        self.r *= rhs;
        self.g *= rhs;
        self.b *= rhs;
    }
}

impl Div<f64> for LinearRGB {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.r / rhs, self.g / rhs, self.b / rhs)
    }
}

impl DivAssign<f64> for LinearRGB {
    fn div_assign(&mut self, rhs: f64) {
        self.r /= rhs;
        self.g /= rhs;
        self.b /= rhs;
    }
}

impl From<[f64; 3]> for LinearRGB {
    fn from(data: [f64; 3]) -> Self {
        Self::new(data[0], data[1], data[2])
    }
}

impl From<LinearRGB> for [f64; 3] {
    fn from(c: LinearRGB) -> Self {
        [c.r, c.g, c.b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_round_trip() {
        let srgb = [0.2, 0.5, 0.9];
        let back = LinearRGB::from_srgb(srgb).to_srgb();
        for (a, b) in srgb.iter().zip(back.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
