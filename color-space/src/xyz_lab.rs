use crate::LinearRGB;

// Standard sRGB/D65 <-> CIE XYZ matrices (IEC 61966-2-1).
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

// CIE standard illuminant D65, 2-degree observer.
const WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];

fn mat_vec(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Converts an sRGB triplet to CIE XYZ (D65).
#[must_use]
pub fn rgb_to_xyz(rgb: [f64; 3]) -> [f64; 3] {
    let linear: [f64; 3] = LinearRGB::from_srgb(rgb).into();
    mat_vec(&RGB_TO_XYZ, linear)
}

/// Converts CIE XYZ (D65) back to an sRGB triplet.
#[must_use]
pub fn xyz_to_rgb(xyz: [f64; 3]) -> [f64; 3] {
    let linear = mat_vec(&XYZ_TO_RGB, xyz);
    LinearRGB::from(linear).to_srgb()
}

// CIE 6/29 piecewise companding used by L*a*b*.
const DELTA: f64 = 6.0 / 29.0;

fn lab_f(t: f64) -> f64 {
    if t > DELTA.powi(3) {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

fn lab_f_inv(t: f64) -> f64 {
    if t > DELTA {
        t.powi(3)
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

/// Converts an sRGB triplet to CIE L*a*b*.
#[must_use]
pub fn rgb_to_lab(rgb: [f64; 3]) -> [f64; 3] {
    let [x, y, z] = rgb_to_xyz(rgb);
    let [fx, fy, fz] = [lab_f(x / WHITE[0]), lab_f(y / WHITE[1]), lab_f(z / WHITE[2])];
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// Converts CIE L*a*b* back to an sRGB triplet.
#[must_use]
pub fn lab_to_rgb(lab: [f64; 3]) -> [f64; 3] {
    let [l, a, b] = lab;
    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;
    let xyz = [
        WHITE[0] * lab_f_inv(fx),
        WHITE[1] * lab_f_inv(fy),
        WHITE[2] * lab_f_inv(fz),
    ];
    xyz_to_rgb(xyz)
}

/// Converts an sRGB triplet to cylindrical CIE LCh (hue in degrees, `[0,360)`).
#[must_use]
pub fn rgb_to_lch(rgb: [f64; 3]) -> [f64; 3] {
    let [l, a, b] = rgb_to_lab(rgb);
    let c = a.hypot(b);
    let h = b.atan2(a).to_degrees();
    let h = if h < 0.0 { h + 360.0 } else { h };
    [l, c, h]
}

/// Converts cylindrical CIE LCh back to an sRGB triplet.
#[must_use]
pub fn lch_to_rgb(lch: [f64; 3]) -> [f64; 3] {
    let [l, c, h] = lch;
    let h_rad = h.to_radians();
    lab_to_rgb([l, c * h_rad.cos(), c * h_rad.sin()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lab_round_trip_within_tolerance() {
        for ir in 1..10 {
            for ig in 1..10 {
                for ib in 1..10 {
                    let c = [ir as f64 / 10.0, ig as f64 / 10.0, ib as f64 / 10.0];
                    let back = lab_to_rgb(rgb_to_lab(c));
                    for (a, b) in c.iter().zip(back.iter()) {
                        assert!((a - b).abs() < 1e-9, "{a} vs {b}");
                    }
                }
            }
        }
    }

    #[test]
    fn lch_round_trip_within_tolerance() {
        let c = [0.3, 0.6, 0.2];
        let back = lch_to_rgb(rgb_to_lch(c));
        for (a, b) in c.iter().zip(back.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn white_is_near_achromatic() {
        let [l, a, b] = rgb_to_lab([1.0, 1.0, 1.0]);
        assert!((l - 100.0).abs() < 1e-3);
        assert!(a.abs() < 1e-3);
        assert!(b.abs() < 1e-3);
    }
}
