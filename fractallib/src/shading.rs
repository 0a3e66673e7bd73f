use crate::fractal::Light;
use core::f64::consts::FRAC_PI_2;

/// Simple 3-D shading: blends a pseudo-normal with a fixed light direction
/// in the plane, ignoring surface tilt beyond first order.
#[must_use]
pub fn simple_3d(normal: (f64, f64), light: &Light) -> f64 {
    let mag = normal.0.hypot(normal.1).max(1e-12);
    let n = (normal.0 / mag, normal.1 / mag);

    let height = 1.0 + light.elevation / 90.0;
    let angle = light.angle.to_radians();
    let dir = (angle.cos(), angle.sin());
    let dot = n.0 * dir.0 + n.1 * dir.1;
    (dot + height) / (1.0 + height)
}

/// Blinn-Phong shading driven by the Jacobian-derived pseudo-normal
/// `z / dz_dc`. The normal is renormalized internally; callers need not
/// pre-normalize it.
#[must_use]
pub fn blinn_phong_3d(normal: (f64, f64), light: &Light) -> f64 {
    let mag = normal.0.hypot(normal.1).max(1e-12);
    let n = (normal.0 / mag, normal.1 / mag);

    let angle = light.angle.to_radians();
    let elevation = light.elevation.to_radians();

    let diffuse_term = (n.0 * angle.cos() * elevation.cos()
        + n.1 * angle.sin() * elevation.cos()
        + elevation.sin())
        / (1.0 + elevation.sin());

    let phi_half = (FRAC_PI_2 + elevation) / 2.0;
    let specular_term = ((n.0 * angle.cos() * phi_half.sin()
        + n.1 * angle.sin() * phi_half.sin()
        + phi_half.cos())
        / (1.0 + phi_half.cos()))
    .powf(light.shininess);

    let brightness = light.ambient + diffuse_term * light.diffuse + specular_term * light.specular;
    brightness * light.opacity + (1.0 - light.opacity) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple3d_facing_light_is_brighter_than_away() {
        let light = Light::default();
        let angle = light.angle.to_radians();
        let facing = (angle.cos(), angle.sin());
        let away = (-angle.cos(), -angle.sin());
        assert!(simple_3d(facing, &light) > simple_3d(away, &light));
    }

    #[test]
    fn blinn_phong_facing_light_is_brighter_than_away() {
        let light = Light::default();
        let angle = light.angle.to_radians();
        let elevation = light.elevation.to_radians();
        let facing = (angle.cos() * elevation.cos(), angle.sin() * elevation.cos());
        let away = (-facing.0, -facing.1);
        assert!(blinn_phong_3d(facing, &light) > blinn_phong_3d(away, &light));
    }

    #[test]
    fn blinn_phong_handles_degenerate_normal() {
        let light = Light::default();
        let b = blinn_phong_3d((0.0, 0.0), &light);
        assert!(b.is_finite());
    }
}
