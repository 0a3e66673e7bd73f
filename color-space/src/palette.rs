use crate::LinearRGB;
use core::f64::consts::TAU;

/// An ordered table of RGB colors used to map a scalar escape-time quantity
/// to a final pixel color.
///
/// The last entry is the **sentinel**: the color painted for points that
/// never escape (the interior of the set). All other entries are the
/// **content**, indexed `[0, len()-2]`. A palette always holds at least two
/// entries: one content color and the sentinel.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette(Vec<LinearRGB>);

impl Palette {
    /// Builds a palette from its content entries and a sentinel color.
    ///
    /// Panics if `content` is empty; a palette needs at least one content
    /// entry besides the sentinel.
    #[must_use]
    pub fn new(mut content: Vec<LinearRGB>, sentinel: LinearRGB) -> Self {
        assert!(!content.is_empty(), "palette content must not be empty");
        content.push(sentinel);
        Self(content)
    }

    /// The number of entries, content plus sentinel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The content entries, excluding the sentinel.
    #[must_use]
    pub fn content(&self) -> &[LinearRGB] {
        &self.0[..self.0.len() - 1]
    }

    /// The interior/default sentinel color.
    #[must_use]
    pub fn sentinel(&self) -> LinearRGB {
        self.0[self.0.len() - 1]
    }

    /// Looks up a content entry by index, saturating at the last content
    /// entry rather than reaching into the sentinel.
    #[must_use]
    pub fn get_content(&self, index: usize) -> LinearRGB {
        let content = self.content();
        content[index.min(content.len() - 1)]
    }

}

fn greyscale_ramp(n: usize) -> Vec<LinearRGB> {
    let last = (n.max(1) - 1) as f64;
    (0..n.max(1))
        .map(|k| {
            let t = if last > 0.0 { k as f64 / last } else { 0.0 };
            LinearRGB::new(t, t, t)
        })
        .collect()
}

fn piecewise_linear(n: usize, points: &[[f64; 3]]) -> Vec<LinearRGB> {
    let n = n.max(1);
    let segments = points.len() - 1;
    let last = (n.max(2) - 1) as f64;
    (0..n)
        .map(|k| {
            let u = if n > 1 { k as f64 / last } else { 0.0 } * segments as f64;
            let seg = (u.floor() as usize).min(segments - 1);
            let local = u - seg as f64;
            let a = LinearRGB::from(points[seg]);
            let b = LinearRGB::from(points[seg + 1]);
            a + (b - a) * local
        })
        .collect()
}

/// Builds a palette by piecewise-linear interpolation between `points`.
///
/// `n` content entries are produced, split into `points.len() - 1` equal
/// segments. An empty `points` list produces a black-to-white greyscale
/// ramp; a single point produces a monochrome palette. `default`, if given,
/// becomes the sentinel; otherwise the sentinel repeats the last content
/// color.
#[must_use]
pub fn make_linear(n: usize, points: &[[f64; 3]], default: Option<[f64; 3]>) -> Palette {
    let content = match points.len() {
        0 => greyscale_ramp(n),
        1 => vec![LinearRGB::from(points[0]); n.max(1)],
        _ => piecewise_linear(n, points),
    };
    let sentinel = default.map_or_else(|| *content.last().unwrap(), LinearRGB::from);
    Palette::new(content, sentinel)
}

/// Builds a palette where channel `c` of entry `k` is
/// `0.5 + 0.5 * sin(2*pi*(k/(n-1) + theta[c]))`.
#[must_use]
pub fn make_sinus(n: usize, theta: [f64; 3], default: Option<[f64; 3]>) -> Palette {
    let n = n.max(2);
    let last = (n - 1) as f64;
    let content: Vec<LinearRGB> = (0..n)
        .map(|k| {
            let frac = k as f64 / last;
            let c = theta.map(|phase| 0.5 + 0.5 * (TAU * (frac + phase)).sin());
            LinearRGB::from(c)
        })
        .collect();
    let sentinel = default.map_or_else(|| *content.last().unwrap(), LinearRGB::from);
    Palette::new(content, sentinel)
}

/// Builds a palette where channel `c` of entry `k` is
/// `0.5 + 0.5 * cos(2*pi*(freq*k/(n-1) + phi[c]))`.
#[must_use]
pub fn make_cosine(n: usize, params: [f64; 4], default: Option<[f64; 3]>) -> Palette {
    let [freq, phi_r, phi_g, phi_b] = params;
    let n = n.max(2);
    let last = (n - 1) as f64;
    let phi = [phi_r, phi_g, phi_b];
    let content: Vec<LinearRGB> = (0..n)
        .map(|k| {
            let frac = freq * k as f64 / last;
            let c = phi.map(|phase| 0.5 + 0.5 * (TAU * (frac + phase)).cos());
            LinearRGB::from(c)
        })
        .collect();
    let sentinel = default.map_or_else(|| *content.last().unwrap(), LinearRGB::from);
    Palette::new(content, sentinel)
}

/// Builds a palette that sums a sine at frequency `f1` with a cosine at
/// frequency `f2`, each contributing half the amplitude, applied uniformly
/// across all three channels.
#[must_use]
pub fn make_sinus_cosinus(n: usize, freqs: [f64; 2], default: Option<[f64; 3]>) -> Palette {
    let [f1, f2] = freqs;
    let n = n.max(2);
    let last = (n - 1) as f64;
    let content: Vec<LinearRGB> = (0..n)
        .map(|k| {
            let frac = k as f64 / last;
            let v = 0.5 + 0.25 * (TAU * f1 * frac).sin() + 0.25 * (TAU * f2 * frac).cos();
            LinearRGB::new(v, v, v)
        })
        .collect();
    let sentinel = default.map_or_else(|| *content.last().unwrap(), LinearRGB::from);
    Palette::new(content, sentinel)
}

/// Samples the palette's content (excluding the sentinel) at a continuous
/// position `t ∈ [0,1]`, linearly interpolating between neighboring entries.
#[must_use]
pub fn sample_palette(p: &Palette, t: f64) -> [f64; 3] {
    let content = p.content();
    let t = t.clamp(0.0, 1.0);
    if content.len() == 1 {
        return content[0].into();
    }
    let last = (content.len() - 1) as f64;
    let pos = t * last;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(content.len() - 1);
    let local = pos - lo as f64;
    let a = content[lo];
    let b = content[hi];
    (a + (b - a) * local).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_empty_points_is_greyscale() {
        let p = make_linear(5, &[], None);
        assert_eq!(p.content()[0], LinearRGB::new(0.0, 0.0, 0.0));
        assert_eq!(p.content()[4], LinearRGB::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn linear_single_point_is_monochrome() {
        let p = make_linear(4, &[[0.2, 0.4, 0.6]], None);
        for c in p.content() {
            assert_eq!(*c, LinearRGB::new(0.2, 0.4, 0.6));
        }
    }

    #[test]
    fn default_becomes_sentinel() {
        let p = make_linear(3, &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]], Some([1.0, 0.0, 0.0]));
        assert_eq!(p.sentinel(), LinearRGB::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn sample_endpoints_match_content_bounds() {
        let p = make_linear(10, &[[0.1, 0.2, 0.3], [0.9, 0.8, 0.7]], None);
        let content = p.content();
        assert_eq!(sample_palette(&p, 0.0), <LinearRGB as Into<[f64; 3]>>::into(content[0]));
        assert_eq!(
            sample_palette(&p, 1.0),
            <LinearRGB as Into<[f64; 3]>>::into(content[content.len() - 1])
        );
    }

    #[test]
    fn sinus_is_bounded() {
        let p = make_sinus(50, [0.85, 0.0, 0.15], None);
        for c in p.content() {
            assert!(c.r >= 0.0 && c.r <= 1.0);
            assert!(c.g >= 0.0 && c.g <= 1.0);
            assert!(c.b >= 0.0 && c.b <= 1.0);
        }
    }
}
