use core::num::NonZeroU32;

/// Which escape-time fractal to render, and how long to iterate it for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fractal {
    Mandelbrot { max_iter: NonZeroU32 },
    Julia { seed: (f64, f64), max_iter: NonZeroU32 },
}

impl Fractal {
    #[must_use]
    pub const fn max_iter(&self) -> NonZeroU32 {
        match self {
            Self::Mandelbrot { max_iter } | Self::Julia { max_iter, .. } => *max_iter,
        }
    }
}

/// The scalar escape-time quantity that drives the palette lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colorize {
    Iterations,
    Distance,
    Potential,
}

/// How the chosen scalar is mapped into the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteMode {
    Linear,
    Modulo,
    Hue,
    HueDyn,
    LchDyn,
}

/// Oversampling factor along each axis; the renderer draws at
/// `factor * width` by `factor * height` and box-filters back down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Oversampling {
    X1,
    X2,
    X3,
}

impl Oversampling {
    #[must_use]
    pub const fn factor(self) -> u32 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X3 => 3,
        }
    }
}

/// Bitset of optional rendering behaviors.
///
/// `Simple3D` and `BlinnPhong3D` are mutually exclusive; if both are set,
/// `BlinnPhong3D` takes precedence (see [`Options::shading`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options(u8);

impl Options {
    pub const ORBITS: Self = Self(1 << 0);
    pub const INSIDE_DISTANCE: Self = Self(1 << 1);
    pub const SIMPLE_3D: Self = Self(1 << 2);
    pub const BLINN_PHONG_3D: Self = Self(1 << 3);

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }

    #[must_use]
    pub const fn orbits(self) -> bool {
        self.contains(Self::ORBITS)
    }

    #[must_use]
    pub const fn inside_distance(self) -> bool {
        self.contains(Self::INSIDE_DISTANCE)
    }

    /// The active shading mode, applying the documented `BlinnPhong3D`-wins
    /// precedence when both 3-D flags are set.
    #[must_use]
    pub const fn shading(self) -> Shading {
        if self.contains(Self::BLINN_PHONG_3D) {
            Shading::BlinnPhong3D
        } else if self.contains(Self::SIMPLE_3D) {
            Shading::Simple3D
        } else {
            Shading::None
        }
    }
}

impl core::ops::BitOr for Options {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    None,
    Simple3D,
    BlinnPhong3D,
}

/// A directional light used by the 3-D shading modes, stored in the "human"
/// units a configuration UI would present (degrees, `[0,1]`/`[1,30]`/`[0.1,10]`
/// ranges) and converted to radians at render start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub angle: f64,
    pub elevation: f64,
    pub opacity: f64,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
    pub gamma: f64,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            angle: 45.0,
            elevation: 45.0,
            opacity: 0.75,
            ambient: 0.2,
            diffuse: 0.5,
            specular: 0.5,
            shininess: 20.0,
            gamma: 1.0,
        }
    }
}

/// Render settings shared between `Mandelbrot` and `Julia`, independent of
/// the view or the resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub colorize: Colorize,
    pub palette_mode: PaletteMode,
    pub options: Options,
    pub stripes: u32,
    pub steps: u32,
    pub ncycle: u32,
    pub oversampling: Oversampling,
    pub light: Light,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            colorize: Colorize::Iterations,
            palette_mode: PaletteMode::Linear,
            options: Options::empty(),
            stripes: 0,
            steps: 0,
            ncycle: 1,
            oversampling: Oversampling::X1,
            light: Light::default(),
        }
    }
}

impl RenderSettings {
    /// The bailout radius (squared) prescribed for this configuration: `4.0`
    /// for plain iteration-count coloring with no 3-D shading, `1e10`
    /// otherwise so smooth iteration and its derived quantities stay
    /// well-defined.
    #[must_use]
    pub fn bailout(&self) -> f64 {
        let plain = self.colorize == Colorize::Iterations
            && matches!(self.palette_mode, PaletteMode::Linear | PaletteMode::Modulo)
            && self.options.shading() == Shading::None
            && self.stripes == 0
            && self.steps == 0;
        if plain {
            4.0
        } else {
            1e10
        }
    }

    /// `max_iter` raised to satisfy the numerical floors required by
    /// `Orbits` (>= 1000) and by `Distance`/`Potential` coloring (>= 4096).
    #[must_use]
    pub fn effective_max_iter(&self, requested: NonZeroU32) -> NonZeroU32 {
        let mut value = requested.get();
        if self.options.orbits() {
            value = value.max(1000);
        }
        if matches!(self.colorize, Colorize::Distance | Colorize::Potential) {
            value = value.max(4096);
        }
        NonZeroU32::new(value).unwrap_or(requested)
    }

    #[must_use]
    pub fn needs_dz(&self) -> bool {
        self.options.inside_distance()
            || self.options.shading() != Shading::None
            || self.stripes > 0
            || self.steps > 0
            || matches!(self.colorize, Colorize::Distance)
    }
}
