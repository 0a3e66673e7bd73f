use core::num::{NonZeroU32, NonZeroUsize};

use clap::{Parser, ValueEnum};

use crate::resolution::Resolution;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Renders an escape-time fractal (the Mandelbrot set, or a filled Julia
/// set) to a png file, with adaptive subdivision, stripe/step shading and a
/// handful of palette-mapping modes.
pub struct Cli {
    #[arg(
        long,
        value_name = "RE,IM",
        value_parser(parse_complex),
        allow_hyphen_values = true
    )]
    /// Render a filled Julia set with this seed instead of the Mandelbrot set
    pub julia: Option<(f64, f64)>,

    #[arg(
        short,
        long,
        value_name = "RE(CENTER)",
        default_value_t = -0.75,
        allow_hyphen_values = true
    )]
    /// The real part of the center point of the image
    pub real_center: f64,

    #[arg(
        short,
        long,
        value_name = "IM(CENTER)",
        default_value_t = 0.0,
        allow_hyphen_values = true
    )]
    /// The imaginary part of the center point of the image
    pub imag_center: f64,

    #[arg(
        short,
        long,
        value_name = "ZOOM LEVEL",
        default_value_t = 0.0,
        allow_hyphen_values = true
    )]
    /// A real number describing how far in to zoom on the given center point.
    /// This number works on an exponential scale where 0 means no zoom
    /// and every time it is increased by 1 the vertical and horizontal
    /// distances covered by the image are halved
    pub zoom: f64,

    #[arg(short = 'R', long, default_value = "1920:1080")]
    /// The resolution of the image, given as `x_res:y_res`
    pub resolution: Resolution,

    #[arg(
        short,
        long,
        value_name = "MAX ITERATIONS",
        default_value_t = NonZeroU32::new(1000).unwrap(),
    )]
    /// The maximum number of iterations for each pixel
    pub max_iterations: NonZeroU32,

    #[arg(long, value_delimiter = ',', default_values_t = ["000000".to_string(), "ffffff".to_string()])]
    /// Hex colors (with or without a leading '#') used as the palette's anchor points
    pub palette: Vec<String>,

    #[arg(long, default_value_t = 256)]
    /// The number of entries generated along the palette
    pub palette_len: usize,

    #[arg(long)]
    /// Hex color painted for points inside the set. Defaults to the palette's last anchor
    pub interior_color: Option<String>,

    #[arg(long, value_enum, default_value_t = Colorize::Iterations)]
    /// The escape-time quantity that drives the palette lookup
    pub colorize: Colorize,

    #[arg(long, value_enum, default_value_t = PaletteMode::Linear)]
    /// How the chosen scalar is mapped onto the palette
    pub palette_mode: PaletteMode,

    #[arg(long, default_value_t = 0)]
    /// Stripe-average overlay frequency; 0 disables stripes
    pub stripes: u32,

    #[arg(long, default_value_t = 0)]
    /// Step-shader overlay count; 0 disables steps
    pub steps: u32,

    #[arg(long, default_value_t = 1)]
    /// The number of palette cycles to use with `palette-mode modulo`, and the
    /// stripe/step phase's cycle length
    pub ncycle: u32,

    #[arg(long, value_enum, default_value_t = Oversampling::X1)]
    /// Supersampling factor; the image is drawn at this multiple of the
    /// requested resolution and box-filtered back down
    pub oversampling: Oversampling,

    #[arg(long)]
    /// Color interior points by the period of the orbit they converge to
    pub orbits: bool,

    #[arg(long)]
    /// Shade interior points by their distance estimate instead of painting
    /// them with the flat sentinel color
    pub inside_distance: bool,

    #[arg(long, value_enum, default_value_t = Shading::None)]
    /// 3-D relief shading mode
    pub shading: Shading,

    #[arg(long, default_value_t = 45.0)]
    /// Light azimuth in degrees
    pub light_angle: f64,

    #[arg(long, default_value_t = 45.0)]
    /// Light elevation in degrees
    pub light_elevation: f64,

    #[arg(long, default_value_t = 0.75)]
    /// Opacity of the shading overlay, in `[0, 1]`
    pub light_opacity: f64,

    #[arg(long, default_value_t = 0.2)]
    /// Ambient light term
    pub light_ambient: f64,

    #[arg(long, default_value_t = 0.5)]
    /// Diffuse light term
    pub light_diffuse: f64,

    #[arg(long, default_value_t = 0.5)]
    /// Specular light term, only used by `--shading blinn-phong3d`
    pub light_specular: f64,

    #[arg(long, default_value_t = 20.0)]
    /// Specular shininess exponent, only used by `--shading blinn-phong3d`
    pub light_shininess: f64,

    #[arg(long, default_value_t = 1.0)]
    /// Output gamma correction; 1.0 disables it
    pub gamma: f64,

    #[arg(long, value_enum, default_value_t = Driver::SqemRecursive)]
    /// Which renderer driver strategy to use
    pub driver: Driver,

    #[arg(short, long)]
    /// The number of threads to render with. Defaults to the number of logical cores
    pub jobs: Option<NonZeroUsize>,

    #[arg(short, long, default_value = "render.png")]
    /// The path to save the resulting image to
    pub output_path: String,

    #[arg(short, long)]
    /// Print extra information and show the progress of the rendering process
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Colorize {
    Iterations,
    Distance,
    Potential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaletteMode {
    Linear,
    Modulo,
    Hue,
    HueDyn,
    LchDyn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Oversampling {
    X1,
    X2,
    X3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shading {
    None,
    Simple3D,
    BlinnPhong3D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Driver {
    Vectorized,
    SqemRecursive,
    SqemLinear,
}

/// Parses a `re,im` pair, as used by `--julia`.
fn parse_complex(s: &str) -> Result<(f64, f64), String> {
    let (re, im) = s
        .split_once(',')
        .ok_or_else(|| "expected a pair in the form `re,im`".to_string())?;
    let re: f64 = re.trim().parse().map_err(|e| format!("invalid real part: {e}"))?;
    let im: f64 = im.trim().parse().map_err(|e| format!("invalid imaginary part: {e}"))?;
    Ok((re, im))
}

#[cfg(test)]
mod test_cli {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_julia_seed() {
        assert_eq!(parse_complex("-0.4,0.6"), Ok((-0.4, 0.6)));
        assert!(parse_complex("nope").is_err());
    }
}
