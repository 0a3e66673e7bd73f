use color_space::HexParseError;
use core::fmt;
use image::RgbImage;

/// Errors detected before any pixel work starts.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidHex(HexParseError),
    InvalidView { real_distance: f64, imag_distance: f64 },
    EmptyPalettePoints,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHex(e) => write!(f, "invalid palette color: {e}"),
            Self::InvalidView { real_distance, imag_distance } => write!(
                f,
                "the view must have a strictly positive extent, got ({real_distance}, {imag_distance})"
            ),
            Self::EmptyPalettePoints => write!(f, "a palette needs at least one content color"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidHex(e) => Some(e),
            Self::InvalidView { .. } | Self::EmptyPalettePoints => None,
        }
    }
}

impl From<HexParseError> for ConfigError {
    fn from(e: HexParseError) -> Self {
        Self::InvalidHex(e)
    }
}

/// Errors from allocating the buffers a render needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    AllocationFailed { width: u32, height: u32 },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { width, height } => {
                write!(f, "could not allocate a {width}x{height} image buffer")
            }
        }
    }
}

impl std::error::Error for ResourceError {}

/// Everything that can go wrong before any pixel work starts: either the
/// view/palette configuration is invalid, or the (possibly oversampled)
/// buffer the render needs doesn't fit in this platform's address space.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    Config(ConfigError),
    Resource(ResourceError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Resource(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Resource(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RenderError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ResourceError> for RenderError {
    fn from(e: ResourceError) -> Self {
        Self::Resource(e)
    }
}

/// The result of a render that may have been cooperatively cancelled partway
/// through.
#[derive(Debug)]
pub enum RenderOutcome {
    Complete(RgbImage),
    Partial { image: RgbImage, completed_pixels: usize },
}

impl RenderOutcome {
    /// The image produced, whether the render ran to completion or was
    /// cancelled partway through.
    #[must_use]
    pub fn into_image(self) -> RgbImage {
        match self {
            Self::Complete(image) | Self::Partial { image, .. } => image,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}
