use thiserror::Error;

/// Errors surfaced while building a carousel from configuration.
///
/// Image failures during texture loading are not fatal at runtime; front-ends
/// log them and keep the placeholder fill. They are still typed here so the
/// decoding helpers can propagate them with `?`.
#[derive(Debug, Error)]
pub enum CarouselError {
    #[error("carousel needs at least one slide")]
    NoSlides,
    #[error("invalid color {0:?}: expected #rrggbb or #rgb")]
    InvalidColor(String),
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),
    #[error("texture size must be non-zero")]
    ZeroTextureSize,
    #[error("texture size {0} exceeds the 8192 pixel limit")]
    TextureTooLarge(u32),
    #[error("config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, CarouselError>;
