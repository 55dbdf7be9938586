use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Vibrato error: {0}")]
    Vibrato(Box<vibrato::errors::VibratoError>),

    #[error("Image error: {0}")]
    Image(Box<image::ImageError>),

    #[error("Invalid font file: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("Target directory not found: {}", .0.display())]
    TargetNotFound(PathBuf),

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Failed to load file: {0}")]
    FailedToLoadFile(String),

    #[error("No tokens were extracted from the provided directory.")]
    NoTokens,

    #[error("No usable font found. Pass --font-path with a TTF/OTF font.")]
    MissingFont,

    #[error(
        "Font cannot render Japanese token '{0}'. Pass --font-path with a font that supports Japanese."
    )]
    MissingGlyphs(String),

    #[error("CloudError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for CloudError {
    fn from(error: std::io::Error) -> Self {
        CloudError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for CloudError {
    fn from(error: reqwest::Error) -> Self {
        CloudError::Reqwest(Box::new(error))
    }
}

impl From<vibrato::errors::VibratoError> for CloudError {
    fn from(error: vibrato::errors::VibratoError) -> Self {
        CloudError::Vibrato(Box::new(error))
    }
}

impl From<image::ImageError> for CloudError {
    fn from(error: image::ImageError) -> Self {
        CloudError::Image(Box::new(error))
    }
}
