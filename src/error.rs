use thiserror::Error;

/// Errors that can occur while exporting the drawing
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Export target has no pixels ({width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("Export target of {width}x{height} pixels exceeds the limit of {max} pixels")]
    TooLarge { width: u64, height: u64, max: u64 },

    #[error("Browser download failed: {0}")]
    Download(String),
}

/// Errors that can occur while loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
