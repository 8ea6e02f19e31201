use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pxscan operations
#[derive(Error, Diagnostic, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    #[diagnostic(code(pxscan::io))]
    Io(#[from] std::io::Error),

    #[error("Image error with {path}: {message}")]
    #[diagnostic(code(pxscan::image))]
    Image {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("JSON error: {0}")]
    #[diagnostic(code(pxscan::json))]
    Json(#[from] serde_json::Error),

    #[error("Pixel ({x}, {y}) is outside the {width}x{height} image")]
    #[diagnostic(code(pxscan::bounds))]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Region seeded at ({x}, {y}) with {points} member(s) fits no classification")]
    #[diagnostic(code(pxscan::classify))]
    UnclassifiableRegion { x: u32, y: u32, points: usize },
}

pub type Result<T> = std::result::Result<T, ScanError>;
