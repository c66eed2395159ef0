use thiserror::Error;

/// Failures of the native file dialogs themselves.
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("user declined the file selection")]
    Cancelled,

    #[error("{source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("failed opening image file: {source}")]
    OpenFailed { source: ExplorerError },

    #[error("failed decoding image data: {source}")]
    DecodeFailed { source: image::ImageError },

    #[error("no image loaded, cannot save")]
    NoImageLoaded,

    #[error("failed exporting image file: {source}")]
    ExportFailed { source: ExplorerError },

    #[error("failed encoding image file: {source}")]
    EncodeFailed { source: image::ImageError },

    #[error("window event source disconnected")]
    WindowLost,
}

pub type Result<T> = std::result::Result<T, ShellError>;

impl ShellError {
    /// True when the user backed out of a dialog rather than something failing.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            ShellError::OpenFailed { source: ExplorerError::Cancelled }
                | ShellError::ExportFailed { source: ExplorerError::Cancelled }
        )
    }

    /// Returns an error code for log records
    pub fn error_code(&self) -> &'static str {
        match self {
            ShellError::OpenFailed { .. } => "OPEN_FAILED",
            ShellError::DecodeFailed { .. } => "DECODE_FAILED",
            ShellError::NoImageLoaded => "NO_IMAGE_LOADED",
            ShellError::ExportFailed { .. } => "EXPORT_FAILED",
            ShellError::EncodeFailed { .. } => "ENCODE_FAILED",
            ShellError::WindowLost => "WINDOW_LOST",
        }
    }

    /// Logs a handler failure. Cancelled dialogs are routine and stay at debug.
    pub fn log(&self) {
        if self.is_cancellation() {
            log::debug!("[{}] {}", self.error_code(), self);
        } else {
            log::warn!("[{}] {}", self.error_code(), self);
        }
    }
}
