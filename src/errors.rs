// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the camera application

use std::fmt;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Still capture errors
    Capture(CaptureError),
    /// Photo library errors
    Save(SaveError),
}

/// The camera collaborator could not produce a photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// No camera devices found
    NoCamera,
    /// The camera delivered no frame to capture
    NoFrame,
    /// GStreamer pipeline failure
    Pipeline(String),
    /// JPEG encoding or spooling failed
    Encoding(String),
    /// No frame arrived before the capture deadline
    Timeout,
}

/// The photo library could not persist a photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    /// The user did not allow writing to the photo library
    PermissionDenied,
    /// Filesystem failure while copying into the library
    Io(String),
    /// The locator does not point at a readable photo
    InvalidLocator(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Save(e) => write!(f, "Save error: {}", e),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NoCamera => write!(f, "No camera devices found"),
            CaptureError::NoFrame => write!(f, "No frame available for capture"),
            CaptureError::Pipeline(msg) => write!(f, "Pipeline error: {}", msg),
            CaptureError::Encoding(msg) => write!(f, "Encoding failed: {}", msg),
            CaptureError::Timeout => write!(f, "Timed out waiting for a frame"),
        }
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::PermissionDenied => write!(f, "Storage permission denied"),
            SaveError::Io(msg) => write!(f, "I/O error: {}", msg),
            SaveError::InvalidLocator(msg) => write!(f, "Invalid locator: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for SaveError {}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::Capture(err)
    }
}

impl From<SaveError> for AppError {
    fn from(err: SaveError) -> Self {
        AppError::Save(err)
    }
}

impl From<std::io::Error> for SaveError {
    fn from(err: std::io::Error) -> Self {
        SaveError::Io(err.to_string())
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::Encoding(err.to_string())
    }
}

impl From<gstreamer::glib::Error> for CaptureError {
    fn from(err: gstreamer::glib::Error) -> Self {
        CaptureError::Pipeline(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_map_to_save_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: SaveError = io.into();
        assert!(matches!(err, SaveError::Io(ref msg) if msg.contains("read-only")));
    }

    #[test]
    fn test_app_error_display_wraps_source() {
        let err: AppError = CaptureError::Timeout.into();
        assert_eq!(err.to_string(), "Capture error: Timed out waiting for a frame");
    }
}
