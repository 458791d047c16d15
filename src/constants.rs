// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Still capture parameters
pub mod capture {
    use super::Duration;

    /// Quality requested for every snap (0.0 - 1.0)
    pub const MAX_QUALITY: f32 = 1.0;

    /// How long the flash (LED or screen) stays lit before the frame is taken
    pub const FLASH_DURATION: Duration = Duration::from_millis(1000);

    /// Frames arriving before this are discarded while exposure settles
    pub const WARMUP: Duration = Duration::from_millis(500);

    /// Give up on a live capture if no frame arrives in time
    pub const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

    /// Map a 0.0-1.0 quality to a JPEG quality (1-100)
    pub fn jpeg_quality(quality: f32) -> u8 {
        let q = if quality.is_finite() {
            quality.clamp(0.0, 1.0)
        } else {
            MAX_QUALITY
        };
        (1.0 + (q * 99.0).round()) as u8
    }
}

/// Storage locations
pub mod storage {
    /// Folder created under the XDG pictures directory
    pub const PHOTO_FOLDER: &str = "Snapcam";

    /// Folder created under the XDG cache directory for captured-but-unsaved photos
    pub const SPOOL_FOLDER: &str = "snapcam";

    /// Prefix for saved photo filenames
    pub const PHOTO_PREFIX: &str = "IMG_";

    /// Extension of every saved photo
    pub const PHOTO_EXTENSION: &str = "jpg";
}

/// UI layout constants
pub mod ui {
    /// Diameter of each floating action button
    pub const ACTION_BUTTON_SIZE: f32 = 70.0;

    /// Icon size inside the action buttons
    pub const ACTION_ICON_SIZE: u16 = 28;

    /// Gap between action buttons
    pub const ACTION_BUTTON_SPACING: u16 = 5;

    /// Distance of the button row from the bottom edge
    pub const ACTION_ROW_BOTTOM_PADDING: u16 = 30;

    /// Horizontal inset of the button row
    pub const ACTION_ROW_SIDE_PADDING: u16 = 20;

    /// Alpha of the dark button backdrop over the preview
    pub const ACTION_BUTTON_ALPHA: f32 = 0.8;

    /// Scale of the snap button while a capture is in flight
    pub const CAPTURING_SCALE: f32 = 0.85;
}

/// GStreamer pipeline constants
pub mod pipeline {
    /// Maximum buffer queue size (keep small for low latency)
    pub const MAX_BUFFERS: u32 = 2;

    /// Output pixel format for appsink
    pub const OUTPUT_FORMAT: &str = "RGBA";

    /// Preview frames buffered between the appsink and the UI
    pub const PREVIEW_CHANNEL_CAPACITY: usize = 4;

    /// Give the previous pipeline time to release the device when restarting
    pub const RESTART_DELAY_MS: u64 = 50;

    /// Wait before retrying a pipeline that failed to start
    pub const RETRY_DELAY_SECS: u64 = 5;
}

/// Timing constants
pub mod timing {
    /// Frame counter modulo for periodic logging
    pub const FRAME_LOG_INTERVAL: u64 = 30;

    /// Timeout for pipeline stop
    pub const STOP_TIMEOUT_SECS: u64 = 2;

    /// Timeout for pipeline start
    pub const START_TIMEOUT_SECS: u64 = 5;
}

/// Application information utilities
pub mod app_info {
    use std::path::Path;

    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }

    /// Check if the application is running inside a Flatpak sandbox
    pub fn is_flatpak() -> bool {
        Path::new("/.flatpak-info").exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_quality_bounds() {
        assert_eq!(capture::jpeg_quality(1.0), 100);
        assert_eq!(capture::jpeg_quality(0.0), 1);
        assert_eq!(capture::jpeg_quality(0.5), 51);
    }

    #[test]
    fn test_jpeg_quality_clamps_out_of_range() {
        assert_eq!(capture::jpeg_quality(7.0), 100);
        assert_eq!(capture::jpeg_quality(-1.0), 1);
        assert_eq!(capture::jpeg_quality(f32::NAN), 100);
    }
}
