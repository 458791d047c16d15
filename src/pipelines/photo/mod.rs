// SPDX-License-Identifier: GPL-3.0-only

//! Snap flow: capture, ask for storage permission, save
//!
//! ```text
//! Camera::capture ──err──▶ CaptureFailed
//!       │ ok
//!       ▼
//! PermissionGate ──denied──▶ PermissionDenied (no notification)
//!       │ granted
//!       ▼
//! PhotoLibrary::save ──err──▶ SaveFailed
//!       │ ok
//!       ▼
//!     Saved
//! ```
//!
//! Every stage runs at most once; nothing is retried or queued.

pub mod encoding;

use crate::backends::camera::{Camera, CaptureRequest, CapturedPhoto};
use crate::backends::permission::PermissionGate;
use crate::errors::{CaptureError, SaveError};
use crate::fl;
use crate::storage::{MediaKind, PhotoLibrary};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// User-facing result of a snap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    PhotoSaved,
    SaveFailed,
    CaptureFailed,
}

impl Notification {
    pub fn title(self) -> String {
        match self {
            Notification::PhotoSaved => fl!("notification-success-title"),
            Notification::SaveFailed | Notification::CaptureFailed => {
                fl!("notification-error-title")
            }
        }
    }

    pub fn body(self) -> String {
        match self {
            Notification::PhotoSaved => fl!("photo-saved"),
            Notification::SaveFailed => fl!("photo-save-failed"),
            Notification::CaptureFailed => fl!("photo-capture-failed"),
        }
    }

    pub fn is_error(self) -> bool {
        self != Notification::PhotoSaved
    }
}

/// How a snap ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapOutcome {
    Saved(PathBuf),
    CaptureFailed(CaptureError),
    SaveFailed(SaveError),
    /// The user declined; nothing is shown
    PermissionDenied,
}

impl SnapOutcome {
    /// The single notification this outcome produces, if any
    pub fn notification(&self) -> Option<Notification> {
        match self {
            SnapOutcome::Saved(_) => Some(Notification::PhotoSaved),
            SnapOutcome::CaptureFailed(_) => Some(Notification::CaptureFailed),
            SnapOutcome::SaveFailed(_) => Some(Notification::SaveFailed),
            SnapOutcome::PermissionDenied => None,
        }
    }
}

/// Capture then save over injected collaborators
pub struct SnapPipeline<C, G, L> {
    camera: C,
    gate: G,
    library: L,
}

impl<C, G, L> SnapPipeline<C, G, L>
where
    C: Camera + Sync,
    G: PermissionGate + Sync,
    L: PhotoLibrary + Sync,
{
    pub fn new(camera: C, gate: G, library: L) -> Self {
        Self {
            camera,
            gate,
            library,
        }
    }

    /// Take a photo at full quality and save it
    pub async fn run(&self) -> SnapOutcome {
        match self.capture().await {
            Ok(photo) => self.save(photo).await,
            Err(e) => {
                error!(error = %e, "Photo capture failed");
                SnapOutcome::CaptureFailed(e)
            }
        }
    }

    pub async fn capture(&self) -> Result<CapturedPhoto, CaptureError> {
        self.camera.capture(CaptureRequest::default()).await
    }

    /// Check or ask for permission, then hand the photo to the library
    pub async fn save(&self, photo: CapturedPhoto) -> SnapOutcome {
        if !self.gate.is_granted() && !self.gate.request().await {
            info!("Storage permission denied, photo not saved");
            discard(&photo).await;
            return SnapOutcome::PermissionDenied;
        }

        match self.library.save(&photo, MediaKind::Photo).await {
            Ok(path) => SnapOutcome::Saved(path),
            Err(e) => {
                error!(error = %e, "Saving photo to library failed");
                discard(&photo).await;
                SnapOutcome::SaveFailed(e)
            }
        }
    }
}

impl<C, G, L> SnapPipeline<C, G, L> {
    pub fn gate(&self) -> &G {
        &self.gate
    }

    pub fn into_parts(self) -> (C, G, L) {
        (self.camera, self.gate, self.library)
    }
}

/// Drop a spooled photo that will never reach the library
async fn discard(photo: &CapturedPhoto) {
    if let Err(e) = tokio::fs::remove_file(&photo.locator).await {
        debug!(error = %e, path = %photo.locator.display(), "Could not remove spooled photo");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_notifications() {
        assert_eq!(
            SnapOutcome::Saved(PathBuf::from("/p.jpg")).notification(),
            Some(Notification::PhotoSaved)
        );
        assert_eq!(
            SnapOutcome::CaptureFailed(CaptureError::NoFrame).notification(),
            Some(Notification::CaptureFailed)
        );
        assert_eq!(
            SnapOutcome::SaveFailed(SaveError::Io("disk full".into())).notification(),
            Some(Notification::SaveFailed)
        );
        assert_eq!(SnapOutcome::PermissionDenied.notification(), None);
    }

    #[test]
    fn test_notification_texts() {
        assert_eq!(Notification::PhotoSaved.title(), "Success");
        assert_eq!(
            Notification::PhotoSaved.body(),
            "Photo has been saved in photo library."
        );
        assert_eq!(Notification::SaveFailed.title(), "An error occurred");
        assert_eq!(
            Notification::SaveFailed.body(),
            "Failed saving photo to library."
        );
        assert_eq!(Notification::CaptureFailed.title(), "An error occurred");
        assert_eq!(Notification::CaptureFailed.body(), "Failed photo capture");
        assert!(!Notification::PhotoSaved.is_error());
    }
}
