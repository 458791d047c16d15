// SPDX-License-Identifier: GPL-3.0-only

//! Photo library backed by a directory on disk

use crate::backends::camera::CapturedPhoto;
use crate::config::Config;
use crate::constants::storage;
use crate::errors::SaveError;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Kinds of media the library is asked to persist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
}

/// Something that keeps photos
pub trait PhotoLibrary {
    /// Persist the photo at `photo.locator`, returning where it ended up
    fn save(
        &self,
        photo: &CapturedPhoto,
        kind: MediaKind,
    ) -> impl Future<Output = Result<PathBuf, SaveError>> + Send;
}

/// Copies photos into a folder as `IMG_YYYYMMDD_HHMMSS.jpg`
#[derive(Debug, Clone)]
pub struct DirectoryLibrary {
    root: PathBuf,
}

impl DirectoryLibrary {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl PhotoLibrary for DirectoryLibrary {
    async fn save(&self, photo: &CapturedPhoto, kind: MediaKind) -> Result<PathBuf, SaveError> {
        let source = photo.locator.clone();
        let root = self.root.clone();
        debug!(?kind, source = %source.display(), "Saving to library");

        let saved = tokio::task::spawn_blocking(move || {
            if !source.is_file() {
                return Err(SaveError::InvalidLocator(source.display().to_string()));
            }
            std::fs::create_dir_all(&root)?;

            let stem = format!(
                "{}{}",
                storage::PHOTO_PREFIX,
                chrono::Local::now().format("%Y%m%d_%H%M%S")
            );
            let target = unique_photo_path(&root, &stem);
            std::fs::copy(&source, &target)?;

            if let Err(e) = std::fs::remove_file(&source) {
                debug!(error = %e, "Could not remove spooled photo");
            }
            Ok(target)
        })
        .await
        .map_err(|e| SaveError::Io(format!("Save task error: {}", e)))??;

        info!(path = %saved.display(), "Photo saved successfully");
        Ok(saved)
    }
}

/// First free `stem.jpg`, `stem_1.jpg`, `stem_2.jpg`, ... in `dir`
pub fn unique_photo_path(dir: &Path, stem: &str) -> PathBuf {
    let candidate = dir.join(format!("{}.{}", stem, storage::PHOTO_EXTENSION));
    if !candidate.exists() {
        return candidate;
    }
    (1u32..)
        .map(|n| dir.join(format!("{}_{}.{}", stem, n, storage::PHOTO_EXTENSION)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Photo library folder from config, or `~/Pictures/Snapcam`
pub fn photo_directory(config: &Config) -> PathBuf {
    if let Some(dir) = config.photo_directory.as_deref().filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(storage::PHOTO_FOLDER)
}

/// Where captured photos wait until they are saved
pub fn spool_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(storage::SPOOL_FOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("snapcam-{}-{}", tag, uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_unique_path_adds_suffix() {
        let dir = temp_dir("unique");
        assert_eq!(unique_photo_path(&dir, "IMG_1"), dir.join("IMG_1.jpg"));
        std::fs::write(dir.join("IMG_1.jpg"), b"x").unwrap();
        assert_eq!(unique_photo_path(&dir, "IMG_1"), dir.join("IMG_1_1.jpg"));
        std::fs::write(dir.join("IMG_1_1.jpg"), b"x").unwrap();
        assert_eq!(unique_photo_path(&dir, "IMG_1"), dir.join("IMG_1_2.jpg"));
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_configured_directory_wins() {
        let config = Config {
            photo_directory: Some("/srv/photos".to_string()),
            ..Config::default()
        };
        assert_eq!(photo_directory(&config), PathBuf::from("/srv/photos"));

        let blank = Config {
            photo_directory: Some("  ".to_string()),
            ..Config::default()
        };
        assert!(photo_directory(&blank).ends_with(storage::PHOTO_FOLDER));
    }

    #[tokio::test]
    async fn test_save_moves_spooled_photo() {
        let spool = temp_dir("spool");
        let library_dir = spool.join("library");
        let locator = spool.join("capture.jpg");
        std::fs::write(&locator, b"jpeg").unwrap();

        let library = DirectoryLibrary::new(library_dir.clone());
        let saved = library
            .save(&CapturedPhoto { locator: locator.clone() }, MediaKind::Photo)
            .await
            .unwrap();

        assert!(saved.starts_with(&library_dir));
        let name = saved.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("IMG_") && name.ends_with(".jpg"));
        assert_eq!(std::fs::read(&saved).unwrap(), b"jpeg");
        assert!(!locator.exists());
        std::fs::remove_dir_all(spool).ok();
    }

    #[tokio::test]
    async fn test_save_missing_locator_fails() {
        let dir = temp_dir("missing");
        let library = DirectoryLibrary::new(dir.join("library"));
        let result = library
            .save(
                &CapturedPhoto {
                    locator: dir.join("gone.jpg"),
                },
                MediaKind::Photo,
            )
            .await;
        assert!(matches!(result, Err(SaveError::InvalidLocator(_))));
        std::fs::remove_dir_all(dir).ok();
    }
}
