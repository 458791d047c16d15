// SPDX-License-Identifier: GPL-3.0-only

use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use cosmic::{Theme, theme};
use serde::{Deserialize, Serialize};

/// Application theme preference
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AppTheme {
    /// Follow system theme (dark or light based on system setting)
    #[default]
    System,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl AppTheme {
    /// Get the COSMIC theme for this app theme preference
    pub fn theme(&self) -> Theme {
        match self {
            Self::Dark => {
                let mut theme = theme::system_dark();
                theme.theme_type.prefer_dark(Some(true));
                theme
            }
            Self::Light => {
                let mut theme = theme::system_light();
                theme.theme_type.prefer_dark(Some(false));
                theme
            }
            Self::System => theme::system_preference(),
        }
    }

    /// Index into the settings dropdown
    pub fn index(self) -> usize {
        match self {
            Self::System => 0,
            Self::Dark => 1,
            Self::Light => 2,
        }
    }

    pub fn from_index(index: usize) -> Self {
        match index {
            1 => Self::Dark,
            2 => Self::Light,
            _ => Self::System,
        }
    }
}

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq, Serialize, Deserialize)]
#[version = 1]
pub struct Config {
    /// Application theme preference (System, Dark, Light)
    pub app_theme: AppTheme,
    /// Mirror the front camera preview horizontally (selfie mode)
    pub mirror_preview: bool,
    /// Play the desktop shutter sound after each capture
    pub play_shutter_sound: bool,
    /// Photo library folder; `None` means `~/Pictures/Snapcam`
    pub photo_directory: Option<String>,
    /// Ask before the first photo is written to the library
    pub require_storage_consent: bool,
    /// The user allowed writing to the library
    pub storage_consent_granted: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_theme: AppTheme::default(),
            mirror_preview: true,
            play_shutter_sound: true,
            photo_directory: None,
            require_storage_consent: true,
            storage_consent_granted: false,
        }
    }
}

impl Config {
    /// Load the stored config, falling back to defaults on any error
    pub fn load(app_id: &str) -> (Option<cosmic_config::Config>, Self) {
        match cosmic_config::Config::new(app_id, Self::VERSION) {
            Ok(handler) => {
                let config = match Self::get_entry(&handler) {
                    Ok(config) => config,
                    Err((errors, config)) => {
                        tracing::error!(?errors, "Errors loading config");
                        config
                    }
                };
                (Some(handler), config)
            }
            Err(err) => {
                tracing::error!(%err, "Failed to create config handler");
                (None, Self::default())
            }
        }
    }
}
