// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use snapcam::Config;
use snapcam::config::AppTheme;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(
        config.mirror_preview,
        "Mirror preview should be enabled by default"
    );
    assert!(config.play_shutter_sound);
    assert_eq!(config.app_theme, AppTheme::System);
    assert!(config.photo_directory.is_none());
}

#[test]
fn test_storage_consent_defaults_to_asking() {
    let config = Config::default();
    assert!(config.require_storage_consent);
    assert!(!config.storage_consent_granted);
}

#[test]
fn test_theme_dropdown_index_round_trips() {
    for theme in [AppTheme::System, AppTheme::Dark, AppTheme::Light] {
        assert_eq!(AppTheme::from_index(theme.index()), theme);
    }
    // Out-of-range selections fall back to the desktop theme
    assert_eq!(AppTheme::from_index(9), AppTheme::System);
}
