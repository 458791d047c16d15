// SPDX-License-Identifier: GPL-3.0-only

//! Settings and config handlers

use crate::app::state::{AppModel, Message};
use crate::config::{AppTheme, Config};
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use tracing::{error, info};

impl AppModel {
    pub(crate) fn handle_update_config(&mut self, config: Config) -> Task<cosmic::Action<Message>> {
        info!("UpdateConfig received");
        let theme_changed = config.app_theme != self.config.app_theme;
        self.config = config;
        if self.is_capturing {
            self.consent.merge_into(&mut self.config);
        }
        self.consent.reload(&self.config);

        if theme_changed {
            cosmic::command::set_theme(self.config.app_theme.theme())
        } else {
            Task::none()
        }
    }

    pub(crate) fn handle_set_app_theme(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let app_theme = AppTheme::from_index(index);
        info!(?app_theme, "Setting application theme");
        self.config.app_theme = app_theme;
        self.save_config("app theme");
        cosmic::command::set_theme(app_theme.theme())
    }

    pub(crate) fn handle_toggle_mirror_preview(&mut self) -> Task<cosmic::Action<Message>> {
        self.config.mirror_preview = !self.config.mirror_preview;
        info!(mirror_preview = self.config.mirror_preview, "Mirror preview toggled");
        self.save_config("mirror preview");
        Task::none()
    }

    pub(crate) fn handle_toggle_shutter_sound(&mut self) -> Task<cosmic::Action<Message>> {
        self.config.play_shutter_sound = !self.config.play_shutter_sound;
        self.save_config("shutter sound");
        Task::none()
    }

    pub(crate) fn handle_toggle_storage_consent(&mut self) -> Task<cosmic::Action<Message>> {
        self.consent.merge_into(&mut self.config);
        self.config.require_storage_consent = !self.config.require_storage_consent;
        info!(
            require_storage_consent = self.config.require_storage_consent,
            "Storage consent requirement toggled"
        );
        self.consent.reload(&self.config);
        self.save_config("storage consent requirement");
        Task::none()
    }

    pub(crate) fn handle_forget_storage_consent(&mut self) -> Task<cosmic::Action<Message>> {
        info!("Forgetting storage consent");
        self.config.storage_consent_granted = false;
        self.consent.reload(&self.config);
        self.save_config("storage consent");
        Task::none()
    }

    /// Write the whole config, logging failures
    pub(crate) fn save_config(&mut self, what: &str) {
        // A grant written by an in-flight snap must not be overwritten
        self.consent.merge_into(&mut self.config);
        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, setting = what, "Failed to save setting");
        }
    }
}
