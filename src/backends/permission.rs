// SPDX-License-Identifier: GPL-3.0-only

//! Consent for writing photos into the library
//!
//! A grant is cached in the app config so the user is asked once. A denial
//! is never cached; the next save asks again.

use crate::config::Config;
use crate::fl;
use cosmic::cosmic_config::{self, ConfigSet};
use std::future::Future;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Asks whether photos may be written to the library
pub trait PermissionGate {
    /// Whether a grant is already on record
    fn is_granted(&self) -> bool;

    /// Prompt the user. Resolves to the answer.
    fn request(&self) -> impl Future<Output = bool> + Send;
}

/// Cached consent backed by the app config
#[derive(Debug, Clone)]
pub struct ConsentStore {
    required: Arc<AtomicBool>,
    granted: Arc<AtomicBool>,
    handler: Option<cosmic_config::Config>,
}

impl ConsentStore {
    pub fn new(config: &Config, handler: Option<cosmic_config::Config>) -> Self {
        Self {
            required: Arc::new(AtomicBool::new(config.require_storage_consent)),
            granted: Arc::new(AtomicBool::new(config.storage_consent_granted)),
            handler,
        }
    }

    /// A store that never persists, for one-off runs
    pub fn in_memory(required: bool, granted: bool) -> Self {
        Self {
            required: Arc::new(AtomicBool::new(required)),
            granted: Arc::new(AtomicBool::new(granted)),
            handler: None,
        }
    }

    pub fn is_granted(&self) -> bool {
        !self.required.load(Ordering::Acquire) || self.granted.load(Ordering::Acquire)
    }

    /// Take both settings from `config`, shared with every clone
    pub fn reload(&self, config: &Config) {
        self.required
            .store(config.require_storage_consent, Ordering::Release);
        self.granted
            .store(config.storage_consent_granted, Ordering::Release);
    }

    /// A grant recorded through this store or any clone of it
    pub fn has_recorded_grant(&self) -> bool {
        self.granted.load(Ordering::Acquire)
    }

    /// Carry a grant recorded by an in-flight snap into `config`.
    ///
    /// Returns whether `config` changed.
    pub fn merge_into(&self, config: &mut Config) -> bool {
        if self.has_recorded_grant() && !config.storage_consent_granted {
            config.storage_consent_granted = true;
            return true;
        }
        false
    }

    /// Remember a grant and write it to the config
    pub fn record_grant(&self) {
        self.granted.store(true, Ordering::Release);
        if let Some(handler) = self.handler.as_ref()
            && let Err(err) = handler.set("storage_consent_granted", true)
        {
            warn!(?err, "Failed to save storage consent");
        }
    }
}

/// How the user is asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentPrompt {
    /// Desktop Yes/No message dialog
    Dialog,
    /// y/N question on the terminal
    Terminal,
    /// Grant this request without asking or remembering it (`--yes`)
    AssumeYes,
}

/// Storage permission gate used by the app and the CLI
#[derive(Debug, Clone)]
pub struct StorageConsent {
    store: ConsentStore,
    prompt: ConsentPrompt,
    directory: PathBuf,
}

impl StorageConsent {
    pub fn new(store: ConsentStore, prompt: ConsentPrompt, directory: PathBuf) -> Self {
        Self {
            store,
            prompt,
            directory,
        }
    }
}

impl PermissionGate for StorageConsent {
    fn is_granted(&self) -> bool {
        self.store.is_granted()
    }

    async fn request(&self) -> bool {
        let title = fl!("storage-consent-title");
        let body = fl!(
            "storage-consent-body",
            directory = self.directory.display().to_string()
        );
        let prompt = self.prompt;

        let granted = match prompt {
            ConsentPrompt::AssumeYes => true,
            ConsentPrompt::Dialog => tokio::task::spawn_blocking(move || ask_dialog(&title, &body))
                .await
                .unwrap_or(false),
            ConsentPrompt::Terminal => tokio::task::spawn_blocking(move || ask_terminal(&body))
                .await
                .unwrap_or(false),
        };

        if prompt == ConsentPrompt::AssumeYes {
            info!("Storage consent assumed for this run");
        } else if granted {
            info!(?prompt, "Storage consent granted");
            self.store.record_grant();
        } else {
            info!(?prompt, "Storage consent denied");
        }
        granted
    }
}

fn ask_dialog(title: &str, body: &str) -> bool {
    let answer = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Info)
        .set_title(title)
        .set_description(body)
        .set_buttons(rfd::MessageButtons::YesNo)
        .show();
    answer == rfd::MessageDialogResult::Yes
}

fn ask_terminal(body: &str) -> bool {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        warn!("Cannot ask for storage consent without a terminal, pass --yes to allow saving");
        return false;
    }

    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "{} [y/N] ", body);
    let _ = stdout.flush();

    let mut line = String::new();
    if stdin.lock().read_line(&mut line).is_err() {
        return false;
    }
    parse_answer(&line)
}

/// Only an explicit yes counts
fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consent_not_required_is_granted() {
        assert!(ConsentStore::in_memory(false, false).is_granted());
        assert!(!ConsentStore::in_memory(true, false).is_granted());
        assert!(ConsentStore::in_memory(true, true).is_granted());
    }

    #[test]
    fn test_record_grant_is_shared_between_clones() {
        let store = ConsentStore::in_memory(true, false);
        let clone = store.clone();
        store.record_grant();
        assert!(clone.is_granted());
    }

    #[test]
    fn test_answer_parsing() {
        assert!(parse_answer("y\n"));
        assert!(parse_answer(" YES "));
        assert!(!parse_answer("\n"));
        assert!(!parse_answer("no"));
        assert!(!parse_answer("yep"));
    }

    #[tokio::test]
    async fn test_assume_yes_grants_only_this_request() {
        let store = ConsentStore::in_memory(true, false);
        let gate = StorageConsent::new(store.clone(), ConsentPrompt::AssumeYes, PathBuf::from("/tmp"));
        assert!(!gate.is_granted());
        assert!(gate.request().await);
        assert!(!store.is_granted());
        assert!(!store.has_recorded_grant());
    }

    #[test]
    fn test_grant_from_snap_reaches_model_config() {
        let mut config = Config::default();
        let store = ConsentStore::new(&config, None);
        let in_flight = store.clone();

        assert!(!store.merge_into(&mut config));
        assert!(!config.storage_consent_granted);

        in_flight.record_grant();
        assert!(store.merge_into(&mut config));
        assert!(config.storage_consent_granted);
        assert!(!store.merge_into(&mut config));
    }

    #[test]
    fn test_reload_reaches_in_flight_clones() {
        let store = ConsentStore::in_memory(true, true);
        let in_flight = store.clone();

        store.reload(&Config::default());
        assert!(!in_flight.is_granted());

        let relaxed = Config {
            require_storage_consent: false,
            ..Config::default()
        };
        store.reload(&relaxed);
        assert!(in_flight.is_granted());
    }
}
