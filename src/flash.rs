// SPDX-License-Identifier: GPL-3.0-only

//! Flash mode and hardware flash LED control via Linux sysfs
//!
//! LEDs are discovered at `/sys/class/leds/*:flash` and driven through the
//! torch `brightness` file, which `feedbackd` makes group-writable. The
//! root-only `flash_strobe` interface is never touched.

use serde::{Deserialize, Serialize};
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const LEDS_DIR: &str = "/sys/class/leds";

/// Whether the capture flash fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlashMode {
    #[default]
    Off,
    On,
}

impl FlashMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::On,
            FlashMode::On => FlashMode::Off,
        }
    }

    pub fn is_on(self) -> bool {
        self == FlashMode::On
    }
}

impl std::fmt::Display for FlashMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlashMode::Off => write!(f, "off"),
            FlashMode::On => write!(f, "on"),
        }
    }
}

/// A writable flash LED
#[derive(Debug, Clone)]
pub struct FlashDevice {
    /// Sysfs path, e.g. `/sys/class/leds/white:flash`
    path: PathBuf,
    max_brightness: u32,
    name: String,
}

impl FlashDevice {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set raw brightness (clamped to `max_brightness`)
    fn set_brightness(&self, value: u32) -> io::Result<()> {
        let clamped = value.min(self.max_brightness);
        std::fs::write(self.path.join("brightness"), clamped.to_string())
    }

    pub fn on(&self) -> io::Result<()> {
        self.set_brightness(self.max_brightness)
    }

    pub fn off(&self) -> io::Result<()> {
        self.set_brightness(0)
    }
}

/// Flash LEDs found on this machine.
///
/// Keeps "hardware exists" apart from "we can drive it" so a missing group
/// membership shows up as a hint instead of a silently absent flash.
#[derive(Debug, Clone, Default)]
pub struct FlashHardware {
    pub devices: Vec<FlashDevice>,
    /// Set when LEDs exist but none is writable
    pub permission_hint: Option<String>,
}

impl FlashHardware {
    /// Scan the system LED class directory
    pub fn detect() -> Self {
        Self::detect_in(Path::new(LEDS_DIR))
    }

    /// Scan an LED class directory laid out like `/sys/class/leds`
    pub fn detect_in(leds_dir: &Path) -> Self {
        let Ok(entries) = std::fs::read_dir(leds_dir) else {
            debug!(dir = %leds_dir.display(), "No LED class directory, flash LEDs unavailable");
            return Self::default();
        };

        let mut devices = Vec::new();
        let mut unwritable: Vec<PathBuf> = Vec::new();

        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !name.ends_with(":flash") {
                continue;
            }

            let led_path = entry.path();
            let Some(max_brightness) = read_max_brightness(&led_path) else {
                continue;
            };

            let brightness_path = led_path.join("brightness");
            match std::fs::OpenOptions::new().write(true).open(&brightness_path) {
                Ok(_) => {
                    info!(name, max_brightness, "Discovered flash LED");
                    devices.push(FlashDevice {
                        path: led_path,
                        max_brightness,
                        name: name.to_string(),
                    });
                }
                Err(e) => {
                    warn!(path = %brightness_path.display(), error = %e, "Flash LED found but not writable");
                    unwritable.push(brightness_path);
                }
            }
        }

        devices.sort_by(|a, b| a.name.cmp(&b.name));

        let permission_hint = if devices.is_empty() && !unwritable.is_empty() {
            Some(permission_hint(&unwritable[0]))
        } else {
            None
        };

        Self {
            devices,
            permission_hint,
        }
    }

    pub fn has_devices(&self) -> bool {
        !self.devices.is_empty()
    }

    /// Light every LED at full brightness
    pub fn all_on(&self) {
        for dev in &self.devices {
            if let Err(e) = dev.on() {
                warn!(device = %dev.name, error = %e, "Failed to turn on flash LED");
            }
        }
    }

    pub fn all_off(&self) {
        for dev in &self.devices {
            if let Err(e) = dev.off() {
                warn!(device = %dev.name, error = %e, "Failed to turn off flash LED");
            }
        }
    }
}

fn read_max_brightness(led_path: &Path) -> Option<u32> {
    let path = led_path.join("max_brightness");
    match std::fs::read_to_string(&path) {
        Ok(s) => match s.trim().parse::<u32>() {
            Ok(v) if v > 0 => Some(v),
            _ => {
                warn!(path = %path.display(), "Invalid max_brightness value");
                None
            }
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read max_brightness");
            None
        }
    }
}

/// Tell the user which group grants LED access, resolved from file ownership
fn permission_hint(brightness_path: &Path) -> String {
    let username = std::env::var("USER").unwrap_or_else(|_| "user".to_string());
    let escalation_tool = if Path::new("/usr/bin/doas").exists() {
        "doas"
    } else {
        "sudo"
    };

    let group = std::fs::metadata(brightness_path)
        .ok()
        .and_then(|meta| group_name(meta.gid()))
        .unwrap_or_else(|| "feedbackd".to_string());

    format!(
        "Flash LEDs detected but cannot be controlled. \
         Run: {escalation_tool} adduser {username} {group}, then log out and back in."
    )
}

fn group_name(gid: u32) -> Option<String> {
    let groups = std::fs::read_to_string("/etc/group").ok()?;
    groups.lines().find_map(|line| {
        let mut parts = line.split(':');
        let name = parts.next()?;
        let id = parts.nth(1)?.parse::<u32>().ok()?;
        (id == gid).then(|| name.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_led_dir(leds: &[(&str, &str)]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("snapcam-leds-{}", uuid::Uuid::new_v4()));
        for (name, max) in leds {
            let led = dir.join(name);
            std::fs::create_dir_all(&led).unwrap();
            std::fs::write(led.join("max_brightness"), max).unwrap();
            std::fs::write(led.join("brightness"), "0").unwrap();
        }
        dir
    }

    #[test]
    fn test_flash_mode_toggles_between_two_values() {
        assert_eq!(FlashMode::default(), FlashMode::Off);
        assert_eq!(FlashMode::Off.toggled(), FlashMode::On);
        assert_eq!(FlashMode::On.toggled(), FlashMode::Off);
    }

    #[test]
    fn test_detect_only_flash_leds() {
        let dir = fake_led_dir(&[("white:flash", "255"), ("red:status", "1")]);
        let hardware = FlashHardware::detect_in(&dir);
        assert_eq!(hardware.devices.len(), 1);
        assert_eq!(hardware.devices[0].name(), "white:flash");
        assert!(hardware.permission_hint.is_none());
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_invalid_max_brightness_is_skipped() {
        let dir = fake_led_dir(&[("white:flash", "0"), ("yellow:flash", "junk")]);
        let hardware = FlashHardware::detect_in(&dir);
        assert!(!hardware.has_devices());
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_all_on_writes_max_brightness() {
        let dir = fake_led_dir(&[("white:flash", "42")]);
        let hardware = FlashHardware::detect_in(&dir);
        hardware.all_on();
        let value = std::fs::read_to_string(dir.join("white:flash/brightness")).unwrap();
        assert_eq!(value, "42");
        hardware.all_off();
        let value = std::fs::read_to_string(dir.join("white:flash/brightness")).unwrap();
        assert_eq!(value, "0");
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_led_dir_yields_nothing() {
        let hardware = FlashHardware::detect_in(Path::new("/nonexistent/snapcam/leds"));
        assert!(!hardware.has_devices());
        assert!(hardware.permission_hint.is_none());
    }
}
