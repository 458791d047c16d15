// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for the camera backend

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Which physical camera sensor is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CameraFacing {
    #[default]
    Front,
    Back,
}

impl CameraFacing {
    /// The opposite sensor
    pub fn flipped(self) -> Self {
        match self {
            CameraFacing::Front => CameraFacing::Back,
            CameraFacing::Back => CameraFacing::Front,
        }
    }

    /// Map a libcamera location property ("front", "back", "external").
    ///
    /// External cameras (USB webcams) point at the user, so they count as front.
    pub fn from_location(location: &str) -> Option<Self> {
        match location.trim().to_ascii_lowercase().as_str() {
            "front" | "external" => Some(CameraFacing::Front),
            "back" | "rear" => Some(CameraFacing::Back),
            _ => None,
        }
    }
}

impl std::fmt::Display for CameraFacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraFacing::Front => write!(f, "front"),
            CameraFacing::Back => write!(f, "back"),
        }
    }
}

impl std::str::FromStr for CameraFacing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(CameraFacing::Front),
            "back" => Ok(CameraFacing::Back),
            other => Err(format!("unknown camera facing '{}' (expected front or back)", other)),
        }
    }
}

/// A camera exposed through PipeWire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    pub name: String,
    /// PipeWire target (`pipewire-serial-N`, `pipewire-N`); empty lets PipeWire pick
    pub path: String,
    /// libcamera location property, when reported
    pub location: Option<String>,
}

impl CameraDevice {
    /// Device PipeWire picks on its own
    pub fn default_device() -> Self {
        Self {
            name: "Default Camera (PipeWire)".to_string(),
            path: String::new(),
            location: None,
        }
    }

    /// Facing reported by the device, if any
    pub fn reported_facing(&self) -> Option<CameraFacing> {
        self.location.as_deref().and_then(CameraFacing::from_location)
    }
}

/// Pick the device to use for a facing.
///
/// A device reporting the facing wins. Without location data the first
/// device is treated as front and the second as back.
pub fn select_camera(devices: &[CameraDevice], facing: CameraFacing) -> Option<&CameraDevice> {
    if let Some(device) = devices
        .iter()
        .find(|d| d.reported_facing() == Some(facing))
    {
        return Some(device);
    }

    match facing {
        CameraFacing::Back if devices.len() > 1 => devices.get(1),
        _ => devices.first(),
    }
}

/// A tightly packed RGBA frame
#[derive(Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub data: Arc<[u8]>,
}

impl CameraFrame {
    /// Expected byte length for the frame dimensions
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    pub fn is_complete(&self) -> bool {
        self.width > 0 && self.height > 0 && self.data.len() == self.expected_len()
    }
}

impl std::fmt::Debug for CameraFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CameraFrame {{ {}x{}, {} bytes }}",
            self.width,
            self.height,
            self.data.len()
        )
    }
}

/// Frame sender type for camera pipelines
pub type FrameSender = futures::channel::mpsc::Sender<CameraFrame>;

/// Parameters for a still capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureRequest {
    /// 0.0 (smallest file) to 1.0 (best quality)
    pub quality: f32,
}

impl Default for CaptureRequest {
    fn default() -> Self {
        Self {
            quality: crate::constants::capture::MAX_QUALITY,
        }
    }
}

/// A photo produced by a capture, known only by where its data lives.
///
/// Not retained beyond the hand-off to the photo library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    pub locator: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(name: &str, location: Option<&str>) -> CameraDevice {
        CameraDevice {
            name: name.to_string(),
            path: format!("pipewire-{}", name),
            location: location.map(str::to_string),
        }
    }

    #[test]
    fn test_facing_flips() {
        assert_eq!(CameraFacing::default(), CameraFacing::Front);
        assert_eq!(CameraFacing::Front.flipped(), CameraFacing::Back);
        assert_eq!(CameraFacing::Back.flipped(), CameraFacing::Front);
    }

    #[test]
    fn test_location_mapping() {
        assert_eq!(CameraFacing::from_location("back"), Some(CameraFacing::Back));
        assert_eq!(CameraFacing::from_location("Front"), Some(CameraFacing::Front));
        assert_eq!(CameraFacing::from_location("external"), Some(CameraFacing::Front));
        assert_eq!(CameraFacing::from_location("ceiling"), None);
    }

    #[test]
    fn test_select_prefers_reported_location() {
        let devices = vec![device("rear", Some("back")), device("selfie", Some("front"))];
        assert_eq!(select_camera(&devices, CameraFacing::Front).unwrap().name, "selfie");
        assert_eq!(select_camera(&devices, CameraFacing::Back).unwrap().name, "rear");
    }

    #[test]
    fn test_select_falls_back_to_enumeration_order() {
        let devices = vec![device("a", None), device("b", None)];
        assert_eq!(select_camera(&devices, CameraFacing::Front).unwrap().name, "a");
        assert_eq!(select_camera(&devices, CameraFacing::Back).unwrap().name, "b");

        let single = vec![device("only", None)];
        assert_eq!(select_camera(&single, CameraFacing::Back).unwrap().name, "only");
        assert!(select_camera(&[], CameraFacing::Front).is_none());
    }

    #[test]
    fn test_facing_parses_from_cli_text() {
        assert_eq!("BACK".parse::<CameraFacing>(), Ok(CameraFacing::Back));
        assert!("side".parse::<CameraFacing>().is_err());
    }
}
