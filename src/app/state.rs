// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::backends::camera::{CameraDevice, CameraFacing, CameraFrame, select_camera};
use crate::backends::permission::ConsentStore;
use crate::config::Config;
use crate::flash::{FlashHardware, FlashMode};
use crate::pipelines::photo::{Notification, SnapOutcome};
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use cosmic::widget::image;
use std::sync::Arc;

/// What the user has chosen on screen.
///
/// Each field always holds exactly one of its two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub facing: CameraFacing,
    pub flash: FlashMode,
}

/// User intents that change [`ViewState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Flip,
    ToggleFlash,
}

impl ViewState {
    /// Next state after `intent`
    #[must_use]
    pub fn apply(self, intent: Intent) -> Self {
        match intent {
            Intent::Flip => Self {
                facing: self.facing.flipped(),
                ..self
            },
            Intent::ToggleFlash => Self {
                flash: self.flash.toggled(),
                ..self
            },
        }
    }
}

/// How the next snap lights the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashPlan {
    None,
    /// Sysfs LEDs next to the back camera
    Led,
    /// White full-window overlay
    Screen,
}

impl FlashPlan {
    pub fn choose(state: ViewState, leds_available: bool) -> Self {
        match (state.flash, state.facing) {
            (FlashMode::Off, _) => FlashPlan::None,
            (FlashMode::On, CameraFacing::Back) if leds_available => FlashPlan::Led,
            (FlashMode::On, _) => FlashPlan::Screen,
        }
    }

    /// Plan for a snap press, or `None` while another snap is in flight
    pub fn for_press(in_flight: bool, state: ViewState, leds_available: bool) -> Option<Self> {
        (!in_flight).then(|| Self::choose(state, leds_available))
    }
}

/// The context page to display in the context drawer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// The application model stores app-specific state used to describe its
/// interface and drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    pub context_page: ContextPage,
    /// About page for the application
    pub about: About,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Config handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,
    /// Facing and flash as chosen by the user
    pub view_state: ViewState,
    /// Cameras found at startup
    pub available_cameras: Vec<CameraDevice>,
    /// Enumeration finished (the list may still be empty)
    pub cameras_initialized: bool,
    /// Latest preview frame, kept for capture
    pub current_frame: Option<Arc<CameraFrame>>,
    /// Latest preview frame as an image handle
    pub preview: Option<image::Handle>,
    /// Flash LEDs found at startup
    pub flash_hardware: FlashHardware,
    /// Cached storage consent shared with in-flight snaps
    pub consent: ConsentStore,
    /// Whether a snap is in flight
    pub is_capturing: bool,
    /// Whether the screen flash overlay is shown
    pub flash_active: bool,
    /// LEDs lit for the current snap
    pub leds_lit: bool,
    /// Dialog shown after a snap
    pub notification: Option<Notification>,
    /// Theme dropdown labels
    pub theme_options: Vec<String>,
}

impl AppModel {
    /// Device backing the current facing
    pub fn selected_camera(&self) -> Option<&CameraDevice> {
        select_camera(&self.available_cameras, self.view_state.facing)
    }

    /// The preview is mirrored for the front camera when enabled
    pub fn preview_mirrored(&self) -> bool {
        self.config.mirror_preview && self.view_state.facing == CameraFacing::Front
    }
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL (repository, etc.)
    LaunchUrl(String),
    /// Toggle context drawer page (About, Settings)
    ToggleContextPage(ContextPage),
    /// Close the notification dialog
    DismissNotification,

    // ===== Camera Control =====
    /// Cameras enumerated asynchronously during startup
    CamerasInitialized(Vec<CameraDevice>),
    /// New camera frame received from pipeline
    CameraFrame(Arc<CameraFrame>),
    /// Switch between front and back camera
    FlipCamera,

    // ===== Capture =====
    ToggleFlash,
    Capture,
    /// Flash has been lit long enough, take the frame now
    FlashComplete,
    SnapFinished(SnapOutcome),

    // ===== Settings =====
    UpdateConfig(Config),
    SetAppTheme(usize),
    ToggleMirrorPreview,
    ToggleShutterSound,
    ToggleStorageConsent,
    ForgetStorageConsent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_changes_one_field() {
        let state = ViewState::default();
        let flipped = state.apply(Intent::Flip);
        assert_eq!(flipped.facing, CameraFacing::Back);
        assert_eq!(flipped.flash, FlashMode::Off);

        let lit = state.apply(Intent::ToggleFlash);
        assert_eq!(lit.facing, CameraFacing::Front);
        assert_eq!(lit.flash, FlashMode::On);
    }

    #[test]
    fn test_flash_plan() {
        let off = ViewState::default();
        assert_eq!(FlashPlan::choose(off, true), FlashPlan::None);

        let front_on = off.apply(Intent::ToggleFlash);
        assert_eq!(FlashPlan::choose(front_on, true), FlashPlan::Screen);

        let back_on = front_on.apply(Intent::Flip);
        assert_eq!(FlashPlan::choose(back_on, true), FlashPlan::Led);
        assert_eq!(FlashPlan::choose(back_on, false), FlashPlan::Screen);
    }

    #[test]
    fn test_press_ignored_while_snap_in_flight() {
        let back_on = ViewState::default()
            .apply(Intent::Flip)
            .apply(Intent::ToggleFlash);
        assert_eq!(FlashPlan::for_press(true, back_on, true), None);
        assert_eq!(FlashPlan::for_press(true, ViewState::default(), false), None);
        assert_eq!(
            FlashPlan::for_press(false, back_on, true),
            Some(FlashPlan::Led)
        );
        assert_eq!(
            FlashPlan::for_press(false, ViewState::default(), true),
            Some(FlashPlan::None)
        );
    }
}
