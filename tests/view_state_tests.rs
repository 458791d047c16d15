// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the facing and flash reducer

use snapcam::backends::camera::CameraFacing;
use snapcam::flash::FlashMode;
use snapcam::{Intent, ViewState};

fn apply_n(intent: Intent, n: usize) -> ViewState {
    (0..n).fold(ViewState::default(), |state, _| state.apply(intent))
}

#[test]
fn test_fresh_state_starts_front_with_flash_off() {
    let state = ViewState::default();
    assert_eq!(state.facing, CameraFacing::Front);
    assert_eq!(state.flash, FlashMode::Off);
}

#[test]
fn test_flip_parity() {
    for n in 0..10 {
        let state = apply_n(Intent::Flip, n);
        assert_eq!(
            state.facing == CameraFacing::Front,
            n % 2 == 0,
            "after {} flips",
            n
        );
        assert_eq!(state.flash, FlashMode::Off, "flip must not touch flash");
    }
}

#[test]
fn test_toggle_flash_parity() {
    for n in 0..10 {
        let state = apply_n(Intent::ToggleFlash, n);
        assert_eq!(
            state.flash == FlashMode::Off,
            n % 2 == 0,
            "after {} toggles",
            n
        );
        assert_eq!(state.facing, CameraFacing::Front, "toggle must not touch facing");
    }
}

#[test]
fn test_interleaved_intents_are_independent() {
    let state = [
        Intent::Flip,
        Intent::ToggleFlash,
        Intent::Flip,
        Intent::Flip,
        Intent::ToggleFlash,
        Intent::ToggleFlash,
    ]
    .into_iter()
    .fold(ViewState::default(), ViewState::apply);

    assert_eq!(state.facing, CameraFacing::Back);
    assert_eq!(state.flash, FlashMode::On);
}
