// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! - Listing available cameras
//! - Taking a photo through the same capture and save flow as the app

use snapcam::app::APP_ID;
use snapcam::backends::camera::{CameraFacing, LiveCamera, enumerate_cameras, select_camera};
use snapcam::backends::permission::{ConsentPrompt, ConsentStore, StorageConsent};
use snapcam::config::Config;
use snapcam::errors::{AppError, CaptureError, SaveError};
use snapcam::flash::{FlashHardware, FlashMode};
use snapcam::pipelines::photo::{SnapOutcome, SnapPipeline};
use snapcam::storage::{DirectoryLibrary, photo_directory, spool_directory};
use std::path::PathBuf;
use tracing::warn;

/// List all available cameras with the facing they are used for
pub fn list_cameras() -> Result<(), Box<dyn std::error::Error>> {
    gstreamer::init()?;

    let cameras = enumerate_cameras().unwrap_or_default();
    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    let front = select_camera(&cameras, CameraFacing::Front).map(|c| c.path.clone());
    let back = select_camera(&cameras, CameraFacing::Back).map(|c| c.path.clone());

    println!("Available cameras:");
    println!();
    for (index, camera) in cameras.iter().enumerate() {
        let mut roles = Vec::new();
        if front.as_deref() == Some(camera.path.as_str()) {
            roles.push("front");
        }
        if back.as_deref() == Some(camera.path.as_str()) {
            roles.push("back");
        }

        println!("  [{}] {}", index, camera.name);
        if let Some(location) = &camera.location {
            println!("      Location: {}", location);
        }
        if !roles.is_empty() {
            println!("      Used as: {}", roles.join(", "));
        }
        println!();
    }

    Ok(())
}

/// Options for `snapcam snap`
pub struct SnapOptions {
    pub facing: CameraFacing,
    pub flash: bool,
    pub output: Option<PathBuf>,
    pub assume_yes: bool,
}

/// Take a photo and save it to the library
pub fn snap(options: SnapOptions) -> Result<(), Box<dyn std::error::Error>> {
    gstreamer::init()?;

    let (config_handler, config) = Config::load(APP_ID);

    let cameras = enumerate_cameras().unwrap_or_default();
    let device = select_camera(&cameras, options.facing)
        .cloned()
        .ok_or(AppError::Capture(CaptureError::NoCamera))?;
    println!("Using camera: {}", device.name);

    let flash = match (options.flash, options.facing) {
        (false, _) => FlashMode::Off,
        (true, CameraFacing::Back) => FlashMode::On,
        (true, CameraFacing::Front) => {
            warn!("The front camera has no flash LED, capturing without flash");
            FlashMode::Off
        }
    };
    let leds = FlashHardware::detect();
    if flash.is_on()
        && let Some(hint) = &leds.permission_hint
    {
        eprintln!("{}", hint);
    }

    let library_dir = options
        .output
        .clone()
        .unwrap_or_else(|| photo_directory(&config));
    // --yes covers this run only and never reaches the stored config
    let (prompt, store) = if options.assume_yes {
        (
            ConsentPrompt::AssumeYes,
            ConsentStore::in_memory(config.require_storage_consent, false),
        )
    } else {
        (
            ConsentPrompt::Terminal,
            ConsentStore::new(&config, config_handler),
        )
    };
    let gate = StorageConsent::new(store, prompt, library_dir.clone());

    let camera = LiveCamera {
        device,
        flash,
        leds,
        shutter_sound: config.play_shutter_sound,
        spool_dir: spool_directory(),
    };

    println!("Capturing...");
    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(async {
        SnapPipeline::new(camera, gate, DirectoryLibrary::new(library_dir))
            .run()
            .await
    });

    if let Some(notification) = outcome.notification() {
        println!("{}: {}", notification.title(), notification.body());
    }

    match outcome {
        SnapOutcome::Saved(path) => {
            println!("Photo saved: {}", path.display());
            Ok(())
        }
        SnapOutcome::CaptureFailed(e) => Err(AppError::Capture(e).into()),
        SnapOutcome::SaveFailed(e) => Err(AppError::Save(e).into()),
        SnapOutcome::PermissionDenied => Err(AppError::Save(SaveError::PermissionDenied).into()),
    }
}
