// SPDX-License-Identifier: GPL-3.0-only

//! Snapcam - a point-and-shoot camera for the COSMIC desktop
//!
//! # Architecture
//!
//! - [`app`]: Main application logic and UI
//! - [`backends`]: Camera and storage-permission collaborators
//! - [`pipelines`]: The capture → permission → save flow
//! - [`storage`]: The photo library
//! - [`flash`]: Flash mode and LED control
//! - [`config`]: User configuration handling

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod flash;
pub mod i18n;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use app::{AppModel, Intent, Message, ViewState};
pub use config::Config;
