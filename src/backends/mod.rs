// SPDX-License-Identifier: GPL-3.0-only

//! Collaborators the snap flow talks to
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  App / CLI                   │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │  ┌─────────────┐    ┌──────────────────┐    │
//! │  │   Camera    │    │   Permission     │    │
//! │  │ (PipeWire)  │    │ (dialog / tty)   │    │
//! │  └─────────────┘    └──────────────────┘    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! - [`camera`]: device enumeration, preview pipeline and still capture
//! - [`permission`]: consent for writing into the photo library

pub mod camera;
pub mod permission;
