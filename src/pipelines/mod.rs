// SPDX-License-Identifier: GPL-3.0-only

//! Capture pipelines
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Camera Frame │ ──▶ │  Snap Pipeline    │ ──▶ │  JPEG File   │
//! │   (RGBA)     │     │  - Encoding       │     │ in library   │
//! │              │     │  - Permission     │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//! ```
//!
//! - [`photo`]: still capture, JPEG encoding and the save flow

pub mod photo;
