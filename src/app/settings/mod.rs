// SPDX-License-Identifier: GPL-3.0-only

//! Settings UI module
//!
//! Theme, preview and storage consent options in the context drawer.

pub mod view;
