// SPDX-License-Identifier: GPL-3.0-only

//! Snap button widget implementation

use super::round_button;
use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::Length;
use cosmic::widget;

/// Camera icon SVG
const CAMERA_PHOTO_ICON: &[u8] = include_bytes!("../../../resources/icons/camera-photo.svg");

impl AppModel {
    /// Build the snap button
    ///
    /// Shrinks while a snap is in flight and ignores presses until the
    /// snap finishes.
    pub fn build_capture_button(&self) -> Element<'_, Message> {
        let size = if self.is_capturing {
            ui::ACTION_BUTTON_SIZE * ui::CAPTURING_SCALE
        } else {
            ui::ACTION_BUTTON_SIZE
        };

        let button = round_button(
            widget::icon::from_svg_bytes(CAMERA_PHOTO_ICON),
            fl!("take-photo"),
            size,
            (!self.is_capturing).then_some(Message::Capture),
        );

        // Fixed-size wrapper so the row does not shift while the button shrinks
        widget::container(button)
            .width(Length::Fixed(ui::ACTION_BUTTON_SIZE))
            .height(Length::Fixed(ui::ACTION_BUTTON_SIZE))
            .center(Length::Fixed(ui::ACTION_BUTTON_SIZE))
            .into()
    }
}
