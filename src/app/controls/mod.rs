// SPDX-License-Identifier: GPL-3.0-only

//! Floating action buttons: flip camera, toggle flash, snap

mod capture_button;

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Background, Border, Color, Length, Padding};
use cosmic::widget;

/// Camera switch icon SVG (camera with circular arrows)
const CAMERA_SWITCH_ICON: &[u8] = include_bytes!("../../../resources/icons/camera-switch.svg");
/// Flash icon SVG (lightning bolt)
const FLASH_ICON: &[u8] = include_bytes!("../../../resources/icons/flash.svg");
/// Flash off icon SVG (lightning bolt with strike-through)
const FLASH_OFF_ICON: &[u8] = include_bytes!("../../../resources/icons/flash-off.svg");

/// Icon shown on the flash button.
///
/// The button shows the action it performs, so an active flash shows the
/// "off" bolt.
pub(crate) fn flash_icon_bytes(flash_on: bool) -> &'static [u8] {
    if flash_on { FLASH_OFF_ICON } else { FLASH_ICON }
}

impl AppModel {
    /// Row of round buttons centered along the bottom edge
    pub fn build_action_row(&self) -> Element<'_, Message> {
        let flip_button = round_button(
            widget::icon::from_svg_bytes(CAMERA_SWITCH_ICON),
            fl!("flip-camera"),
            ui::ACTION_BUTTON_SIZE,
            Some(Message::FlipCamera),
        );

        let flash_on = self.view_state.flash.is_on();
        let flash_label = if flash_on {
            fl!("flash-off")
        } else {
            fl!("flash-on")
        };
        let flash_button = round_button(
            widget::icon::from_svg_bytes(flash_icon_bytes(flash_on)),
            flash_label,
            ui::ACTION_BUTTON_SIZE,
            Some(Message::ToggleFlash),
        );

        let row = widget::row()
            .push(flip_button)
            .push(flash_button)
            .push(self.build_capture_button())
            .spacing(ui::ACTION_BUTTON_SPACING);

        widget::container(row)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding(Padding {
                top: 0.0,
                right: ui::ACTION_ROW_SIDE_PADDING as f32,
                bottom: ui::ACTION_ROW_BOTTOM_PADDING as f32,
                left: ui::ACTION_ROW_SIDE_PADDING as f32,
            })
            .into()
    }
}

/// Icon on a dark translucent disc (the icons are drawn white)
pub(crate) fn round_button<'a>(
    icon: widget::icon::Handle,
    label: String,
    size: f32,
    on_press: Option<Message>,
) -> Element<'a, Message> {
    let icon_content = widget::container(widget::icon(icon).size(ui::ACTION_ICON_SIZE))
        .width(Length::Fixed(size))
        .height(Length::Fixed(size))
        .center(Length::Fixed(size))
        .style(move |_theme| widget::container::Style {
            background: Some(Background::Color(Color::from_rgba(
                0.0,
                0.0,
                0.0,
                ui::ACTION_BUTTON_ALPHA,
            ))),
            border: Border {
                radius: (size / 2.0).into(),
                ..Default::default()
            },
            ..Default::default()
        });

    let button = widget::button::custom(icon_content)
        .padding(0)
        .class(cosmic::theme::Button::Text)
        .on_press_maybe(on_press);

    widget::tooltip(button, widget::text(label), widget::tooltip::Position::Top).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_icon_shows_next_action() {
        assert_eq!(flash_icon_bytes(true), FLASH_OFF_ICON);
        assert_eq!(flash_icon_bytes(false), FLASH_ICON);
    }
}
