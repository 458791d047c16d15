// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! The preview fills the window; the action row floats over its bottom
//! edge. While the screen flash is active only the preview and a white
//! overlay are shown.

use crate::app::state::{AppModel, Message};
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Background, Color, ContentFit, Length};
use cosmic::widget;

/// Backdrop colors behind the preview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
}

impl Palette {
    pub const DARKER: Color = Color::from_rgb(0x22 as f32 / 255.0, 0x22 as f32 / 255.0, 0x22 as f32 / 255.0);
    pub const LIGHTER: Color = Color::from_rgb(0xF3 as f32 / 255.0, 0xF3 as f32 / 255.0, 0xF3 as f32 / 255.0);

    pub fn for_dark_mode(is_dark: bool) -> Self {
        if is_dark {
            Self {
                background: Self::DARKER,
                foreground: Self::LIGHTER,
            }
        } else {
            Self {
                background: Self::LIGHTER,
                foreground: Self::DARKER,
            }
        }
    }
}

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        let palette = Palette::for_dark_mode(cosmic::theme::is_dark());
        let camera_preview = self.build_camera_preview(palette);

        if self.flash_active {
            let flash_overlay = widget::container(widget::Space::new(Length::Fill, Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme| widget::container::Style {
                    background: Some(Background::Color(Color::WHITE)),
                    ..Default::default()
                });

            return cosmic::iced::widget::stack![camera_preview, flash_overlay]
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        let controls = widget::container(self.build_action_row())
            .width(Length::Fill)
            .height(Length::Fill)
            .align_bottom(Length::Fill);

        cosmic::iced::widget::stack![camera_preview, controls]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Latest frame scaled to cover the window, or a status message
    fn build_camera_preview(&self, palette: Palette) -> Element<'_, Message> {
        let content: Element<'_, Message> = match &self.preview {
            Some(handle) => widget::image(handle.clone())
                .content_fit(ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None if self.cameras_initialized && self.available_cameras.is_empty() => {
                widget::text::title3(fl!("no-camera"))
                    .class(cosmic::theme::Text::Color(palette.foreground))
                    .into()
            }
            None => widget::Space::new(Length::Fill, Length::Fill).into(),
        };

        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(move |_theme| widget::container::Style {
                background: Some(Background::Color(palette.background)),
                ..Default::default()
            })
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_follows_theme() {
        let dark = Palette::for_dark_mode(true);
        assert_eq!(dark.background, Palette::DARKER);
        assert_eq!(dark.foreground, Palette::LIGHTER);

        let light = Palette::for_dark_mode(false);
        assert_eq!(light.background, Palette::LIGHTER);
        assert_eq!(light.foreground, Palette::DARKER);
    }
}
