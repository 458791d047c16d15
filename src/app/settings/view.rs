// SPDX-License-Identifier: GPL-3.0-only

//! Settings drawer view

use crate::app::state::{AppModel, ContextPage, Message};
use crate::constants::app_info;
use crate::fl;
use crate::storage::photo_directory;
use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::iced::{Alignment, Length};
use cosmic::widget;

impl AppModel {
    /// Create the settings view for the context drawer
    pub fn settings_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let theme_dropdown = widget::dropdown(
            &self.theme_options,
            Some(self.config.app_theme.index()),
            Message::SetAppTheme,
        );

        let mirror_toggle =
            widget::toggler(self.config.mirror_preview).on_toggle(|_| Message::ToggleMirrorPreview);
        let shutter_toggle = widget::toggler(self.config.play_shutter_sound)
            .on_toggle(|_| Message::ToggleShutterSound);
        let consent_toggle = widget::toggler(self.config.require_storage_consent)
            .on_toggle(|_| Message::ToggleStorageConsent);

        let forget_button = widget::button::standard(fl!("forget-storage-consent"))
            .on_press_maybe(
                self.config
                    .storage_consent_granted
                    .then_some(Message::ForgetStorageConsent),
            );

        let version_info = if app_info::is_flatpak() {
            format!("{} (Flatpak)", fl!("version", version = app_info::version()))
        } else {
            fl!("version", version = app_info::version())
        };

        let settings_column: Element<'_, Message> = widget::column()
            .push(section_title(fl!("appearance")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(labeled_row(fl!("theme"), theme_dropdown))
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(section_title(fl!("preview")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(labeled_row(fl!("mirror-front-camera"), mirror_toggle))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(labeled_row(fl!("shutter-sound"), shutter_toggle))
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(section_title(fl!("storage")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(widget::text(fl!("photo-folder")).size(12))
            .push(
                widget::text(photo_directory(&self.config).display().to_string())
                    .size(12)
                    .class(cosmic::theme::Text::Accent),
            )
            .push(widget::vertical_space().height(spacing.space_xs))
            .push(labeled_row(fl!("ask-before-saving"), consent_toggle))
            .push(widget::vertical_space().height(spacing.space_xs))
            .push(forget_button)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::text(version_info)
                    .size(12)
                    .class(cosmic::theme::Text::Accent),
            )
            .spacing(0)
            .into();

        context_drawer::context_drawer(
            settings_column,
            Message::ToggleContextPage(ContextPage::Settings),
        )
        .title(fl!("settings"))
    }
}

fn section_title<'a>(title: String) -> Element<'a, Message> {
    widget::text(title).size(16).font(cosmic::font::bold()).into()
}

fn labeled_row<'a>(label: String, control: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    widget::row()
        .push(widget::text(label))
        .push(widget::horizontal_space().width(Length::Fill))
        .push(control)
        .align_y(Alignment::Center)
        .into()
}
