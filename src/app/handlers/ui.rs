// SPDX-License-Identifier: GPL-3.0-only

//! UI navigation handlers

use crate::app::state::{AppModel, ContextPage, Message};
use cosmic::Task;
use tracing::error;

impl AppModel {
    pub(crate) fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        if let Err(err) = open::that_detached(&url) {
            error!(url = %url, error = %err, "Failed to open URL");
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        context_page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == context_page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = context_page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    pub(crate) fn handle_dismiss_notification(&mut self) -> Task<cosmic::Action<Message>> {
        self.notification = None;
        Task::none()
    }
}
