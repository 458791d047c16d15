// SPDX-License-Identifier: GPL-3.0-only

//! Main application module
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, ViewState)
//! - `controls`: Floating flip / flash / snap buttons
//! - `settings`: Settings drawer UI
//! - `handlers`: Message handlers grouped by domain
//! - `view`: Main view rendering
//! - `update`: Message dispatch

mod controls;
mod handlers;
pub mod settings;
mod state;
mod update;
mod view;

use crate::backends::camera::{CameraPipeline, enumerate_cameras};
use crate::backends::permission::ConsentStore;
use crate::config::Config;
use crate::constants::pipeline;
use crate::fl;
use crate::flash::FlashHardware;
use cosmic::app::context_drawer;
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
pub use state::{AppModel, ContextPage, FlashPlan, Intent, Message, ViewState};
use std::sync::Arc;
use tracing::{error, info, warn};
pub use view::Palette;

/// Unique identifier in RDNN (reverse domain name notation) format
pub const APP_ID: &str = "io.github.snapcam.Snapcam";

const REPOSITORY: &str = "https://github.com/snapcam/snapcam";
const APP_ICON: &[u8] = include_bytes!("../../resources/icons/io.github.snapcam.Snapcam.svg");

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_svg_bytes(APP_ICON))
            .version(env!("GIT_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        let (config_handler, config) = Config::load(Self::APP_ID);

        // Initialize GStreamer early (required before any GStreamer calls)
        if let Err(e) = gstreamer::init() {
            error!(error = %e, "Failed to initialize GStreamer");
        }

        let flash_hardware = FlashHardware::detect();
        if let Some(hint) = &flash_hardware.permission_hint {
            warn!(%hint, "Flash LEDs unavailable");
        }

        let consent = ConsentStore::new(&config, config_handler.clone());
        let app_theme = config.app_theme;

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            view_state: ViewState::default(),
            config,
            config_handler,
            available_cameras: Vec::new(),
            cameras_initialized: false,
            current_frame: None,
            preview: None,
            flash_hardware,
            consent,
            is_capturing: false,
            flash_active: false,
            leds_lit: false,
            notification: None,
            theme_options: vec![fl!("match-desktop"), fl!("dark"), fl!("light")],
        };

        // Enumerating can take a while with several devices
        let init_task = Task::perform(
            async {
                tokio::task::spawn_blocking(|| enumerate_cameras().unwrap_or_default())
                    .await
                    .unwrap_or_default()
            },
            |cameras| cosmic::Action::App(Message::CamerasInitialized(cameras)),
        );

        (
            app,
            Task::batch([init_task, cosmic::command::set_theme(app_theme.theme())]),
        )
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Snap result dialog
    fn dialog(&self) -> Option<Element<'_, Self::Message>> {
        let notification = self.notification?;
        Some(
            widget::dialog()
                .title(notification.title())
                .body(notification.body())
                .primary_action(
                    widget::button::suggested(fl!("ok")).on_press(Message::DismissNotification),
                )
                .into(),
        )
    }

    fn on_escape(&mut self) -> Task<cosmic::Action<Self::Message>> {
        if self.notification.take().is_none() {
            self.core.window.show_context = false;
        }
        Task::none()
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        use cosmic::iced::futures::StreamExt;

        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        let Some(device) = self.selected_camera().cloned() else {
            return config_sub;
        };
        let mirror = self.preview_mirrored();

        // Restarts whenever the device or the mirroring changes
        let camera_sub = Subscription::run_with_id(
            ("camera", device.path.clone(), mirror),
            cosmic::iced::stream::channel(
                pipeline::PREVIEW_CHANNEL_CAPACITY,
                move |mut output| async move {
                    info!(device = %device.name, mirror, "Camera subscription started");

                    let mut frame_count = 0u64;
                    loop {
                        // Give the previous pipeline time to release the device
                        tokio::time::sleep(tokio::time::Duration::from_millis(
                            pipeline::RESTART_DELAY_MS,
                        ))
                        .await;

                        let (sender, mut receiver) = cosmic::iced::futures::channel::mpsc::channel(
                            pipeline::PREVIEW_CHANNEL_CAPACITY,
                        );

                        let camera = match CameraPipeline::new(&device, mirror, sender) {
                            Ok(camera) => camera,
                            Err(e) => {
                                error!(error = %e, "Failed to initialize pipeline");
                                info!(
                                    seconds = pipeline::RETRY_DELAY_SECS,
                                    "Waiting before retry"
                                );
                                tokio::time::sleep(tokio::time::Duration::from_secs(
                                    pipeline::RETRY_DELAY_SECS,
                                ))
                                .await;
                                continue;
                            }
                        };

                        loop {
                            if output.is_closed() {
                                info!("Output channel closed, camera subscription cancelled");
                                drop(camera);
                                return;
                            }

                            // Time out regularly so a closed output is noticed
                            match tokio::time::timeout(
                                tokio::time::Duration::from_millis(16),
                                receiver.next(),
                            )
                            .await
                            {
                                Ok(Some(frame)) => {
                                    frame_count += 1;
                                    // Dropping frames is fine for live preview
                                    if let Err(e) =
                                        output.try_send(Message::CameraFrame(Arc::new(frame)))
                                    {
                                        if e.is_disconnected() {
                                            info!("Output channel disconnected");
                                            drop(camera);
                                            return;
                                        }
                                        tracing::debug!(frame = frame_count, "UI busy, frame dropped");
                                    }
                                }
                                Ok(None) => {
                                    warn!("Camera frame stream ended, restarting pipeline");
                                    break;
                                }
                                Err(_) => continue,
                            }
                        }

                        drop(camera);
                    }
                },
            ),
        );

        Subscription::batch([config_sub, camera_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
