// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct wires together the conversion queue, the transfer
//! client, localization, and the toast notifications, and translates
//! messages into side effects (uploads, dialogs, file writes). Policy
//! decisions (which endpoint to talk to, what the default profile is, how
//! batches advance) stay close to the update loop so user-facing behavior
//! is easy to audit.

pub mod config;
mod message;
pub mod paths;
pub mod persisted_state;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::catalog::{self, ConversionProfile};
use crate::i18n::fluent::I18n;
use crate::queue::{FileId, Queue};
use crate::transfer::TransferClient;
use crate::ui::notifications;
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Subscription, Task, Theme};
use std::collections::VecDeque;
use std::fmt;
use std::path::PathBuf;

pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 700;
pub const MIN_WINDOW_WIDTH: u32 = 640;
pub const MIN_WINDOW_HEIGHT: u32 = 520;

/// Root application state.
pub struct App {
    pub i18n: I18n,
    /// Currently selected conversion profile.
    active_profile: &'static ConversionProfile,
    /// All user-submitted files and their statuses.
    queue: Queue,
    /// HTTP client bound to the conversion service base URL.
    transfer: TransferClient,
    /// Remaining ids of the running convert-all batch.
    batch: VecDeque<FileId>,
    /// The batch entry whose upload is currently in flight.
    batch_in_flight: Option<FileId>,
    /// Whether files are hovering over the window (drop-zone highlight).
    drag_over: bool,
    theme_mode: ThemeMode,
    /// Last-used dialog directories, persisted across sessions.
    persisted: persisted_state::AppState,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("active_profile", &self.active_profile.id)
            .field("queue_len", &self.queue.len())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(mut flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    paths::init_cli_overrides(flags.data_dir.take(), flags.config_dir.take());

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self {
            i18n: I18n::default(),
            active_profile: catalog::default_profile(),
            queue: Queue::new(),
            transfer: TransferClient::new(config::DEFAULT_REMOTE_BASE_URL)
                .expect("failed to initialize HTTP client"),
            batch: VecDeque::new(),
            batch_in_flight: None,
            drag_over: false,
            theme_mode: ThemeMode::System,
            persisted: persisted_state::AppState::default(),
            notifications: notifications::Manager::new(),
        }
    }
}

impl App {
    /// Initializes application state from config and flags. Files passed on
    /// the command line are enqueued immediately.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);

        // The base URL is resolved exactly once, here; the transfer client
        // receives it explicitly and never inspects the environment.
        let base_url = flags
            .endpoint
            .clone()
            .unwrap_or_else(|| config.endpoint.base_url().to_string());
        let transfer =
            TransferClient::new(base_url).expect("failed to initialize HTTP client");

        let (persisted, state_warning) = persisted_state::AppState::load();

        let mut app = App {
            i18n,
            transfer,
            theme_mode: config.general.theme_mode,
            persisted,
            ..Self::default()
        };

        if let Some(key) = config_warning {
            app.notifications
                .push(notifications::Notification::warning(key));
        }
        if let Some(key) = state_warning {
            app.notifications
                .push(notifications::Notification::warning(key));
        }

        if !flags.files.is_empty() {
            app.queue.enqueue(flags.files.iter().map(PathBuf::from));
        }

        (app, Task::none())
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.to_iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let tick_sub =
            subscription::create_tick_subscription(self.notifications.has_notifications());
        Subscription::batch([event_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}
