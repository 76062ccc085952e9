// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Routes native window events (file hover/drop) into messages and drives
//! the notification auto-dismiss timer.

use super::Message;
use iced::{event, time, Subscription};

/// Listens for file drag-and-drop events on the window.
///
/// Hover events only toggle the drop-zone highlight; the drop event is what
/// enqueues the file. Every other native event is ignored.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| match event {
        event::Event::Window(iced::window::Event::FileHovered(_)) => Some(Message::FilesHovered),
        event::Event::Window(iced::window::Event::FilesHoveredLeft) => {
            Some(Message::FilesHoverLeft)
        }
        event::Event::Window(iced::window::Event::FileDropped(path)) => {
            Some(Message::FileDropped(path))
        }
        _ => None,
    })
}

/// Creates a periodic tick subscription for notification auto-dismiss.
///
/// Only active while notifications are on screen, so an idle application
/// schedules no timers.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(std::time::Duration::from_millis(100)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
