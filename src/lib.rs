// SPDX-License-Identifier: MPL-2.0
//! `iced_convert` is a desktop client for a remote file-conversion service,
//! built with the Iced GUI framework.
//!
//! Users pick a conversion profile, queue files by picking or dropping
//! them, upload each one to the service as a multipart POST, and save the
//! converted results. The crate demonstrates internationalization with
//! Fluent, user preference management, and modular UI design.

#![doc(html_root_url = "https://docs.rs/iced_convert/0.1.0")]

pub mod app;
pub mod catalog;
pub mod error;
pub mod i18n;
pub mod queue;
pub mod transfer;
pub mod ui;
