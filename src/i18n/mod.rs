// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Localization uses the Fluent system. Translation bundles are embedded in
//! the binary, the active locale is resolved from CLI, config, or the OS,
//! and message formatting supports argument interpolation (file names,
//! counts, error text).

pub mod fluent;
