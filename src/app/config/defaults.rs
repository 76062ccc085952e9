// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.
//!
//! Single source of truth for the fallback values used when the config
//! file is missing or a field is absent.

// ==========================================================================
// Endpoint Defaults
// ==========================================================================

/// Base URL of a conversion service running on the developer's machine.
pub const DEFAULT_LOCAL_BASE_URL: &str = "http://localhost:8000";

/// Base URL of the deployed conversion service.
pub const DEFAULT_REMOTE_BASE_URL: &str = "https://your-production-api.com";

/// Whether the local endpoint is preferred when nothing is configured.
pub const DEFAULT_USE_LOCAL: bool = false;

// ==========================================================================
// Upload Defaults
// ==========================================================================

/// Advertised per-file size limit, in megabytes. Shown in the instructions
/// copy; the service enforces its own limit, the client does not.
pub const ADVERTISED_MAX_FILE_MB: u64 = 50;
