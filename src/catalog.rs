// SPDX-License-Identifier: MPL-2.0
//! Static catalog of the conversion profiles offered to the user.
//!
//! Profiles are fixed at compile time; user interaction only selects the
//! active one. Each profile pairs a source format with a target format and
//! belongs to a category that forms part of the remote endpoint path.

/// Category segment of the conversion endpoint URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Documents,
    Images,
}

impl Category {
    /// The path segment used in `…/api/{category}/{profile}`.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Documents => "documents",
            Category::Images => "images",
        }
    }
}

/// A named source-format to target-format pairing.
///
/// `target` doubles as the extension of saved output files, mirroring the
/// conversion service's naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionProfile {
    pub id: &'static str,
    pub label: &'static str,
    pub source: &'static str,
    pub target: &'static str,
    pub category: Category,
}

/// Every profile the application offers, in display order.
pub const PROFILES: &[ConversionProfile] = &[
    ConversionProfile {
        id: "images-to-pdf",
        label: "Images to PDF",
        source: "images",
        target: "pdf",
        category: Category::Documents,
    },
    ConversionProfile {
        id: "pdf-to-images",
        label: "PDF to Images",
        source: "pdf",
        target: "images",
        category: Category::Documents,
    },
    ConversionProfile {
        id: "pdf-to-word",
        label: "PDF to Word",
        source: "pdf",
        target: "word",
        category: Category::Documents,
    },
    ConversionProfile {
        id: "word-to-pdf",
        label: "Word to PDF",
        source: "word",
        target: "pdf",
        category: Category::Documents,
    },
    ConversionProfile {
        id: "jpg-to-png",
        label: "JPG to PNG",
        source: "jpg",
        target: "png",
        category: Category::Images,
    },
    ConversionProfile {
        id: "png-to-jpg",
        label: "PNG to JPG",
        source: "png",
        target: "jpg",
        category: Category::Images,
    },
    ConversionProfile {
        id: "jpg-to-heic",
        label: "JPG to HEIC",
        source: "jpg",
        target: "heic",
        category: Category::Images,
    },
    ConversionProfile {
        id: "jpg-to-webp",
        label: "JPG to WebP",
        source: "jpg",
        target: "webp",
        category: Category::Images,
    },
    ConversionProfile {
        id: "webp-to-jpg",
        label: "WebP to JPG",
        source: "webp",
        target: "jpg",
        category: Category::Images,
    },
    ConversionProfile {
        id: "heic-to-jpg",
        label: "HEIC to JPG",
        source: "heic",
        target: "jpg",
        category: Category::Images,
    },
];

/// Profile selected when the application starts.
pub const DEFAULT_PROFILE_ID: &str = "jpg-to-png";

/// Looks up a profile by id.
pub fn find(id: &str) -> Option<&'static ConversionProfile> {
    PROFILES.iter().find(|profile| profile.id == id)
}

/// The profile shown on startup. Falls back to the first catalog entry if
/// the default id ever disappears from the table.
pub fn default_profile() -> &'static ConversionProfile {
    find(DEFAULT_PROFILE_ID).unwrap_or(&PROFILES[0])
}

impl ConversionProfile {
    /// File-dialog filter for this profile's source format, as
    /// `(filter_name, extensions)`. `None` means any file is accepted.
    ///
    /// The filter is a hint for the picker only; dropped files are accepted
    /// without validation and the queue never rejects an entry.
    pub fn source_filter(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self.source {
            "images" => Some((
                "Image files",
                &["jpg", "jpeg", "png", "webp", "heic", "bmp", "gif", "tiff"],
            )),
            "pdf" => Some(("PDF documents", &["pdf"])),
            "word" => Some(("Word documents", &["doc", "docx"])),
            "jpg" => Some(("JPEG images", &["jpg", "jpeg"])),
            "png" => Some(("PNG images", &["png"])),
            "webp" => Some(("WebP images", &["webp"])),
            "heic" => Some(("HEIC images", &["heic"])),
            _ => None,
        }
    }

    /// Name for the converted output of `display_name`: everything before
    /// the first `.` plus the profile's target extension.
    pub fn output_name(&self, display_name: &str) -> String {
        let base = display_name.split('.').next().unwrap_or(display_name);
        format!("{}.{}", base, self.target)
    }
}
