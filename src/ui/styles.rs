// SPDX-License-Identifier: MPL-2.0
//! Centralized widget styling.
//!
//! Style functions are grouped by role so the view code reads like the
//! markup it produces: action buttons, the drop zone, file rows, and status
//! badges.

use iced::widget::{button, container};
use iced::{Background, Border, Color, Theme};

use crate::queue::FileStatus;
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};

/// Filled primary action button (upload, per-row convert).
pub fn primary_button(_theme: &Theme, status: button::Status) -> button::Style {
    filled_button(status, palette::PRIMARY_500, palette::PRIMARY_400)
}

/// Filled success button (convert all, per-row download).
pub fn success_button(_theme: &Theme, status: button::Status) -> button::Style {
    let hover = Color {
        a: 0.85,
        ..palette::SUCCESS_500
    };
    filled_button(status, palette::SUCCESS_500, hover)
}

/// Neutral button (profile picker inactive entries, per-row remove).
pub fn secondary_button(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.weak;
    let mut style = button::Style {
        background: Some(Background::Color(base.color)),
        text_color: base.text,
        border: Border {
            radius: radius::SM.into(),
            ..Border::default()
        },
        shadow: shadow::NONE,
        snap: true,
    };
    if matches!(status, button::Status::Hovered | button::Status::Pressed) {
        style.background = Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::GRAY_400
        }));
    }
    style
}

/// Bordered button with no fill (clear queue, download all).
pub fn outline_button(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let hovered = matches!(status, button::Status::Hovered | button::Status::Pressed);
    button::Style {
        background: hovered.then_some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::GRAY_400
        })),
        text_color: base.text,
        border: Border {
            color: palette::GRAY_400,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

fn filled_button(status: button::Status, base_color: Color, hover_color: Color) -> button::Style {
    let color = match status {
        button::Status::Hovered | button::Status::Pressed => hover_color,
        button::Status::Disabled => Color {
            a: opacity::OVERLAY_MEDIUM,
            ..base_color
        },
        button::Status::Active => base_color,
    };
    button::Style {
        background: Some(Background::Color(color)),
        text_color: palette::WHITE,
        border: Border {
            radius: radius::SM.into(),
            ..Border::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// The drop zone card. The border brightens while files hover the window.
pub fn drop_zone(theme: &Theme, drag_over: bool) -> container::Style {
    let base = theme.extended_palette().background.base;
    let border_color = if drag_over {
        palette::PRIMARY_500
    } else {
        palette::GRAY_400
    };
    container::Style {
        background: Some(Background::Color(base.color)),
        border: Border {
            color: border_color,
            width: if drag_over {
                border::WIDTH_MD
            } else {
                border::WIDTH_SM
            },
            radius: radius::LG.into(),
        },
        ..container::Style::default()
    }
}

/// One queued file row inside the drop zone.
pub fn file_row(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.weak;
    container::Style {
        background: Some(Background::Color(base.color)),
        border: Border {
            radius: radius::MD.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Accent color of a status badge.
pub fn status_color(status: &FileStatus) -> Color {
    match status {
        FileStatus::Pending => palette::INFO_500,
        FileStatus::Converting => palette::WARNING_500,
        FileStatus::Completed { .. } => palette::SUCCESS_500,
        FileStatus::Error { .. } => palette::ERROR_500,
    }
}

/// Tinted pill behind the status text of a file row.
pub fn status_badge(status: &FileStatus) -> container::Style {
    let accent = status_color(status);
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::BADGE_TINT,
            ..accent
        })),
        text_color: Some(accent),
        border: Border {
            color: accent,
            width: border::WIDTH_SM,
            radius: radius::LG.into(),
        },
        ..container::Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::ResultHandle;

    #[test]
    fn each_status_has_a_distinct_accent() {
        let statuses = [
            FileStatus::Pending,
            FileStatus::Converting,
            FileStatus::Completed {
                result: ResultHandle::new(vec![1]),
            },
            FileStatus::Error {
                message: "failed".into(),
            },
        ];
        let colors: Vec<_> = statuses.iter().map(status_color).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn drop_zone_highlights_on_drag_over() {
        let theme = Theme::Dark;
        let idle = drop_zone(&theme, false);
        let hover = drop_zone(&theme, true);
        assert_ne!(idle.border.color, hover.border.color);
        assert!(hover.border.width > idle.border.width);
    }

    #[test]
    fn badge_uses_accent_for_border_and_text() {
        let status = FileStatus::Error {
            message: "boom".into(),
        };
        let style = status_badge(&status);
        assert_eq!(style.border.color, palette::ERROR_500);
        assert_eq!(style.text_color, Some(palette::ERROR_500));
    }
}
