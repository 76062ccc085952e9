// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Pure view logic: everything here reads application state and emits
//! messages; all mutation happens in the update module. The screen is a
//! single page: word-mark header, profile picker, instructions, bulk
//! actions, the drop zone with the queued file rows, and the toast overlay
//! stacked on top.

use super::{App, Message};
use crate::catalog::{self, ConversionProfile};
use crate::i18n::fluent::I18n;
use crate::queue::{FileStatus, QueuedFile};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::{styles, toast};
use iced::widget::{button, scrollable, stack, text, Column, Container, Row, Space, Text};
use iced::{alignment, Element, Length, Theme};

/// Renders the whole application window.
pub fn view(app: &App) -> Element<'_, Message> {
    let content = Column::new()
        .push(header())
        .push(profile_picker(app))
        .push(instructions(app))
        .push(bulk_actions(app))
        .push(drop_zone(app))
        .push(download_all_row(app))
        .spacing(spacing::LG)
        .max_width(sizing::CONTENT_MAX_WIDTH);

    let page = Container::new(scrollable(
        Container::new(content)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .padding(spacing::XL),
    ))
    .width(Length::Fill)
    .height(Length::Fill);

    let overlay = toast::view_overlay(&app.notifications, &app.i18n).map(Message::Notification);

    stack![page, overlay].into()
}

/// The two-tone word mark from the service's branding.
fn header() -> Element<'static, Message> {
    Row::new()
        .push(
            Text::new("FILE")
                .size(typography::LOGO)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::BRAND_TEAL),
                }),
        )
        .push(
            Text::new("CONVERTER")
                .size(typography::LOGO)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::BRAND_ORANGE),
                }),
        )
        .into()
}

/// One button per catalog profile, the active one highlighted.
fn profile_picker(app: &App) -> Element<'_, Message> {
    let mut rows = Column::new().spacing(spacing::XS);
    for chunk in catalog::PROFILES.chunks(5) {
        let mut row = Row::new().spacing(spacing::XS);
        for profile in chunk {
            let is_active = profile.id == app.active_profile.id;
            let mut entry = button(Text::new(profile.label).size(typography::BODY))
                .padding([spacing::XXS, spacing::SM])
                .on_press(Message::ProfileSelected(profile.id));
            entry = if is_active {
                entry.style(styles::primary_button)
            } else {
                entry.style(styles::secondary_button)
            };
            row = row.push(entry);
        }
        rows = rows.push(row);
    }
    rows.into()
}

/// Title, description, and the two numbered usage steps for the active
/// profile.
fn instructions(app: &App) -> Element<'_, Message> {
    let i18n = &app.i18n;
    let profile = app.active_profile;
    let files = files_label(i18n, profile);
    let target = profile.target.to_uppercase();
    let max = if profile.source == "images" {
        i18n.tr("files-count-many")
    } else {
        i18n.tr("files-count-some")
    };

    let title = i18n.tr_with_args("converter-instructions-title", &[("label", profile.label)]);
    let description = i18n.tr_with_args(
        "converter-instructions-description",
        &[("files", &files), ("target", &target)],
    );
    let step_one = i18n.tr_with_args(
        "converter-step-one",
        &[("max", &max), ("files", &files)],
    );
    let step_two = i18n.tr("converter-step-two");

    Column::new()
        .push(Text::new(title).size(typography::TITLE))
        .push(Text::new(description).size(typography::BODY))
        .push(numbered_step(1, step_one))
        .push(numbered_step(2, step_two))
        .spacing(spacing::SM)
        .into()
}

fn numbered_step(number: usize, body: String) -> Element<'static, Message> {
    Row::new()
        .push(
            Text::new(format!("{}.", number))
                .size(typography::BODY)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::GRAY_400),
                }),
        )
        .push(Text::new(body).size(typography::BODY))
        .spacing(spacing::XS)
        .into()
}

/// Upload, clear-queue, and (when anything is pending) convert-all.
fn bulk_actions(app: &App) -> Element<'_, Message> {
    let i18n = &app.i18n;
    let mut row = Row::new()
        .spacing(spacing::SM)
        .push(
            button(Text::new(i18n.tr("button-upload-files")).size(typography::BODY))
                .padding([spacing::XS, spacing::MD])
                .on_press(Message::OpenFileDialog)
                .style(styles::primary_button),
        )
        .push(
            button(Text::new(i18n.tr("button-clear-queue")).size(typography::BODY))
                .padding([spacing::XS, spacing::MD])
                .on_press(Message::ClearQueue)
                .style(styles::outline_button),
        );

    if app.queue.has_pending() {
        row = row.push(
            button(Text::new(i18n.tr("button-convert-all")).size(typography::BODY))
                .padding([spacing::XS, spacing::MD])
                .on_press(Message::ConvertAll)
                .style(styles::success_button),
        );
    }

    row.into()
}

/// The drop target: a bordered card holding the hint text and the queued
/// file rows. The border brightens while files hover the window.
fn drop_zone(app: &App) -> Element<'_, Message> {
    let hint = Text::new(app.i18n.tr("drop-zone-hint"))
        .size(typography::SUBTITLE)
        .style(|_theme: &Theme| text::Style {
            color: Some(palette::GRAY_400),
        });

    let mut inner = Column::new()
        .push(Container::new(hint).width(Length::Fill).align_x(alignment::Horizontal::Center))
        .spacing(spacing::XS);

    for file in app.queue.iter() {
        inner = inner.push(file_row(&app.i18n, file));
    }

    let drag_over = app.drag_over;
    let mut zone = Container::new(inner)
        .width(Length::Fill)
        .padding(spacing::LG)
        .style(move |theme: &Theme| styles::drop_zone(theme, drag_over));

    if app.queue.is_empty() {
        zone = zone
            .height(Length::Fixed(sizing::DROP_ZONE_MIN_HEIGHT))
            .align_y(alignment::Vertical::Center);
    }

    zone.into()
}

/// One queued file: name, status badge, error detail, per-row actions.
fn file_row<'a>(i18n: &'a I18n, file: &'a QueuedFile) -> Element<'a, Message> {
    let badge = Container::new(
        Text::new(i18n.tr(file.status.badge_key())).size(typography::CAPTION),
    )
    .padding([spacing::XXS, spacing::XS])
    .style({
        let status = file.status.clone();
        move |_theme: &Theme| styles::status_badge(&status)
    });

    let mut name_column = Column::new().push(Text::new(&file.display_name).size(typography::BODY));
    if let FileStatus::Error { message } = &file.status {
        name_column = name_column.push(
            Text::new(message.as_str())
                .size(typography::CAPTION)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::ERROR_500),
                }),
        );
    }

    let mut actions = Row::new().spacing(spacing::XS);
    if file.status == FileStatus::Pending {
        actions = actions.push(
            button(Text::new(i18n.tr("button-convert")).size(typography::CAPTION))
                .padding([spacing::XXS, spacing::XS])
                .on_press(Message::ConvertFile(file.id))
                .style(styles::primary_button),
        );
    }
    if file.result().is_some() {
        actions = actions.push(
            button(Text::new(i18n.tr("button-download")).size(typography::CAPTION))
                .padding([spacing::XXS, spacing::XS])
                .on_press(Message::DownloadFile(file.id))
                .style(styles::success_button),
        );
    }
    actions = actions.push(
        button(Text::new(i18n.tr("button-remove")).size(typography::CAPTION))
            .padding([spacing::XXS, spacing::XS])
            .on_press(Message::RemoveFile(file.id))
            .style(styles::secondary_button),
    );

    Container::new(
        Row::new()
            .push(name_column)
            .push(badge)
            .push(Space::new().width(Length::Fill))
            .push(actions)
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center),
    )
    .width(Length::Fill)
    .padding(spacing::SM)
    .style(styles::file_row)
    .into()
}

/// Centered download-all button, shown once anything has completed.
fn download_all_row(app: &App) -> Element<'_, Message> {
    let completed = app.queue.completed_count();
    if completed == 0 {
        return Space::new().height(Length::Shrink).into();
    }

    let label = app.i18n.tr_with_args(
        "button-download-all",
        &[("count", completed.to_string().as_str())],
    );

    Container::new(
        button(Text::new(label).size(typography::BODY))
            .padding([spacing::XS, spacing::MD])
            .on_press(Message::DownloadAll)
            .style(styles::outline_button),
    )
    .width(Length::Fill)
    .align_x(alignment::Horizontal::Center)
    .into()
}

fn files_label(i18n: &I18n, profile: &ConversionProfile) -> String {
    match profile.source {
        "images" => i18n.tr("files-label-images"),
        "pdf" => i18n.tr("files-label-pdf"),
        "word" => i18n.tr("files-label-word"),
        other => i18n.tr_with_args("files-label-generic", &[("source", &other.to_uppercase())]),
    }
}
