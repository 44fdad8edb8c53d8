//! # Text Renderer
//!
//! Renders the dashboard as plain text lines:
//!
//! - loading → `Loading...`
//! - failed → the error detail
//! - loaded, no items → `No records found.`
//! - loaded with items → a table followed by the pagination bar
//!
//! Only the sections named by pending view events are redrawn.

use crate::dashboard::events::{sections_to_redraw, Section, ViewEvent};
use crate::dashboard::models::{DraftMode, DraftSession, Record, RecordField};
use crate::dashboard::pagination::PaginationController;
use crate::dashboard::services::RecordService;
use crate::dashboard::view_model::{DashboardViewModel, ListDisplay};
use anyhow::Result;
use std::io::Write;

const COLUMN_WIDTHS: [usize; 4] = [20, 30, 16, 10];

fn cell(text: &str, width: usize) -> String {
    let mut clipped: String = text.chars().take(width).collect();
    if text.chars().count() > width && width > 1 {
        clipped.pop();
        clipped.push('…');
    }
    format!("{clipped:<width$}")
}

fn table_row(record: &Record) -> String {
    let image = if record.image.is_some() { "yes" } else { "No Image" };
    format!(
        "{:>5}  {} {} {} {}",
        record.id,
        cell(&record.title, COLUMN_WIDTHS[0]),
        cell(&record.description, COLUMN_WIDTHS[1]),
        cell(&record.location, COLUMN_WIDTHS[2]),
        cell(image, COLUMN_WIDTHS[3]),
    )
    .trim_end()
    .to_string()
}

/// The list area, following the rendering contract
pub fn render_list(display: ListDisplay<'_>) -> String {
    match display {
        ListDisplay::Idle => String::new(),
        ListDisplay::Loading => "Loading...".to_string(),
        ListDisplay::Error(detail) => format!("Error: {detail}"),
        ListDisplay::Empty => "No records found.".to_string(),
        ListDisplay::Table(page) => {
            let mut lines = vec![format!(
                "{:>5}  {} {} {} {}",
                "ID",
                cell("Title", COLUMN_WIDTHS[0]),
                cell("Description", COLUMN_WIDTHS[1]),
                cell("Location", COLUMN_WIDTHS[2]),
                "Image"
            )];
            lines.extend(page.items.iter().map(table_row));
            lines.join("\n")
        }
    }
}

/// Pagination bar, e.g. `« Prev | 1 [2] 3 | Next »`. Disabled ends are
/// shown in parentheses.
pub fn render_pagination(pagination: &PaginationController) -> String {
    let pages = (1..=pagination.total_pages())
        .map(|n| {
            if n == pagination.page_index() {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let prev = if pagination.has_prev() { "« Prev" } else { "(« Prev)" };
    let next = if pagination.has_next() { "Next »" } else { "(Next »)" };
    format!("{prev} | {pages} | {next}")
}

/// The editor modal, or nothing when it is closed
pub fn render_form(draft: &DraftSession) -> String {
    if !draft.active {
        return String::new();
    }
    let title = match draft.mode {
        DraftMode::New => "New record".to_string(),
        DraftMode::Edit => format!("Edit record {}", draft.record.id),
    };
    let mut lines = vec![format!("── {title} ──")];
    for field in RecordField::ALL {
        let marker = if field.is_required() { "*" } else { " " };
        lines.push(format!(
            "  {marker}{:<12} {}",
            field.name(),
            draft.record.field(field)
        ));
    }
    if draft.submitting {
        lines.push("  Saving...".to_string());
    }
    if let Some(error) = &draft.error {
        lines.push(format!("  ! {error}"));
    }
    lines.join("\n")
}

pub fn render_status(message: Option<&str>) -> String {
    message.map(|m| format!("» {m}")).unwrap_or_default()
}

/// Writes dashboard sections to any [`Write`] sink
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Redraw what the given view events ask for
    pub fn render_events<S: RecordService>(
        &mut self,
        vm: &DashboardViewModel<S>,
        events: &[ViewEvent],
    ) -> Result<()> {
        let sections = sections_to_redraw(events);
        if sections.is_empty() {
            return Ok(());
        }
        self.render_sections(vm, &sections)
    }

    fn render_sections<S: RecordService>(
        &mut self,
        vm: &DashboardViewModel<S>,
        sections: &[Section],
    ) -> Result<()> {
        let table_shown = matches!(vm.list_display(), ListDisplay::Table(_));
        for section in sections {
            let text = match section {
                Section::Table => render_list(vm.list_display()),
                Section::Pagination if table_shown => render_pagination(vm.pagination()),
                Section::Pagination => String::new(),
                Section::Form => render_form(vm.draft()),
                Section::StatusBar => render_status(vm.status_message()),
            };
            if !text.is_empty() {
                writeln!(self.out, "{text}")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn write_line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }
}
