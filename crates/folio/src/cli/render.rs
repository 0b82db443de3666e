//! # Rendering Module
//!
//! Turns `CmdResult` pieces into terminal strings. Layout math (indentation,
//! truncation, padding) is done on plain text with `unicode-width`, and colors
//! are applied afterwards so they never affect alignment.
//!
//! ## List Layout
//!
//! ```text
//!   1. ★ Groceries                                   3 minutes ago
//!   2.   Trips                                       2     day ago
//!   3.     Lisbon                                    2     day ago
//! ```
//!
//! - index (4 chars, right-aligned with a dot)
//! - favorite marker column (2 chars)
//! - two spaces of indentation per tree level, then the title (truncated)
//! - relative time (right-aligned, `TIME_WIDTH`)

use chrono::{DateTime, Utc};
use colored::Colorize;
use folioapp::commands::{CmdMessage, MessageLevel};
use folioapp::index::DisplayPage;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 80;
pub const TIME_WIDTH: usize = 14;
pub const FAVORITE_MARKER: &str = "★";

const COL_INDEX: usize = 4;
const COL_MARKER: usize = 2;
const INDENT: usize = 2;

pub fn render_page_list(pages: &[DisplayPage]) -> String {
    if pages.is_empty() {
        return "No pages found.\n".to_string();
    }

    let mut output = String::new();
    for dp in pages {
        let index = format!("{:>width$}.", dp.index, width = COL_INDEX - 1);
        let marker = if dp.page.is_favorite {
            FAVORITE_MARKER.yellow().to_string()
        } else {
            " ".to_string()
        };

        let indent = " ".repeat(dp.depth * INDENT);
        let title_width = LINE_WIDTH
            .saturating_sub(COL_INDEX + 1 + COL_MARKER + indent.len() + TIME_WIDTH)
            .max(8);
        let title = truncate_to_width(&dp.page.title, title_width);
        let padding = " ".repeat(title_width.saturating_sub(title.width()));
        let title = if dp.page.is_favorite {
            title.bold().to_string()
        } else {
            title
        };

        output.push_str(&format!(
            "{} {} {}{}{}{}\n",
            index.dimmed(),
            marker,
            indent,
            title,
            padding,
            format_time_ago(dp.page.updated_at).dimmed()
        ));
    }
    output
}

/// Full pages, separated by a rule. Each page starts with its index and title.
pub fn render_full_pages(pages: &[DisplayPage]) -> String {
    let mut output = String::new();
    for (i, dp) in pages.iter().enumerate() {
        if i > 0 {
            output.push_str(&format!("\n{}\n\n", "-".repeat(LINE_WIDTH).dimmed()));
        }
        let marker = if dp.page.is_favorite {
            format!(" {}", FAVORITE_MARKER.yellow())
        } else {
            String::new()
        };
        output.push_str(&format!(
            "{} {}{}\n",
            format!("{}.", dp.index).dimmed(),
            dp.page.title.bold(),
            marker
        ));
        output.push_str(&format!("{}\n\n", dp.page.id.dimmed()));

        let body = dp.page.content.trim_end();
        if !body.is_empty() {
            output.push_str(body);
            output.push('\n');
        }
    }
    output
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|msg| {
            let content = match msg.level {
                MessageLevel::Info => msg.content.normal(),
                MessageLevel::Success => msg.content.green(),
                MessageLevel::Warning => msg.content.yellow(),
            };
            format!("{}\n", content)
        })
        .collect()
}

pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

/// Cuts `text` to at most `max_width` columns, ending in `…` when shortened.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = timeago::Formatter::new().convert(duration.to_std().unwrap_or_default());

    // Align unit words on "seconds" / "minutes" (7 chars).
    let time_str = time_str
        .replace("hours ago", "  hours ago")
        .replace("hour ago", "   hour ago")
        .replace("days ago", "   days ago")
        .replace("day ago", "    day ago")
        .replace("weeks ago", "  weeks ago")
        .replace("week ago", "   week ago")
        .replace("months ago", " months ago")
        .replace("month ago", "  month ago")
        .replace("years ago", "  years ago")
        .replace("year ago", "   year ago");

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
