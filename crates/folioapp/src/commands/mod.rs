//! # Command Layer
//!
//! This module contains the **core business logic** of folio. Each command lives in its
//! own submodule and implements pure Rust functions over a
//! [`PageStore`](crate::store::page_store::PageStore).
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Resolve selectors to page ids
//! - Mutate the notebook through `PageStore::commit` (which persists)
//! - Return structured `CmdResult` with affected pages and messages
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: No stdout, stderr or formatting
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests run on
//! `MemBackend` and `MemTransport`, never the filesystem or the network.
//!
//! ## Command Modules
//!
//! - [`create`]: Create pages (optionally under a parent)
//! - [`list`]: Tree listing and search
//! - [`view`]: Retrieve full pages
//! - [`update`]: The editor entry point (title/content/blocks)
//! - [`delete`]: Subtree deletion
//! - [`favorite`]: Toggle favorites
//! - [`move_pages`]: Re-parent pages
//! - [`export`]: JSON and markdown export
//! - [`import`]: Replace the collection from pasted JSON
//! - [`sync`]: Backup push/pull
//! - [`helpers`]: Selector resolution

use crate::index::DisplayPage;
use crate::model::Page;
use serde::Serialize;

pub mod create;
pub mod delete;
pub mod export;
pub mod favorite;
pub mod helpers;
pub mod import;
pub mod list;
pub mod move_pages;
pub mod sync;
pub mod update;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Pages that were created or modified.
    pub affected_pages: Vec<Page>,
    /// Pages to display, with their canonical index and depth.
    pub listed_pages: Vec<DisplayPage>,
    /// Text output (exports), printed verbatim by clients.
    pub output: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_pages(mut self, pages: Vec<Page>) -> Self {
        self.affected_pages = pages;
        self
    }

    pub fn with_listed_pages(mut self, pages: Vec<DisplayPage>) -> Self {
        self.listed_pages = pages;
        self
    }

    pub fn with_output(mut self, output: String) -> Self {
        self.output = Some(output);
        self
    }
}
