//! # Folio Architecture
//!
//! Folio is a **UI-agnostic page-tree notes library**: titled markdown pages
//! nested under one another, favorites, search, and an optional backup to a
//! remote single-file store. The `folio` binary is one thin client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (the folio CLI, an editor, ...)                     │
//! │  - Parses input, renders output, owns stdout/stderr         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, parses selectors              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic, returns CmdResult                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Notebook + Storage (notebook.rs, tree.rs, store/, codec.rs)│
//! │  - In-memory pages, tree views, one JSON blob per collection│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Backups go through [`sync::BackupTransport`], implemented over HTTP by
//! [`sync::gist::GistTransport`].
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Diagnostics go through `tracing`; whether they are shown is
//! up to the client's subscriber.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: thorough unit tests on `MemBackend` and `MemTransport`.
//! 2. **API**: dispatch and selector parsing.
//! 3. **Integration** (`tests/`): the filesystem backend against a temp dir.
//! 4. **CLI**: end-to-end runs of the binary in its own crate.
//!
//! ## Module Overview
//!
//! - [`api`]: Facade
//! - [`commands`]: One module per operation
//! - [`model`]: `Page`, `Block`, `PagePatch`
//! - [`notebook`]: The page collection and its mutations
//! - [`tree`]: Forest views, sort order, subtree closure
//! - [`index`]: Display indexes and selectors
//! - [`codec`]: The JSON record format
//! - [`store`]: Persistence
//! - [`sync`]: Remote backup
//! - [`config`]: Settings
//! - [`init`]: Production wiring
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod init;
pub mod model;
pub mod notebook;
pub mod store;
pub mod sync;
pub mod tree;
