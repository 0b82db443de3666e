//! # Folio CLI
//!
//! The `folio` binary is one thin client of the `folioapp` library. This file
//! only invokes `cli::run()` and turns an error into an exit code; everything
//! user-facing lives in `src/cli/`.
//!
//! ## Workspace Structure
//!
//! - `crates/folioapp/`: UI-agnostic library (pages, tree, storage, backup)
//! - `crates/folio/`: this CLI
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/folio/src/cli/)                          │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Dispatch + logging setup (commands.rs)                   │
//! │  - Terminal rendering with colored (render.rs)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/folioapp/src/api.rs)                     │
//! │  - Parses selectors, dispatches to command modules          │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! - Library behavior is tested in `folioapp`.
//! - `src/cli/`: argument parsing and rendering of canned results.
//! - `tests/`: end-to-end runs of the binary against a temp data directory
//!   (`FOLIO_DATA`).

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
