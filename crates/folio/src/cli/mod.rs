//! # CLI Behavior
//!
//! This is **one possible UI client** for folio, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## Naked Execution (`folio`)
//!
//! Running `folio` with no arguments lists the page tree.
//!
//! ## Selectors
//!
//! Commands that take a page accept:
//! - its number in `folio list` (`folio view 3`)
//! - its id (`folio view 18f3a2c01b2-4e1f0a9c`)
//! - a fragment of its title matching exactly one page (`folio view groc`)
//!
//! ## Stdin
//!
//! `folio edit 2 --content -` and `folio import` (or `folio import -`) read
//! from stdin, so exports and imports compose with pipes and the clipboard tools
//! of the platform (`folio export | pbcopy`).
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. The filter comes from
//! `FOLIO_LOG` (default `warn`); `-v` raises it to `debug`.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch from parsed arguments to the API, then rendering
//! - `render`: Output formatting (tree listing, pages, messages)
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
