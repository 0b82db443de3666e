//! # CLI Layer
//!
//! The **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! Flow: parse arguments, install the log subscriber, initialize the context
//! (data dir, config, transport), dispatch to the API, render the `CmdResult`.

use super::render::{print_messages, render_full_pages, render_page_list};
use super::setup::{Cli, Commands, ConfigCommands, SyncCommands};
use clap::Parser;
use folioapp::api::FolioApi;
use folioapp::config::CONFIG_KEYS;
use folioapp::error::{FolioError, Result};
use folioapp::init::{initialize, FolioContext};
use folioapp::model::PagePatch;
use folioapp::store::fs_backend::FsBackend;
use folioapp::sync::gist::GistTransport;
use std::io::Read;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "FOLIO_LOG";

type App = FolioApi<FsBackend, GistTransport>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let FolioContext { mut api, data_dir } = initialize()?;
    tracing::debug!(dir = %data_dir.display(), "context ready");

    match cli.command {
        None => handle_list(&api, None),
        Some(Commands::List { search }) => handle_list(&api, search),
        Some(Commands::Create { parent, title }) => handle_create(&mut api, parent, title),
        Some(Commands::View { pages }) => handle_view(&api, &pages),
        Some(Commands::Edit {
            page,
            title,
            content,
        }) => handle_edit(&mut api, &page, title, content),
        Some(Commands::Delete { page }) => {
            let result = api.delete_page(&page)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Fav { page }) => {
            let result = api.toggle_favorite(&page)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Move { page, to }) => {
            let result = api.move_page(&page, to.as_deref())?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Export { markdown, pages }) => handle_export(&api, markdown, &pages),
        Some(Commands::Import { file }) => handle_import(&mut api, file.as_deref()),
        Some(Commands::Sync { action }) => handle_sync(&mut api, action),
        Some(Commands::Config { action }) => handle_config(&mut api, action),
    }
}

/// `FOLIO_LOG` wins when set; otherwise `warn`, or `debug` with `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_list(api: &App, search: Option<String>) -> Result<()> {
    let result = api.list_pages(search.as_deref().unwrap_or(""))?;
    print!("{}", render_page_list(&result.listed_pages));
    Ok(())
}

fn handle_create(api: &mut App, parent: Option<String>, title: Vec<String>) -> Result<()> {
    let title = (!title.is_empty()).then(|| title.join(" "));
    let result = api.create_page(parent.as_deref(), title)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(api: &App, pages: &[String]) -> Result<()> {
    let result = api.view_pages(pages)?;
    print!("{}", render_full_pages(&result.listed_pages));
    Ok(())
}

fn handle_edit(
    api: &mut App,
    page: &str,
    title: Option<String>,
    content: Option<String>,
) -> Result<()> {
    let content = match content.as_deref() {
        Some("-") => Some(read_stdin()?.trim_end_matches(['\r', '\n']).to_string()),
        _ => content,
    };
    if title.is_none() && content.is_none() {
        return Err(FolioError::Api(
            "Nothing to edit: pass --title and/or --content".to_string(),
        ));
    }

    let patch = PagePatch {
        title,
        content,
        blocks: None,
    };
    let result = api.update_page(page, patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(api: &App, markdown: bool, pages: &[String]) -> Result<()> {
    let result = if markdown {
        api.export_markdown(pages)?
    } else {
        if !pages.is_empty() {
            return Err(FolioError::Api(
                "JSON export always covers every page; use --markdown to pick pages".to_string(),
            ));
        }
        api.export_json()?
    };

    if let Some(output) = result.output {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }
    // stdout carries only the exported document.
    for message in &result.messages {
        tracing::info!("{}", message.content);
    }
    Ok(())
}

fn handle_import(api: &mut App, file: Option<&str>) -> Result<()> {
    let text = match file {
        None | Some("-") => read_stdin()?,
        Some(path) => std::fs::read_to_string(path)?,
    };
    let result = api.import_json(&text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_sync(api: &mut App, action: SyncCommands) -> Result<()> {
    let result = match action {
        SyncCommands::Push { token } => api.sync_push(token.as_deref())?,
        SyncCommands::Pull => api.sync_pull()?,
        SyncCommands::Status => api.sync_status(),
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(api: &mut App, action: Option<ConfigCommands>) -> Result<()> {
    match action {
        None => {
            for key in CONFIG_KEYS {
                let value = api.config_get(key)?;
                println!("{} = {}", key, display_value(key, value.as_deref()));
            }
        }
        Some(ConfigCommands::Get { key }) => match api.config_get(&key)? {
            Some(value) => println!("{}", value),
            None => println!("(not set)"),
        },
        Some(ConfigCommands::Set { key, value }) => {
            let result = api.config_set(&key, &value)?;
            print_messages(&result.messages);
        }
        Some(ConfigCommands::Unset { key }) => {
            let result = api.config_unset(&key)?;
            print_messages(&result.messages);
        }
    }
    Ok(())
}

/// Tokens are masked in the overview; `config get token` prints them in full.
fn display_value(key: &str, value: Option<&str>) -> String {
    match value {
        None => "(not set)".to_string(),
        Some(v) if key == "token" => mask(v),
        Some(v) => v.to_string(),
    }
}

fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("****{}", tail)
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
