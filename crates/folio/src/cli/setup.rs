use clap::{Parser, Subcommand};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.2"
/// Format for dev builds: "v0.3.2 (dev: abc1234 2024-01-15)"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{} (dev: {} {})", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    bin_name = "folio",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Nested markdown pages in your terminal, backed up to a gist", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List pages as a tree, or search them
    #[command(alias = "ls")]
    List {
        /// Case-insensitive search over titles and page text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Create a new page
    #[command(alias = "n")]
    Create {
        /// Create the page under another page
        #[arg(long, short = 'p')]
        parent: Option<String>,

        /// Title words (joined with spaces)
        #[arg(trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Show one or more pages in full
    #[command(alias = "v")]
    View {
        #[arg(required = true, num_args = 1..)]
        pages: Vec<String>,
    },

    /// Change a page's title or content
    #[command(alias = "e")]
    Edit {
        page: String,

        /// New title
        #[arg(long, short = 't')]
        title: Option<String>,

        /// New markdown content, or `-` to read it from stdin
        #[arg(long, short = 'c')]
        content: Option<String>,
    },

    /// Delete a page and everything nested under it
    #[command(alias = "rm")]
    Delete { page: String },

    /// Toggle a page's favorite flag
    #[command(alias = "f")]
    Fav { page: String },

    /// Move a page under another page, or to the top level
    #[command(alias = "mv")]
    Move {
        page: String,

        /// New parent (omit to move to the top level)
        #[arg(long)]
        to: Option<String>,
    },

    /// Print pages as JSON (default) or merged markdown
    Export {
        /// Merge pages into one markdown document (all pages when none are given)
        #[arg(long)]
        markdown: bool,

        pages: Vec<String>,
    },

    /// Replace all pages with a JSON export (file, or stdin when omitted or `-`)
    Import { file: Option<String> },

    /// Back up to or restore from the remote store
    Sync {
        #[command(subcommand)]
        action: SyncCommands,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SyncCommands {
    /// Upload all pages, creating the remote store on first use
    Push {
        /// Token to use (saved after a successful push)
        #[arg(long)]
        token: Option<String>,
    },
    /// Replace local pages with the remote copy
    Pull,
    /// Show the sync configuration state
    Status,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print one value
    Get { key: String },
    /// Set a value (api-url, token, store-id)
    Set { key: String, value: String },
    /// Remove a value
    Unset { key: String },
}
