//! CLI definition for the Deskboard command-line interface.
//!
//! Only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Deskboard - kanban boards from the terminal.
///
/// Boards are stored as one JSON document under the configured storage
/// directory (`.deskboard/` by default). Writes are debounced while the
/// process runs and flushed before it exits.
#[derive(Parser, Debug)]
#[command(name = "deskboard")]
#[command(version)]
#[command(about = "Kanban boards from the terminal")]
#[command(
    long_about = "Deskboard manages kanban boards: columns of cards that move through \
    backlog, todo, in-progress, review and done.\n\n\
    Configuration is read from deskboard.toml, deskboard.yaml or deskboard.json in the \
    working directory, or from --config.\n\n\
    Environment variables (prefix DESKBOARD_, `__` separates sections):\n  \
    DESKBOARD_STORAGE__DIRECTORY       Where boards are stored\n  \
    DESKBOARD_PERSISTENCE__DEBOUNCE_MS Quiet period before a write\n  \
    DESKBOARD_MOVES__INSERT_POLICY     append | at-index"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file to use instead of discovery
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List, show, create or delete boards
    Boards {
        #[command(subcommand)]
        action: BoardAction,
    },

    /// Add, move, edit or delete cards
    Cards {
        #[command(subcommand)]
        action: CardAction,
    },

    /// Edit a column's title or color
    Column {
        #[command(subcommand)]
        action: ColumnAction,
    },

    /// Show which cards of a column a scrolled viewport would render
    Window {
        /// Board id or title
        board: String,
        /// Column id (backlog, todo, in-progress, review, done)
        column: String,
        /// Scroll offset in pixels
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        scroll: f64,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 600.0)]
        viewport: f64,
        /// Override the configured row height
        #[arg(long)]
        row_height: Option<f64>,
        /// Override the configured overscan
        #[arg(long)]
        overscan: Option<usize>,
    },

    /// Show recent changes, newest first
    Activity {
        /// Maximum entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum BoardAction {
    /// List all boards
    List,

    /// Show one board with its columns and cards
    Show {
        /// Board id or title
        board: String,
    },

    /// Create a board with the default columns
    Create {
        title: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a board and all of its cards
    Delete {
        /// Board id or title
        board: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CardAction {
    /// Add a card to the end of a column
    Add {
        /// Board id or title
        board: String,
        /// Column id
        column: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// low, medium, high or urgent
        #[arg(long)]
        priority: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Move a card to another column
    Move {
        /// Board id or title
        board: String,
        card: String,
        /// Destination column id
        #[arg(long)]
        to: String,
        /// Source column id; looked up when omitted
        #[arg(long)]
        from: Option<String>,
        /// Position in the destination (used by the at-index policy)
        #[arg(long)]
        index: Option<usize>,
    },

    /// Edit card fields
    Update {
        /// Board id or title
        board: String,
        card: String,
        #[arg(long)]
        title: Option<String>,
        /// New description; empty clears it
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        #[arg(long)]
        clear_due: bool,
        /// Replace tags (repeatable)
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
        /// Assignee id; requires --assignee-name
        #[arg(long, requires = "assignee_name", conflicts_with = "clear_assignee")]
        assignee_id: Option<String>,
        #[arg(long, requires = "assignee_id")]
        assignee_name: Option<String>,
        #[arg(long)]
        clear_assignee: bool,
    },

    /// Delete a card
    Delete {
        /// Board id or title
        board: String,
        card: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ColumnAction {
    /// Change a column's title or color
    Edit {
        /// Board id or title
        board: String,
        /// Column id
        column: String,
        #[arg(long)]
        title: Option<String>,
        /// CSS color, e.g. #3b82f6
        #[arg(long)]
        color: Option<String>,
    },
}
