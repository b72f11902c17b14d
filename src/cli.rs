use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "boothmark")]
#[command(author, version, about)]
#[command(long_about = "Mark venue booths into named favorite lists and share them as links.\n\n\
    Examples:\n  \
    boothmark create \"Day One\"        Create a list and make it active\n  \
    boothmark click 120.5 -48        Toggle the booth under a map point\n  \
    boothmark share                  Print a share link for the active list\n  \
    boothmark open '<link>'          Load a list from a share link")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the list store and current location
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Venue dataset JSON (maps, stands, exhibitors)
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the active list and its booths
    Show,

    /// Add or remove a booth from the active list
    Toggle {
        /// Booth label
        label: String,
    },

    /// Toggle the booth under a point on a hall map
    Click {
        /// Map x coordinate
        #[arg(allow_negative_numbers = true)]
        x: f64,

        /// Map y coordinate
        #[arg(allow_negative_numbers = true)]
        y: f64,

        /// Hall title (defaults to the first hall)
        #[arg(long)]
        hall: Option<String>,
    },

    /// Create an empty list and make it active
    Create {
        /// List name
        name: String,
    },

    /// Make an existing list active
    Switch {
        /// List name
        name: String,
    },

    /// Delete a list
    Delete {
        /// List name
        name: String,
    },

    /// Show all stored lists
    Lists {
        /// Include booths, exhibitors and visited marks
        #[arg(long)]
        detail: bool,
    },

    /// Print a share link for the active list
    Share,

    /// Navigate to a share link or fragment
    Open {
        /// Full link or fragment (`#list=...&favs=...`)
        link: String,
    },

    /// Toggle the visited mark on a booth
    Visited {
        /// Booth label
        label: String,
    },

    /// List the halls in the venue dataset
    Halls,

    /// Show exhibitor details for a booth
    Booth {
        /// Booth label
        label: String,
    },
}
