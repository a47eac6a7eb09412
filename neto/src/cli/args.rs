//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Neto Social - terminal client for the Neto social network
#[derive(Parser, Debug)]
#[command(name = "neto")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/neto/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:7070
    #[arg(long, env = "NETO_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Directory holding the stored session
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Keep the session in memory only (nothing is read or written on disk)
    #[arg(long, global = true, conflicts_with = "storage_dir")]
    pub ephemeral: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute (default: show the page)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        /// Login name
        username: String,

        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the header: login prompt or the logged-in user
    Me {
        /// Open the avatar image with the system viewer
        #[arg(long)]
        open_avatar: bool,
    },

    /// Show the news feed (or the landing text when logged out)
    News,

    /// Interactive session: login, logout and live feed updates
    Shell,
}
