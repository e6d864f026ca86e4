//! # Command-Line Interface Module
//!
//! Defines the command-line interface for Attune using Clap derive macros.
//! It provides a type-safe way to parse command-line arguments and route them
//! to appropriate functionality.
//!
//! ## Commands
//!
//! - `recommend`: Build a greedy similarity playlist from a seed song
//! - `info`: Show one catalog record (duration, features, playback link)
//! - `list`: Display all catalogued songs
//! - `completion`: Generate shell completion scripts
//!
//! ## Examples
//!
//! ```bash
//! attune --catalog top_10000_1950-now.csv recommend "Shape of You"
//! attune recommend "Shape of You" --length 10 --json
//! attune info "Blinding Lights"
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
///
/// Uses Clap derive macros to automatically generate argument parsing,
/// help text, and validation. All functionality is accessed through
/// subcommands; the catalog location is the one global knob.
#[derive(Parser)]
#[command(name = "attune")]
#[command(about = "Attune - Acoustic song recommendations & playlists over a fixed catalog")]
#[command(version)]
pub struct Args {
    /// Path to the catalog CSV file
    ///
    /// Defaults to the platform data directory
    /// (e.g. `~/.local/share/attune/catalog.csv` on Linux).
    #[arg(long, global = true, env = "ATTUNE_CATALOG", value_hint = clap::ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
///
/// Each variant corresponds to a major piece of functionality. Command
/// arguments are embedded directly in the enum variants for type safety and
/// automatic validation.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a playlist of acoustically similar songs
    ///
    /// Resolves the seed song by exact, case-insensitive track name, builds
    /// the similarity index over the whole catalog, then greedily walks to
    /// the nearest unused neighbor until the requested length is reached or
    /// the catalog is exhausted.
    Recommend {
        /// Seed song name (exact track title, case-insensitive)
        #[arg(value_hint = clap::ValueHint::Other)]
        song: String,

        /// How many songs to add after the seed
        #[arg(short, long, default_value_t = crate::config::DEFAULT_PLAYLIST_LENGTH)]
        length: usize,

        /// Emit the playlist as JSON instead of the human-readable listing
        #[arg(long)]
        json: bool,

        /// Show similarity scores next to each recommendation
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show details for one catalogued song
    ///
    /// Resolves the song by exact, case-insensitive track name and prints
    /// its duration, acoustic features, and playback link.
    Info {
        /// Song name to look up (exact track title, case-insensitive)
        #[arg(value_hint = clap::ValueHint::Other)]
        song: String,
    },

    /// List all songs in the catalog
    ///
    /// Displays every admitted song with artist and duration, in catalog
    /// order. Rows dropped at load time for missing values do not appear.
    List,

    /// Generate shell completions
    ///
    /// Generates completion scripts for various shells to enable tab
    /// completion of commands, subcommands, and song names from the catalog.
    ///
    /// Usage: attune completion bash > ~/.local/share/bash-completion/completions/attune
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Generate enhanced completion with song name completion
    ///
    /// Generates an enhanced completion script that includes dynamic song
    /// name completion for the recommend and info commands.
    ///
    /// Usage: attune completion-enhanced bash > ~/.local/share/bash-completion/completions/attune
    /// Usage: attune completion-enhanced fish > ~/.config/fish/completions/attune.fish
    CompletionEnhanced {
        /// Shell to generate enhanced completions for (currently bash and fish supported)
        shell: Shell,
    },

    /// List available songs for completion (hidden command)
    #[command(hide = true)]
    CompleteSongs,

    /// List available songs for fish shell completion (hidden command)
    #[command(hide = true)]
    CompleteSongsFish,
}
