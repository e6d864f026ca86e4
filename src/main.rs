//! # Attune - Acoustic Song Recommender
//!
//! Attune recommends playlists of songs acoustically similar to a seed track,
//! using a fixed CSV catalog of acoustic features. The engine is offline and
//! deterministic: the same catalog and seed always produce the same playlist.
//!
//! ## Architecture
//!
//! - `cli`: Command-line interface definitions
//! - `catalog`: CSV catalog loading and name lookup
//! - `similarity`: Feature standardization and similarity matrix
//! - `playlist`: Greedy playlist building
//! - `config`: Configuration and data directory management
//!
//! ## Usage
//!
//! ```bash
//! # Point at a catalog and build a playlist
//! attune --catalog top_10000_1950-now.csv recommend "Shape of You"
//!
//! # Longer playlist, machine-readable
//! attune recommend "Shape of You" --length 10 --json
//!
//! # Inspect one song
//! attune info "Blinding Lights"
//! ```

use anyhow::{Context, Result};
use attune::catalog::Catalog;
use attune::playlist;
use attune::similarity::SimilarityEngine;
use attune::{cli, completion, config};
use clap::{CommandFactory, Parser};
use log::info;
use std::path::PathBuf;

/// Resolve the catalog path: explicit flag (or `ATTUNE_CATALOG`) first,
/// platform data directory otherwise.
fn resolve_catalog_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => config::get_catalog_path(),
    }
}

/// Load the catalog, with user-facing context on failure.
fn load_catalog(path: &PathBuf) -> Result<Catalog> {
    Catalog::load(path).with_context(|| format!("Failed to load catalog from {}", path.display()))
}

/// Resolve a seed song or exit with a friendly message. Absence of a match
/// is an expected outcome, not an internal error.
fn resolve_seed(catalog: &Catalog, song: &str) -> usize {
    match catalog.find_by_name(song) {
        Some(position) => position,
        None => {
            eprintln!("Song not found: '{song}'. Try another one.");
            eprintln!("(Lookup is exact and case-insensitive against the track name.)");
            std::process::exit(1);
        }
    }
}

/// Main entry point for the Attune application.
///
/// Initializes logging, parses command-line arguments, and routes commands
/// to the appropriate module functions. All operations return Results for
/// consistent error handling throughout the application.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug attune recommend "Song"` - Enable debug logging
/// - `RUST_LOG=attune::catalog=debug attune list` - Module-specific logging
fn main() -> Result<()> {
    env_logger::init();

    let cli::Args { catalog, command } = cli::Args::parse();

    // Resolved lazily per command: completion-script generation must work
    // even when the data directory cannot be created.
    match command {
        cli::Command::Recommend {
            song,
            length,
            json,
            verbose,
        } => {
            let catalog_path = resolve_catalog_path(catalog)?;
            let catalog = load_catalog(&catalog_path)?;
            let seed = resolve_seed(&catalog, &song);

            info!("Building similarity index over {} songs", catalog.len());
            let engine = SimilarityEngine::build(&catalog)
                .context("Cannot build a similarity index over this catalog")?;

            let positions = playlist::build_playlist(&engine, seed, length);
            let entries = playlist::resolve_entries(&catalog, &engine, &positions);

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }

            let Some((now_playing, up_next)) = entries.split_first() else {
                anyhow::bail!("Playlist came back empty for seed position {seed}");
            };
            println!("Now Playing:");
            println!(
                "  {} by {} [{}]",
                now_playing.name, now_playing.artists, now_playing.duration
            );
            println!("  {}", now_playing.spotify_url);
            println!();
            println!("Up Next:");
            for (i, entry) in up_next.iter().enumerate() {
                if verbose {
                    let similarity = entry.similarity.unwrap_or_default();
                    println!(
                        "  {}. {} by {} [{}] (similarity: {:.4})",
                        i + 1,
                        entry.name,
                        entry.artists,
                        entry.duration,
                        similarity
                    );
                } else {
                    println!(
                        "  {}. {} by {} [{}]",
                        i + 1,
                        entry.name,
                        entry.artists,
                        entry.duration
                    );
                }
                println!("     {}", entry.spotify_url);
            }
            if up_next.len() < length {
                println!();
                println!("(Catalog exhausted after {} songs.)", up_next.len());
            }
        }
        cli::Command::Info { song } => {
            let catalog_path = resolve_catalog_path(catalog)?;
            let catalog = load_catalog(&catalog_path)?;
            let position = resolve_seed(&catalog, &song);
            let Some(record) = catalog.get(position) else {
                anyhow::bail!("Catalog position {position} vanished after lookup");
            };

            println!("{} by {}", record.name, record.artists);
            println!("  Duration:     {}", record.duration_display());
            println!("  Danceability: {:.3}", record.danceability);
            println!("  Energy:       {:.3}", record.energy);
            println!("  Tempo:        {:.1} BPM", record.tempo);
            println!("  Cover:        {}", record.album_image_url);
            println!("  Listen:       {}", record.spotify_url());
        }
        cli::Command::List => {
            let catalog_path = resolve_catalog_path(catalog)?;
            let catalog = load_catalog(&catalog_path)?;
            info!("Listing {} catalogued songs", catalog.len());
            for song in catalog.songs() {
                println!("{} - {} [{}]", song.artists, song.name, song.duration_display());
            }
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
        cli::Command::CompletionEnhanced { shell } => {
            match shell {
                cli::Shell::Bash => completion::generate_enhanced_bash_completion(),
                cli::Shell::Fish => completion::generate_enhanced_fish_completion(),
                _ => return Err(anyhow::anyhow!("Enhanced completions only supported for bash and fish")),
            }
        }
        cli::Command::CompleteSongs => {
            // Used by shell completion scripts to get available songs
            let catalog_path = resolve_catalog_path(catalog)?;
            completion::print_song_completions(&catalog_path)?;
        }
        cli::Command::CompleteSongsFish => {
            // Used by fish shell completion scripts to get available songs
            let catalog_path = resolve_catalog_path(catalog)?;
            completion::print_song_completions_for_shell(&catalog_path, Some("fish"))?;
        }
    }

    Ok(())
}
