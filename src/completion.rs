//! # Shell Completion Module
//!
//! This module provides shell completion functionality for Attune, including:
//! - Generation of completion scripts for various shells
//! - Custom completion for song names from the catalog
//! - Integration with clap's completion system
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! attune completion bash > ~/.local/share/bash-completion/completions/attune
//!
//! # Generate zsh completions
//! attune completion zsh > ~/.config/zsh/completions/_attune
//! ```

use crate::catalog::Catalog;
use anyhow::Result;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io;
use std::path::Path;

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Generate enhanced fish completion script with song name completion
pub fn generate_enhanced_fish_completion() {
    println!(r#"# Enhanced Attune completion script for Fish shell with song name completion
# Install with: attune completion-enhanced fish > ~/.config/fish/completions/attune.fish

# Function to get song completions
function __attune_complete_songs
    # Get song completions from attune command, suppress errors
    if command -sq attune
        attune complete-songs-fish 2>/dev/null
    end
end

# Clear existing completions to avoid conflicts
complete -c attune -e

# Global options
complete -c attune -s h -l help -d 'Print help information'
complete -c attune -s V -l version -d 'Print version information'
complete -c attune -l catalog -d 'Path to the catalog CSV file' -r -F

# Main commands
complete -c attune -f -n '__fish_is_first_token' -a 'recommend' -d 'Generate a playlist of acoustically similar songs'
complete -c attune -f -n '__fish_is_first_token' -a 'info' -d 'Show details for one catalogued song'
complete -c attune -f -n '__fish_is_first_token' -a 'list' -d 'List all songs in the catalog'
complete -c attune -f -n '__fish_is_first_token' -a 'completion' -d 'Generate shell completions'
complete -c attune -f -n '__fish_is_first_token' -a 'completion-enhanced' -d 'Generate enhanced shell completions'
complete -c attune -f -n '__fish_is_first_token' -a 'help' -d 'Print help for commands'

# recommend command - complete with song names and options
complete -c attune -n '__fish_seen_subcommand_from recommend' -a '(__attune_complete_songs)' -d 'Seed song name'
complete -c attune -f -n '__fish_seen_subcommand_from recommend' -s l -l length -d 'How many songs to add after the seed' -r
complete -c attune -f -n '__fish_seen_subcommand_from recommend' -l json -d 'Emit the playlist as JSON'
complete -c attune -f -n '__fish_seen_subcommand_from recommend' -s v -l verbose -d 'Show similarity scores next to each recommendation'

# info command - complete with song names
complete -c attune -n '__fish_seen_subcommand_from info' -a '(__attune_complete_songs)' -d 'Song name'

# completion command - complete with shell types
complete -c attune -f -n '__fish_seen_subcommand_from completion' -a 'bash' -d 'Generate bash completions'
complete -c attune -f -n '__fish_seen_subcommand_from completion' -a 'zsh' -d 'Generate zsh completions'
complete -c attune -f -n '__fish_seen_subcommand_from completion' -a 'fish' -d 'Generate fish completions'
complete -c attune -f -n '__fish_seen_subcommand_from completion' -a 'power-shell' -d 'Generate PowerShell completions'
complete -c attune -f -n '__fish_seen_subcommand_from completion' -a 'elvish' -d 'Generate elvish completions'

# completion-enhanced command - complete with shell types (currently supports bash and fish)
complete -c attune -f -n '__fish_seen_subcommand_from completion-enhanced' -a 'bash' -d 'Generate enhanced bash completions'
complete -c attune -f -n '__fish_seen_subcommand_from completion-enhanced' -a 'fish' -d 'Generate enhanced fish completions'

# help command - complete with subcommands for help topics
complete -c attune -f -n '__fish_seen_subcommand_from help' -a 'recommend' -d 'Help for recommend command'
complete -c attune -f -n '__fish_seen_subcommand_from help' -a 'info' -d 'Help for info command'
complete -c attune -f -n '__fish_seen_subcommand_from help' -a 'list' -d 'Help for list command'
complete -c attune -f -n '__fish_seen_subcommand_from help' -a 'completion' -d 'Help for completion command'
complete -c attune -f -n '__fish_seen_subcommand_from help' -a 'completion-enhanced' -d 'Help for completion-enhanced command'
"#);
}

/// Generate enhanced bash completion script with song name completion
pub fn generate_enhanced_bash_completion() {
    println!(r#"#!/bin/bash
# Enhanced Attune completion script with song name completion
# Install with: attune completion-enhanced bash > ~/.local/share/bash-completion/completions/attune

_attune_complete_songs() {{
    # Get song completions from attune command
    local songs
    if command -v attune >/dev/null 2>&1; then
        # Use complete-songs command to get available songs
        mapfile -t songs < <(attune complete-songs 2>/dev/null)
        printf '%s\n' "${{songs[@]}}"
    fi
}}

_attune() {{
    local cur prev words cword
    _init_completion || return

    case "${{prev}}" in
        recommend|info)
            # Complete with song names for these commands
            mapfile -t COMPREPLY < <(_attune_complete_songs | grep -i "^${{cur}}")
            return 0
            ;;
        completion|completion-enhanced)
            # Complete with shell types
            COMPREPLY=($(compgen -W "bash zsh fish power-shell elvish" -- "${{cur}}"))
            return 0
            ;;
        --catalog)
            # Complete with files
            _filedir
            return 0
            ;;
        --length|-l)
            # Complete with common playlist lengths
            COMPREPLY=($(compgen -W "5 10 15 20 30" -- "${{cur}}"))
            return 0
            ;;
    esac

    # Check if we're completing a subcommand
    local subcommands="recommend info list completion completion-enhanced help"

    if [[ $cword -eq 1 ]]; then
        # Complete main commands
        COMPREPLY=($(compgen -W "$subcommands --catalog --help --version" -- "${{cur}}"))
    else
        # Handle command-specific options
        case "${{words[1]}}" in
            recommend)
                COMPREPLY=($(compgen -W "--length -l --json --verbose -v --catalog --help" -- "${{cur}}"))
                ;;
            info|list)
                COMPREPLY=($(compgen -W "--catalog --help" -- "${{cur}}"))
                ;;
            completion|completion-enhanced)
                COMPREPLY=($(compgen -W "bash zsh fish power-shell elvish" -- "${{cur}}"))
                ;;
            *)
                # Default completion
                COMPREPLY=($(compgen -W "$subcommands" -- "${{cur}}"))
                ;;
        esac
    fi
}} &&
complete -F _attune attune

# ex: filetype=sh
"#);
}

/// Convert our Shell enum to clap_complete's Shell enum
pub fn shell_to_completion_shell(shell: &crate::cli::Shell) -> CompletionShell {
    match shell {
        crate::cli::Shell::Bash => CompletionShell::Bash,
        crate::cli::Shell::Zsh => CompletionShell::Zsh,
        crate::cli::Shell::Fish => CompletionShell::Fish,
        crate::cli::Shell::PowerShell => CompletionShell::PowerShell,
        crate::cli::Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Get available song names for completion
///
/// Returns the track titles of every admitted catalog entry, sorted and
/// deduplicated. Returns an empty list when the catalog is missing or
/// unreadable: completion must never surface an error into the shell.
pub fn get_song_completions(catalog_path: &Path) -> Result<Vec<String>> {
    if !catalog_path.exists() {
        return Ok(Vec::new());
    }

    let Ok(catalog) = Catalog::load(catalog_path) else {
        return Ok(Vec::new());
    };

    let mut completions: Vec<String> = catalog
        .songs()
        .iter()
        .map(|song| song.name.clone())
        .filter(|name| !name.is_empty())
        .collect();

    completions.sort();
    completions.dedup();
    Ok(completions)
}

/// Print available completions for song names
/// This is used by shell completion systems to get dynamic completions
pub fn print_song_completions(catalog_path: &Path) -> Result<()> {
    print_song_completions_for_shell(catalog_path, None)
}

/// Print available completions for song names, formatted for a specific shell
/// This is used by shell completion systems to get dynamic completions
pub fn print_song_completions_for_shell(catalog_path: &Path, shell: Option<&str>) -> Result<()> {
    let completions = get_song_completions(catalog_path)?;

    for completion in completions {
        match shell {
            Some("fish") => {
                // Fish handles escaping automatically, don't add quotes
                println!("{completion}");
            }
            _ => {
                // For bash, zsh, and other shells, escape spaces and special characters
                if completion.contains(' ') || completion.contains('\t') || completion.contains('\n') {
                    println!("\"{}\"", completion.replace('"', "\\\""));
                } else {
                    println!("{completion}");
                }
            }
        }
    }

    Ok(())
}
