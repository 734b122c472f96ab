//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for Segue using Clap derive
//! macros. It provides a type-safe way to parse command-line arguments and
//! route them to appropriate functionality.
//!
//! ## Commands
//!
//! - `rank`: Rank every catalog candidate against a current song
//! - `pair`: Score a single pair with a full breakdown
//! - `playlist`: Generate a playlist by repeatedly taking the best follower
//! - `list`: Display the validated catalog
//! - `completion`: Generate shell completions
//!
//! ## Examples
//!
//! ```bash
//! segue rank songs.json "Blinding Lights"
//! segue pair songs.json "Blinding Lights" "Levitating"
//! segue playlist songs.json "Blinding Lights" --length 20
//! ```

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main application arguments structure.
///
/// Uses Clap derive macros to automatically generate argument parsing,
/// help text, and validation. The main structure contains only a subcommand
/// and the global weights override since all functionality is accessed
/// through specific commands.
#[derive(Parser)]
#[command(name = "segue")]
#[command(about = "Segue: DJ-style mixability scoring & next-track sequencing")]
#[command(version)]
pub struct Args {
    /// JSON file overriding the default scoring weights
    ///
    /// May be partial: unspecified weights keep their tuned defaults.
    /// Without this flag, the platform config location is checked
    /// (e.g. ~/.config/segue/weights.json on Linux).
    #[arg(long, global = true, value_name = "FILE")]
    pub weights: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
///
/// Each variant corresponds to a major piece of functionality in Segue.
/// Command arguments are embedded directly in the enum variants for
/// type safety and automatic validation.
#[derive(Subcommand)]
pub enum Command {
    /// Rank all candidates against a current song
    ///
    /// Runs one sequencing pass: scores every record in the catalog against
    /// the given song, removes the song itself (and any exact duplicates of
    /// it), and prints the remainder sorted by mixability descending.
    Rank {
        /// Path to the catalog file (JSON array of song records)
        catalog: PathBuf,

        /// Title of the current song
        ///
        /// Matched case-insensitively against the catalog. If the title is
        /// ambiguous, narrow it with --artist.
        #[arg(value_hint = clap::ValueHint::Other)]
        track: String,

        /// Artist of the current song, for disambiguation
        #[arg(short, long)]
        artist: Option<String>,

        /// Maximum number of candidates to print
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Show the per-feature score breakdown for each candidate
        #[arg(short, long)]
        verbose: bool,
    },

    /// Score a single pair of songs with a full breakdown
    ///
    /// Prints the tempo, energy and key feature scores, the closeness and
    /// ranking aggregates, and the final mixability score for the
    /// transition from the first song to the second.
    Pair {
        /// Path to the catalog file (JSON array of song records)
        catalog: PathBuf,

        /// Title of the current song
        #[arg(value_hint = clap::ValueHint::Other)]
        from: String,

        /// Title of the candidate song
        #[arg(value_hint = clap::ValueHint::Other)]
        to: String,
    },

    /// Generate a playlist by repeatedly taking the best follower
    ///
    /// Starts from the given song (or a random one if omitted) and advances
    /// one transition at a time, always picking the top-ranked candidate.
    /// Played tracks leave the pool, so nothing repeats.
    Playlist {
        /// Path to the catalog file (JSON array of song records)
        catalog: PathBuf,

        /// Title of the starting song (random when omitted)
        #[arg(value_hint = clap::ValueHint::Other)]
        track: Option<String>,

        /// Playlist length, including the starting song
        #[arg(short, long, default_value = "10")]
        length: usize,

        /// Show the mixability score behind each transition
        #[arg(short, long)]
        verbose: bool,
    },

    /// List all songs in the catalog
    ///
    /// Loads and validates the catalog, then prints every record with its
    /// scoring-relevant features. Useful for checking what normalization
    /// did to a raw export.
    List {
        /// Path to the catalog file (JSON array of song records)
        catalog: PathBuf,
    },

    /// Generate shell completions
    ///
    /// Usage: segue completion bash > ~/.local/share/bash-completion/completions/segue
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_rank_defaults() {
        let args = Args::parse_from(["segue", "rank", "songs.json", "Some Song"]);
        match args.command {
            Command::Rank { limit, verbose, artist, .. } => {
                assert_eq!(limit, 10);
                assert!(!verbose);
                assert!(artist.is_none());
            }
            _ => panic!("expected rank command"),
        }
    }

    #[test]
    fn test_global_weights_flag_parses_after_subcommand() {
        let args = Args::parse_from([
            "segue", "playlist", "songs.json", "--weights", "w.json", "--length", "5",
        ]);

        assert_eq!(args.weights.as_deref(), Some(std::path::Path::new("w.json")));
        match args.command {
            Command::Playlist { length, track, .. } => {
                assert_eq!(length, 5);
                assert!(track.is_none());
            }
            _ => panic!("expected playlist command"),
        }
    }
}
