//! # Segue - DJ-style Next-Track Sequencing
//!
//! Segue scores how well one song follows another (its "mixability") and
//! drives a play queue that always suggests the best follower for whatever
//! just played.
//!
//! ## Architecture
//!
//! - `cli`: Command-line interface definitions
//! - `catalog`: Catalog ingestion, normalization and validation
//! - `algorithm`: Feature and aggregate scorers (pure functions)
//! - `queue`: Sequencer, session state and playlist generation
//! - `config`: Weight override configuration
//! - `song`/`error`: The catalog record and typed failures
//!
//! ## Usage
//!
//! ```bash
//! # Rank followers for a song
//! segue rank songs.json "Blinding Lights"
//!
//! # Explain one transition
//! segue pair songs.json "Blinding Lights" "Levitating"
//!
//! # Generate a 20-song playlist
//! segue playlist songs.json "Blinding Lights" --length 20
//! ```

mod algorithm;
mod catalog;
mod cli;
mod config;
mod error;
mod queue;
mod song;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::info;
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::path::Path;

use crate::song::Song;

/// Loads a catalog and resolves a song in it, with a helpful failure.
fn resolve_song<'a>(
    songs: &'a [Song],
    track: &str,
    artist: Option<&str>,
) -> Result<&'a Song> {
    catalog::find_song(songs, track, artist).ok_or_else(|| match artist {
        Some(artist) => anyhow::anyhow!("Song '{track}' by '{artist}' not found in catalog"),
        None => anyhow::anyhow!(
            "Song '{track}' not found in catalog. Titles are matched case-insensitively; \
             use --artist to disambiguate duplicates."
        ),
    })
}

/// Main entry point for the Segue application.
///
/// Initializes logging, parses command-line arguments, and routes commands
/// to the appropriate module functions. All operations return Results for
/// consistent error handling throughout the application.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug segue rank ...` - Enable debug logging
/// - `RUST_LOG=segue::algorithm=trace segue pair ...` - Per-pair score traces
fn main() -> Result<()> {
    // Initialize environment logger for debugging and monitoring
    env_logger::init();

    // Parse command-line arguments using Clap derive macros
    let args = cli::Args::parse();

    // Weight overrides apply to every scoring command
    let context = config::load_scoring_context(args.weights.as_deref())?;

    match args.command {
        cli::Command::Rank {
            catalog: catalog_path,
            track,
            artist,
            limit,
            verbose,
        } => {
            let songs = load_catalog(&catalog_path)?;
            let current = resolve_song(&songs, &track, artist.as_deref())?.clone();

            info!("Ranking {} candidates against '{}'", songs.len(), current.track);
            let (ranked, _) = queue::advance(&current, &songs, &[], &context)?;

            println!("Now playing: {} - {}", current.artist, current.track);
            if ranked.is_empty() {
                println!("No candidates remain in the catalog.");
            }

            for (i, entry) in ranked.iter().take(limit).enumerate() {
                println!(
                    "  {}. {} - {} (mixability: {})",
                    i + 1,
                    entry.song.artist,
                    entry.song.track,
                    entry.mixability
                );

                if verbose {
                    let parts = algorithm::breakdown(&current, &entry.song, &context)?;
                    println!(
                        "     tempo: {:.2}  energy: {:.2}  key: {:.2}  closeness: {:.2}  ranking: {:.2}",
                        parts.tempo, parts.energy, parts.key, parts.closeness, parts.ranking
                    );
                }
            }
        }
        cli::Command::Pair {
            catalog: catalog_path,
            from,
            to,
        } => {
            let songs = load_catalog(&catalog_path)?;
            let current = resolve_song(&songs, &from, None)?;
            let candidate = resolve_song(&songs, &to, None)?;

            let parts = algorithm::breakdown(current, candidate, &context)?;

            println!("{} - {}  ->  {} - {}", current.artist, current.track, candidate.artist, candidate.track);
            println!("  tempo score:     {:.2}  ({} -> {} BPM)", parts.tempo, current.tempo, candidate.tempo);
            println!("  energy score:    {:.2}  ({:.2} -> {:.2})", parts.energy, current.energy, candidate.energy);
            println!("  key score:       {:.2}  ({} -> {})", parts.key, current.key, candidate.key);
            println!("  closeness:       {:.4}", parts.closeness);
            println!("  ranking:         {:.4}", parts.ranking);
            println!("  mixability:      {:.2}", parts.mixability);
        }
        cli::Command::Playlist {
            catalog: catalog_path,
            track,
            length,
            verbose,
        } => {
            let songs = load_catalog(&catalog_path)?;

            let start = match track {
                Some(track) => resolve_song(&songs, &track, None)?.clone(),
                None => songs
                    .choose(&mut thread_rng())
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("Catalog is empty"))?,
            };

            info!("Generating {length}-song playlist from '{}'", start.track);

            if verbose {
                let mut session = queue::Session::new(songs, context)?;
                let mut current = start;
                let mut position = 1;

                println!("  {}. {} - {}", position, current.artist, current.track);
                while position < length {
                    let ranked = session.advance(&current)?;
                    let Some(best) = ranked.into_iter().next() else {
                        println!("Pool exhausted after {position} songs.");
                        break;
                    };

                    position += 1;
                    println!(
                        "  {}. {} - {} (mixability: {})",
                        position, best.song.artist, best.song.track, best.mixability
                    );
                    current = best.song;
                }
            } else {
                let playlist = queue::generate_playlist(songs, start, length, &context)?;
                for (i, song) in playlist.iter().enumerate() {
                    println!("  {}. {} - {}", i + 1, song.artist, song.track);
                }
            }
        }
        cli::Command::List { catalog: catalog_path } => {
            let songs = load_catalog(&catalog_path)?;
            println!("{} songs in catalog:", songs.len());

            for song in &songs {
                println!(
                    "  {} - {} [{}] (tempo: {}, key: {}, energy: {:.2}, popularity: {:.2})",
                    song.artist, song.track, song.genre, song.tempo, song.key, song.energy, song.popularity
                );
            }
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            clap_complete::generate(shell, &mut cmd, "segue", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Loads and validates a catalog file with CLI-friendly context.
fn load_catalog(path: &Path) -> Result<Vec<Song>> {
    let songs = catalog::load_catalog(path)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))?;

    info!("Catalog validated: {} songs", songs.len());
    Ok(songs)
}
