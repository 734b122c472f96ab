//! Segue scores how well one song follows another and sequences play queues
//! from those scores.
//!
//! Core modules:
//! - [`algorithm`] - Feature and aggregate mixability scorers
//! - [`queue`] - Sequencer, session state and playlist generation
//! - [`catalog`] - Catalog ingestion, normalization and validation
//!
//! ### Supporting Modules
//!
//! - [`song`] - The validated catalog record
//! - [`error`] - Typed Schema/Domain failures
//! - [`config`] - Weight override configuration
//! - [`cli`] - Command-line interface definitions with clap integration
//!
//! ## Quick Start Example
//!
//! ```
//! use segue::algorithm::ScoringContext;
//! use segue::queue::Session;
//! use segue::song::Song;
//!
//! let opener = Song {
//!     track: "Opener".to_string(),
//!     artist: "DJ A".to_string(),
//!     genre: "house".to_string(),
//!     tempo: 124,
//!     key: 8,
//!     energy: 0.82,
//!     popularity: 0.67,
//!     danceability: 0.74,
//!     liveness: 0.09,
//! };
//! let follower = Song {
//!     track: "Follower".to_string(),
//!     artist: "DJ B".to_string(),
//!     tempo: 126,
//!     key: 9,
//!     ..opener.clone()
//! };
//!
//! // One session owns its pool and played history
//! let mut session = Session::new(vec![opener.clone(), follower], ScoringContext::default())?;
//!
//! // Each advance ranks the remaining pool against what just played
//! let ranked = session.advance(&opener)?;
//! assert_eq!(ranked[0].song.track, "Follower");
//! assert_eq!(session.history().len(), 1);
//! # Ok::<(), segue::error::SegueError>(())
//! ```
//!
//! ## Scoring Model
//!
//! Three pure feature scorers grade one dimension each on `[0, 1]`:
//!
//! - **Tempo**: stepped BPM bands (1.0 within 3 BPM, down to 0.0 beyond 10) -
//!   tempo differences have perceptual thresholds, not smooth degradation
//! - **Energy**: linear similarity, `1 - |a - b|`
//! - **Key**: circular distance on the 12-tone wheel (key 0 and key 11 are
//!   neighbors, maximum distance is 6)
//!
//! Two aggregates combine them: *closeness* (acoustic compatibility of the
//! pair, weights {tempo: 0.45, energy: 0.10, key: 0.35}) and *ranking* (the
//! candidate's intrinsic quality, weights {popularity: 0.6, danceability:
//! 0.35, liveness: 0.05}). Mixability blends the two (0.6/0.4) and is
//! rounded to two decimals. All weights are overridable via [`config`].
//!
//! ## Sequencing
//!
//! [`queue::advance`] is the single operation a playback driver needs: it
//! ranks the pool against the current song, suppresses every copy of that
//! song by `(track, artist)`, and appends the song to the played history.
//! Feed the top of the ranked list back in as the next current song -
//! [`queue::Session`] and [`queue::generate_playlist`] do exactly that.
//!
//! ## Error Handling
//!
//! Core functions return `Result<T, SegueError>`: `Schema` for records
//! missing required fields, `Domain` for out-of-range values. Validation
//! happens at ingestion; the scorers never silently clamp. An empty pool is
//! not an error - it ranks to an empty list so the caller decides what a
//! finished session means.

pub mod algorithm;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod queue;
pub mod song;
