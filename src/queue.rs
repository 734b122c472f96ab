//! The play-queue sequencer.
//!
//! One [`advance`] call is one "now playing" transition: every candidate in
//! the pool is scored against the current song, every copy of the current
//! song is excluded, the remainder is sorted by mixability, and the current
//! song is appended to the played history. A [`Session`] owns the pool and
//! history for one playback session and feeds each call's ranked remainder
//! back as the next call's pool, so already-played tracks drop out of
//! circulation.

use crate::algorithm::{self, ScoringContext};
use crate::error::SegueError;
use crate::song::Song;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Wrapper for f64 to enable Hash and Eq for ranked collections
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct OrderedFloat(f64);

impl Eq for OrderedFloat {}

impl std::hash::Hash for OrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<f64> for OrderedFloat {
    fn from(f: f64) -> Self {
        Self(f)
    }
}

impl From<OrderedFloat> for f64 {
    fn from(of: OrderedFloat) -> Self {
        of.0
    }
}

impl std::fmt::Display for OrderedFloat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A candidate with its transient mixability score.
///
/// The score is a derived, disposable view: it is recomputed on every
/// transition (the reference song changes each time) and is never written
/// back onto the canonical [`Song`] record.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSong {
    pub song: Song,
    pub mixability: OrderedFloat,
}

/// Ranks the pool against the current song and records the transition.
///
/// Behavior, in order:
///
/// 1. Every pool record whose `(track, artist)` pair matches `current` is
///    excluded, so exact duplicates of the current song are suppressed en
///    masse, not one row at a time.
/// 2. Each remaining record is scored with [`algorithm::mixability`].
/// 3. The remainder is sorted by mixability descending; ties keep their
///    original catalog order (stable sort, no secondary key).
/// 4. `current` is appended, score-free, to a copy of `history`.
///
/// The pool itself is never mutated. An empty result is not an error: a
/// pool with zero non-matching records returns an empty ranked list, and a
/// `current` that never occurs in the pool simply excludes zero rows.
///
/// # Errors
///
/// Returns [`SegueError::Domain`] if `current` or any pool record carries
/// an out-of-range value.
pub fn advance(
    current: &Song,
    pool: &[Song],
    history: &[Song],
    context: &ScoringContext,
) -> Result<(Vec<RankedSong>, Vec<Song>), SegueError> {
    current.validate()?;
    for candidate in pool {
        candidate.validate()?;
    }

    // Parallel scoring preserves pool order, which the stable sort below
    // relies on for tie-breaking.
    let mut ranked: Vec<RankedSong> = pool
        .par_iter()
        .filter(|candidate| !candidate.same_track(current))
        .map(|candidate| RankedSong {
            song: candidate.clone(),
            mixability: algorithm::mixability_unchecked(current, candidate, context).into(),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.mixability
            .partial_cmp(&a.mixability)
            .unwrap_or(Ordering::Equal)
    });

    let mut updated_history = Vec::with_capacity(history.len() + 1);
    updated_history.extend_from_slice(history);
    updated_history.push(current.clone());

    log::debug!(
        "Advanced past '{}': {} candidates ranked, history now {} songs",
        current.track,
        ranked.len(),
        updated_history.len()
    );

    Ok((ranked, updated_history))
}

/// One playback session's pool and played history.
///
/// The session is the single writer of its state: each [`Session::advance`]
/// call appends exactly one record to the history and replaces the pool with
/// the ranked remainder, so a track leaves circulation once it has played.
#[derive(Debug, Clone)]
pub struct Session {
    pool: Vec<Song>,
    history: Vec<Song>,
    context: ScoringContext,
}

impl Session {
    /// Creates a session over a validated candidate pool.
    ///
    /// # Errors
    ///
    /// Returns [`SegueError::Domain`] if any record in the pool carries an
    /// out-of-range value.
    pub fn new(pool: Vec<Song>, context: ScoringContext) -> Result<Self, SegueError> {
        for song in &pool {
            song.validate()?;
        }

        Ok(Self {
            pool,
            history: Vec::new(),
            context,
        })
    }

    /// Remaining candidates, in their current order.
    #[must_use]
    pub fn pool(&self) -> &[Song] {
        &self.pool
    }

    /// Tracks played so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Song] {
        &self.history
    }

    /// Ranks the remaining pool against `current` and consumes it.
    ///
    /// Feeds the ranked remainder back as the next pool, which is what
    /// keeps already-played tracks from being suggested again later in the
    /// session.
    ///
    /// # Errors
    ///
    /// Returns [`SegueError::Domain`] if `current` carries an out-of-range
    /// value.
    pub fn advance(&mut self, current: &Song) -> Result<Vec<RankedSong>, SegueError> {
        let (ranked, updated_history) = advance(current, &self.pool, &self.history, &self.context)?;

        self.pool = ranked.iter().map(|r| r.song.clone()).collect();
        self.history = updated_history;

        Ok(ranked)
    }
}

/// Generates a playlist by repeatedly advancing and taking the top candidate.
///
/// The starting song opens the playlist; each subsequent entry is the
/// best-ranked follower of the previous one. Stops early when the pool runs
/// out of non-duplicate candidates.
///
/// # Errors
///
/// Returns [`SegueError::Domain`] if the starting song or any catalog
/// record carries an out-of-range value.
pub fn generate_playlist(
    catalog: Vec<Song>,
    start: Song,
    max_length: usize,
    context: &ScoringContext,
) -> Result<Vec<Song>, SegueError> {
    let mut session = Session::new(catalog, context.clone())?;
    let mut playlist = Vec::with_capacity(max_length);
    let mut current = start;

    while playlist.len() < max_length {
        playlist.push(current.clone());

        let ranked = session.advance(&current)?;
        match ranked.into_iter().next() {
            Some(best) => current = best.song,
            None => break,
        }
    }

    Ok(playlist)
}
