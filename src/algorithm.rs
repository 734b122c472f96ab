//! Mixability scoring algorithms.
//!
//! Three pure feature scorers (tempo, energy, key) each grade one dimension
//! of compatibility between the current song and a candidate on a `[0, 1]`
//! scale. Two aggregates combine them: a *closeness* score for acoustic
//! compatibility between the pair, and a *ranking* score for the candidate's
//! intrinsic quality. The final mixability score blends the two and is the
//! single value the sequencer sorts by.

use crate::error::SegueError;
use crate::song::Song;
use serde::{Deserialize, Serialize};

/// Type-safe scoring context with immutable parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringContext {
    pub tempo_bands: TempoBands,
    pub weights: WeightConfig,
}

/// Tempo band thresholds (integer BPM difference) and the score each band
/// maps to.
///
/// Tempo similarity is stepped rather than linear: tracks within a tight BPM
/// band are interchangeable for mixing, while beyond `maximum` the pair is
/// treated as incompatible regardless of magnitude.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TempoBands {
    pub perfect: u32,
    pub good: u32,
    pub okay: u32,
    pub maximum: u32,
    pub perfect_score: f64,
    pub good_score: f64,
    pub okay_score: f64,
    pub maximum_score: f64,
}

impl Default for TempoBands {
    fn default() -> Self {
        Self {
            perfect: 3,
            good: 5,
            okay: 7,
            maximum: 10,
            perfect_score: 1.0,
            good_score: 0.7,
            okay_score: 0.5,
            maximum_score: 0.2,
        }
    }
}

/// Immutable weight configuration for the aggregate scores.
///
/// The closeness sub-weights intentionally sum to 0.9, not 1.0. This is the
/// configuration the scores were tuned against; renormalizing would change
/// every historical score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    /// Closeness sub-weight for the tempo score
    pub tempo: f64,
    /// Closeness sub-weight for the energy score
    pub energy: f64,
    /// Closeness sub-weight for the key score
    pub key: f64,
    /// Ranking sub-weight for candidate popularity
    pub popularity: f64,
    /// Ranking sub-weight for candidate danceability
    pub danceability: f64,
    /// Ranking sub-weight for candidate liveness
    pub liveness: f64,
    /// Blend weight for the closeness aggregate
    pub closeness: f64,
    /// Blend weight for the ranking aggregate
    pub ranking: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            tempo: 0.45,
            energy: 0.10,
            key: 0.35,
            popularity: 0.6,
            danceability: 0.35,
            liveness: 0.05,
            closeness: 0.6,
            ranking: 0.4,
        }
    }
}

/// Every intermediate score that feeds one mixability value.
///
/// Used by the CLI's verbose output and the `pair` command to show why a
/// candidate ranked where it did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub tempo: f64,
    pub energy: f64,
    pub key: f64,
    pub closeness: f64,
    pub ranking: f64,
    pub mixability: f64,
}

/// Grades tempo similarity between two songs in whole BPM.
///
/// Stepped bands under the default configuration: 1.0 for a difference of
/// at most 3 BPM, 0.7 up to 5, 0.5 up to 7, 0.2 up to 10, and 0.0 beyond.
#[must_use]
pub fn tempo_score(current: u32, candidate: u32, bands: &TempoBands) -> f64 {
    let diff = current.abs_diff(candidate);

    if diff <= bands.perfect {
        bands.perfect_score
    } else if diff <= bands.good {
        bands.good_score
    } else if diff <= bands.okay {
        bands.okay_score
    } else if diff <= bands.maximum {
        bands.maximum_score
    } else {
        0.0
    }
}

/// Grades energy similarity between two songs.
///
/// Linear: `1 - |current - candidate|`. Both inputs are validated to `[0, 1]`
/// before scoring, so the result stays in `[0, 1]` without clamping.
#[must_use]
pub fn energy_score(current: f64, candidate: f64) -> f64 {
    1.0 - (current - candidate).abs()
}

/// Grades key compatibility on the 12-tone circular wheel.
///
/// Key ranges 0-11, so the wheel wraps: the distance between key 0 and
/// key 11 is 1, not 11, and the furthest possible distance is 6. The score
/// scales that circular distance into `[0, 1]`.
#[must_use]
pub fn key_score(current: u8, candidate: u8) -> f64 {
    let raw = f64::from(current.abs_diff(candidate));
    let circular = raw.min(12.0 - raw);
    1.0 - circular / 6.0
}

/// Combines the three feature scores into the closeness aggregate.
#[must_use]
pub fn closeness_score(tempo: f64, energy: f64, key: f64, weights: &WeightConfig) -> f64 {
    tempo * weights.tempo + energy * weights.energy + key * weights.key
}

/// Scores the candidate's intrinsic quality, independent of the current song.
#[must_use]
pub fn ranking_score(candidate: &Song, weights: &WeightConfig) -> f64 {
    candidate.popularity * weights.popularity
        + candidate.danceability * weights.danceability
        + candidate.liveness * weights.liveness
}

/// Full scoring pipeline for one validated pair.
fn compute(current: &Song, candidate: &Song, context: &ScoringContext) -> ScoreBreakdown {
    let weights = &context.weights;

    let tempo = tempo_score(current.tempo, candidate.tempo, &context.tempo_bands);
    let energy = energy_score(current.energy, candidate.energy);
    let key = key_score(current.key, candidate.key);

    let closeness = closeness_score(tempo, energy, key, weights);
    let ranking = ranking_score(candidate, weights);
    let mixability = round2(closeness * weights.closeness + ranking * weights.ranking);

    log::trace!(
        "Scored '{}' -> '{}': mixability {mixability}",
        current.track,
        candidate.track
    );

    ScoreBreakdown {
        tempo,
        energy,
        key,
        closeness,
        ranking,
        mixability,
    }
}

/// Calculates the mixability score for a candidate against the current song.
///
/// The result is `closeness * 0.6 + ranking * 0.4` under the default
/// weights, rounded to two decimals. With feature scores in `[0, 1]` this
/// is bounded by `[0, 0.94]` (the closeness sub-weights sum to 0.9).
///
/// # Errors
///
/// Returns [`SegueError::Domain`] if either record carries an out-of-range
/// value; the score is never computed from invalid input.
///
/// # Examples
///
/// ```
/// use segue::algorithm::{mixability, ScoringContext};
/// use segue::song::Song;
///
/// let current = Song {
///     track: "Opener".to_string(),
///     artist: "A".to_string(),
///     genre: "house".to_string(),
///     tempo: 120,
///     key: 0,
///     energy: 0.5,
///     popularity: 0.5,
///     danceability: 0.5,
///     liveness: 0.1,
/// };
/// let candidate = Song {
///     track: "Follower".to_string(),
///     tempo: 122,
///     key: 1,
///     popularity: 0.8,
///     danceability: 0.7,
///     ..current.clone()
/// };
///
/// let score = mixability(&current, &candidate, &ScoringContext::default())?;
/// assert_eq!(score, 0.80);
/// # Ok::<(), segue::error::SegueError>(())
/// ```
pub fn mixability(
    current: &Song,
    candidate: &Song,
    context: &ScoringContext,
) -> Result<f64, SegueError> {
    current.validate()?;
    candidate.validate()?;
    Ok(compute(current, candidate, context).mixability)
}

/// Mixability for records already validated at the pool boundary.
///
/// The sequencer validates each record once per `advance` call and then
/// scores the whole pool without re-checking domains.
#[must_use]
pub(crate) fn mixability_unchecked(
    current: &Song,
    candidate: &Song,
    context: &ScoringContext,
) -> f64 {
    compute(current, candidate, context).mixability
}

/// Like [`mixability`] but returns every intermediate score.
///
/// # Errors
///
/// Returns [`SegueError::Domain`] if either record carries an out-of-range
/// value.
pub fn breakdown(
    current: &Song,
    candidate: &Song,
    context: &ScoringContext,
) -> Result<ScoreBreakdown, SegueError> {
    current.validate()?;
    candidate.validate()?;
    Ok(compute(current, candidate, context))
}

/// Rounds to two decimals, matching the precision mixability is reported at.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
