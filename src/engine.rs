//! Adaptive Difficulty Engine
//!
//! Keeps a bounded skill score (0-100) for one learning session and maps it
//! onto a difficulty tier.
//!
//! - Each answer moves the score by a fixed delta chosen from correctness and
//!   whether the response beat the tier's time threshold
//! - Penalties are larger than rewards so struggling learners drop quickly
//! - The tier is recomputed from the score on every call; it is never stored
//!   as state driving transitions
//!
//! The tier history is an observation log only. The scoring rule never reads it.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::types::{AttemptOutcome, DifficultyTier};

// ==================== Constants ====================

pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 100;

/// Scores below this map to Easy.
pub const MEDIUM_BREAKPOINT: u8 = 35;
/// Scores at or above this map to Hard.
pub const HARD_BREAKPOINT: u8 = 70;

pub const CORRECT_FAST_DELTA: i32 = 8;
pub const CORRECT_SLOW_DELTA: i32 = 4;
pub const INCORRECT_FAST_DELTA: i32 = -6;
pub const INCORRECT_SLOW_DELTA: i32 = -10;

/// Seed score for a session started at `tier`.
pub fn initial_score(tier: DifficultyTier) -> u8 {
    match tier {
        DifficultyTier::Easy => 25,
        DifficultyTier::Medium => 50,
        DifficultyTier::Hard => 75,
    }
}

/// Responses strictly faster than this (seconds) count as fast.
pub fn latency_threshold(tier: DifficultyTier) -> f64 {
    match tier {
        DifficultyTier::Easy => 5.0,
        DifficultyTier::Medium => 8.0,
        DifficultyTier::Hard => 12.0,
    }
}

/// Score delta for one attempt.
///
/// NaN latency never compares as fast, so it falls in the slow bucket.
pub fn score_delta(was_correct: bool, elapsed_seconds: f64, tier: DifficultyTier) -> i32 {
    let fast = elapsed_seconds < latency_threshold(tier);
    match (was_correct, fast) {
        (true, true) => CORRECT_FAST_DELTA,
        (true, false) => CORRECT_SLOW_DELTA,
        (false, true) => INCORRECT_FAST_DELTA,
        (false, false) => INCORRECT_SLOW_DELTA,
    }
}

pub fn tier_for_score(score: u8) -> DifficultyTier {
    if score < MEDIUM_BREAKPOINT {
        DifficultyTier::Easy
    } else if score < HARD_BREAKPOINT {
        DifficultyTier::Medium
    } else {
        DifficultyTier::Hard
    }
}

// ==================== Engine ====================

/// Skill-score engine for a single session.
///
/// Serialized through [`EngineSnapshot`]; deserializing clamps the score and
/// rejects a snapshot without the seed tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EngineSnapshot", into = "EngineSnapshot")]
pub struct AdaptiveEngine {
    score: u8,
    tier_history: Vec<DifficultyTier>,
}

impl AdaptiveEngine {
    pub fn new(initial_tier: DifficultyTier) -> Self {
        let score = initial_score(initial_tier);
        tracing::debug!(tier = %initial_tier, score, "adaptive engine created");
        Self {
            score,
            tier_history: vec![initial_tier],
        }
    }

    /// Start from an explicit score instead of the tier's seed score.
    /// Values above 100 are clamped.
    pub fn with_score(initial_tier: DifficultyTier, score: u8) -> Self {
        Self {
            score: score.min(MAX_SCORE),
            tier_history: vec![initial_tier],
        }
    }

    /// Apply one attempt and return the clamped score.
    pub fn update_score(
        &mut self,
        was_correct: bool,
        elapsed_seconds: f64,
        tier_at_attempt: DifficultyTier,
    ) -> u8 {
        let delta = score_delta(was_correct, elapsed_seconds, tier_at_attempt);
        let previous = self.score;
        self.score = (i32::from(previous) + delta)
            .clamp(i32::from(MIN_SCORE), i32::from(MAX_SCORE)) as u8;

        tracing::debug!(
            was_correct,
            elapsed_seconds,
            tier = %tier_at_attempt,
            delta,
            previous,
            score = self.score,
            "skill score updated"
        );

        self.score
    }

    pub fn apply(&mut self, outcome: &AttemptOutcome) -> u8 {
        self.update_score(outcome.was_correct, outcome.elapsed_seconds, outcome.tier)
    }

    /// Tier for the current score, appended to the history.
    ///
    /// Not idempotent: call once per question transition.
    pub fn next_tier(&mut self) -> DifficultyTier {
        let tier = tier_for_score(self.score);
        self.tier_history.push(tier);
        tier
    }

    /// Tier for the current score without touching the history.
    pub fn recommended_tier(&self) -> DifficultyTier {
        tier_for_score(self.score)
    }

    pub fn current_score(&self) -> u8 {
        self.score
    }

    /// Every tier handed out, starting with the initial one.
    pub fn history(&self) -> &[DifficultyTier] {
        &self.tier_history
    }
}

/// Wire form of [`AdaptiveEngine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub score: u8,
    pub tier_history: Vec<DifficultyTier>,
}

impl TryFrom<EngineSnapshot> for AdaptiveEngine {
    type Error = QuizError;

    fn try_from(snapshot: EngineSnapshot) -> Result<Self, Self::Error> {
        if snapshot.tier_history.is_empty() {
            return Err(QuizError::InvalidState(
                "tier history must start with the initial tier".to_string(),
            ));
        }
        Ok(Self {
            score: snapshot.score.min(MAX_SCORE),
            tier_history: snapshot.tier_history,
        })
    }
}

impl From<AdaptiveEngine> for EngineSnapshot {
    fn from(engine: AdaptiveEngine) -> Self {
        Self {
            score: engine.score,
            tier_history: engine.tier_history,
        }
    }
}

impl Default for AdaptiveEngine {
    fn default() -> Self {
        Self::new(DifficultyTier::default())
    }
}
