//! Quiz Session
//!
//! Owns the engine, tracker and generator for one learner and keeps the
//! engine and tracker in lockstep: every submitted answer reaches both with
//! the same (correctness, latency, tier) triple.

use serde::{Deserialize, Serialize};

use crate::engine::AdaptiveEngine;
use crate::puzzle::PuzzleGenerator;
use crate::tracker::{AttemptRecord, SessionSummary, SessionTracker};
use crate::types::{DifficultyTier, Puzzle};

pub const DEFAULT_RECENT_ATTEMPTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierChange {
    Promoted,
    Demoted,
    Unchanged,
}

impl TierChange {
    pub fn between(previous: DifficultyTier, next: DifficultyTier) -> Self {
        match next.cmp(&previous) {
            std::cmp::Ordering::Greater => Self::Promoted,
            std::cmp::Ordering::Less => Self::Demoted,
            std::cmp::Ordering::Equal => Self::Unchanged,
        }
    }
}

/// Result of one submitted answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub was_correct: bool,
    pub correct_answer: i64,
    pub elapsed_seconds: f64,
    pub score: u8,
    pub previous_tier: DifficultyTier,
    pub next_tier: DifficultyTier,
    pub change: TierChange,
}

/// End-of-session report, also the JSON export format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub learner: String,
    pub summary: SessionSummary,
    pub final_score: u8,
    pub recommended_tier: DifficultyTier,
    pub tier_history: Vec<DifficultyTier>,
    pub recent_attempts: Vec<AttemptRecord>,
}

pub struct QuizSession {
    learner: String,
    engine: AdaptiveEngine,
    tracker: SessionTracker,
    generator: PuzzleGenerator,
    current: Puzzle,
    questions_completed: usize,
}

impl QuizSession {
    /// Start a session and draw the first puzzle at `initial_tier`.
    pub fn new(
        learner: impl Into<String>,
        initial_tier: DifficultyTier,
        mut generator: PuzzleGenerator,
    ) -> Self {
        let learner = learner.into();
        let current = generator.generate(initial_tier);
        tracing::info!(learner = %learner, tier = %initial_tier, "session started");
        Self {
            learner,
            engine: AdaptiveEngine::new(initial_tier),
            tracker: SessionTracker::new(),
            generator,
            current,
            questions_completed: 0,
        }
    }

    pub fn learner(&self) -> &str {
        &self.learner
    }

    pub fn current_puzzle(&self) -> &Puzzle {
        &self.current
    }

    pub fn current_tier(&self) -> DifficultyTier {
        self.current.tier
    }

    pub fn questions_completed(&self) -> usize {
        self.questions_completed
    }

    pub fn engine(&self) -> &AdaptiveEngine {
        &self.engine
    }

    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    /// Grade the current puzzle, advance the engine once and draw the next puzzle.
    pub fn submit(&mut self, user_answer: i64, elapsed_seconds: f64) -> Feedback {
        let asked = self.current.tier;
        let correct_answer = self.current.answer;
        let was_correct = user_answer == correct_answer;

        self.tracker.record(
            self.current.question.clone(),
            user_answer,
            correct_answer,
            elapsed_seconds,
            asked,
        );
        let score = self.engine.update_score(was_correct, elapsed_seconds, asked);
        let next_tier = self.engine.next_tier();
        let change = TierChange::between(asked, next_tier);

        self.questions_completed += 1;
        self.current = self.generator.generate(next_tier);

        tracing::info!(
            learner = %self.learner,
            question = self.questions_completed,
            was_correct,
            elapsed_seconds,
            score,
            tier = %next_tier,
            ?change,
            "answer submitted"
        );

        Feedback {
            was_correct,
            correct_answer,
            elapsed_seconds,
            score,
            previous_tier: asked,
            next_tier,
            change,
        }
    }

    pub fn summary_report(&self, recent_attempts: usize) -> SessionReport {
        SessionReport {
            learner: self.learner.clone(),
            summary: self.tracker.summary(),
            final_score: self.engine.current_score(),
            recommended_tier: self.engine.recommended_tier(),
            tier_history: self.engine.history().to_vec(),
            recent_attempts: self.tracker.recent(recent_attempts).to_vec(),
        }
    }
}
