//! Session Tracker
//!
//! Append-only log of answered questions plus aggregate statistics for the
//! summary view. Holds no decision logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::DifficultyTier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub question: String,
    pub user_answer: i64,
    pub correct_answer: i64,
    pub is_correct: bool,
    pub elapsed_seconds: f64,
    pub tier: DifficultyTier,
    pub answered_at: DateTime<Utc>,
}

/// Questions answered per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl TierCounts {
    pub fn get(&self, tier: DifficultyTier) -> usize {
        match tier {
            DifficultyTier::Easy => self.easy,
            DifficultyTier::Medium => self.medium,
            DifficultyTier::Hard => self.hard,
        }
    }

    fn increment(&mut self, tier: DifficultyTier) {
        match tier {
            DifficultyTier::Easy => self.easy += 1,
            DifficultyTier::Medium => self.medium += 1,
            DifficultyTier::Hard => self.hard += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total_questions: usize,
    pub correct: usize,
    /// Percentage in [0, 100]
    pub accuracy: f64,
    /// Mean response time in seconds
    pub avg_time: f64,
    pub tier_counts: TierCounts,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionTracker {
    attempts: Vec<AttemptRecord>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log one attempt. Correctness is derived from the two answers.
    pub fn record(
        &mut self,
        question: impl Into<String>,
        user_answer: i64,
        correct_answer: i64,
        elapsed_seconds: f64,
        tier: DifficultyTier,
    ) -> &AttemptRecord {
        let record = AttemptRecord {
            question: question.into(),
            user_answer,
            correct_answer,
            is_correct: user_answer == correct_answer,
            elapsed_seconds,
            tier,
            answered_at: Utc::now(),
        };
        self.attempts.push(record);
        let index = self.attempts.len() - 1;
        &self.attempts[index]
    }

    /// The last `n` attempts, oldest first. All of them when fewer exist;
    /// `n == 0` yields an empty slice, which is how `QUIZ_RECENT_ATTEMPTS=0`
    /// hides the recent-attempts list.
    pub fn recent(&self, n: usize) -> &[AttemptRecord] {
        let start = self.attempts.len().saturating_sub(n);
        &self.attempts[start..]
    }

    pub fn attempts(&self) -> &[AttemptRecord] {
        &self.attempts
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    pub fn summary(&self) -> SessionSummary {
        if self.attempts.is_empty() {
            return SessionSummary::default();
        }

        let total = self.attempts.len();
        let correct = self.attempts.iter().filter(|a| a.is_correct).count();
        let total_time: f64 = self.attempts.iter().map(|a| a.elapsed_seconds).sum();

        let mut tier_counts = TierCounts::default();
        for attempt in &self.attempts {
            tier_counts.increment(attempt.tier);
        }

        SessionSummary {
            total_questions: total,
            correct,
            accuracy: correct as f64 / total as f64 * 100.0,
            avg_time: total_time / total as f64,
            tier_counts,
        }
    }
}
