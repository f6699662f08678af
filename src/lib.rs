//! # math-adventures - adaptive arithmetic quiz
//!
//! - **Adaptive Difficulty Engine** - bounded skill score driven by correctness and latency
//! - **Puzzle Generator** - seedable arithmetic questions per difficulty tier
//! - **Session Tracker** - attempt log and summary statistics
//! - **Interaction Shell** - terminal quiz loop over any reader/writer
//!
//! ## Module layout
//!
//! - [`engine`] - skill score update rule and tier mapping
//! - [`puzzle`] - question generation
//! - [`tracker`] - attempt log and statistics
//! - [`session`] - one learner's session, keeping engine and tracker in lockstep
//! - [`shell`] - interactive loop and summary rendering
//! - [`config`], [`logging`], [`error`] - ambient plumbing
//! - [`types`] - shared types
//!
//! ## Example
//!
//! ```rust
//! use math_adventures::{AdaptiveEngine, DifficultyTier};
//!
//! let mut engine = AdaptiveEngine::new(DifficultyTier::Medium);
//! assert_eq!(engine.update_score(true, 3.0, DifficultyTier::Medium), 58);
//! assert_eq!(engine.next_tier(), DifficultyTier::Medium);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod puzzle;
pub mod session;
pub mod shell;
pub mod tracker;
pub mod types;

pub use config::Config;
pub use engine::AdaptiveEngine;
pub use error::{QuizError, Result};
pub use puzzle::PuzzleGenerator;
pub use session::{Feedback, QuizSession, SessionReport, TierChange};
pub use shell::Shell;
pub use tracker::{AttemptRecord, SessionSummary, SessionTracker, TierCounts};
pub use types::*;
