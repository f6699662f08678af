//! Interaction Shell
//!
//! Line-oriented quiz loop over any reader/writer pair. Measures response
//! latency, feeds answers to the session and renders feedback and the
//! end-of-session summary.

use std::io::{BufRead, Write};
use std::time::Instant;

use crate::config::Config;
use crate::error::Result;
use crate::puzzle::PuzzleGenerator;
use crate::session::{Feedback, QuizSession, SessionReport, TierChange};
use crate::types::DifficultyTier;

const DEFAULT_LEARNER: &str = "learner";

enum Input {
    Answer(i64),
    Quit,
}

pub struct Shell {
    config: Config,
}

impl Shell {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run one full session. Returns `None` when no question was answered.
    pub fn run<R, W>(&self, mut input: R, mut out: W) -> Result<Option<SessionReport>>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(out, "Math Adventures - adaptive arithmetic practice")?;
        writeln!(out, "Type an answer and press Enter. Type 'q' to finish.")?;
        writeln!(out)?;

        write!(out, "Enter your name: ")?;
        out.flush()?;
        let learner = match read_line(&mut input)? {
            Some(name) if !name.is_empty() => name,
            Some(_) => DEFAULT_LEARNER.to_string(),
            None => return Ok(None),
        };

        write!(
            out,
            "Choose starting difficulty [easy/medium/hard] ({}): ",
            self.config.initial_tier
        )?;
        out.flush()?;
        let initial_tier = match read_line(&mut input)? {
            Some(choice) if !choice.is_empty() => DifficultyTier::parse(&choice),
            Some(_) => self.config.initial_tier,
            None => return Ok(None),
        };

        let generator = PuzzleGenerator::new(self.config.seed);
        let mut session = QuizSession::new(learner, initial_tier, generator);
        writeln!(out, "Session started! Good luck, {}!", session.learner())?;

        self.question_loop(&mut session, &mut input, &mut out)?;

        if session.questions_completed() == 0 {
            writeln!(out, "No questions answered. Bye!")?;
            return Ok(None);
        }

        let report = session.summary_report(self.config.recent_attempts);
        render_summary(&report, &mut out)?;

        if let Some(path) = &self.config.summary_path {
            let json = serde_json::to_string_pretty(&report)?;
            std::fs::write(path, json)?;
            tracing::info!(path = %path.display(), "session report written");
            writeln!(out, "Summary saved to {}", path.display())?;
        }

        Ok(Some(report))
    }

    fn question_loop<R, W>(&self, session: &mut QuizSession, input: &mut R, out: &mut W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        loop {
            if let Some(max) = self.config.max_questions {
                if session.questions_completed() >= max {
                    break;
                }
            }

            writeln!(out)?;
            writeln!(out, "Current level: {}", session.current_tier().as_str().to_uppercase())?;
            writeln!(out, "Question {}", session.questions_completed() + 1)?;
            writeln!(out, "{}", session.current_puzzle().question)?;

            let started = Instant::now();
            let answer = match read_answer(input, out)? {
                Input::Answer(answer) => answer,
                Input::Quit => break,
            };
            let elapsed = started.elapsed().as_secs_f64();

            let feedback = session.submit(answer, elapsed);
            render_feedback(&feedback, out)?;
            writeln!(out, "Skill score: {}/100", feedback.score)?;
        }
        Ok(())
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Re-prompts until an integer, a quit command or EOF arrives.
fn read_answer<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Input> {
    loop {
        write!(out, "Your answer: ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(Input::Quit);
        };
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            return Ok(Input::Quit);
        }
        match line.parse::<i64>() {
            Ok(answer) => return Ok(Input::Answer(answer)),
            Err(_) => writeln!(out, "Please enter a whole number (or 'q' to finish).")?,
        }
    }
}

fn render_feedback<W: Write>(feedback: &Feedback, out: &mut W) -> Result<()> {
    if feedback.was_correct {
        writeln!(out, "Correct! The answer is {}", feedback.correct_answer)?;
    } else {
        writeln!(out, "Not quite. The correct answer is {}", feedback.correct_answer)?;
    }
    writeln!(out, "Time taken: {:.1} seconds", feedback.elapsed_seconds)?;

    match (feedback.change, feedback.next_tier) {
        (TierChange::Unchanged, _) => {}
        (_, DifficultyTier::Hard) => writeln!(out, "Great job! Moving to HARD level!")?,
        (_, DifficultyTier::Easy) => writeln!(out, "Let's practice some easier questions!")?,
        (_, tier) => writeln!(out, "Adjusting to {} level", tier.as_str().to_uppercase())?,
    }
    Ok(())
}

fn render_summary<W: Write>(report: &SessionReport, out: &mut W) -> Result<()> {
    let summary = &report.summary;
    writeln!(out)?;
    writeln!(out, "===== Session Summary =====")?;
    writeln!(out, "Total questions: {}", summary.total_questions)?;
    writeln!(out, "Correct answers: {}", summary.correct)?;
    writeln!(out, "Accuracy: {:.1}%", summary.accuracy)?;
    writeln!(out, "Avg time: {:.1}s", summary.avg_time)?;
    writeln!(out, "Questions by difficulty:")?;
    for tier in DifficultyTier::ALL {
        writeln!(out, "  {:<6} {}", tier.as_str(), summary.tier_counts.get(tier))?;
    }
    writeln!(out, "Final skill score: {}/100", report.final_score)?;
    writeln!(
        out,
        "Recommended level for next session: {}",
        report.recommended_tier.as_str().to_uppercase()
    )?;

    if !report.recent_attempts.is_empty() {
        writeln!(out, "Recent attempts:")?;
        let count = report.recent_attempts.len();
        for (i, attempt) in report.recent_attempts.iter().rev().enumerate() {
            let status = if attempt.is_correct { "ok " } else { "err" };
            writeln!(
                out,
                "  [{status}] Q{}: {} -> your answer: {} | time: {:.1}s | level: {}",
                count - i,
                attempt.question,
                attempt.user_answer,
                attempt.elapsed_seconds,
                attempt.tier
            )?;
        }
    }
    Ok(())
}
