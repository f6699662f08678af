//! Puzzle Generator
//!
//! Randomized arithmetic questions per difficulty tier. Every puzzle carries
//! an exact integer answer; division is built from `answer * divisor` so it
//! never needs rounding.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::types::{DifficultyTier, Puzzle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

const EASY_OPERATIONS: [Operation; 2] = [Operation::Add, Operation::Subtract];
const MEDIUM_OPERATIONS: [Operation; 3] = [Operation::Add, Operation::Subtract, Operation::Multiply];
const HARD_OPERATIONS: [Operation; 4] = [
    Operation::Add,
    Operation::Subtract,
    Operation::Multiply,
    Operation::Divide,
];

/// Seedable question generator.
#[derive(Debug, Clone)]
pub struct PuzzleGenerator {
    rng: ChaCha8Rng,
}

impl PuzzleGenerator {
    /// Seeded from OS entropy when `seed` is `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    pub fn generate(&mut self, tier: DifficultyTier) -> Puzzle {
        let (question, answer) = match tier {
            DifficultyTier::Easy => self.easy(),
            DifficultyTier::Medium => self.medium(),
            DifficultyTier::Hard => self.hard(),
        };
        tracing::trace!(tier = %tier, %question, "puzzle generated");
        Puzzle {
            question,
            answer,
            tier,
        }
    }

    fn pick(&mut self, operations: &[Operation]) -> Operation {
        // Operation tables are non-empty constants.
        *operations.choose(&mut self.rng).unwrap_or(&Operation::Add)
    }

    fn easy(&mut self) -> (String, i64) {
        let a = self.rng.gen_range(1..=10);
        let b = self.rng.gen_range(1..=10);
        match self.pick(&EASY_OPERATIONS) {
            Operation::Subtract => non_negative_difference(a, b),
            _ => sum(a, b),
        }
    }

    fn medium(&mut self) -> (String, i64) {
        let a = self.rng.gen_range(1..=20);
        let b = self.rng.gen_range(1..=20);
        match self.pick(&MEDIUM_OPERATIONS) {
            Operation::Add => sum(a, b),
            Operation::Subtract => non_negative_difference(a, b),
            _ => {
                let a = self.rng.gen_range(1..=10);
                let b = self.rng.gen_range(1..=10);
                (format!("{a} * {b} = ?"), a * b)
            }
        }
    }

    fn hard(&mut self) -> (String, i64) {
        match self.pick(&HARD_OPERATIONS) {
            Operation::Add => {
                let a = self.rng.gen_range(10..=50);
                let b = self.rng.gen_range(10..=50);
                sum(a, b)
            }
            Operation::Subtract => {
                let a = self.rng.gen_range(20..=50);
                let b = self.rng.gen_range(1..=20);
                (format!("{a} - {b} = ?"), a - b)
            }
            Operation::Multiply => {
                let a = self.rng.gen_range(5..=15);
                let b = self.rng.gen_range(5..=15);
                (format!("{a} × {b} = ?"), a * b)
            }
            Operation::Divide => {
                let answer = self.rng.gen_range(2..=10);
                let divisor = self.rng.gen_range(2..=10);
                let dividend = answer * divisor;
                (format!("{dividend} ÷ {divisor} = ?"), answer)
            }
        }
    }
}

impl Default for PuzzleGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}

fn sum(a: i64, b: i64) -> (String, i64) {
    (format!("{a} + {b} = ?"), a + b)
}

fn non_negative_difference(a: i64, b: i64) -> (String, i64) {
    let (hi, lo) = if a < b { (b, a) } else { (a, b) };
    (format!("{hi} - {lo} = ?"), hi - lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parses "a op b = ?" back into its operands.
    fn operands(question: &str) -> (i64, &str, i64) {
        let parts: Vec<&str> = question.split_whitespace().collect();
        assert_eq!(parts.len(), 5, "unexpected question shape: {question}");
        assert_eq!(parts[3], "=");
        assert_eq!(parts[4], "?");
        (parts[0].parse().unwrap(), parts[1], parts[2].parse().unwrap())
    }

    fn evaluate(question: &str) -> i64 {
        let (a, op, b) = operands(question);
        match op {
            "+" => a + b,
            "-" => a - b,
            "*" | "×" => a * b,
            "÷" => {
                assert_eq!(a % b, 0, "division not exact: {question}");
                a / b
            }
            other => panic!("unknown operator {other}"),
        }
    }

    #[test]
    fn test_answers_match_questions() {
        let mut generator = PuzzleGenerator::with_seed(42);
        for tier in DifficultyTier::ALL {
            for _ in 0..500 {
                let puzzle = generator.generate(tier);
                assert_eq!(puzzle.tier, tier);
                assert_eq!(evaluate(&puzzle.question), puzzle.answer, "{}", puzzle.question);
            }
        }
    }

    #[test]
    fn test_easy_ranges() {
        let mut generator = PuzzleGenerator::with_seed(7);
        for _ in 0..500 {
            let puzzle = generator.generate(DifficultyTier::Easy);
            let (a, op, b) = operands(&puzzle.question);
            assert!(op == "+" || op == "-");
            assert!((1..=10).contains(&a) && (1..=10).contains(&b));
            assert!(puzzle.answer >= 0);
        }
    }

    #[test]
    fn test_medium_ranges() {
        let mut generator = PuzzleGenerator::with_seed(7);
        for _ in 0..500 {
            let puzzle = generator.generate(DifficultyTier::Medium);
            let (a, op, b) = operands(&puzzle.question);
            match op {
                "*" => assert!((1..=10).contains(&a) && (1..=10).contains(&b)),
                "+" | "-" => assert!((1..=20).contains(&a) && (1..=20).contains(&b)),
                other => panic!("unexpected medium operator {other}"),
            }
            assert!(puzzle.answer >= 0);
        }
    }

    #[test]
    fn test_hard_division_is_exact() {
        let mut generator = PuzzleGenerator::with_seed(99);
        let mut divisions = 0;
        for _ in 0..1000 {
            let puzzle = generator.generate(DifficultyTier::Hard);
            let (a, op, b) = operands(&puzzle.question);
            match op {
                "÷" => {
                    divisions += 1;
                    assert!((2..=10).contains(&b));
                    assert!((2..=10).contains(&puzzle.answer));
                    assert_eq!(a, puzzle.answer * b);
                }
                "×" => assert!((5..=15).contains(&a) && (5..=15).contains(&b)),
                "-" => assert!((20..=50).contains(&a) && (1..=20).contains(&b)),
                "+" => assert!((10..=50).contains(&a) && (10..=50).contains(&b)),
                other => panic!("unexpected hard operator {other}"),
            }
        }
        assert!(divisions > 0, "no division drawn in 1000 hard puzzles");
    }

    #[test]
    fn test_seed_reproducibility() {
        let mut first = PuzzleGenerator::with_seed(123);
        let mut second = PuzzleGenerator::with_seed(123);
        for tier in DifficultyTier::ALL.iter().cycle().take(30) {
            assert_eq!(first.generate(*tier), second.generate(*tier));
        }
    }
}
