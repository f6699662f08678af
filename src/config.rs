use std::path::PathBuf;

use crate::error::{QuizError, Result};
use crate::session::DEFAULT_RECENT_ATTEMPTS;
use crate::types::DifficultyTier;

/// A config value that was present but unusable and got replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFallback {
    pub key: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub initial_tier: DifficultyTier,
    pub seed: Option<u64>,
    pub max_questions: Option<usize>,
    pub summary_path: Option<PathBuf>,
    pub recent_attempts: usize,
    /// Collected while loading; logging is not up yet at that point.
    pub fallbacks: Vec<ConfigFallback>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            initial_tier: DifficultyTier::Medium,
            seed: None,
            max_questions: None,
            summary_path: None,
            recent_attempts: DEFAULT_RECENT_ATTEMPTS,
            fallbacks: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut fallbacks = Vec::new();

        let log_level = lookup("RUST_LOG").unwrap_or(defaults.log_level);

        let initial_tier = match lookup("QUIZ_INITIAL_TIER") {
            Some(value) => {
                let tier = DifficultyTier::parse(&value);
                if !value.trim().eq_ignore_ascii_case(tier.as_str()) {
                    fallbacks.push(ConfigFallback {
                        key: "QUIZ_INITIAL_TIER",
                        value,
                    });
                }
                tier
            }
            None => defaults.initial_tier,
        };

        let seed = parse_var(&lookup, "QUIZ_SEED", &mut fallbacks);
        let max_questions = parse_var(&lookup, "QUIZ_MAX_QUESTIONS", &mut fallbacks);
        let recent_attempts = parse_var(&lookup, "QUIZ_RECENT_ATTEMPTS", &mut fallbacks)
            .unwrap_or(defaults.recent_attempts);

        let summary_path = lookup("QUIZ_SUMMARY_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Self {
            log_level,
            initial_tier,
            seed,
            max_questions,
            summary_path,
            recent_attempts,
            fallbacks,
        }
    }

    /// Warn about every value replaced by a default. Call after tracing is initialized.
    pub fn log_fallbacks(&self) {
        for fallback in &self.fallbacks {
            tracing::warn!(
                key = fallback.key,
                value = %fallback.value,
                "ignoring unparseable config value"
            );
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_questions == Some(0) {
            return Err(QuizError::Config(
                "QUIZ_MAX_QUESTIONS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str, fallbacks: &mut Vec<ConfigFallback>) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            fallbacks.push(ConfigFallback { key, value: raw });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.initial_tier, DifficultyTier::Medium);
        assert_eq!(config.seed, None);
        assert_eq!(config.max_questions, None);
        assert_eq!(config.summary_path, None);
        assert_eq!(config.recent_attempts, 10);
        assert!(config.fallbacks.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("RUST_LOG", "debug"),
            ("QUIZ_INITIAL_TIER", "Hard"),
            ("QUIZ_SEED", "42"),
            ("QUIZ_MAX_QUESTIONS", " 5 "),
            ("QUIZ_SUMMARY_PATH", "/tmp/summary.json"),
            ("QUIZ_RECENT_ATTEMPTS", "3"),
        ]);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.initial_tier, DifficultyTier::Hard);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_questions, Some(5));
        assert_eq!(config.summary_path, Some(PathBuf::from("/tmp/summary.json")));
        assert_eq!(config.recent_attempts, 3);
        assert!(config.fallbacks.is_empty());
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_from(&[
            ("QUIZ_SEED", "abc"),
            ("QUIZ_MAX_QUESTIONS", "-1"),
            ("QUIZ_INITIAL_TIER", "impossible"),
            ("QUIZ_SUMMARY_PATH", "  "),
        ]);
        assert_eq!(config.seed, None);
        assert_eq!(config.max_questions, None);
        assert_eq!(config.initial_tier, DifficultyTier::Medium);
        assert_eq!(config.summary_path, None);

        let keys: Vec<&str> = config.fallbacks.iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["QUIZ_INITIAL_TIER", "QUIZ_SEED", "QUIZ_MAX_QUESTIONS"]);
        assert_eq!(
            config.fallbacks[1],
            ConfigFallback {
                key: "QUIZ_SEED",
                value: "abc".to_string(),
            }
        );
    }

    #[test]
    fn test_fallbacks_are_logged_as_warnings() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let config = config_from(&[("QUIZ_SEED", "abc")]);
        tracing::subscriber::with_default(subscriber, || config.log_fallbacks());

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("ignoring unparseable config value"), "{output}");
        assert!(output.contains("QUIZ_SEED"), "{output}");
        assert!(output.contains("abc"), "{output}");
    }

    #[test]
    fn test_zero_questions_rejected() {
        let config = config_from(&[("QUIZ_MAX_QUESTIONS", "0")]);
        assert!(matches!(config.validate(), Err(QuizError::Config(_))));
    }
}
