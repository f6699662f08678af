use std::io;
use std::process::ExitCode;

use math_adventures::config::Config;
use math_adventures::logging;
use math_adventures::shell::Shell;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = logging::init_tracing(&config.log_level);
    config.log_fallbacks();

    if let Err(err) = config.validate() {
        tracing::error!(error = %err, "invalid configuration");
        return ExitCode::FAILURE;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    match Shell::new(config).run(stdin.lock(), stdout.lock()) {
        Ok(report) => {
            if let Some(report) = report {
                tracing::info!(
                    learner = %report.learner,
                    questions = report.summary.total_questions,
                    final_score = report.final_score,
                    "session finished"
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "quiz session failed");
            ExitCode::FAILURE
        }
    }
}
