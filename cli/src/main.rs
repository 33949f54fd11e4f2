//! `quizlog` — replay a quiz-game event log and print its analytical
//! reports.
//!
//! Usage: `quizlog <log-file>`
//!
//! The log is replayed once, front to back, through five projections.
//! Each projection's report is written to stdout in registration order,
//! followed by a blank line. Diagnostics go to stderr (`RUST_LOG` controls
//! verbosity, default `warn`). Any configuration, schema or ordering
//! violation aborts the run with a non-zero exit and no partial report.

use anyhow::Result;
use quizlog_core::ReplayEngine;
use quizlog_projections::{
    BotPlayerDetector, EventCounter, MonthlyRegistrationHistogram, QuizPopularityRanking,
    RegistrationCounter,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod source;

fn log_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args_os().skip(1);
    let path = args.next()?;
    if args.next().is_some() {
        // Exactly one positional argument.
        return None;
    }
    Some(PathBuf::from(path))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = log_path_from_args() else {
        eprintln!("usage: quizlog <log-file>");
        std::process::exit(2);
    };

    let mut engine = ReplayEngine::new();
    engine.register(EventCounter::new());
    engine.register(RegistrationCounter::new());
    engine.register(MonthlyRegistrationHistogram::new());
    engine.register(QuizPopularityRanking::new());
    engine.register(BotPlayerDetector::new());

    engine.run(source::open_log(path)).await?;

    for (_name, report) in engine.reports() {
        println!("{report}");
        println!();
    }
    Ok(())
}
