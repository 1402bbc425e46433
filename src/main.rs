mod cli;
mod config;
mod engine;
mod error;
mod quizzes;
mod report;
mod session;
mod store;
mod types;

use crate::error::{CompassError, Result};
use crate::types::report::Tier;
use clap::Parser;

pub mod exit_code {
    pub const READY: i32 = 0;
    pub const PARTIAL: i32 = 1;
    pub const AT_RISK: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn tier_exit_code(tier: Tier) -> i32 {
    match tier {
        Tier::Ready => exit_code::READY,
        Tier::Partial => exit_code::PARTIAL,
        Tier::AtRisk => exit_code::AT_RISK,
    }
}

/// Parse a `ID=VALUE` rating argument.
fn parse_rating(arg: &str) -> Result<(u32, u8)> {
    let (id, value) = arg
        .split_once('=')
        .ok_or_else(|| CompassError::InvalidRatingArg(arg.to_string()))?;
    let id: u32 = id
        .trim()
        .parse()
        .map_err(|_| CompassError::InvalidRatingArg(arg.to_string()))?;
    let value: i64 = value
        .trim()
        .parse()
        .map_err(|_| CompassError::InvalidRatingArg(arg.to_string()))?;
    if !(0..=i64::from(types::quiz::RATING_MAX)).contains(&value) {
        return Err(CompassError::RatingOutOfRange(value));
    }
    Ok((id, value as u8))
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let quizzes = config::load_all(cli.quiz_dir.as_deref())?;
    let state = store::StateStore::open(cli.state_dir.as_deref())?;

    match cli.command {
        cli::Commands::List => {
            for quiz in &quizzes {
                let saved = if quiz.def.persist && state.has_state(&quiz.def.id) {
                    " [saved answers]"
                } else {
                    ""
                };
                println!(
                    "{:<24} {} ({} questions){}",
                    quiz.def.id,
                    quiz.def.title,
                    quiz.def.questions.len(),
                    saved
                );
            }
            Ok(exit_code::READY)
        }
        cli::Commands::Show(cmd) => {
            let quiz = config::find(&quizzes, &cmd.quiz)?;
            let session = session::QuizSession::load(quiz, &state);

            println!("# {}\n", quiz.def.title);
            if let Some(intro) = &quiz.def.intro {
                println!("{intro}\n");
            }
            for category in &quiz.def.categories {
                println!("## {}", category.name);
                for question in quiz.def.questions_in(&category.name) {
                    println!(
                        "  {:>3}. [{:>2}/10] {}",
                        question.id,
                        session.value(question.id),
                        question.text
                    );
                }
                println!();
            }
            Ok(exit_code::READY)
        }
        cli::Commands::Rate(cmd) => {
            let quiz = config::find(&quizzes, &cmd.quiz)?;
            let mut session = session::QuizSession::load(quiz, &state);
            for arg in &cmd.ratings {
                let (id, value) = parse_rating(arg)?;
                session.rate(id, value)?;
                println!("{}: question {id} = {value}/10", quiz.def.id);
            }
            if !quiz.def.persist {
                eprintln!(
                    "note: '{}' does not save answers; pass them to `score --set` instead",
                    quiz.def.id
                );
            }
            Ok(exit_code::READY)
        }
        cli::Commands::Score(cmd) => {
            let quiz = config::find(&quizzes, &cmd.quiz)?;
            let mut session = session::QuizSession::load(quiz, &state);

            // One-off answers apply to this run only and are never saved.
            let mut answers = session.answers().clone();
            for arg in &cmd.set {
                let (id, value) = parse_rating(arg)?;
                if quiz.def.question(id).is_none() {
                    return Err(CompassError::UnknownQuestion {
                        quiz: quiz.def.id.clone(),
                        id,
                    });
                }
                answers.insert(id, value);
            }

            let report = engine::assess(&quiz.def, &answers);
            let format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            println!("{}", report::render(&report, format)?);
            session.finish()?;

            Ok(tier_exit_code(report.tier))
        }
        cli::Commands::Reset(cmd) => {
            let quiz = config::find(&quizzes, &cmd.quiz)?;
            let mut session = session::QuizSession::load(quiz, &state);
            session.reset()?;
            println!("{}: answers reset to defaults", quiz.def.id);
            Ok(exit_code::READY)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
