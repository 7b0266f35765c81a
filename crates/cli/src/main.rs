//! `peopleai-export`: command-line front end for the activities export API
//!
//! ```bash
//! export PEOPLEAI_API_KEY=... PEOPLEAI_API_SECRET=...
//! peopleai-export run export.jsonl --start-date 2020-08-06 --end-date 2020-08-06 \
//!     --activity-type all --output-format JSONLines --export-type delta
//! ```

mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use peopleai_infra::{ApiError, ApiErrorCategory};

use cli::CliArgs;

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional; real environment variables take precedence
    let dotenv = dotenvy::dotenv();

    let args = CliArgs::parse();
    logging::init(args.verbose, args.json_logs);

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    match commands::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "peopleai-export failed");
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(ApiError::Timeout(_)) = err.downcast_ref::<ApiError>() {
        return 124;
    }

    match err.downcast_ref::<ApiError>().map(ApiError::category) {
        Some(ApiErrorCategory::Job) => 3,
        Some(ApiErrorCategory::Cancelled) => 130,
        Some(ApiErrorCategory::Authentication) => 4,
        _ => 1,
    }
}
