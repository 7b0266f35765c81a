//! Command-line arguments

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use peopleai_domain::{ActivityType, ExportParams, ExportType, OutputFormat};

/// Export activities from the People.ai REST API
#[derive(Parser, Debug)]
#[command(name = "peopleai-export", version, about)]
pub struct CliArgs {
    /// Configuration file (JSON or TOML); environment is used when omitted
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Override the API endpoint
    #[arg(long, value_name = "URL", env = "PEOPLEAI_API_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an export job and print its id
    Start(ExportArgs),

    /// Print the state of an export job
    Status {
        job_id: String,

        /// Keep polling until the job completes
        #[arg(long)]
        wait: bool,

        #[command(flatten)]
        poll: PollArgs,
    },

    /// Download the output of a completed job
    Download { job_id: String, dest: PathBuf },

    /// Start an export, wait for it and download the result
    Run {
        dest: PathBuf,

        #[command(flatten)]
        export: ExportArgs,

        #[command(flatten)]
        poll: PollArgs,
    },
}

/// Export filters
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// First day of activities (yyyy-MM-dd)
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<NaiveDate>,

    /// Last day of activities (yyyy-MM-dd)
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<NaiveDate>,

    /// email, meeting, call or all
    #[arg(long, value_name = "TYPE")]
    pub activity_type: Option<ActivityType>,

    /// JSON or JSONLines
    #[arg(long, value_name = "FORMAT")]
    pub output_format: Option<OutputFormat>,

    /// snapshot or delta
    #[arg(long, value_name = "TYPE")]
    pub export_type: Option<ExportType>,
}

impl ExportArgs {
    pub fn to_params(&self) -> ExportParams {
        ExportParams {
            start_date: self.start_date,
            end_date: self.end_date,
            activity_type: self.activity_type,
            output_format: self.output_format,
            export_type: self.export_type,
            ..ExportParams::default()
        }
    }
}

/// Polling behaviour
#[derive(Args, Debug, Clone, Default)]
pub struct PollArgs {
    /// Seconds between status checks (defaults to the configured interval)
    #[arg(long, value_name = "SECONDS")]
    pub delay: Option<u64>,

    /// Give up waiting after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}
