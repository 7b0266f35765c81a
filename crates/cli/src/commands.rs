//! Subcommand handlers

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use peopleai_domain::{ClientConfig, JobId};
use peopleai_infra::{config, ApiClient, ApiError};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::{CliArgs, Command, PollArgs};

/// Resolve configuration: explicit file, else environment with file fallback.
pub fn load_config(args: &CliArgs) -> Result<ClientConfig> {
    let mut config = match &args.config_file {
        Some(path) => config::load_from_file(Some(path.clone()))
            .with_context(|| format!("loading {}", path.display()))?,
        None => config::load().context("no usable configuration in environment or files")?,
    };

    if let Some(endpoint) = &args.endpoint {
        config.credentials.api_endpoint = endpoint.clone();
    }

    Ok(config)
}

pub async fn run(args: CliArgs) -> Result<()> {
    let config = load_config(&args)?;
    let client = ApiClient::new(config)?;

    match args.command {
        Command::Start(export) => {
            let job_id = client.start_activities_export(&export.to_params()).await?;
            println!("{job_id}");
        }
        Command::Status { job_id, wait, poll } => {
            let job_id = JobId::new(job_id);
            let state = if wait {
                let cancel = cancel_on_interrupt();
                let polling =
                    client.wait_for_activities_export(&job_id, delay(&client, &poll), &cancel);
                with_deadline(poll.timeout, polling).await?
            } else {
                client.check_activities_export(&job_id, false, Duration::ZERO).await?
            };
            println!("{state}");
        }
        Command::Download { job_id, dest } => {
            download(&client, &JobId::new(job_id), &dest).await?;
        }
        Command::Run { dest, export, poll } => {
            let cancel = cancel_on_interrupt();
            let params = export.to_params();
            let lifecycle = client.export_activities(&params, &dest, delay(&client, &poll), &cancel);
            let job_id = with_deadline(poll.timeout, lifecycle).await?;
            info!(job_id = %job_id, dest = %dest.display(), "Export finished");
            println!("{job_id}");
        }
    }

    Ok(())
}

async fn download(client: &ApiClient, job_id: &JobId, dest: &Path) -> Result<()> {
    let bytes = client.download_activities_export(job_id, dest).await?;
    println!("Saved {bytes} bytes to {}", dest.display());
    Ok(())
}

fn delay(client: &ApiClient, poll: &PollArgs) -> Duration {
    poll.delay.map_or_else(|| client.poll_interval(), Duration::from_secs)
}

/// Token cancelled on Ctrl-C.
fn cancel_on_interrupt() -> CancellationToken {
    let cancel = CancellationToken::new();

    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling wait");
            on_signal.cancel();
        }
    });

    cancel
}

/// Run `operation`, giving up with [`ApiError::Timeout`] after `timeout_secs`.
async fn with_deadline<T, F>(timeout_secs: Option<u64>, operation: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let Some(secs) = timeout_secs else {
        return operation.await;
    };

    let limit = Duration::from_secs(secs);
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout_secs = secs, "Timed out waiting for export");
            Err(ApiError::Timeout(limit))
        }
    }
}
