//! Activities export jobs
//!
//! Start → poll → download against `/pull/v1/export/activities/jobs`. The
//! client keeps no job record; every call is a pass-through to the remote
//! job identified by its id.

use std::path::Path;
use std::time::Duration;

use peopleai_domain::constants::EXPORT_ACTIVITIES_PATH;
use peopleai_domain::{ExportParams, JobId, JobState};
use reqwest::Method;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::client::ApiClient;
use super::errors::ApiError;

fn job_path(job_id: &JobId) -> String {
    format!("{}/{}", EXPORT_ACTIVITIES_PATH, job_id)
}

fn job_data_path(job_id: &JobId) -> String {
    format!("{}/{}/data", EXPORT_ACTIVITIES_PATH, job_id)
}

impl ApiClient {
    /// Start an export job for activities
    ///
    /// # Returns
    ///
    /// The job id issued by the service
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MalformedResponse`] if the response has no
    /// `job_id`, or any request error
    #[instrument(skip(self, params))]
    pub async fn start_activities_export(&self, params: &ExportParams) -> Result<JobId, ApiError> {
        let response = self.post(EXPORT_ACTIVITIES_PATH, Some(params)).await?;

        let job_id = response.field("job_id").and_then(JobId::from_json).ok_or_else(|| {
            ApiError::MalformedResponse { field: "job_id", context: "export start response".into() }
        })?;

        info!(job_id = %job_id, "Started activities export");
        Ok(job_id)
    }

    /// Check the status of an export
    ///
    /// With `until_completed == false` the first observed state is returned
    /// whatever it is. Otherwise polls every `delay` until the job completes;
    /// see [`ApiClient::wait_for_activities_export`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::JobIncomplete`] if the job becomes Canceled or
    /// Failed while waiting, or any request error
    pub async fn check_activities_export(
        &self,
        job_id: &JobId,
        until_completed: bool,
        delay: Duration,
    ) -> Result<JobState, ApiError> {
        if until_completed {
            self.wait_for_activities_export(job_id, delay, &CancellationToken::new()).await
        } else {
            self.fetch_export_state(job_id).await
        }
    }

    /// Poll an export until it reaches a terminal state
    ///
    /// Sleeps `delay` between polls. There is no attempt limit; `cancel`
    /// is the only way out besides a terminal state or an error.
    ///
    /// # Errors
    ///
    /// - [`ApiError::JobIncomplete`] when the job is Canceled or Failed
    /// - [`ApiError::Cancelled`] when `cancel` fires
    /// - any request error, without retry
    #[instrument(skip(self, cancel), fields(job_id = %job_id))]
    pub async fn wait_for_activities_export(
        &self,
        job_id: &JobId,
        delay: Duration,
        cancel: &CancellationToken,
    ) -> Result<JobState, ApiError> {
        loop {
            let state = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(ApiError::Cancelled),
                state = self.fetch_export_state(job_id) => state?,
            };

            if state.is_unsuccessful() {
                warn!(state = %state, "Activities export did not complete");
                return Err(ApiError::JobIncomplete { state });
            }

            if state.is_terminal() {
                info!("Activities export completed");
                return Ok(state);
            }

            debug!(state = %state, delay_ms = delay.as_millis() as u64, "Export still in progress");

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(ApiError::Cancelled),
                () = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// Download the export and save it to `dest`
    ///
    /// The body bytes are written verbatim, replacing any existing file.
    ///
    /// # Returns
    ///
    /// Number of bytes written
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] if the file cannot be written, or any
    /// request error
    #[instrument(skip(self, dest), fields(job_id = %job_id, dest = %dest.as_ref().display()))]
    pub async fn download_activities_export(
        &self,
        job_id: &JobId,
        dest: impl AsRef<Path>,
    ) -> Result<u64, ApiError> {
        let dest = dest.as_ref();
        let data = self.request_bytes::<Value>(Method::GET, &job_data_path(job_id), None).await?;

        tokio::fs::write(dest, &data)
            .await
            .map_err(|source| ApiError::Io { path: dest.display().to_string(), source })?;

        let bytes = data.len() as u64;
        info!(dest = %dest.display(), bytes, "Saved to {}", dest.display());
        Ok(bytes)
    }

    /// Start an export, wait for it and download the result
    ///
    /// # Errors
    ///
    /// Any error of the three steps; nothing is retried
    pub async fn export_activities(
        &self,
        params: &ExportParams,
        dest: impl AsRef<Path>,
        delay: Duration,
        cancel: &CancellationToken,
    ) -> Result<JobId, ApiError> {
        let job_id = self.start_activities_export(params).await?;
        self.wait_for_activities_export(&job_id, delay, cancel).await?;
        self.download_activities_export(&job_id, dest).await?;
        Ok(job_id)
    }

    async fn fetch_export_state(&self, job_id: &JobId) -> Result<JobState, ApiError> {
        let response = self.get::<Value>(&job_path(job_id), None).await?;

        response
            .field("state")
            .and_then(Value::as_str)
            .map(JobState::from)
            .ok_or_else(|| ApiError::MalformedResponse {
                field: "state",
                context: format!("status of job {}", job_id),
            })
    }
}
