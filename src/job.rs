//! Asynchronous generation jobs and their status store.
//!
//! Each job gets a UUID and a status record that a caller can poll while the
//! worker task runs the pipeline. Unknown ids resolve to a `not_found`
//! pseudo-status rather than an error, and terminal phases (completed /
//! error) absorb any late updates from a worker that lost a race.

use chrono::{DateTime, Utc};
use obs_datagen::DataKind;
use obs_elastic_sink::IngestSink;
use obs_kibana_sink::DashboardSink;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use uuid::Uuid;

use crate::pipeline;

/// Lifecycle phase of a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobPhase {
    Queued,
    Running,
    Completed,
    Error,
    NotFound,
}

impl JobPhase {
    /// Completed and error jobs never change phase again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobPhase::Completed | JobPhase::Error)
    }
}

/// Pollable snapshot of a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatus {
    pub phase: JobPhase,
    pub message: String,
    pub progress: u8,
    pub updated_at: DateTime<Utc>,
}

impl JobStatus {
    fn new(phase: JobPhase, message: impl Into<String>, progress: u8) -> Self {
        Self {
            phase,
            message: message.into(),
            progress,
            updated_at: Utc::now(),
        }
    }

    fn not_found() -> Self {
        Self::new(JobPhase::NotFound, "Unknown job id", 0)
    }
}

/// Shared map of job statuses. Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct StatusStore {
    inner: Arc<Mutex<HashMap<Uuid, JobStatus>>>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new status for a job. Updates against a terminal phase are
    /// dropped so a straggling worker cannot resurrect a finished job.
    pub fn update(&self, id: Uuid, phase: JobPhase, message: impl Into<String>, progress: u8) {
        let mut map = self.lock();
        if let Some(existing) = map.get(&id) {
            if existing.phase.is_terminal() {
                return;
            }
        }
        map.insert(id, JobStatus::new(phase, message, progress));
    }

    /// Mark a job failed, keeping whatever progress it had reached.
    pub fn fail(&self, id: Uuid, message: impl Into<String>) {
        let mut map = self.lock();
        let progress = match map.get(&id) {
            Some(existing) if existing.phase.is_terminal() => return,
            Some(existing) => existing.progress,
            None => 0,
        };
        map.insert(id, JobStatus::new(JobPhase::Error, message, progress));
    }

    /// Current status of a job; unknown ids get a `not_found` pseudo-status.
    pub fn poll(&self, id: Uuid) -> JobStatus {
        self.lock()
            .get(&id)
            .cloned()
            .unwrap_or_else(JobStatus::not_found)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, JobStatus>> {
        // A worker that panicked mid-update leaves a usable map behind.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Per-job knobs supplied by the caller.
#[derive(Debug, Clone)]
pub struct JobOptions {
    pub write_csv: bool,
    pub ingest: bool,
    pub create_dashboards: bool,
    pub output_dir: PathBuf,
    pub seed: Option<u64>,
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            write_csv: false,
            ingest: true,
            create_dashboards: true,
            output_dir: PathBuf::from("."),
            seed: None,
        }
    }
}

/// Rejections raised before a job id is allocated.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("requested {requested} entries but the configured maximum is {max}")]
    CountExceedsMax { requested: usize, max: usize },
}

/// Spawns generation jobs and tracks them in a [`StatusStore`].
pub struct JobRunner<I, D> {
    store: StatusStore,
    ingest: Arc<I>,
    dashboards: Arc<D>,
    max_entries: usize,
}

impl<I, D> JobRunner<I, D>
where
    I: IngestSink + 'static,
    D: DashboardSink + 'static,
{
    pub fn new(store: StatusStore, ingest: Arc<I>, dashboards: Arc<D>, max_entries: usize) -> Self {
        Self {
            store,
            ingest,
            dashboards,
            max_entries,
        }
    }

    pub fn store(&self) -> &StatusStore {
        &self.store
    }

    /// Validate the request, allocate a job id, and spawn the worker task.
    ///
    /// Validation happens before any id exists, so a rejected request leaves
    /// no trace in the status store.
    pub fn start_job(
        &self,
        kind: DataKind,
        count: usize,
        options: JobOptions,
    ) -> Result<Uuid, ValidationError> {
        if count > self.max_entries {
            return Err(ValidationError::CountExceedsMax {
                requested: count,
                max: self.max_entries,
            });
        }

        let id = Uuid::new_v4();
        self.store
            .update(id, JobPhase::Queued, "Job queued", 0);

        let store = self.store.clone();
        let ingest = Arc::clone(&self.ingest);
        let dashboards = Arc::clone(&self.dashboards);
        tokio::spawn(async move {
            let result = pipeline::run_pipeline(
                &store,
                id,
                kind,
                count,
                &options,
                ingest.as_ref(),
                dashboards.as_ref(),
            )
            .await;
            if let Err(e) = result {
                tracing::error!(job_id = %id, error = %e, "generation job failed");
                store.fail(id, format!("Job failed: {e}"));
            }
        });

        Ok(id)
    }
}
