//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::core::planner::{ExportJob, PathCollision};
use crate::domain::errors::{JobErrorKind, ModelError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Lifecycle of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BatchState {
    Idle,
    /// Job count and paths are being computed
    Planning,
    Running,
    /// Every job was attempted; some may have failed
    Completed,
    /// Stopped at a combination boundary on request
    Cancelled,
    /// The output root could not be created; no job ran
    Failed,
}

impl BatchState {
    /// True for `Completed`, `Cancelled` and `Failed`
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BatchState::Completed | BatchState::Cancelled | BatchState::Failed
        )
    }
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchState::Idle => "Idle",
            BatchState::Planning => "Planning",
            BatchState::Running => "Running",
            BatchState::Completed => "Completed",
            BatchState::Cancelled => "Cancelled",
            BatchState::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// A job that did not produce its file
#[derive(Debug, Clone, Serialize)]
pub struct JobFailure {
    /// Type of failure
    pub kind: JobErrorKind,

    /// Failure reason
    pub message: String,

    /// Parameter assignment, e.g. `COLUMNS=2, ROWS=1`
    pub combination: String,

    pub body: String,

    pub path: PathBuf,
}

impl JobFailure {
    /// Create a failure record for `job`
    pub fn new(job: &ExportJob, error: &ModelError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
            combination: job.combination.to_string(),
            body: job.body.to_string(),
            path: job.output_path.clone(),
        }
    }
}

impl fmt::Display for JobFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] -> {}: {}",
            self.body,
            self.combination,
            self.path.display(),
            self.message
        )
    }
}

/// Summary of an export batch
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Identifies this batch in logs
    pub run_id: Uuid,

    pub started_at: DateTime<Utc>,

    /// Duration of the batch
    pub duration: Duration,

    /// Final batch state
    pub state: BatchState,

    /// Planned jobs (combinations × bodies)
    pub total_jobs: usize,

    /// Number of successful exports
    pub successful_jobs: usize,

    /// Number of failed exports
    pub failed_jobs: usize,

    /// Jobs never attempted because the batch was cancelled
    pub skipped_jobs: usize,

    /// Whether the batch ran without touching the filesystem
    pub dry_run: bool,

    /// Files written (or that would be written in dry-run mode), in order
    pub produced_files: Vec<PathBuf>,

    /// Failed jobs, in order
    pub failures: Vec<JobFailure>,

    /// Output paths claimed by more than one job
    #[serde(skip)]
    pub collisions: Vec<PathCollision>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(total_jobs: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            duration: Duration::from_secs(0),
            state: BatchState::Idle,
            total_jobs,
            successful_jobs: 0,
            failed_jobs: 0,
            skipped_jobs: 0,
            dry_run: false,
            produced_files: Vec::new(),
            failures: Vec::new(),
            collisions: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a produced file
    pub fn add_success(&mut self, path: PathBuf) {
        self.successful_jobs += 1;
        self.produced_files.push(path);
    }

    /// Record a failed job
    pub fn add_failure(&mut self, failure: JobFailure) {
        self.failed_jobs += 1;
        self.failures.push(failure);
    }

    /// Jobs attempted so far, successful or not
    pub fn processed_jobs(&self) -> usize {
        self.successful_jobs + self.failed_jobs
    }

    /// Check if the batch completed without failures
    pub fn is_successful(&self) -> bool {
        self.state == BatchState::Completed && self.failed_jobs == 0
    }

    /// Get success rate as a percentage of attempted jobs
    pub fn success_rate(&self) -> f64 {
        let processed = self.processed_jobs();
        if processed == 0 {
            return 100.0;
        }
        (self.successful_jobs as f64 / processed as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            state = %self.state,
            total_jobs = self.total_jobs,
            successful = self.successful_jobs,
            failed = self.failed_jobs,
            skipped = self.skipped_jobs,
            dry_run = self.dry_run,
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export batch finished"
        );

        for collision in &self.collisions {
            tracing::warn!(
                path = %collision.path.display(),
                jobs = collision.jobs.len(),
                "Output path written by more than one job"
            );
        }

        if !self.failures.is_empty() {
            tracing::warn!(
                failure_count = self.failures.len(),
                "Export completed with failures"
            );
            for failure in &self.failures {
                tracing::warn!(
                    kind = %failure.kind,
                    body = %failure.body,
                    combination = %failure.combination,
                    path = %failure.path.display(),
                    message = %failure.message,
                    "Job failed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(kind: JobErrorKind) -> JobFailure {
        JobFailure {
            kind,
            message: "boom".to_string(),
            combination: "Size=2".to_string(),
            body: "Handle".to_string(),
            path: PathBuf::from("output/Size2/Handle-Size2.stl"),
        }
    }

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new(12);

        assert_eq!(summary.total_jobs, 12);
        assert_eq!(summary.successful_jobs, 0);
        assert_eq!(summary.failed_jobs, 0);
        assert_eq!(summary.skipped_jobs, 0);
        assert_eq!(summary.state, BatchState::Idle);
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(summary.failures.is_empty());
        assert!(summary.produced_files.is_empty());
    }

    #[test]
    fn test_run_ids_are_unique() {
        assert_ne!(ExportSummary::new(1).run_id, ExportSummary::new(1).run_id);
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new(1).with_duration(Duration::from_secs(120));

        assert_eq!(summary.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_export_summary_is_successful() {
        let mut summary = ExportSummary::new(2);
        summary.add_success(PathBuf::from("a.stl"));
        summary.add_success(PathBuf::from("b.stl"));
        assert!(!summary.is_successful());

        summary.state = BatchState::Completed;
        assert!(summary.is_successful());

        summary.add_failure(failure(JobErrorKind::ExportFailed));
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_export_summary_success_rate() {
        let mut summary = ExportSummary::new(4);
        assert_eq!(summary.success_rate(), 100.0);

        for _ in 0..3 {
            summary.add_success(PathBuf::from("a.stl"));
        }
        summary.add_failure(failure(JobErrorKind::RecomputeFailed));

        assert_eq!(summary.processed_jobs(), 4);
        assert_eq!(summary.success_rate(), 75.0);
    }

    #[test]
    fn test_job_failure_display() {
        let text = failure(JobErrorKind::ParameterRejected).to_string();
        assert!(text.starts_with("Handle [Size=2]"));
        assert!(text.ends_with(": boom"));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!BatchState::Idle.is_terminal());
        assert!(!BatchState::Running.is_terminal());
        assert!(BatchState::Completed.is_terminal());
        assert!(BatchState::Cancelled.is_terminal());
        assert!(BatchState::Failed.is_terminal());
    }
}
