//! Export coordinator - runs a planned batch against a CAD model
//!
//! Jobs run strictly one after another. For every combination the coordinator
//! polls for cancellation, applies each parameter, recomputes when
//! `forceRecompute` is set and then exports every body. Failures are recorded
//! per job; only a failure to create the output root stops the batch.

use crate::adapters::model::CadModel;
use crate::config::sweep::ExportOptions;
use crate::core::combination::Combination;
use crate::core::export::progress::ProgressReporter;
use crate::core::export::summary::{BatchState, ExportSummary, JobFailure};
use crate::core::planner::{ExportJob, ExportPlan};
use crate::domain::errors::{ModelError, SweepError};
use crate::domain::Result;
use crate::{log_job_failure, log_job_progress};
use std::time::Instant;

/// Export coordinator
pub struct ExportCoordinator {
    plan: ExportPlan,
    dry_run: bool,
    state: BatchState,
}

impl ExportCoordinator {
    /// Create a coordinator for a validated plan
    pub fn new(plan: ExportPlan) -> Self {
        Self {
            plan,
            dry_run: false,
            state: BatchState::Idle,
        }
    }

    /// In dry-run mode no directory is created
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn plan(&self) -> &ExportPlan {
        &self.plan
    }

    /// Current batch state
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Execute the batch
    ///
    /// Progress is reported after every attempted job as
    /// `(jobs_completed, total_jobs)`. Cancellation is honored only between
    /// combinations; jobs already written stay on disk.
    ///
    /// # Errors
    ///
    /// Returns `SweepError::DirectoryCreation` if the output root cannot be
    /// created. The batch is then `Failed` and no job has run.
    pub async fn execute_export(
        &mut self,
        model: &mut dyn CadModel,
        progress: &mut dyn ProgressReporter,
    ) -> Result<ExportSummary> {
        let start_time = Instant::now();

        self.state = BatchState::Planning;
        let total = self.plan.total_jobs();
        let mut summary = ExportSummary::new(total);
        summary.dry_run = self.dry_run;
        summary.collisions = self.plan.find_collisions();

        tracing::info!(
            run_id = %summary.run_id,
            total_jobs = total,
            combinations = self.plan.total_combinations(),
            bodies = self.plan.bodies().len(),
            backend = model.name(),
            dry_run = self.dry_run,
            "Starting export batch"
        );
        for collision in &summary.collisions {
            tracing::warn!(
                path = %collision.path.display(),
                jobs = ?collision.jobs,
                "Several jobs write the same output path; later jobs overwrite earlier ones"
            );
        }

        if !self.dry_run {
            let root = self.plan.planner().output_root();
            if let Err(e) = tokio::fs::create_dir_all(root).await {
                tracing::error!(
                    path = %root.display(),
                    error = %e,
                    "Failed to create output directory"
                );
                self.state = BatchState::Failed;
                return Err(SweepError::DirectoryCreation {
                    path: root.display().to_string(),
                    message: e.to_string(),
                });
            }
        }

        self.state = BatchState::Running;
        let options = self.plan.options().clone();
        let mut completed = 0;

        for combination in self.plan.generator().iter() {
            if progress.is_cancel_requested() {
                summary.skipped_jobs = total - completed;
                tracing::warn!(
                    completed,
                    total,
                    skipped = summary.skipped_jobs,
                    "Cancellation requested, stopping before next combination"
                );
                self.state = BatchState::Cancelled;
                break;
            }

            tracing::debug!(
                index = combination.index(),
                combination = %combination,
                "Applying combination"
            );
            let prepared = apply_combination(model, &combination, options.force_recompute).await;

            for job in self.plan.jobs_for(&combination) {
                let outcome = match &prepared {
                    Ok(()) => run_job(model, &job, &options, self.dry_run).await,
                    Err(e) => Err(e.clone()),
                };
                completed += 1;

                match outcome {
                    Ok(()) => {
                        log_job_progress!(
                            completed,
                            total,
                            job.body,
                            job.combination,
                            job.output_path
                        );
                        summary.add_success(job.output_path);
                    }
                    Err(e) => {
                        log_job_failure!(&e, job.body, job.combination, job.output_path);
                        summary.add_failure(JobFailure::new(&job, &e));
                    }
                }

                progress.report_progress(completed, total);
            }
        }

        if self.state == BatchState::Running {
            self.state = BatchState::Completed;
        }
        summary.state = self.state;

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}

/// Applies every parameter of `combination`, then recomputes if requested
///
/// The first rejected parameter stops the sequence; the model is then left
/// with a partial assignment, which the next combination overwrites.
async fn apply_combination(
    model: &mut dyn CadModel,
    combination: &Combination,
    force_recompute: bool,
) -> std::result::Result<(), ModelError> {
    for (spec, value) in combination.assignments() {
        model.set_parameter(&spec.name, value).await?;
    }
    if force_recompute {
        model.recompute().await?;
    }
    Ok(())
}

async fn run_job(
    model: &mut dyn CadModel,
    job: &ExportJob,
    options: &ExportOptions,
    dry_run: bool,
) -> std::result::Result<(), ModelError> {
    if !dry_run {
        if let Some(dir) = job.output_dir() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| ModelError::ExportFailed {
                    body: job.body.to_string(),
                    reason: format!("Failed to create directory {}: {}", dir.display(), e),
                })?;
        }
    }

    model
        .export_body(
            &job.body,
            &job.output_path,
            options.file_type,
            options.stl_quality,
        )
        .await
}
