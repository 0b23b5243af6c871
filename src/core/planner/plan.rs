//! Export plan: every job of a sweep, enumerated lazily

use super::{ExportJob, PathPlanner};
use crate::config::sweep::{ExportOptions, SweepConfig};
use crate::core::combination::{Combination, CombinationGenerator};
use crate::domain::errors::SweepError;
use crate::domain::ids::BodyName;
use crate::domain::result::Result;
use indexmap::IndexMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Two or more jobs that would write the same file
#[derive(Debug, Clone)]
pub struct PathCollision {
    pub path: PathBuf,
    /// Human readable job identities, in plan order
    pub jobs: Vec<String>,
}

/// The ordered job list of a validated sweep
///
/// Jobs are ordered by combination (generator order), then by body in
/// `bodiesToExport` order. Nothing is materialized until [`jobs`](Self::jobs)
/// is iterated.
#[derive(Debug, Clone)]
pub struct ExportPlan {
    generator: CombinationGenerator,
    bodies: Vec<BodyName>,
    planner: PathPlanner,
    options: ExportOptions,
    total_jobs: usize,
}

impl ExportPlan {
    /// Validates `config` and prepares its plan
    ///
    /// # Errors
    ///
    /// Returns `SweepError::Configuration` for an invalid configuration and
    /// `SweepError::UnknownTemplateToken` for a bad file name template
    pub fn new(config: &SweepConfig) -> Result<Self> {
        config.validate().map_err(SweepError::Configuration)?;

        let planner = PathPlanner::new(config)?;
        let generator = CombinationGenerator::new(Arc::new(config.parameters_to_iterate.clone()))?;
        let total_jobs = generator
            .total()
            .checked_mul(config.bodies_to_export.len())
            .ok_or_else(|| SweepError::Configuration("Too many jobs to enumerate".to_string()))?;

        Ok(Self {
            generator,
            bodies: config.bodies_to_export.clone(),
            planner,
            options: config.export_options.clone(),
            total_jobs,
        })
    }

    pub fn total_jobs(&self) -> usize {
        self.total_jobs
    }

    pub fn total_combinations(&self) -> usize {
        self.generator.total()
    }

    pub fn bodies(&self) -> &[BodyName] {
        &self.bodies
    }

    pub fn generator(&self) -> &CombinationGenerator {
        &self.generator
    }

    pub fn planner(&self) -> &PathPlanner {
        &self.planner
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Jobs of one combination, in body order
    pub fn jobs_for<'a>(
        &'a self,
        combination: &'a Combination,
    ) -> impl Iterator<Item = ExportJob> + 'a {
        self.bodies
            .iter()
            .map(move |body| self.planner.job(combination, body))
    }

    /// All jobs in execution order
    pub fn jobs(&self) -> impl Iterator<Item = ExportJob> + '_ {
        self.generator.iter().flat_map(move |combination| {
            self.bodies
                .iter()
                .map(|body| self.planner.job(&combination, body))
                .collect::<Vec<_>>()
        })
    }

    /// Output paths claimed by more than one job
    ///
    /// A template that omits a varying parameter maps several combinations
    /// onto the same file; later jobs would overwrite earlier ones.
    pub fn find_collisions(&self) -> Vec<PathCollision> {
        let mut claims: IndexMap<PathBuf, Vec<String>> = IndexMap::new();
        for job in self.jobs() {
            claims
                .entry(job.output_path)
                .or_default()
                .push(format!("{} [{}]", job.body, job.combination));
        }

        claims
            .into_iter()
            .filter(|(_, jobs)| jobs.len() > 1)
            .map(|(path, jobs)| PathCollision { path, jobs })
            .collect()
    }
}
