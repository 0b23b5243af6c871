//! Export orchestration
//!
//! - [`coordinator`] - Runs the planned jobs against a CAD model
//! - [`progress`] - Progress reporting and cooperative cancellation
//! - [`summary`] - Batch state and the final report

pub mod coordinator;
pub mod progress;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use progress::{ProgressReporter, SignalProgress};
pub use summary::{BatchState, ExportSummary, JobFailure};
