//! Domain types for parametric export.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Validated names** ([`ParameterName`], [`BodyName`])
//! - **Parameter values** ([`ParameterValue`]) with a canonical text form
//! - **Error types** ([`SweepError`], [`ModelError`], [`JobErrorKind`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Fatal errors are [`SweepError`]s and stop a batch before any job runs.
//! Errors raised by the CAD model are [`ModelError`]s; the export coordinator
//! records them per job and keeps going.
//!
//! ```rust
//! use parametric_export::domain::{Result, SweepError};
//!
//! fn example() -> Result<()> {
//!     Err(SweepError::Configuration("bodiesToExport must not be empty".to_string()))
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod result;
pub mod value;

// Re-export commonly used types for convenience
pub use errors::{JobErrorKind, ModelError, SweepError};
pub use ids::{BodyName, ParameterName};
pub use result::Result;
pub use value::ParameterValue;
