//! Reconciliation Engine
//!
//! # Philosophy: Repair Loudly, Fail on Structure Only
//!
//! The reconciliation lifecycle:
//!
//! 1. **Coverage**: analyze each source table against its canonical entity -
//!    a read-only diagnostic pass, no mutation
//! 2. **Transform**: project each source record onto canonical shape -
//!    renames, enum rewrites, type defaults, identifier coercion
//! 3. **Orchestrate**: fold every table into one canonical document,
//!    accumulate coverage and fixes in deterministic order
//! 4. **Validate**: hand the canonical document to the schema validator
//!    (external to this crate) and fold its verdict into the report
//!
//! Missing or malformed DATA never throws: the transformer degrades to
//! type-appropriate defaults and appends every substitution to an ordered
//! fix log so a human can audit what was repaired. Only structurally invalid
//! input (a non-object record) is an error.
//!
//! # Modules
//!
//! - [`fix`]: the ordered fix log
//! - [`coverage`]: per-table coverage and compatibility analysis
//! - [`transform`]: source record to canonical record projection
//! - [`orchestrate`]: whole-dataset reconciliation
//! - [`report`]: aggregate run report

pub mod coverage;
pub mod fix;
pub mod orchestrate;
pub mod report;
pub mod transform;

pub use coverage::{analyze, CoverageResult};
pub use fix::Fix;
pub use orchestrate::{Reconciler, RunOutcome};
pub use report::Report;
pub use transform::{ReconcileError, Transformer};
