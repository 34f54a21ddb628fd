//! Platform-agnostic compatibility logic: signal collection, the criteria table and the
//! sequencing that ties them together.

pub mod criteria;
pub mod detect;
pub mod diagnostics;
pub mod platform;
pub mod report;
pub mod snapshot;
pub mod thresholds;
pub mod verdict;
pub mod version;

pub use diagnostics::{run_diagnostics, Diagnostics, Stage};
pub use report::DiagnosticsReport;
pub use snapshot::EnvironmentSnapshot;
pub use thresholds::Thresholds;
pub use verdict::Verdict;
