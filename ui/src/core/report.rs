//! Finished diagnostics and their JSON export.
//!
//! The export is meant to be pasted into a support request; it is never stored.

use serde::Serialize;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use super::criteria::Evaluation;
use super::snapshot::EnvironmentSnapshot;
use super::thresholds::Thresholds;
use super::verdict::Verdict;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticsReport {
    pub snapshot: EnvironmentSnapshot,
    pub thresholds: Thresholds,
    pub evaluation: Evaluation,
}

#[derive(Serialize)]
struct ReportExport<'a> {
    generated_at: String,
    verdict: &'static str,
    #[serde(flatten)]
    report: &'a DiagnosticsReport,
}

impl DiagnosticsReport {
    pub fn verdict(&self) -> Verdict {
        self.evaluation.verdict
    }

    /// Pretty JSON stamped with the current UTC time.
    pub fn to_json(&self) -> Result<String, String> {
        self.to_json_at(OffsetDateTime::now_utc())
    }

    pub fn to_json_at(&self, generated: OffsetDateTime) -> Result<String, String> {
        let generated_at = generated.format(&Rfc3339).map_err(|err| err.to_string())?;
        let export = ReportExport {
            generated_at,
            verdict: self.verdict().summary(),
            report: self,
        };
        serde_json::to_string_pretty(&export).map_err(|err| err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::criteria::evaluate;
    use serde_json::Value;
    use time::macros::datetime;

    #[test]
    fn export_carries_timestamp_verdict_and_rows() {
        let snapshot = EnvironmentSnapshot::default();
        let thresholds = Thresholds::standard();
        let report = DiagnosticsReport {
            evaluation: evaluate(&snapshot, &thresholds),
            snapshot,
            thresholds,
        };

        let json = report
            .to_json_at(datetime!(2025-01-02 03:04:05 UTC))
            .expect("export");
        let value: Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["generated_at"], "2025-01-02T03:04:05Z");
        assert_eq!(value["verdict"], "Your device may not be compatible.");
        assert_eq!(value["snapshot"]["brand"], "Unknown");
        assert_eq!(value["snapshot"]["pdf"], "Unknown");
        assert_eq!(value["thresholds"]["display"]["width"], 1280);
        assert!(value["evaluation"]["outcomes"]
            .as_array()
            .is_some_and(|rows| !rows.is_empty()));
    }
}
