//! Aggregate compatibility verdict.
//!
//! The verdict is derived, never stored: it is the logical AND of every criterion that
//! applies to the current device. A single failing criterion downgrades the page to
//! "may not be compatible"; nothing blocks the user from continuing.
//!
//! Display helpers
//! ---------------
//! - `summary()` – the sentence shown above the results table
//! - `css_class()` – `fail` when not compatible, empty otherwise

use serde::Serialize;

use super::criteria::FAIL_CLASS;

pub const COMPATIBLE_SUMMARY: &str = "Your device is compatible.";
pub const INCOMPATIBLE_SUMMARY: &str = "Your device may not be compatible.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Compatible,
    MayNotBeCompatible,
}

impl Verdict {
    /// AND over the pass states. No criteria at all counts as compatible.
    pub fn from_passes(passes: impl IntoIterator<Item = bool>) -> Self {
        if passes.into_iter().all(|passed| passed) {
            Self::Compatible
        } else {
            Self::MayNotBeCompatible
        }
    }

    pub fn is_compatible(self) -> bool {
        matches!(self, Self::Compatible)
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::Compatible => COMPATIBLE_SUMMARY,
            Self::MayNotBeCompatible => INCOMPATIBLE_SUMMARY,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Compatible => "",
            Self::MayNotBeCompatible => FAIL_CLASS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_passing_is_compatible() {
        let v = Verdict::from_passes([true, true, true]);
        assert!(v.is_compatible());
        assert_eq!(v.summary(), "Your device is compatible.");
        assert_eq!(v.css_class(), "");
    }

    #[test]
    fn one_failure_is_enough() {
        let v = Verdict::from_passes([true, false, true]);
        assert_eq!(v, Verdict::MayNotBeCompatible);
        assert_eq!(v.summary(), "Your device may not be compatible.");
        assert_eq!(v.css_class(), "fail");
    }

    #[test]
    fn empty_table_is_compatible() {
        assert!(Verdict::from_passes(std::iter::empty()).is_compatible());
    }
}
