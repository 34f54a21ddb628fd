//! Version string coercion.
//!
//! Comparisons only look at the leading integer (the major version): `"10.0.1"` compares as
//! `10`, `"120.0.6099.109"` as `120`. Multi-segment comparison is not attempted, so `"10.9"`
//! and `"10.1"` are equal here. A string without a numeric prefix has no major version and
//! fails any minimum.

/// Leading integer of `raw`, ignoring surrounding whitespace.
pub fn major(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let digits = trimmed
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(idx, _)| &trimmed[..idx])
        .unwrap_or(trimmed);
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// `true` when `version` has a major component of at least `minimum`.
pub fn meets_minimum(version: Option<&str>, minimum: u32) -> bool {
    version.and_then(major).is_some_and(|found| found >= minimum)
}

/// Turn `10_15_7` style signatures into `10.15.7`.
pub fn normalize_separators(raw: &str) -> String {
    raw.trim().replace('_', ".")
}
