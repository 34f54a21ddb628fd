//! The compatibility criteria table and its evaluation pass.
//!
//! Each [`Criterion`] is a descriptor: an id (also the DOM id of its value cell), a value
//! accessor for display and a pass predicate. Both take the snapshot and thresholds
//! explicitly, so a single criterion can be checked in isolation.
//!
//! Brand and model are informational. They are shown on handheld devices and dropped on
//! Desktop, and they never fail: an unrecognised brand says nothing about compatibility.

use serde::Serialize;

use super::snapshot::{
    DeviceType, EnvironmentSnapshot, MicPermission, PdfSupport, PopupStatus, UNKNOWN,
};
use super::thresholds::Thresholds;
use super::verdict::Verdict;
use super::version;

pub const PASS_GLYPH: &str = "✅";
pub const FAIL_GLYPH: &str = "⚠️";
/// Style class applied to failing value cells and to a failing summary.
pub const FAIL_CLASS: &str = "fail";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Scope {
    General,
    /// Only evaluated when the form factor is not Desktop.
    BrandModel,
}

type Accessor = fn(&EnvironmentSnapshot, &Thresholds) -> String;
type Predicate = fn(&EnvironmentSnapshot, &Thresholds) -> bool;

pub struct Criterion {
    pub id: &'static str,
    pub label: &'static str,
    pub scope: Scope,
    value: Accessor,
    pass: Predicate,
}

impl Criterion {
    pub fn value(&self, snapshot: &EnvironmentSnapshot, thresholds: &Thresholds) -> String {
        (self.value)(snapshot, thresholds)
    }

    pub fn passes(&self, snapshot: &EnvironmentSnapshot, thresholds: &Thresholds) -> bool {
        (self.pass)(snapshot, thresholds)
    }

    pub fn applies_to(&self, snapshot: &EnvironmentSnapshot) -> bool {
        match self.scope {
            Scope::General => true,
            Scope::BrandModel => snapshot.device_type != DeviceType::Desktop,
        }
    }
}

impl std::fmt::Debug for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Criterion")
            .field("id", &self.id)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// Declared display order. The verdict does not depend on it.
pub const CRITERIA: &[Criterion] = &[
    Criterion {
        id: "deviceType",
        label: "Device type",
        scope: Scope::General,
        value: device_type_value,
        pass: device_type_pass,
    },
    Criterion {
        id: "brand",
        label: "Brand",
        scope: Scope::BrandModel,
        value: brand_value,
        pass: informational,
    },
    Criterion {
        id: "model",
        label: "Model",
        scope: Scope::BrandModel,
        value: model_value,
        pass: informational,
    },
    Criterion {
        id: "browser",
        label: "Browser",
        scope: Scope::General,
        value: browser_value,
        pass: browser_pass,
    },
    Criterion {
        id: "browserVersion",
        label: "Browser version",
        scope: Scope::General,
        value: browser_version_value,
        pass: browser_version_pass,
    },
    Criterion {
        id: "os",
        label: "Operating system",
        scope: Scope::General,
        value: os_value,
        pass: os_pass,
    },
    Criterion {
        id: "screenSize",
        label: "Screen size",
        scope: Scope::General,
        value: screen_size_value,
        pass: screen_size_pass,
    },
    Criterion {
        id: "pixelRatio",
        label: "Pixel ratio",
        scope: Scope::General,
        value: pixel_ratio_value,
        pass: pixel_ratio_pass,
    },
    Criterion {
        id: "orientation",
        label: "Orientation",
        scope: Scope::General,
        value: orientation_value,
        pass: orientation_pass,
    },
    Criterion {
        id: "mic-status",
        label: "Microphone",
        scope: Scope::General,
        value: microphone_value,
        pass: microphone_pass,
    },
    Criterion {
        id: "global-popup-status",
        label: "Pop-ups",
        scope: Scope::General,
        value: popup_value,
        pass: popup_pass,
    },
    Criterion {
        id: "pdf-status",
        label: "PDF viewer",
        scope: Scope::General,
        value: pdf_value,
        pass: pdf_pass,
    },
];

pub fn find(id: &str) -> Option<&'static Criterion> {
    CRITERIA.iter().find(|criterion| criterion.id == id)
}

fn device_type_value(s: &EnvironmentSnapshot, _: &Thresholds) -> String {
    s.device_type.to_string()
}

fn device_type_pass(s: &EnvironmentSnapshot, t: &Thresholds) -> bool {
    t.accepts_device(s.device_type)
}

fn brand_value(s: &EnvironmentSnapshot, _: &Thresholds) -> String {
    s.brand.clone()
}

fn model_value(s: &EnvironmentSnapshot, _: &Thresholds) -> String {
    s.model.clone()
}

fn informational(_: &EnvironmentSnapshot, _: &Thresholds) -> bool {
    true
}

fn browser_value(s: &EnvironmentSnapshot, _: &Thresholds) -> String {
    s.browser.name.clone()
}

fn browser_pass(s: &EnvironmentSnapshot, t: &Thresholds) -> bool {
    t.accepts_browser(&s.browser.name)
}

fn browser_version_value(s: &EnvironmentSnapshot, _: &Thresholds) -> String {
    s.browser
        .version
        .clone()
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn browser_version_pass(s: &EnvironmentSnapshot, t: &Thresholds) -> bool {
    match t.min_browser_version(&s.browser.name) {
        Some(min) => version::meets_minimum(s.browser.version.as_deref(), min),
        None => true,
    }
}

fn os_value(s: &EnvironmentSnapshot, _: &Thresholds) -> String {
    s.os.display()
}

fn os_pass(s: &EnvironmentSnapshot, t: &Thresholds) -> bool {
    match t.min_os_version(&s.os.name) {
        Some(min) => version::meets_minimum(s.os.version.as_deref(), min),
        None => true,
    }
}

fn screen_size_value(s: &EnvironmentSnapshot, _: &Thresholds) -> String {
    format!(
        "{} x {} ({})",
        s.screen.width, s.screen.height, s.screen.orientation
    )
}

fn screen_size_pass(s: &EnvironmentSnapshot, _: &Thresholds) -> bool {
    s.screen.meets_minimum_size
}

fn pixel_ratio_value(s: &EnvironmentSnapshot, _: &Thresholds) -> String {
    s.pixel_ratio.to_string()
}

fn pixel_ratio_pass(s: &EnvironmentSnapshot, t: &Thresholds) -> bool {
    t.pixel_ratio.contains(s.pixel_ratio)
}

fn orientation_value(s: &EnvironmentSnapshot, _: &Thresholds) -> String {
    s.orientation.to_string()
}

fn orientation_pass(s: &EnvironmentSnapshot, t: &Thresholds) -> bool {
    t.accepts_orientation(s.orientation)
}

fn microphone_value(s: &EnvironmentSnapshot, _: &Thresholds) -> String {
    s.microphone.to_string()
}

fn microphone_pass(s: &EnvironmentSnapshot, _: &Thresholds) -> bool {
    s.microphone == MicPermission::Granted
}

fn popup_value(s: &EnvironmentSnapshot, _: &Thresholds) -> String {
    s.popup.to_string()
}

fn popup_pass(s: &EnvironmentSnapshot, _: &Thresholds) -> bool {
    s.popup != PopupStatus::Blocked
}

fn pdf_value(s: &EnvironmentSnapshot, _: &Thresholds) -> String {
    s.pdf.to_string()
}

fn pdf_pass(s: &EnvironmentSnapshot, _: &Thresholds) -> bool {
    s.pdf == PdfSupport::Supported
}

/// One rendered row of the evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionOutcome {
    pub id: &'static str,
    pub label: &'static str,
    pub scope: Scope,
    pub value: String,
    pub passed: bool,
}

impl CriterionOutcome {
    /// `"<value> ✅"` or `"<value> ⚠️"`.
    pub fn display_text(&self) -> String {
        let glyph = if self.passed { PASS_GLYPH } else { FAIL_GLYPH };
        format!("{} {glyph}", self.value)
    }

    pub fn css_class(&self) -> &'static str {
        if self.passed {
            ""
        } else {
            FAIL_CLASS
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub outcomes: Vec<CriterionOutcome>,
    pub verdict: Verdict,
}

impl Evaluation {
    pub fn outcome(&self, id: &str) -> Option<&CriterionOutcome> {
        self.outcomes.iter().find(|o| o.id == id)
    }

    pub fn failed(&self) -> impl Iterator<Item = &CriterionOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}

/// Run every applicable criterion against the snapshot, in table order.
pub fn evaluate(snapshot: &EnvironmentSnapshot, thresholds: &Thresholds) -> Evaluation {
    let outcomes: Vec<CriterionOutcome> = CRITERIA
        .iter()
        .filter(|criterion| criterion.applies_to(snapshot))
        .map(|criterion| CriterionOutcome {
            id: criterion.id,
            label: criterion.label,
            scope: criterion.scope,
            value: criterion.value(snapshot, thresholds),
            passed: criterion.passes(snapshot, thresholds),
        })
        .collect();

    let verdict = Verdict::from_passes(outcomes.iter().map(|o| o.passed));
    Evaluation { outcomes, verdict }
}
