//! The environment snapshot: one record of every collected signal for the current page load.
//!
//! Each field starts out with a defined default so a partially collected snapshot never
//! yields an undefined read. Collectors in [`crate::core::detect`] produce the values and the
//! orchestrator in [`crate::core::diagnostics`] writes each field exactly once.

use std::fmt;

use serde::Serialize;

/// Placeholder text for any signal that could not be identified.
pub const UNKNOWN: &str = "Unknown";

/// Coarse device category inferred from the user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DeviceType {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl DeviceType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Desktop => "Desktop",
            Self::Tablet => "Tablet",
            Self::Mobile => "Mobile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Orientation {
    Portrait,
    Landscape,
    #[default]
    Unknown,
}

impl Orientation {
    pub fn label(self) -> &'static str {
        match self {
            Self::Portrait => "Portrait",
            Self::Landscape => "Landscape",
            Self::Unknown => UNKNOWN,
        }
    }
}

/// Microphone permission as reported by the Permissions API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MicPermission {
    Granted,
    Denied,
    Prompt,
    /// The query itself failed (API missing or rejected).
    Error,
    /// Not queried yet.
    #[default]
    Unknown,
}

impl MicPermission {
    /// Normalize a raw permission state (`"granted"`, `"denied"`, `"prompt"`).
    ///
    /// The first letter is capitalized before matching, so `"Granted"` and `"granted"` agree.
    /// Anything else is treated as a failed query.
    pub fn from_state(raw: &str) -> Self {
        match capitalize(raw.trim()).as_str() {
            "Granted" => Self::Granted,
            "Denied" => Self::Denied,
            "Prompt" => Self::Prompt,
            _ => Self::Error,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Granted => "Granted",
            Self::Denied => "Denied",
            Self::Prompt => "Prompt",
            Self::Error => "Error",
            Self::Unknown => UNKNOWN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PopupStatus {
    Allowed,
    Blocked,
    #[default]
    Unknown,
}

impl PopupStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Allowed => "Allowed",
            Self::Blocked => "Blocked",
            Self::Unknown => UNKNOWN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PdfSupport {
    Supported,
    NotSupported,
    #[default]
    Unknown,
}

impl PdfSupport {
    pub fn label(self) -> &'static str {
        match self {
            Self::Supported => "Supported",
            Self::NotSupported => "Not Supported",
            Self::Unknown => UNKNOWN,
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

display_via_label!(DeviceType, Orientation, MicPermission, PopupStatus, PdfSupport);

/// A software component (browser or operating system) with an optional version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Software {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Software {
    pub fn new(name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN, None)
    }

    /// `"Chrome 120.0.1"`, or just the name when no version was captured.
    pub fn display(&self) -> String {
        match &self.version {
            Some(version) => format!("{} {version}", self.name),
            None => self.name.clone(),
        }
    }
}

impl Default for Software {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Viewport geometry plus the derived minimum-size check.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
    pub meets_minimum_size: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentSnapshot {
    pub device_type: DeviceType,
    pub brand: String,
    pub model: String,
    pub browser: Software,
    pub os: Software,
    pub screen: ScreenSize,
    pub pixel_ratio: f64,
    pub orientation: Orientation,
    pub microphone: MicPermission,
    pub popup: PopupStatus,
    pub pdf: PdfSupport,
}

impl Default for EnvironmentSnapshot {
    fn default() -> Self {
        Self {
            device_type: DeviceType::default(),
            brand: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
            browser: Software::unknown(),
            os: Software::unknown(),
            screen: ScreenSize::default(),
            pixel_ratio: 1.0,
            orientation: Orientation::default(),
            microphone: MicPermission::default(),
            popup: PopupStatus::default(),
            pdf: PdfSupport::default(),
        }
    }
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_defined() {
        let snap = EnvironmentSnapshot::default();
        assert_eq!(snap.brand, "Unknown");
        assert_eq!(snap.model, "Unknown");
        assert_eq!(snap.browser.display(), "Unknown");
        assert_eq!(snap.pixel_ratio, 1.0);
        assert_eq!(snap.microphone, MicPermission::Unknown);
        assert!(!snap.screen.meets_minimum_size);
    }

    #[test]
    fn permission_state_is_capitalized_before_matching() {
        assert_eq!(MicPermission::from_state("granted"), MicPermission::Granted);
        assert_eq!(MicPermission::from_state("Denied"), MicPermission::Denied);
        assert_eq!(MicPermission::from_state(" prompt "), MicPermission::Prompt);
        assert_eq!(MicPermission::from_state(""), MicPermission::Error);
        assert_eq!(MicPermission::from_state("weird"), MicPermission::Error);
    }

    #[test]
    fn pdf_label_keeps_the_space() {
        assert_eq!(PdfSupport::NotSupported.to_string(), "Not Supported");
    }

    #[test]
    fn software_display_includes_version_when_present() {
        assert_eq!(
            Software::new("Firefox", Some("121.0".into())).display(),
            "Firefox 121.0"
        );
        assert_eq!(Software::new("Safari", None).display(), "Safari");
    }
}
