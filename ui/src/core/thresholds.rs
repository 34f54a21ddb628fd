//! Minimum compatibility requirements.
//!
//! Policy (fixed)
//! --------------
//! - Viewport at least 1280 × 600 on the landscape axis (axes swap in portrait).
//! - Desktop or tablet form factor, landscape orientation.
//! - Device pixel ratio within 1.0 ..= 1.25.
//! - One of the mainstream browsers, at or above a minimum major version.
//! - Operating system at or above a minimum major version where one is listed.
//!
//! The table is compiled in; there is no runtime configuration.

use serde::Serialize;

use super::snapshot::{DeviceType, Orientation};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayMinimum {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelRatioRange {
    pub min: f64,
    pub max: f64,
}

impl PixelRatioRange {
    /// Inclusive on both ends.
    pub fn contains(&self, ratio: f64) -> bool {
        ratio >= self.min && ratio <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub display: DisplayMinimum,
    pub device_types: &'static [DeviceType],
    pub orientations: &'static [Orientation],
    pub pixel_ratio: PixelRatioRange,
    pub browsers: &'static [&'static str],
    /// Minimum major version per browser name. Browsers not listed have no minimum.
    pub min_browser_versions: &'static [(&'static str, u32)],
    /// Minimum major version per OS name. Systems not listed have no minimum.
    pub min_os_versions: &'static [(&'static str, u32)],
}

const STANDARD: Thresholds = Thresholds {
    display: DisplayMinimum {
        width: 1280,
        height: 600,
    },
    device_types: &[DeviceType::Desktop, DeviceType::Tablet],
    orientations: &[Orientation::Landscape],
    pixel_ratio: PixelRatioRange {
        min: 1.0,
        max: 1.25,
    },
    browsers: &["Chrome", "Firefox", "Edge", "Safari", "Opera"],
    min_browser_versions: &[
        ("Chrome", 90),
        ("Edge", 90),
        ("Firefox", 88),
        ("Safari", 14),
        ("Opera", 76),
    ],
    // Windows reports its NT kernel version: 10.0 covers Windows 10 and 11.
    min_os_versions: &[("Windows", 10), ("macOS", 10), ("iOS", 14), ("Android", 9)],
};

impl Thresholds {
    pub const fn standard() -> Self {
        STANDARD
    }

    pub fn accepts_device(&self, device: DeviceType) -> bool {
        self.device_types.contains(&device)
    }

    pub fn accepts_orientation(&self, orientation: Orientation) -> bool {
        self.orientations.contains(&orientation)
    }

    pub fn accepts_browser(&self, name: &str) -> bool {
        self.browsers.iter().any(|accepted| *accepted == name)
    }

    pub fn min_browser_version(&self, name: &str) -> Option<u32> {
        lookup(self.min_browser_versions, name)
    }

    pub fn min_os_version(&self, name: &str) -> Option<u32> {
        lookup(self.min_os_versions, name)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::standard()
    }
}

fn lookup(table: &[(&str, u32)], name: &str) -> Option<u32> {
    table
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, min)| *min)
}
