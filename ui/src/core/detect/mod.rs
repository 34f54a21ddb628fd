//! Signal collectors. Each one reads a single kind of environment signal and returns a
//! normalized value; none of them touch the snapshot.

mod browser;
mod device;
mod geometry;
mod probes;

pub use browser::{detect_browser, detect_os};
pub use device::{detect_device, DeviceDetails};
pub use geometry::{normalize_pixel_ratio, orientation_from_media, screen_size};
pub use probes::{microphone_permission, pdf_support, popup_status};
