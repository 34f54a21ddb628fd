//! Viewport, orientation and pixel density.

use crate::core::snapshot::{Orientation, ScreenSize};
use crate::core::thresholds::DisplayMinimum;

/// Result of the `(orientation: portrait)` media query; `None` when it could not be evaluated.
pub fn orientation_from_media(portrait: Option<bool>) -> Orientation {
    match portrait {
        Some(true) => Orientation::Portrait,
        Some(false) => Orientation::Landscape,
        None => Orientation::Unknown,
    }
}

/// Build the screen record and decide whether it meets the minimum display size.
///
/// The minimum is stated for landscape. In portrait the long edge is the height, so the
/// width requirement applies to the height and vice versa. An unknown orientation is
/// judged as landscape.
pub fn screen_size(
    width: u32,
    height: u32,
    orientation: Orientation,
    minimum: &DisplayMinimum,
) -> ScreenSize {
    let meets_minimum_size = match orientation {
        Orientation::Portrait => height >= minimum.width && width >= minimum.height,
        Orientation::Landscape | Orientation::Unknown => {
            width >= minimum.width && height >= minimum.height
        }
    };

    ScreenSize {
        width,
        height,
        orientation,
        meets_minimum_size,
    }
}

/// Device pixel ratio rounded to three decimals, `1.0` when unavailable or nonsensical.
pub fn normalize_pixel_ratio(raw: Option<f64>) -> f64 {
    match raw {
        Some(ratio) if ratio.is_finite() && ratio > 0.0 => (ratio * 1000.0).round() / 1000.0,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: DisplayMinimum = DisplayMinimum {
        width: 1280,
        height: 600,
    };

    #[test]
    fn landscape_uses_thresholds_as_stated() {
        assert!(screen_size(1920, 1080, Orientation::Landscape, &MIN).meets_minimum_size);
        assert!(screen_size(1280, 600, Orientation::Landscape, &MIN).meets_minimum_size);
        assert!(!screen_size(1279, 800, Orientation::Landscape, &MIN).meets_minimum_size);
        assert!(!screen_size(1366, 599, Orientation::Landscape, &MIN).meets_minimum_size);
    }

    #[test]
    fn portrait_swaps_axes() {
        assert!(screen_size(600, 1280, Orientation::Portrait, &MIN).meets_minimum_size);
        assert!(!screen_size(599, 1280, Orientation::Portrait, &MIN).meets_minimum_size);
        assert!(!screen_size(1280, 600, Orientation::Portrait, &MIN).meets_minimum_size);
    }

    #[test]
    fn unknown_orientation_is_judged_as_landscape() {
        assert!(screen_size(1280, 600, Orientation::Unknown, &MIN).meets_minimum_size);
        assert!(!screen_size(600, 1280, Orientation::Unknown, &MIN).meets_minimum_size);
    }

    #[test]
    fn orientation_from_media_query() {
        assert_eq!(orientation_from_media(Some(true)), Orientation::Portrait);
        assert_eq!(orientation_from_media(Some(false)), Orientation::Landscape);
        assert_eq!(orientation_from_media(None), Orientation::Unknown);
    }

    #[test]
    fn pixel_ratio_is_rounded_with_fallback() {
        assert_eq!(normalize_pixel_ratio(Some(1.0)), 1.0);
        assert_eq!(normalize_pixel_ratio(Some(1.2500001)), 1.25);
        assert_eq!(normalize_pixel_ratio(Some(1.3333333)), 1.333);
        assert_eq!(normalize_pixel_ratio(None), 1.0);
        assert_eq!(normalize_pixel_ratio(Some(0.0)), 1.0);
        assert_eq!(normalize_pixel_ratio(Some(f64::NAN)), 1.0);
    }
}
