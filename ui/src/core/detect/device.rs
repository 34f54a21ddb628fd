//! Form factor, brand and model inference from the user agent.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::snapshot::{DeviceType, UNKNOWN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDetails {
    pub device_type: DeviceType,
    pub brand: String,
    pub model: String,
}

static MOBILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"iphone|ipod|android.*mobile|blackberry|opera mini|windows phone|webos")
        .expect("valid mobile pattern")
});

static TABLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ipad|tablet|kindle|silk|playbook").expect("valid tablet pattern"));

struct FormFactorRule {
    device: DeviceType,
    matches: fn(ua: &str, touch: bool) -> bool,
}

/// Evaluated top to bottom; first match wins, nothing matching means Desktop.
/// Tablet rules sit above the mobile rule: tablet user agents often carry mobile markers.
const FORM_FACTOR_RULES: &[FormFactorRule] = &[
    FormFactorRule {
        device: DeviceType::Tablet,
        matches: is_touch_apple,
    },
    FormFactorRule {
        device: DeviceType::Tablet,
        matches: is_tablet,
    },
    FormFactorRule {
        device: DeviceType::Mobile,
        matches: is_mobile,
    },
];

/// iPadOS reports a desktop Safari ("Macintosh") user agent; touch support gives it away.
fn is_touch_apple(ua: &str, touch: bool) -> bool {
    touch && (ua.contains("ipad") || ua.contains("macintosh"))
}

fn is_tablet(ua: &str, _touch: bool) -> bool {
    TABLET.is_match(ua) || android_without_mobile(ua)
}

fn is_mobile(ua: &str, _touch: bool) -> bool {
    MOBILE.is_match(ua)
}

/// Android tablets omit the `mobile` token that Android phones carry after `android`.
fn android_without_mobile(ua: &str) -> bool {
    ua.match_indices("android")
        .any(|(idx, _)| !ua[idx..].contains("mobile"))
}

enum ModelRule {
    Fixed(&'static str),
    Capture(Vec<Regex>),
}

struct BrandRule {
    needle: &'static str,
    brand: &'static str,
    model: ModelRule,
}

fn capture(patterns: &[&str]) -> ModelRule {
    ModelRule::Capture(
        patterns
            .iter()
            .map(|p| Regex::new(p).expect("valid model pattern"))
            .collect(),
    )
}

static BRAND_RULES: Lazy<Vec<BrandRule>> = Lazy::new(|| {
    vec![
        BrandRule {
            needle: "iphone",
            brand: "Apple",
            model: ModelRule::Fixed("iPhone"),
        },
        BrandRule {
            needle: "ipad",
            brand: "Apple",
            model: ModelRule::Fixed("iPad"),
        },
        BrandRule {
            needle: "samsung",
            brand: "Samsung",
            // `SamsungBrowser/…` would otherwise yield the model "browser".
            model: capture(&[r"\b(sm-[a-z0-9]+)", r"samsung[-\s]([a-z0-9]+)"]),
        },
        BrandRule {
            needle: "huawei",
            brand: "Huawei",
            model: capture(&[r"huawei[-\s]?([a-z0-9]+)"]),
        },
        BrandRule {
            needle: "pixel",
            brand: "Google",
            model: capture(&[r"pixel[-\s]?([a-z0-9]+)"]),
        },
        BrandRule {
            needle: "oneplus",
            brand: "OnePlus",
            model: capture(&[r"oneplus[-\s]?([a-z0-9]+)"]),
        },
        BrandRule {
            needle: "lg",
            brand: "LG",
            model: capture(&[r"lg[-\s]?([a-z0-9]+)"]),
        },
        BrandRule {
            needle: "xiaomi",
            brand: "Xiaomi",
            model: capture(&[r"xiaomi[-\s]?([a-z0-9]+)"]),
        },
    ]
});

/// Classify a user agent. `touch` reports whether the document exposes touch events.
pub fn detect_device(user_agent: &str, touch: bool) -> DeviceDetails {
    let ua = user_agent.to_lowercase();

    let device_type = FORM_FACTOR_RULES
        .iter()
        .find(|rule| (rule.matches)(&ua, touch))
        .map(|rule| rule.device)
        .unwrap_or(DeviceType::Desktop);

    let (brand, model) = if is_touch_apple(&ua, touch) && !ua.contains("iphone") {
        ("Apple".to_string(), "iPad".to_string())
    } else {
        brand_and_model(&ua)
    };

    DeviceDetails {
        device_type,
        brand,
        model,
    }
}

fn brand_and_model(ua: &str) -> (String, String) {
    let Some(rule) = BRAND_RULES.iter().find(|rule| ua.contains(rule.needle)) else {
        return (UNKNOWN.to_string(), UNKNOWN.to_string());
    };

    let model = match &rule.model {
        ModelRule::Fixed(model) => Some(model.to_string()),
        ModelRule::Capture(patterns) => patterns
            .iter()
            .find_map(|re| re.captures(ua))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()),
    };

    (
        rule.brand.to_string(),
        model.unwrap_or_else(|| UNKNOWN.to_string()),
    )
}
