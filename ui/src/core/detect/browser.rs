//! Browser and operating system identification.
//!
//! Both use ordered rule lists evaluated first-match-wins. Order carries meaning: Chromium
//! forks (Edge, Opera) also advertise `Chrome/…`, and Chrome in turn advertises `Safari/…`,
//! so the specific forks are tried before the engines they are built on. Likewise iOS user
//! agents say "like Mac OS X" and Android ones say "Linux".

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::snapshot::Software;
use crate::core::version::normalize_separators;

struct SoftwareRule {
    name: &'static str,
    matches: fn(&str) -> bool,
    version: Option<Regex>,
}

impl SoftwareRule {
    fn new(name: &'static str, matches: fn(&str) -> bool, version: Option<&str>) -> Self {
        Self {
            name,
            matches,
            version: version.map(|p| Regex::new(p).expect("valid version pattern")),
        }
    }

    /// A version pattern that does not match leaves the version empty.
    fn identify(&self, ua: &str) -> Software {
        let version = self
            .version
            .as_ref()
            .and_then(|re| re.captures(ua))
            .and_then(|caps| caps.get(1))
            .map(|m| normalize_separators(m.as_str()))
            .filter(|v| !v.is_empty());
        Software::new(self.name, version)
    }
}

static BROWSER_RULES: Lazy<Vec<SoftwareRule>> = Lazy::new(|| {
    vec![
        SoftwareRule::new(
            "Edge",
            |ua| ["edg/", "edge/", "edga/", "edgios/"].iter().any(|t| ua.contains(t)),
            Some(r"edg(?:e|a|ios)?/([\d.]+)"),
        ),
        SoftwareRule::new(
            "Opera",
            |ua| ua.contains("opr/") || ua.contains("opera"),
            Some(r"(?:opr|opera)[/ ]([\d.]+)"),
        ),
        SoftwareRule::new(
            "Firefox",
            |ua| ua.contains("firefox/") || ua.contains("fxios/"),
            Some(r"(?:firefox|fxios)/([\d.]+)"),
        ),
        SoftwareRule::new(
            "Chrome",
            |ua| ua.contains("chrome/") || ua.contains("crios/"),
            Some(r"(?:chrome|crios)/([\d.]+)"),
        ),
        SoftwareRule::new(
            "Safari",
            |ua| ua.contains("safari") && !ua.contains("chrome"),
            Some(r"version/([\d.]+)"),
        ),
        SoftwareRule::new(
            "Internet Explorer",
            |ua| ua.contains("msie") || ua.contains("trident"),
            Some(r"(?:msie |rv:)([\d.]+)"),
        ),
    ]
});

static OS_RULES: Lazy<Vec<SoftwareRule>> = Lazy::new(|| {
    vec![
        SoftwareRule::new(
            "Windows Phone",
            |ua| ua.contains("windows phone"),
            Some(r"windows phone(?: os)? ([\d.]+)"),
        ),
        SoftwareRule::new(
            "iOS",
            |ua| ["iphone", "ipad", "ipod"].iter().any(|t| ua.contains(t)),
            Some(r"os (\d+(?:[_.]\d+)*) like mac os x"),
        ),
        SoftwareRule::new(
            "Android",
            |ua| ua.contains("android"),
            Some(r"android ([\d.]+)"),
        ),
        SoftwareRule::new(
            "Windows",
            |ua| ua.contains("windows"),
            Some(r"windows nt ([\d.]+)"),
        ),
        SoftwareRule::new(
            "macOS",
            |ua| ua.contains("mac os x") || ua.contains("macintosh"),
            Some(r"mac os x (\d+(?:[_.]\d+)*)"),
        ),
        SoftwareRule::new(
            "Chrome OS",
            |ua| ua.contains("cros "),
            Some(r"cros \S+ ([\d.]+)"),
        ),
        SoftwareRule::new("Linux", |ua| ua.contains("linux"), None),
    ]
});

fn first_match(rules: &[SoftwareRule], user_agent: &str) -> Software {
    let ua = user_agent.to_lowercase();
    rules
        .iter()
        .find(|rule| (rule.matches)(&ua))
        .map(|rule| rule.identify(&ua))
        .unwrap_or_else(Software::unknown)
}

pub fn detect_browser(user_agent: &str) -> Software {
    first_match(&BROWSER_RULES, user_agent)
}

pub fn detect_os(user_agent: &str) -> Software {
    first_match(&OS_RULES, user_agent)
}
