//! End-to-end runs of the compatibility check against fixed environments.

use futures::executor::block_on;
use ui::core::criteria::{evaluate, CRITERIA};
use ui::core::platform::{ProbeError, StaticEnvironment};
use ui::core::snapshot::{DeviceType, MicPermission, Orientation, PdfSupport, PopupStatus};
use ui::core::{run_diagnostics, Diagnostics, Stage, Thresholds, Verdict};

const WINDOWS_CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const IPAD_SAFARI: &str = "Mozilla/5.0 (iPad; CPU OS 17_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1";
const SAMSUNG_TAB_CHROME: &str = "Mozilla/5.0 (Linux; Android 13; SM-X700) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ANDROID_PHONE: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";

#[test]
fn desktop_chrome_full_hd_is_compatible() {
    let env = StaticEnvironment::desktop(WINDOWS_CHROME);
    let report = block_on(run_diagnostics(&env));

    let snap = &report.snapshot;
    assert_eq!(snap.device_type, DeviceType::Desktop);
    assert_eq!(snap.browser.name, "Chrome");
    assert_eq!(snap.orientation, Orientation::Landscape);
    assert_eq!(snap.microphone, MicPermission::Granted);
    assert_eq!(snap.popup, PopupStatus::Allowed);
    assert_eq!(snap.pdf, PdfSupport::Supported);

    assert_eq!(report.verdict(), Verdict::Compatible);
    assert!(report.evaluation.outcome("brand").is_none());
    assert!(report.evaluation.outcome("model").is_none());
    assert_eq!(env.popups_closed(), 1);
}

#[test]
fn ipad_with_touch_resolves_to_apple_tablet() {
    let env = StaticEnvironment::desktop(IPAD_SAFARI)
        .with_touch(true)
        .with_viewport(1366, 1024);
    let report = block_on(run_diagnostics(&env));

    let snap = &report.snapshot;
    assert_eq!(snap.device_type, DeviceType::Tablet);
    assert_eq!(snap.brand, "Apple");
    assert_eq!(snap.model, "iPad");
    assert_eq!(snap.os.name, "iOS");
    assert_eq!(snap.os.version.as_deref(), Some("17.1"));

    let model = report.evaluation.outcome("model").expect("model row on tablets");
    assert_eq!(model.display_text(), "iPad ✅");
    assert_eq!(report.verdict(), Verdict::Compatible);
}

#[test]
fn rejected_permission_query_does_not_abort_the_chain() {
    let env =
        StaticEnvironment::desktop(WINDOWS_CHROME).with_microphone(Err(ProbeError::Rejected {
            api: "permissions.query",
            message: "NotSupportedError".into(),
        }));

    let mut diag = Diagnostics::new(&env, Thresholds::standard());
    block_on(async {
        while diag.advance().await != Stage::Evaluated {}
    });

    let snap = diag.snapshot();
    assert_eq!(snap.microphone, MicPermission::Error);
    assert_eq!(snap.popup, PopupStatus::Allowed);
    assert_eq!(snap.pdf, PdfSupport::Supported);
    assert_eq!(env.popups_closed(), 1);

    let evaluation = diag.evaluation().expect("rendered after rejection");
    let mic = evaluation.outcome("mic-status").expect("mic row");
    assert_eq!(mic.display_text(), "Error ⚠️");
    assert_eq!(evaluation.verdict, Verdict::MayNotBeCompatible);
}

#[test]
fn portrait_tablet_uses_swapped_axes_but_fails_orientation() {
    let env = StaticEnvironment::desktop(IPAD_SAFARI)
        .with_touch(true)
        .with_viewport(600, 1280)
        .with_portrait(true);
    let report = block_on(run_diagnostics(&env));

    assert!(report.snapshot.screen.meets_minimum_size);
    let screen = report.evaluation.outcome("screenSize").expect("screen row");
    assert_eq!(screen.display_text(), "600 x 1280 (Portrait) ✅");
    assert!(!report.evaluation.outcome("orientation").expect("row").passed);
    assert_eq!(report.verdict(), Verdict::MayNotBeCompatible);
}

#[test]
fn phones_are_flagged() {
    let env = StaticEnvironment::desktop(ANDROID_PHONE).with_touch(true);
    let report = block_on(run_diagnostics(&env));
    assert_eq!(report.snapshot.device_type, DeviceType::Mobile);
    let device = report.evaluation.outcome("deviceType").expect("row");
    assert_eq!(device.display_text(), "Mobile ⚠️");
    assert_eq!(report.verdict(), Verdict::MayNotBeCompatible);
}

#[test]
fn desktop_verdict_ignores_brand_and_model() {
    let env = StaticEnvironment::desktop(WINDOWS_CHROME);
    let report = block_on(run_diagnostics(&env));
    let thresholds = Thresholds::standard();

    let expected = CRITERIA
        .iter()
        .filter(|c| c.id != "brand" && c.id != "model")
        .all(|c| c.passes(&report.snapshot, &thresholds));
    assert_eq!(report.verdict().is_compatible(), expected);

    assert_eq!(report.snapshot.brand, "Unknown");
    assert!(report.evaluation.outcome("brand").is_none());
}

#[test]
fn re_evaluating_an_unchanged_snapshot_is_stable() {
    let env = StaticEnvironment::desktop(WINDOWS_CHROME);
    let report = block_on(run_diagnostics(&env));
    let again = evaluate(&report.snapshot, &report.thresholds);
    assert_eq!(again, report.evaluation);
    let texts: Vec<_> = again.outcomes.iter().map(|o| o.display_text()).collect();
    let first: Vec<_> = report.evaluation.outcomes.iter().map(|o| o.display_text()).collect();
    assert_eq!(texts, first);
}

#[test]
fn unbranded_android_tablet_is_compatible() {
    let env = StaticEnvironment::desktop(SAMSUNG_TAB_CHROME).with_touch(true);
    let report = block_on(run_diagnostics(&env));

    let snap = &report.snapshot;
    assert_eq!(snap.device_type, DeviceType::Tablet);
    assert_eq!(snap.browser.name, "Chrome");

    // Brand and model are shown for tablets but never decide the verdict.
    let brand = report.evaluation.outcome("brand").expect("brand row on tablets");
    assert!(brand.passed);
    assert!(report.evaluation.outcome("model").expect("model row").passed);
    assert_eq!(report.evaluation.failed().count(), 0);
    assert_eq!(report.verdict(), Verdict::Compatible);
}
