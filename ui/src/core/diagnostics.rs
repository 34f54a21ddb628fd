//! Sequencing of the compatibility check.
//!
//! Stages run strictly one after another:
//!
//! 1. synchronous signals (user agent, geometry, pixel ratio, orientation)
//! 2. microphone permission query, the only suspension point
//! 3. pop-up probe
//! 4. PDF support, then the evaluation pass, exactly once
//!
//! A failed permission query does not stop the chain; it records `Error` and moves on.
//! There is no timeout, retry or cancellation.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::criteria::{self, Evaluation};
use super::detect;
use super::platform::Environment;
use super::report::DiagnosticsReport;
use super::snapshot::EnvironmentSnapshot;
use super::thresholds::Thresholds;

/// The last stage that has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Stage {
    NotStarted,
    SignalsCollected,
    MicrophoneQueried,
    PopupProbed,
    Evaluated,
}

/// One run of the check against an environment. Owns the snapshot for its lifetime.
pub struct Diagnostics<'a, E: Environment> {
    env: &'a E,
    thresholds: Thresholds,
    snapshot: EnvironmentSnapshot,
    evaluation: Option<Evaluation>,
    stage: Stage,
}

impl<'a, E: Environment> Diagnostics<'a, E> {
    pub fn new(env: &'a E, thresholds: Thresholds) -> Self {
        Self {
            env,
            thresholds,
            snapshot: EnvironmentSnapshot::default(),
            evaluation: None,
            stage: Stage::NotStarted,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn snapshot(&self) -> &EnvironmentSnapshot {
        &self.snapshot
    }

    /// Present once the final stage has run.
    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    /// Run the next stage and return the stage now completed. Idle once evaluated.
    pub async fn advance(&mut self) -> Stage {
        self.stage = match self.stage {
            Stage::NotStarted => {
                self.collect_signals();
                Stage::SignalsCollected
            }
            Stage::SignalsCollected => {
                self.snapshot.microphone = detect::microphone_permission(self.env).await;
                Stage::MicrophoneQueried
            }
            Stage::MicrophoneQueried => {
                self.snapshot.popup = detect::popup_status(self.env);
                debug!(popup = %self.snapshot.popup, "pop-up probe");
                Stage::PopupProbed
            }
            Stage::PopupProbed => {
                self.snapshot.pdf = detect::pdf_support(self.env);
                debug!(pdf = %self.snapshot.pdf, "pdf support");
                let evaluation = criteria::evaluate(&self.snapshot, &self.thresholds);
                info!(
                    verdict = ?evaluation.verdict,
                    failed = evaluation.failed().count(),
                    "compatibility evaluated"
                );
                self.evaluation = Some(evaluation);
                Stage::Evaluated
            }
            Stage::Evaluated => Stage::Evaluated,
        };
        self.stage
    }

    /// Drive every remaining stage and hand back the finished report.
    pub async fn run(mut self) -> DiagnosticsReport {
        while self.advance().await != Stage::Evaluated {}

        let evaluation = self
            .evaluation
            .unwrap_or_else(|| criteria::evaluate(&self.snapshot, &self.thresholds));
        DiagnosticsReport {
            snapshot: self.snapshot,
            thresholds: self.thresholds,
            evaluation,
        }
    }

    fn collect_signals(&mut self) {
        let env = self.env;
        let user_agent = env.user_agent().unwrap_or_else(|| {
            warn!("user agent unavailable");
            String::new()
        });

        let device = detect::detect_device(&user_agent, env.touch_capable());
        let orientation = detect::orientation_from_media(env.portrait());
        let (width, height) = env.viewport().unwrap_or((0, 0));

        let snap = &mut self.snapshot;
        snap.device_type = device.device_type;
        snap.brand = device.brand;
        snap.model = device.model;
        snap.browser = detect::detect_browser(&user_agent);
        snap.os = detect::detect_os(&user_agent);
        snap.screen = detect::screen_size(width, height, orientation, &self.thresholds.display);
        snap.pixel_ratio = detect::normalize_pixel_ratio(env.device_pixel_ratio());
        snap.orientation = orientation;

        debug!(
            device = %snap.device_type,
            browser = %snap.browser.display(),
            os = %snap.os.display(),
            width,
            height,
            pixel_ratio = snap.pixel_ratio,
            "signals collected"
        );
    }
}

/// Run the whole check with the standard thresholds.
pub async fn run_diagnostics<E: Environment>(env: &E) -> DiagnosticsReport {
    Diagnostics::new(env, Thresholds::standard()).run().await
}
