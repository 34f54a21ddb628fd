//! Collectors that talk to browser APIs with side effects or suspension points.

use tracing::{debug, warn};

use crate::core::platform::Environment;
use crate::core::snapshot::{MicPermission, PdfSupport, PopupStatus};

/// Query the microphone permission. A failed query becomes [`MicPermission::Error`].
pub async fn microphone_permission<E: Environment>(env: &E) -> MicPermission {
    match env.microphone_state().await {
        Ok(state) => {
            let permission = MicPermission::from_state(&state);
            debug!(raw = %state, ?permission, "microphone permission");
            permission
        }
        Err(err) => {
            warn!(error = %err, "microphone permission query failed");
            MicPermission::Error
        }
    }
}

/// Try to open a small secondary window. It is closed again before this returns.
pub fn popup_status<E: Environment>(env: &E) -> PopupStatus {
    match env.open_popup() {
        Ok(Some(window)) => {
            drop(window);
            PopupStatus::Allowed
        }
        Ok(None) => PopupStatus::Blocked,
        Err(err) => {
            warn!(error = %err, "pop-up probe failed");
            PopupStatus::Blocked
        }
    }
}

pub fn pdf_support<E: Environment>(env: &E) -> PdfSupport {
    if env.pdf_viewer_available() {
        PdfSupport::Supported
    } else {
        PdfSupport::NotSupported
    }
}
