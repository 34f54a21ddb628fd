//! Platform glue: where environment signals come from.
//!
//! [`Environment`] is the read-only view of the browser the collectors work against. On
//! `wasm32` it is backed by `web-sys` ([`WebEnvironment`]); everywhere else (and in tests) a
//! value-backed [`StaticEnvironment`] stands in. A page built without a browser therefore
//! sees the documented fallbacks rather than a failure.

use std::cell::Cell;
use std::rc::Rc;

use futures::future::{self, LocalBoxFuture};

/// Failure to read a browser signal. Never shown to the user; collectors turn it into a
/// fallback value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("{0} is unavailable")]
    Unavailable(&'static str),
    #[error("{api} failed: {message}")]
    Rejected { api: &'static str, message: String },
}

pub trait Environment {
    /// Secondary window opened by the pop-up probe. Dropping it closes the window.
    type Popup;

    fn user_agent(&self) -> Option<String>;
    /// `"ontouchend" in document`.
    fn touch_capable(&self) -> bool;
    /// Inner width and height in CSS pixels.
    fn viewport(&self) -> Option<(u32, u32)>;
    /// Whether `(orientation: portrait)` matches.
    fn portrait(&self) -> Option<bool>;
    fn device_pixel_ratio(&self) -> Option<f64>;
    /// Raw `PermissionStatus.state` for the microphone, e.g. `"granted"`.
    fn microphone_state(&self) -> LocalBoxFuture<'_, Result<String, ProbeError>>;
    /// `Ok(None)` means the browser refused to open the window.
    fn open_popup(&self) -> Result<Option<Self::Popup>, ProbeError>;
    fn pdf_viewer_available(&self) -> bool;
}

/// Environment backed by plain values.
#[derive(Debug, Clone)]
pub struct StaticEnvironment {
    pub user_agent: Option<String>,
    pub touch: bool,
    pub viewport: Option<(u32, u32)>,
    pub portrait: Option<bool>,
    pub pixel_ratio: Option<f64>,
    pub microphone: Result<String, ProbeError>,
    pub popups_allowed: bool,
    pub pdf_viewer: bool,
    popups_closed: Rc<Cell<u32>>,
}

impl StaticEnvironment {
    /// No browser at all: every signal falls back.
    pub fn headless() -> Self {
        Self {
            user_agent: None,
            touch: false,
            viewport: None,
            portrait: None,
            pixel_ratio: None,
            microphone: Err(ProbeError::Unavailable("navigator.permissions")),
            popups_allowed: false,
            pdf_viewer: false,
            popups_closed: Rc::new(Cell::new(0)),
        }
    }

    /// A desktop browser that passes every criterion.
    pub fn desktop(user_agent: &str) -> Self {
        Self {
            user_agent: Some(user_agent.to_string()),
            viewport: Some((1920, 1080)),
            portrait: Some(false),
            pixel_ratio: Some(1.0),
            microphone: Ok("granted".to_string()),
            popups_allowed: true,
            pdf_viewer: true,
            ..Self::headless()
        }
    }

    pub fn with_touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Some((width, height));
        self
    }

    pub fn with_portrait(mut self, portrait: bool) -> Self {
        self.portrait = Some(portrait);
        self
    }

    pub fn with_microphone(mut self, state: Result<String, ProbeError>) -> Self {
        self.microphone = state;
        self
    }

    /// How many probe windows have been opened and closed again.
    pub fn popups_closed(&self) -> u32 {
        self.popups_closed.get()
    }
}

impl Default for StaticEnvironment {
    fn default() -> Self {
        Self::headless()
    }
}

/// Probe window handle for [`StaticEnvironment`]; counts its own close.
#[derive(Debug)]
pub struct StaticPopup(Rc<Cell<u32>>);

impl Drop for StaticPopup {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

impl Environment for StaticEnvironment {
    type Popup = StaticPopup;

    fn user_agent(&self) -> Option<String> {
        self.user_agent.clone()
    }

    fn touch_capable(&self) -> bool {
        self.touch
    }

    fn viewport(&self) -> Option<(u32, u32)> {
        self.viewport
    }

    fn portrait(&self) -> Option<bool> {
        self.portrait
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        self.pixel_ratio
    }

    fn microphone_state(&self) -> LocalBoxFuture<'_, Result<String, ProbeError>> {
        Box::pin(future::ready(self.microphone.clone()))
    }

    fn open_popup(&self) -> Result<Option<Self::Popup>, ProbeError> {
        Ok(self
            .popups_allowed
            .then(|| StaticPopup(self.popups_closed.clone())))
    }

    fn pdf_viewer_available(&self) -> bool {
        self.pdf_viewer
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{WebEnvironment, WebPopup};

/// The environment the current build runs against.
#[cfg(target_arch = "wasm32")]
pub type PageEnvironment = WebEnvironment;
#[cfg(not(target_arch = "wasm32"))]
pub type PageEnvironment = StaticEnvironment;

pub fn page_environment() -> PageEnvironment {
    #[cfg(target_arch = "wasm32")]
    {
        WebEnvironment::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        StaticEnvironment::headless()
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use futures::future::LocalBoxFuture;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;

    use super::{Environment, ProbeError};

    /// `web-sys` backed environment. Holds no window when run outside a page.
    pub struct WebEnvironment {
        window: Option<web_sys::Window>,
    }

    impl WebEnvironment {
        pub fn new() -> Self {
            Self {
                window: web_sys::window(),
            }
        }

        fn window(&self) -> Result<&web_sys::Window, ProbeError> {
            self.window.as_ref().ok_or(ProbeError::Unavailable("window"))
        }
    }

    impl Default for WebEnvironment {
        fn default() -> Self {
            Self::new()
        }
    }

    pub struct WebPopup(web_sys::Window);

    impl Drop for WebPopup {
        fn drop(&mut self) {
            let _ = self.0.close();
        }
    }

    fn rejected(api: &'static str, err: JsValue) -> ProbeError {
        let message = err.as_string().unwrap_or_else(|| format!("{err:?}"));
        ProbeError::Rejected { api, message }
    }

    fn property(target: &JsValue, name: &str) -> Option<JsValue> {
        js_sys::Reflect::get(target, &JsValue::from_str(name))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
    }

    impl Environment for WebEnvironment {
        type Popup = WebPopup;

        fn user_agent(&self) -> Option<String> {
            self.window.as_ref()?.navigator().user_agent().ok()
        }

        fn touch_capable(&self) -> bool {
            self.window
                .as_ref()
                .and_then(|w| w.document())
                .and_then(|doc| js_sys::Reflect::has(&doc, &JsValue::from_str("ontouchend")).ok())
                .unwrap_or(false)
        }

        fn viewport(&self) -> Option<(u32, u32)> {
            let window = self.window.as_ref()?;
            let width = window.inner_width().ok()?.as_f64()?;
            let height = window.inner_height().ok()?.as_f64()?;
            Some((width.max(0.0) as u32, height.max(0.0) as u32))
        }

        fn portrait(&self) -> Option<bool> {
            self.window
                .as_ref()?
                .match_media("(orientation: portrait)")
                .ok()
                .flatten()
                .map(|query| query.matches())
        }

        fn device_pixel_ratio(&self) -> Option<f64> {
            self.window.as_ref().map(|w| w.device_pixel_ratio())
        }

        fn microphone_state(&self) -> LocalBoxFuture<'_, Result<String, ProbeError>> {
            Box::pin(async move {
                let permissions = self
                    .window()?
                    .navigator()
                    .permissions()
                    .map_err(|err| rejected("navigator.permissions", err))?;

                let descriptor = js_sys::Object::new();
                js_sys::Reflect::set(
                    &descriptor,
                    &JsValue::from_str("name"),
                    &JsValue::from_str("microphone"),
                )
                .map_err(|err| rejected("permissions.query", err))?;

                let promise = permissions
                    .query(&descriptor)
                    .map_err(|err| rejected("permissions.query", err))?;
                let status = JsFuture::from(promise)
                    .await
                    .map_err(|err| rejected("permissions.query", err))?;

                property(&status, "state")
                    .and_then(|state| state.as_string())
                    .ok_or(ProbeError::Unavailable("PermissionStatus.state"))
            })
        }

        fn open_popup(&self) -> Result<Option<Self::Popup>, ProbeError> {
            let popup = self
                .window()?
                .open_with_url_and_target_and_features("", "_blank", "width=100,height=100")
                .map_err(|err| rejected("window.open", err))?;
            Ok(popup.map(WebPopup))
        }

        fn pdf_viewer_available(&self) -> bool {
            let Some(window) = self.window.as_ref() else {
                return false;
            };
            let navigator = window.navigator();

            let registered = navigator
                .mime_types()
                .ok()
                .and_then(|types| types.named_item("application/pdf"))
                .is_some();
            if registered {
                return true;
            }

            // Newer browsers empty the MIME registry but still expose this flag.
            property(&navigator, "pdfViewerEnabled")
                .and_then(|flag| flag.as_bool())
                .unwrap_or(false)
        }
    }
}

/// Whether [`copy_to_clipboard`] can succeed on this target. Only the browser build has one.
pub const CLIPBOARD_AVAILABLE: bool = cfg!(target_arch = "wasm32");

/// Copy `payload` to the clipboard via a hidden textarea.
#[cfg(target_arch = "wasm32")]
pub fn copy_to_clipboard(payload: &str) -> Result<(), String> {
    use wasm_bindgen::JsCast;

    let window = web_sys::window().ok_or("window unavailable")?;
    let document = window.document().ok_or("document unavailable")?;
    let body = document.body().ok_or("missing body")?;

    let textarea = document
        .create_element("textarea")
        .map_err(|_| "Unable to create textarea")?
        .dyn_into::<web_sys::HtmlTextAreaElement>()
        .map_err(|_| "Textarea cast failed")?;
    textarea.set_value(payload);
    let style = textarea.style();
    style.set_property("position", "fixed").ok();
    style.set_property("opacity", "0").ok();

    body.append_child(&textarea).ok();
    textarea.select();
    let copied = document
        .dyn_ref::<web_sys::HtmlDocument>()
        .map(|doc| doc.exec_command("copy").unwrap_or(false))
        .unwrap_or(false);
    textarea.remove();

    if copied {
        Ok(())
    } else {
        Err("Clipboard copy blocked".into())
    }
}

/// The checker only ships as a web build; native targets have no clipboard to reach.
#[cfg(not(target_arch = "wasm32"))]
pub fn copy_to_clipboard(_payload: &str) -> Result<(), String> {
    Err("Clipboard unavailable outside the browser".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_environment_reports_nothing() {
        let env = StaticEnvironment::headless();
        assert!(env.user_agent().is_none());
        assert!(env.viewport().is_none());
        assert!(!env.touch_capable());
        assert!(!env.pdf_viewer_available());
        assert!(matches!(env.open_popup(), Ok(None)));
    }

    #[test]
    fn static_popup_counts_close_on_drop() {
        let env = StaticEnvironment::desktop("test");
        let popup = env.open_popup().expect("probe ok");
        assert!(popup.is_some());
        assert_eq!(env.popups_closed(), 0);
        drop(popup);
        assert_eq!(env.popups_closed(), 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_builds_report_no_clipboard() {
        assert!(!CLIPBOARD_AVAILABLE);
        assert!(copy_to_clipboard("{}").is_err());
    }

    #[test]
    fn probe_error_messages() {
        assert_eq!(
            ProbeError::Unavailable("window").to_string(),
            "window is unavailable"
        );
        let err = ProbeError::Rejected {
            api: "permissions.query",
            message: "TypeError".into(),
        };
        assert_eq!(err.to_string(), "permissions.query failed: TypeError");
    }
}
