//! Browser frontend for the toast manager.
//!
//! The module sets itself up on load and exposes the imperative API to JS:
//!
//! ```js
//! import { success, dismissAll } from "./webdash.js";
//!
//! const handle = success("Saved!", { buttons: [{ className: "undo", innerHTML: "Undo", onclick: undo }] });
//! handle.dismiss();
//! ```

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use toast::{DismissHandle, ToastError, ToastManager, ToastOptions};
use toast_config::read_config;

pub mod options;
pub mod timeout;
pub mod webdocument;

pub use timeout::TimeoutScheduler;
pub use webdocument::WebDocument;

pub type WebManager = ToastManager<WebDocument, TimeoutScheduler>;

thread_local! {
    // The page's one manager, created by `init`
    static MANAGER: RefCell<Option<WebManager>> = RefCell::new(None);
}

fn to_js(e: ToastError) -> JsValue {
    JsError::new(&e.to_string()).into()
}

fn current() -> Option<WebManager> {
    MANAGER.with(|m| m.borrow().clone())
}

fn manager() -> Result<WebManager, JsValue> {
    current().ok_or_else(|| to_js(ToastError::NotInitialized))
}

/// Handle returned to JS for a single toast
#[wasm_bindgen]
pub struct ToastHandle {
    inner: DismissHandle<WebDocument, TimeoutScheduler>,
}

#[wasm_bindgen]
impl ToastHandle {
    /// Dismiss this toast, after `delay` ms if given
    pub fn dismiss(&self, delay: Option<u32>) {
        self.inner.dismiss(delay);
    }

    #[wasm_bindgen(getter)]
    pub fn element(&self) -> Element {
        self.inner.element().clone()
    }
}

impl From<DismissHandle<WebDocument, TimeoutScheduler>> for ToastHandle {
    fn from(inner: DismissHandle<WebDocument, TimeoutScheduler>) -> Self {
        Self {
            inner,
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::default());
    init()
}

/// Create the manager and its container. Runs on load, calling it again is harmless.
#[wasm_bindgen]
pub fn init() -> Result<(), JsValue> {
    let manager = MANAGER.with(|m| {
        let mut m = m.borrow_mut();
        if m.is_none() {
            let document = WebDocument::current()
                .ok_or_else(|| JsError::new("no document to attach toasts to"))?;
            let config = read_config!(toast).clone();
            log::debug!("toast config = {:?}", config);
            *m = Some(ToastManager::new(document, TimeoutScheduler, config));
        }
        Ok::<_, JsValue>(m.clone())
    })?;

    match manager {
        Some(manager) => manager.init().map_err(to_js),
        None => Err(to_js(ToastError::NotInitialized)),
    }
}

/// Insert an arbitrary element at the end of the toast container
#[wasm_bindgen]
pub fn append(element: &Element) -> Result<(), JsValue> {
    manager()?.append(element).map_err(to_js)
}

#[wasm_bindgen]
pub fn create(message: &str, options: JsValue) -> Result<ToastHandle, JsValue> {
    let options = options::toast_options(&options)?;
    manager()?.create(message, options).map(ToastHandle::from).map_err(to_js)
}

// `default` is taken by ES module default exports
#[wasm_bindgen(js_name = defaultToast)]
pub fn default_toast(message: &str, options: JsValue) -> Result<ToastHandle, JsValue> {
    let options = options::toast_options(&options)?;
    manager()?.default(message, options).map(ToastHandle::from).map_err(to_js)
}

fn severity(message: &str, options: JsValue, kind: &str) -> Result<ToastHandle, JsValue> {
    let options = options::toast_options(&options)?.or(ToastOptions::new().kind(kind));
    manager()?.default(message, options).map(ToastHandle::from).map_err(to_js)
}

#[wasm_bindgen]
pub fn success(message: &str, options: JsValue) -> Result<ToastHandle, JsValue> {
    severity(message, options, "success")
}

#[wasm_bindgen]
pub fn error(message: &str, options: JsValue) -> Result<ToastHandle, JsValue> {
    severity(message, options, "error")
}

#[wasm_bindgen]
pub fn info(message: &str, options: JsValue) -> Result<ToastHandle, JsValue> {
    severity(message, options, "info")
}

#[wasm_bindgen]
pub fn warning(message: &str, options: JsValue) -> Result<ToastHandle, JsValue> {
    severity(message, options, "warning")
}

/// Dismiss `element`, or the last toast. Does nothing before `init`.
#[wasm_bindgen]
pub fn dismiss(element: Option<Element>, delay: Option<u32>) {
    match current() {
        Some(manager) => manager.dismiss(element, delay),
        None => log::debug!("dismiss before init, nothing to do"),
    }
}

/// Dismiss every toast. Does nothing before `init`.
#[wasm_bindgen(js_name = dismissAll)]
pub fn dismiss_all() {
    match current() {
        Some(manager) => manager.dismiss_all(),
        None => log::debug!("dismissAll before init, nothing to do"),
    }
}
