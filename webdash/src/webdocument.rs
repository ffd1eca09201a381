use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Document, Element, Event, HtmlElement};

use model::TrustedMarkup;
use toast::{Dom, DomError, Listener};

/// Turn a thrown JS value into something loggable
pub fn js_error(e: JsValue) -> DomError {
    match e.dyn_ref::<js_sys::Error>() {
        Some(err) => DomError::Host(String::from(err.message())),
        None => DomError::Host(format!("{:?}", e)),
    }
}

/// The browser's document, as seen by the toast manager
#[derive(Clone, Debug)]
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    pub fn new(document: Document) -> Self {
        Self {
            document,
        }
    }

    /// The document of the current window, if there is one
    pub fn current() -> Option<Self> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(Self::new)
    }
}

impl Dom for WebDocument {
    type Node = Element;

    fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    fn when_ready(&self, f: Box<dyn FnOnce()>) -> Result<(), DomError> {
        let callback = Closure::once_into_js(move || f());
        self.document
            .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
            .map_err(js_error)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn create_element(&self, tag: &str) -> Result<Element, DomError> {
        self.document.create_element(tag).map_err(|e| {
            log::debug!("create_element({:?}) threw: {:?}", tag, e);
            DomError::InvalidTagName(tag.to_string())
        })
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent.append_child(child).map(|_| ()).map_err(js_error)
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn is_connected(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn last_child(&self, parent: &Element) -> Option<Element> {
        parent.last_element_child()
    }

    fn children(&self, parent: &Element) -> Vec<Element> {
        let children = parent.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn add_class(&self, node: &Element, class: &str) -> Result<(), DomError> {
        node.class_list().add_1(class).map_err(|_| DomError::InvalidToken(class.to_string()))
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_id(&self, node: &Element, id: &str) {
        node.set_id(id);
    }

    fn set_text(&self, node: &Element, text: &str) {
        match node.dyn_ref::<HtmlElement>() {
            Some(html) => html.set_inner_text(text),
            None => node.set_text_content(Some(text)),
        }
    }

    fn set_inner_html(&self, node: &Element, markup: &TrustedMarkup) {
        node.set_inner_html(markup.as_str());
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) -> Result<(), DomError> {
        node.set_attribute(name, value).map_err(js_error)
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) -> Result<(), DomError> {
        match node.dyn_ref::<HtmlElement>() {
            Some(html) => html.style().set_property(property, value).map_err(js_error),
            // Not an HTML element, nothing to transition
            None => Ok(()),
        }
    }

    fn offset_height(&self, node: &Element) -> i32 {
        node.dyn_ref::<HtmlElement>()
            .map(|html| html.offset_height())
            .unwrap_or(0)
    }

    fn on_click(&self, node: &Element, listener: Listener<Element>) {
        let callback = Closure::wrap(Box::new(move |event: Event| {
            match event.current_target().and_then(|t| t.dyn_into::<Element>().ok()) {
                Some(target) => listener(&target),
                None => log::warn!("click event without a target element"),
            }
        }) as Box<dyn FnMut(Event)>);

        // Ownership moves to the JS function, which is collected together with
        // the element when the module is built with `--weak-refs`
        let callback = callback.into_js_value();

        if let Err(e) = node.add_event_listener_with_callback("click", callback.unchecked_ref()) {
            log::error!("failed to attach click listener: {:?}", e);
        }
    }
}
