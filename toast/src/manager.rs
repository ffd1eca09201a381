//! The toast manager: owns the container and stages each toast's lifecycle.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use log::*;
use rand::{distributions::Alphanumeric, Rng};

use model::{
    ButtonSpec,
    DismissAfter,
    ToastOptions,
    TrustedMarkup,
    DEFAULT_TYPE,
};
use toast_config::ToastConfig;

use crate::{
    classes,
    dom::{Dom, DomError},
    error::ToastError,
    lifecycle::ToastState,
    scheduler::Scheduler,
};

struct Inner<D: Dom, S: Scheduler> {
    dom: D,
    scheduler: S,
    config: ToastConfig,
    container: RefCell<Option<D::Node>>,
}

/// Handle to a toast manager. Clones share the same container.
///
/// Everything runs on one thread: the deferred steps go through the
/// [`Scheduler`] and run on the same thread that scheduled them.
pub struct ToastManager<D: Dom, S: Scheduler> {
    inner: Rc<Inner<D, S>>,
}

impl<D: Dom, S: Scheduler> Clone for ToastManager<D, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<D: Dom, S: Scheduler> fmt::Debug for ToastManager<D, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ToastManager")
            .field("container", &self.inner.container.borrow())
            .finish()
    }
}

fn random_id(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

impl<D: Dom, S: Scheduler> ToastManager<D, S> {
    pub fn new(dom: D, scheduler: S, config: ToastConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                dom,
                scheduler,
                config,
                container: RefCell::new(None),
            }),
        }
    }

    pub fn dom(&self) -> &D {
        &self.inner.dom
    }

    pub fn scheduler(&self) -> &S {
        &self.inner.scheduler
    }

    pub fn config(&self) -> &ToastConfig {
        &self.inner.config
    }

    /// The container, once `init` has run
    pub fn container(&self) -> Option<D::Node> {
        self.inner.container.borrow().clone()
    }

    /// Set up the container, now or once the document finishes loading.
    ///
    /// Safe to call more than once, only the first successful setup creates
    /// a container.
    pub fn init(&self) -> Result<(), ToastError> {
        if !self.inner.dom.is_loading() {
            return self.mount();
        }

        debug!("document still loading, deferring toast container setup");
        let manager = Rc::downgrade(&self.inner);
        self.inner.dom.when_ready(Box::new(move || {
            if let Some(inner) = manager.upgrade() {
                if let Err(e) = (ToastManager { inner }).mount() {
                    error!("failed to set up toast container: {}", e);
                }
            }
        }))?;

        Ok(())
    }

    fn mount(&self) -> Result<(), ToastError> {
        if self.inner.container.borrow().is_some() {
            debug!("toast container already set up");
            return Ok(());
        }

        let dom = &self.inner.dom;
        let body = dom.body().ok_or(DomError::MissingBody)?;
        let container = dom.create_element("div")?;
        for class in &self.inner.config.container_classes {
            dom.add_class(&container, class)?;
        }
        dom.append_child(&body, &container)?;

        *self.inner.container.borrow_mut() = Some(container);
        debug!("toast container ready");

        Ok(())
    }

    /// Insert an arbitrary element as the last child of the container
    pub fn append(&self, elem: &D::Node) -> Result<(), ToastError> {
        let container = self.container().ok_or(ToastError::NotInitialized)?;
        self.inner.dom.append_child(&container, elem)?;
        Ok(())
    }

    /// Build a toast, insert it, and start its open transition.
    ///
    /// Nothing is inserted when building the element tree fails.
    pub fn create(&self, message: &str, options: ToastOptions) -> Result<DismissHandle<D, S>, ToastError> {
        let container = self.container().ok_or(ToastError::NotInitialized)?;
        let options = options.resolve();
        let types: Vec<&str> = options.type_classes().collect();
        if types.is_empty() {
            return Err(ToastError::InvalidOptions(format!("type {:?} names no class", options.kind)));
        }

        let dom = &self.inner.dom;
        let elem = dom.create_element("div")?;
        let wrapper = dom.create_element("div")?;
        let content_container = dom.create_element("div")?;
        let content = dom.create_element("div")?;

        let id = random_id(self.inner.config.id_length);
        dom.set_id(&elem, &id);
        dom.add_class(&elem, classes::MESSAGE)?;
        for class in types {
            dom.add_class(&elem, class)?;
        }
        dom.add_class(&content_container, classes::CONTENT_CONTAINER)?;
        dom.add_class(&content, classes::CONTENT)?;
        dom.set_text(&content, message);

        dom.append_child(&content_container, &content)?;
        dom.append_child(&wrapper, &content_container)?;

        if options.show_close_button {
            let close = self.close_button()?;
            dom.append_child(&wrapper, &close)?;
        }

        dom.append_child(&elem, &wrapper)?;

        if !options.buttons.is_empty() {
            let row = dom.create_element("div")?;
            dom.add_class(&row, classes::BUTTONS)?;
            for button in &options.buttons {
                let button = self.action_button(button)?;
                dom.append_child(&row, &button)?;
            }
            dom.append_child(&content_container, &row)?;
        }

        dom.append_child(&container, &elem)?;

        // Pin the height so the stylesheet can transition max-height both ways
        let height = dom.offset_height(&elem);
        dom.set_style(&elem, "max-height", &format!("{}px", height))?;

        {
            let manager = self.clone();
            let elem = elem.clone();
            self.inner.scheduler.set_timeout(self.inner.config.open_delay, Box::new(move || {
                manager.transition(&elem, ToastState::Opening);
            }));
        }

        if let DismissAfter::After(ms) = options.dismiss_after {
            let delay = ms.saturating_add(self.inner.config.auto_dismiss_offset);
            self.dismiss(Some(elem.clone()), Some(delay));
        }

        debug!("created toast {} ({})", id, options.kind);

        Ok(DismissHandle {
            manager: self.clone(),
            toast: elem,
        })
    }

    fn close_button(&self) -> Result<D::Node, ToastError> {
        let dom = &self.inner.dom;
        let close = dom.create_element("div")?;
        dom.add_class(&close, classes::CLOSE)?;
        dom.set_inner_html(&close, &TrustedMarkup::from_trusted(self.inner.config.close_icon.as_str()));

        // The document owns this listener, it holds neither the manager nor the toast
        let manager: Weak<Inner<D, S>> = Rc::downgrade(&self.inner);
        dom.on_click(&close, Rc::new(move |close: &D::Node| {
            let manager = match manager.upgrade() {
                Some(inner) => ToastManager { inner },
                None => return,
            };

            match manager.enclosing_toast(close) {
                Some(toast) => manager.dismiss(Some(toast), None),
                None => warn!("close control {:?} is not inside a toast", close),
            }
        }));

        Ok(close)
    }

    /// Nearest ancestor of `node` that is a toast message
    fn enclosing_toast(&self, node: &D::Node) -> Option<D::Node> {
        let dom = &self.inner.dom;
        let mut cursor = dom.parent(node);
        while let Some(candidate) = cursor {
            if dom.has_class(&candidate, classes::MESSAGE) {
                return Some(candidate);
            }
            cursor = dom.parent(&candidate);
        }
        None
    }

    fn action_button(&self, spec: &ButtonSpec) -> Result<D::Node, ToastError> {
        let dom = &self.inner.dom;
        let button = dom.create_element(spec.tag())?;

        for class in spec.class_name.split_whitespace() {
            dom.add_class(&button, class)?;
        }
        dom.set_inner_html(&button, &spec.inner_html);

        if let Some(href) = spec.href.as_deref().filter(|h| !h.is_empty()) {
            dom.set_attribute(&button, "href", href)?;
        }
        if let Some(handler) = &spec.on_click {
            let handler = handler.clone();
            dom.on_click(&button, Rc::new(move |_: &D::Node| handler.call()));
        }

        Ok(button)
    }

    /// `create` with a 5 second auto-dismiss and the `default` type, unless
    /// the caller says otherwise.
    pub fn default(&self, message: &str, options: ToastOptions) -> Result<DismissHandle<D, S>, ToastError> {
        let defaults = ToastOptions::new()
            .kind(DEFAULT_TYPE)
            .dismiss_after(self.inner.config.default_dismiss_after);

        self.create(message, options.or(defaults))
    }

    pub fn success(&self, message: &str, options: ToastOptions) -> Result<DismissHandle<D, S>, ToastError> {
        self.default(message, options.or(ToastOptions::new().kind("success")))
    }

    pub fn error(&self, message: &str, options: ToastOptions) -> Result<DismissHandle<D, S>, ToastError> {
        self.default(message, options.or(ToastOptions::new().kind("error")))
    }

    pub fn info(&self, message: &str, options: ToastOptions) -> Result<DismissHandle<D, S>, ToastError> {
        self.default(message, options.or(ToastOptions::new().kind("info")))
    }

    pub fn warning(&self, message: &str, options: ToastOptions) -> Result<DismissHandle<D, S>, ToastError> {
        self.default(message, options.or(ToastOptions::new().kind("warning")))
    }

    /// Close `target` after `delay`, then remove it once the close transition is done.
    ///
    /// Without a target, the container's last child at the time of the call
    /// is dismissed. Missing or already removed targets are skipped, this
    /// never fails.
    pub fn dismiss(&self, target: Option<D::Node>, delay: Option<u32>) {
        let target = match target.or_else(|| self.last_toast()) {
            Some(t) => t,
            None => {
                debug!("dismiss with nothing to dismiss");
                return;
            }
        };

        let delay = delay.unwrap_or(self.inner.config.dismiss_delay);
        let manager = self.clone();
        self.inner.scheduler.set_timeout(delay, Box::new(move || manager.begin_close(target)));
    }

    /// Dismiss every toast currently in the container
    pub fn dismiss_all(&self) {
        let container = match self.container() {
            Some(c) => c,
            None => {
                debug!("dismiss_all before init, nothing to do");
                return;
            }
        };

        // Snapshot first, removal below us is deferred but the view may still shift
        let toasts = self.inner.dom.children(&container);
        debug!("dismissing {} toast(s)", toasts.len());
        for toast in toasts {
            self.dismiss(Some(toast), None);
        }
    }

    pub fn state(&self, toast: &D::Node) -> ToastState {
        ToastState::of(&self.inner.dom, toast)
    }

    fn begin_close(&self, target: D::Node) {
        if !self.transition(&target, ToastState::Closing) {
            return;
        }

        let manager = self.clone();
        self.inner.scheduler.set_timeout(self.inner.config.close_delay, Box::new(move || {
            manager.transition(&target, ToastState::Removed);
        }));
    }

    fn last_toast(&self) -> Option<D::Node> {
        let container = self.container()?;
        self.inner.dom.last_child(&container)
    }

    /// Move `toast` into state `to`. Returns false when it was already past that point.
    fn transition(&self, toast: &D::Node, to: ToastState) -> bool {
        let from = self.state(toast);
        if !from.can_become(to) {
            debug!("toast {:?} is {}, not moving to {}", toast, from, to);
            return false;
        }

        let dom = &self.inner.dom;
        match to.marker() {
            Some(class) => {
                if let Err(e) = dom.add_class(toast, class) {
                    warn!("could not mark toast {:?} as {}: {}", toast, to, e);
                }
            }
            None => dom.remove(toast),
        }
        trace!("toast {:?}: {} -> {}", toast, from, to);

        true
    }
}

/// Dismisses one specific toast, returned by [`ToastManager::create`].
pub struct DismissHandle<D: Dom, S: Scheduler> {
    manager: ToastManager<D, S>,
    toast: D::Node,
}

impl<D: Dom, S: Scheduler> DismissHandle<D, S> {
    /// Dismiss this toast after `delay`, or the default delay when `None`
    pub fn dismiss(&self, delay: Option<u32>) {
        self.manager.dismiss(Some(self.toast.clone()), delay);
    }

    pub fn element(&self) -> &D::Node {
        &self.toast
    }

    pub fn state(&self) -> ToastState {
        self.manager.state(&self.toast)
    }
}

impl<D: Dom, S: Scheduler> Clone for DismissHandle<D, S> {
    fn clone(&self) -> Self {
        Self {
            manager: self.manager.clone(),
            toast: self.toast.clone(),
        }
    }
}

impl<D: Dom, S: Scheduler> fmt::Debug for DismissHandle<D, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DismissHandle")
            .field("toast", &self.toast)
            .finish()
    }
}
