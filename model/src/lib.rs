//! Host-independent types shared by the toast manager and its frontends.
//! Nothing in here touches a document, so it builds the same natively and on wasm.

use std::fmt;
use std::rc::Rc;

pub mod markup;
pub mod options;

pub use markup::TrustedMarkup;
pub use options::*;

/// Callback attached to a clickable element.
///
/// Equality is identity, two handlers are equal only if they share the same closure.
#[derive(Clone)]
pub struct ClickHandler(Rc<dyn Fn()>);

impl ClickHandler {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl PartialEq for ClickHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ClickHandler(..)")
    }
}
