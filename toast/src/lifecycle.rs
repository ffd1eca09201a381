use std::fmt;

use crate::classes;
use crate::dom::Dom;

/// Where a toast is in its show/dismiss lifecycle.
///
/// ```text
/// Created -> Opening -> Closing -> Removed
/// ```
///
/// The states live in the document as marker classes, so the state of any
/// toast element can be read back without the manager tracking it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ToastState {
    /// Inserted, the open transition hasn't started yet
    Created,
    /// `should-open` is set
    Opening,
    /// `should-close` is set, removal is pending
    Closing,
    /// Detached from the document
    Removed,
}

impl ToastState {
    /// Read the state of `toast` back from the document
    pub fn of<D: Dom>(dom: &D, toast: &D::Node) -> Self {
        if !dom.is_connected(toast) {
            ToastState::Removed
        } else if dom.has_class(toast, classes::SHOULD_CLOSE) {
            ToastState::Closing
        } else if dom.has_class(toast, classes::SHOULD_OPEN) {
            ToastState::Opening
        } else {
            ToastState::Created
        }
    }

    /// Marker class that puts an element in this state
    pub fn marker(self) -> Option<&'static str> {
        match self {
            ToastState::Opening => Some(classes::SHOULD_OPEN),
            ToastState::Closing => Some(classes::SHOULD_CLOSE),
            ToastState::Created | ToastState::Removed => None,
        }
    }

    /// Transitions only move forward. A toast dismissed before it opened
    /// skips straight to closing.
    pub fn can_become(self, to: Self) -> bool {
        to > self
    }
}

impl fmt::Display for ToastState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ret = match self {
            ToastState::Created => "created",
            ToastState::Opening => "opening",
            ToastState::Closing => "closing",
            ToastState::Removed => "removed",
        };

        write!(f, "{}", ret)
    }
}
