//! Toast notifications over an abstract document.
//!
//! The [`ToastManager`] owns a single container element and appends transient
//! message elements to it, staging their open and close transitions with
//! timers. The document and the timers are collaborators behind the [`Dom`]
//! and [`Scheduler`] traits. [`MemoryDom`] and [`VirtualScheduler`] let the
//! whole lifecycle run natively with virtual time.

pub mod classes;
pub mod dom;
pub mod error;
pub mod lifecycle;
pub mod manager;
pub mod memorydom;
pub mod scheduler;

pub use dom::{Dom, DomError, Listener};
pub use error::ToastError;
pub use lifecycle::ToastState;
pub use manager::{DismissHandle, ToastManager};
pub use memorydom::{MemoryDom, NodeId};
pub use scheduler::{Scheduler, VirtualScheduler};

// Re-exports so frontends only need to depend on this crate
pub use model::{ButtonSpec, ClickHandler, DismissAfter, ToastOptions, TrustedMarkup};
pub use toast_config::ToastConfig;
