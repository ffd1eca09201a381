use std::fmt;

use crate::dom::DomError;

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToastError {
    /// Called before the container was set up
    NotInitialized,
    InvalidOptions(String),
    Dom(DomError),
}

impl fmt::Display for ToastError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ToastError::NotInitialized => write!(f, "toast container is not initialized"),
            ToastError::InvalidOptions(why) => write!(f, "invalid toast options: {}", why),
            ToastError::Dom(e) => write!(f, "document error: {}", e),
        }
    }
}

impl std::error::Error for ToastError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToastError::Dom(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DomError> for ToastError {
    fn from(e: DomError) -> Self {
        ToastError::Dom(e)
    }
}
