use serde::{
    Serialize,
    Deserialize,
};

use std::fmt;

/// Markup that is injected verbatim with `innerHTML` semantics.
///
/// Plain text never goes through this type, so every raw injection point
/// in the tree is a place that constructs one of these.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
    /// Caller vouches that `markup` is safe to inject as-is
    pub fn from_trusted(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrustedMarkup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
