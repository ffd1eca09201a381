use serde::{
    Serialize,
    Serializer,
    Deserialize,
    Deserializer,
};

use crate::{ClickHandler, TrustedMarkup};

pub const DEFAULT_TYPE: &str = "default";
pub const DEFAULT_BUTTON_TAG: &str = "a";

/// When a toast dismisses itself.
///
/// On the wire this is `null` for never, or a number of milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DismissAfter {
    #[default]
    Never,
    After(u32),
}

impl Serialize for DismissAfter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DismissAfter::Never => serializer.serialize_none(),
            DismissAfter::After(ms) => serializer.serialize_some(ms),
        }
    }
}

impl<'de> Deserialize<'de> for DismissAfter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<u32>::deserialize(deserializer)? {
            Some(ms) => DismissAfter::After(ms),
            None => DismissAfter::Never,
        })
    }
}

// A present key always yields Some, even when its value is null
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DismissAfter>, D::Error> {
    DismissAfter::deserialize(deserializer).map(Some)
}

/// Descriptor for one action button in a toast's button row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonSpec {
    /// Element kind, `a` when absent or empty
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub class_name: String,
    #[serde(rename = "innerHTML", default)]
    pub inner_html: TrustedMarkup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip)]
    pub on_click: Option<ClickHandler>,
}

impl ButtonSpec {
    pub fn new(class_name: impl Into<String>, inner_html: TrustedMarkup) -> Self {
        Self {
            class_name: class_name.into(),
            inner_html,
            ..Default::default()
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn on_click(mut self, f: impl Fn() + 'static) -> Self {
        self.on_click = Some(ClickHandler::new(f));
        self
    }

    /// Tag name to create for this button
    pub fn tag(&self) -> &str {
        match self.kind.as_deref() {
            Some(kind) if !kind.is_empty() => kind,
            _ => DEFAULT_BUTTON_TAG,
        }
    }
}

/// Options as supplied by a caller. Every key is optional so that wrappers
/// can layer their own defaults underneath with [`ToastOptions::or`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastOptions {
    /// Whitespace separated type classes, e.g. `"success"` or `"error wide"`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub dismiss_after: Option<DismissAfter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_close_button: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<ButtonSpec>>,
}

impl ToastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn dismiss_after(mut self, ms: u32) -> Self {
        self.dismiss_after = Some(DismissAfter::After(ms));
        self
    }

    /// Never dismiss automatically, even if a wrapper would
    pub fn sticky(mut self) -> Self {
        self.dismiss_after = Some(DismissAfter::Never);
        self
    }

    pub fn show_close_button(mut self, show: bool) -> Self {
        self.show_close_button = Some(show);
        self
    }

    pub fn button(mut self, button: ButtonSpec) -> Self {
        self.buttons.get_or_insert_with(Vec::new).push(button);
        self
    }

    /// Shallow merge: keys set on `self` win, the rest come from `defaults`.
    pub fn or(self, defaults: ToastOptions) -> Self {
        Self {
            kind: self.kind.or(defaults.kind),
            dismiss_after: self.dismiss_after.or(defaults.dismiss_after),
            show_close_button: self.show_close_button.or(defaults.show_close_button),
            buttons: self.buttons.or(defaults.buttons),
        }
    }

    pub fn resolve(self) -> ResolvedOptions {
        self.into()
    }
}

/// Options with every default filled in, what `create` actually works from.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOptions {
    pub kind: String,
    pub dismiss_after: DismissAfter,
    pub show_close_button: bool,
    pub buttons: Vec<ButtonSpec>,
}

impl ResolvedOptions {
    /// Class names derived from the type string
    pub fn type_classes(&self) -> impl Iterator<Item = &str> {
        self.kind.split_whitespace()
    }
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        ToastOptions::default().into()
    }
}

impl From<ToastOptions> for ResolvedOptions {
    fn from(opt: ToastOptions) -> Self {
        Self {
            kind: opt.kind.unwrap_or_else(|| DEFAULT_TYPE.to_string()),
            dismiss_after: opt.dismiss_after.unwrap_or_default(),
            show_close_button: opt.show_close_button.unwrap_or(true),
            buttons: opt.buttons.unwrap_or_default(),
        }
    }
}
