use serde::{Deserialize, Serialize};

const CLOSE_ICON: &str = r##"<svg class="svg-icon" style="width: 10px; height: 10px;vertical-align: middle;fill: currentColor;overflow: hidden;" viewBox="0 0 1024 1024" version="1.1" xmlns="http://www.w3.org/2000/svg"><path d="M895.156706 86.256941a30.177882 30.177882 0 0 1 42.767059-0.180706c11.745882 11.745882 11.745882 30.870588-0.180706 42.767059L128.843294 937.743059c-11.866353 11.866353-30.930824 12.047059-42.767059 0.180706-11.745882-11.745882-11.745882-30.870588 0.180706-42.767059L895.156706 86.256941z" fill="#000000" /><path d="M86.076235 86.076235c11.745882-11.745882 30.870588-11.745882 42.767059 0.180706l808.899765 808.899765c11.866353 11.866353 12.047059 30.930824 0.180706 42.767059-11.745882 11.745882-30.870588 11.745882-42.767059-0.180706L86.256941 128.843294a30.177882 30.177882 0 0 1-0.180706-42.767059z" fill="#000000" /><path d="M0 0h1024v1024H0z" fill="#FFF4F4" fill-opacity="0" /></svg>"##;

/// Timing and presentation knobs for the toast manager.
/// All delays are in milliseconds.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
#[allow(unused)]
pub struct ToastConfig {
    /// Delay before `should-open` is added to a freshly inserted toast
    pub open_delay: u32,
    /// Delay used by `dismiss` when the caller doesn't give one
    pub dismiss_delay: u32,
    /// Time between `should-close` and removal, matches the stylesheet transition
    pub close_delay: u32,
    /// Auto-dismiss used by the default/success/error wrappers
    pub default_dismiss_after: u32,
    /// Added to `dismissAfter` when scheduling the automatic dismissal
    pub auto_dismiss_offset: u32,
    pub id_length: usize,
    pub container_classes: Vec<String>,
    /// Trusted markup for the close control
    pub close_icon: String,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            open_delay: 1,
            dismiss_delay: 1,
            close_delay: 200,
            default_dismiss_after: 5000,
            auto_dismiss_offset: 1,
            id_length: 10,
            container_classes: vec!["toast".to_string(), "toast-container".to_string()],
            close_icon: CLOSE_ICON.to_string(),
        }
    }
}
