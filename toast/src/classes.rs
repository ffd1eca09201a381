// Structural class names, the stylesheet keys off these

pub const MESSAGE: &str = "toast-message";
pub const CONTENT_CONTAINER: &str = "toast-content-container";
pub const CONTENT: &str = "toast-content";
pub const CLOSE: &str = "toast-close";
pub const BUTTONS: &str = "toast-buttons";

// Transition markers
pub const SHOULD_OPEN: &str = "should-open";
pub const SHOULD_CLOSE: &str = "should-close";
