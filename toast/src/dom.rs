use std::fmt;
use std::rc::Rc;

use model::TrustedMarkup;

/// Click listener. Called with the node it was attached to.
pub type Listener<N> = Rc<dyn Fn(&N)>;

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomError {
    /// Element kind the document refuses to create
    InvalidTagName(String),
    /// Class token that is empty or contains whitespace
    InvalidToken(String),
    /// Inserting a node into itself or one of its descendants
    Hierarchy,
    MissingBody,
    /// Exception raised by the host document, stringified
    Host(String),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DomError::InvalidTagName(tag) => write!(f, "invalid tag name {:?}", tag),
            DomError::InvalidToken(token) => write!(f, "invalid class token {:?}", token),
            DomError::Hierarchy => write!(f, "node cannot be inserted at this point in the hierarchy"),
            DomError::MissingBody => write!(f, "document has no body"),
            DomError::Host(msg) => write!(f, "host error: {}", msg),
        }
    }
}

impl std::error::Error for DomError {}

/// The slice of a document object model the toast manager needs.
///
/// Node handles are cheap to clone and compare by identity.
pub trait Dom: 'static {
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    /// True while the document is still parsing
    fn is_loading(&self) -> bool;

    /// Run `f` once the document finishes loading
    fn when_ready(&self, f: Box<dyn FnOnce()>) -> Result<(), DomError>;

    fn body(&self) -> Option<Self::Node>;

    fn create_element(&self, tag: &str) -> Result<Self::Node, DomError>;

    /// Append `child` as the last child of `parent`, moving it if already attached
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    /// Detach `node` from its parent. No-op when already detached.
    fn remove(&self, node: &Self::Node);

    /// Whether `node` is attached to the document
    fn is_connected(&self, node: &Self::Node) -> bool;

    /// Parent element, `None` for detached nodes and the document root
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn last_child(&self, parent: &Self::Node) -> Option<Self::Node>;

    /// Snapshot of the element children of `parent`, in order
    fn children(&self, parent: &Self::Node) -> Vec<Self::Node>;

    fn add_class(&self, node: &Self::Node, class: &str) -> Result<(), DomError>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn set_id(&self, node: &Self::Node, id: &str);

    /// Set literal text content, never parsed as markup
    fn set_text(&self, node: &Self::Node, text: &str);

    fn set_inner_html(&self, node: &Self::Node, markup: &TrustedMarkup);

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<(), DomError>;

    fn set_style(&self, node: &Self::Node, property: &str, value: &str) -> Result<(), DomError>;

    /// Rendered height of `node`, 0 when it isn't laid out
    fn offset_height(&self, node: &Self::Node) -> i32;

    /// Attach `listener` to `node`. It lives as long as `node` does.
    fn on_click(&self, node: &Self::Node, listener: Listener<Self::Node>);
}
