//! Rendering backends.
//!
//! The engine never touches a document directly. It goes through a
//! [`Backend`], which owns node creation and the handful of mutations the
//! engine needs.

mod memory;

pub use self::memory::{MemNode, MemoryBackend, Stats};

use crate::{vdom::EventHandler, Result};

pub trait Backend: 'static {
    /// Handle to a live node. Equality must be node identity.
    type Node: Clone + PartialEq + 'static;

    fn create_element(&self, tag: &str) -> Result<Self::Node>;

    fn create_text_node(&self, text: &str) -> Result<Self::Node>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<()>;

    /// Register a listener. Listeners are never removed by the engine.
    fn add_event_listener(&self, node: &Self::Node, event: &str, handler: EventHandler)
        -> Result<()>;

    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    /// Put `new` in the place of `old`.
    ///
    /// A detached `old` node is left alone.
    fn replace_with(&self, old: &Self::Node, new: &Self::Node) -> Result<()>;

    /// Remove all children of `node`.
    fn clear_children(&self, node: &Self::Node) -> Result<()>;
}
