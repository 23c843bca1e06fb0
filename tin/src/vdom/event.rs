use std::rc::Rc;

use crate::Result;

/// An event delivered to an [`EventHandler`].
///
/// Events dispatched by the browser carry the native [`web_sys::Event`].
/// Synthetic events (see [`crate::backend::MemNode::dispatch`]) only carry
/// the event name.
#[derive(Clone, Debug)]
pub struct Event {
    name: String,
    native: Option<web_sys::Event>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            native: None,
        }
    }

    pub(crate) fn from_native(name: &str, native: web_sys::Event) -> Self {
        Self {
            name: name.to_string(),
            native: Some(native),
        }
    }

    /// The dom event name, eg "click".
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn native(&self) -> Option<&web_sys::Event> {
        self.native.as_ref()
    }
}

type HandlerFn = dyn Fn(&Event) -> Result<()>;

/// A shared event callback.
///
/// Two handlers are equal only if they point to the same closure.
#[derive(Clone)]
pub struct EventHandler(Rc<HandlerFn>);

impl EventHandler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Event) -> Result<()> + 'static,
    {
        Self(Rc::new(f))
    }

    #[inline]
    pub fn call(&self, event: &Event) -> Result<()> {
        (self.0)(event)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for EventHandler {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl std::fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventHandler")
    }
}
