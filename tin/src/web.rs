//! Helpers for interacting with the browser environment, and the browser
//! [`Backend`].

use wasm_bindgen::{closure::Closure, JsCast, JsValue};

use crate::{
    backend::Backend,
    vdom::{Event, EventHandler},
    Error, Result,
};

thread_local! {
    static DOCUMENT: once_cell::unsync::OnceCell<Option<web_sys::Document>> =
        once_cell::unsync::OnceCell::new();
}

pub fn window() -> Option<web_sys::Window> {
    web_sys::window()
}

/// The global document. `None` outside of a browser main thread.
pub fn document() -> Option<web_sys::Document> {
    DOCUMENT.with(|doc| {
        doc.get_or_init(|| window().and_then(|w| w.document()))
            .clone()
    })
}

/// `web-sys` has no binding for `ChildNode.replaceWith` on plain nodes, which
/// is needed to swap text nodes and elements alike.
#[wasm_bindgen::prelude::wasm_bindgen(inline_js = "
export function __tin_node_replace_with(old, node) {
    old.replaceWith(node);
}
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn __tin_node_replace_with(
        old: &web_sys::Node,
        node: &web_sys::Node,
    ) -> std::result::Result<(), JsValue>;
}

fn js_error(op: &'static str, err: JsValue) -> Error {
    let message = err.as_string().unwrap_or_else(|| format!("{:?}", err));
    Error::backend(op, message)
}

fn as_element<'a>(op: &'static str, node: &'a web_sys::Node) -> Result<&'a web_sys::Element> {
    node.dyn_ref::<web_sys::Element>()
        .ok_or_else(|| Error::backend(op, "node is not an element"))
}

/// Renders into the browser dom.
#[derive(Clone, Debug)]
pub struct WebBackend {
    document: web_sys::Document,
}

impl WebBackend {
    /// Use the global document.
    pub fn new() -> Result<Self> {
        let document = document().ok_or_else(|| Error::backend("document", "no global document"))?;
        Ok(Self { document })
    }

    pub fn with_document(document: web_sys::Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

impl Backend for WebBackend {
    type Node = web_sys::Node;

    fn create_element(&self, tag: &str) -> Result<web_sys::Node> {
        self.document
            .create_element(tag)
            .map(Into::into)
            .map_err(|err| js_error("create_element", err))
    }

    fn create_text_node(&self, text: &str) -> Result<web_sys::Node> {
        Ok(self.document.create_text_node(text).into())
    }

    fn set_attribute(&self, node: &web_sys::Node, name: &str, value: &str) -> Result<()> {
        as_element("set_attribute", node)?
            .set_attribute(name, value)
            .map_err(|err| js_error("set_attribute", err))
    }

    fn add_event_listener(
        &self,
        node: &web_sys::Node,
        event: &str,
        handler: EventHandler,
    ) -> Result<()> {
        let name = event.to_string();
        let closure = Closure::wrap(Box::new(move |native: web_sys::Event| {
            let ev = Event::from_native(&name, native);
            if let Err(err) = handler.call(&ev) {
                tracing::error!(event=%ev.name(), error=%err, "event handler failed");
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        node.add_event_listener_with_callback(
            event,
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
        )
        .map_err(|err| js_error("add_event_listener", err))?;

        // Listeners are never removed, not even from replaced nodes, so the
        // closure has to live for the rest of the page.
        closure.forget();
        Ok(())
    }

    fn append_child(&self, parent: &web_sys::Node, child: &web_sys::Node) -> Result<()> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|err| js_error("append_child", err))
    }

    fn replace_with(&self, old: &web_sys::Node, new: &web_sys::Node) -> Result<()> {
        __tin_node_replace_with(old, new).map_err(|err| js_error("replace_with", err))
    }

    fn clear_children(&self, node: &web_sys::Node) -> Result<()> {
        node.set_text_content(None);
        Ok(())
    }
}
