//! The instance engine: turns elements into dom nodes and keeps component
//! state alive across renders.

pub mod hook;
mod instance;
mod shallow;

use std::{
    any::Any,
    cell::RefCell,
    rc::{Rc, Weak},
};

pub use self::{instance::InstanceId, shallow::ShallowEq};
pub(crate) use self::hook::HookHost;

use self::{
    hook::Setter,
    instance::{ComponentInstance, InstanceManager},
};
use crate::{
    backend::Backend,
    component::{Component, Scope},
    vdom::{format_number, AttrValue, Child, Element, ElementKind, Props},
    Config, Error, Result,
};

/// The instance whose component function is currently running, and the
/// number of hooks it has called so far.
#[derive(Clone, Copy, Debug)]
struct RenderFrame {
    instance: InstanceId,
    cursor: usize,
}

struct EngineState<N> {
    instances: InstanceManager<N>,
    frame: Option<RenderFrame>,
    host: Option<N>,
}

struct Inner<B: Backend> {
    backend: B,
    config: Config,
    this: Weak<Inner<B>>,
    state: RefCell<EngineState<B::Node>>,
}

/// Renders element trees through a [`Backend`] and owns all component state.
///
/// Cloning yields another handle to the same engine.
///
/// No borrow of the internal state is held while component functions or
/// event handlers run, so both may freely call back into the engine.
pub struct Engine<B: Backend> {
    inner: Rc<Inner<B>>,
}

impl<B: Backend> Clone for Engine<B> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<B: Backend> Engine<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, Config::default())
    }

    pub fn with_config(backend: B, config: Config) -> Self {
        let inner = Rc::new_cyclic(|this| Inner {
            backend,
            config,
            this: this.clone(),
            state: RefCell::new(EngineState {
                instances: InstanceManager::new(),
                frame: None,
                host: None,
            }),
        });
        Self { inner }
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Render `root` into `host`.
    ///
    /// The existing content of `host` is removed first. Without a host a new
    /// container is created as configured in [`Config`]. Returns the host.
    ///
    /// Calling this again replaces the previous tree. Instances mounted by
    /// earlier calls keep their state and ids.
    pub fn render(
        &self,
        root: impl Into<Option<Element>>,
        host: Option<B::Node>,
    ) -> Result<B::Node> {
        let root = root.into().ok_or(Error::InvalidInput)?;
        self.inner.render(&root, host)
    }

    /// Run the component of an existing instance again and materialize the
    /// result.
    ///
    /// The new node is returned but not put into the document, and the
    /// instance keeps its current node.
    pub fn render_instance(&self, id: InstanceId) -> Result<B::Node> {
        self.inner.render_instance(id)
    }

    /// The state hook.
    ///
    /// Only works while a component is rendering; fails with
    /// [`Error::NoActiveComponent`] otherwise. Components normally use
    /// [`Scope::use_state`] instead.
    pub fn use_state<T>(&self, initial: T) -> Result<(T, Setter<T>)>
    where
        T: Clone + ShallowEq + 'static,
    {
        hook::use_state(&*self.inner, initial)
    }

    /// The host of the last successful [`Self::render`] call.
    pub fn host(&self) -> Option<B::Node> {
        self.inner.state.borrow().host.clone()
    }

    pub fn instance_count(&self) -> usize {
        self.inner.state.borrow().instances.len()
    }

    /// The node currently representing an instance.
    pub fn instance_node(&self, id: InstanceId) -> Option<B::Node> {
        self.inner
            .state
            .borrow()
            .instances
            .get(id)
            .and_then(|instance| instance.node.clone())
    }

    /// Number of state slots an instance has claimed.
    pub fn hook_count(&self, id: InstanceId) -> Option<usize> {
        self.inner
            .state
            .borrow()
            .instances
            .get(id)
            .map(|instance| instance.hooks.len())
    }

    pub fn instance_component(&self, id: InstanceId) -> Option<Component> {
        self.inner
            .state
            .borrow()
            .instances
            .get(id)
            .map(|instance| instance.component.clone())
    }
}

impl<B: Backend> Inner<B> {
    fn render(&self, root: &Element, host: Option<B::Node>) -> Result<B::Node> {
        let host = match host {
            Some(host) => {
                self.backend.clear_children(&host)?;
                host
            }
            None => {
                let container = self.backend.create_element(&self.config.container_tag)?;
                self.backend
                    .set_attribute(&container, "id", &self.config.container_id)?;
                container
            }
        };

        let node = self.materialize(root)?;
        self.backend.append_child(&host, &node)?;

        self.state.borrow_mut().host = Some(host.clone());
        Ok(host)
    }

    fn materialize(&self, element: &Element) -> Result<B::Node> {
        match element.kind() {
            ElementKind::Primitive(tag) => {
                self.materialize_primitive(tag, element.props(), element.children())
            }
            ElementKind::Component(component) => {
                self.mount(component, element.props(), element.children())
            }
        }
    }

    fn materialize_primitive(
        &self,
        tag: &str,
        props: &Props,
        children: &[Child],
    ) -> Result<B::Node> {
        if !is_valid_tag(tag) {
            return Err(Error::InvalidElementType(tag.to_string()));
        }

        let node = self.backend.create_element(tag)?;
        for (key, value) in props.iter() {
            self.apply_attribute(&node, key, value)?;
        }

        for child in children {
            let child_node = match child {
                Child::Text(text) => self.backend.create_text_node(text)?,
                Child::Number(n) => self.backend.create_text_node(&format_number(*n))?,
                Child::Element(elem) => self.materialize(elem)?,
            };
            self.backend.append_child(&node, &child_node)?;
        }

        Ok(node)
    }

    /// `on*` keys are event bindings and never become dom attributes.
    fn apply_attribute(&self, node: &B::Node, key: &str, value: &AttrValue) -> Result<()> {
        match (key.strip_prefix("on"), value) {
            (Some(event), AttrValue::Handler(handler)) if !event.is_empty() => {
                self.backend
                    .add_event_listener(node, &event.to_lowercase(), handler.clone())
            }
            (Some(_), _) => {
                tracing::warn!(attr=%key, "event attribute without an event handler, skipping");
                Ok(())
            }
            (None, AttrValue::Handler(_)) => {
                tracing::warn!(
                    attr=%key,
                    "event handler given for a non-event attribute, skipping"
                );
                Ok(())
            }
            (None, value) => {
                let name = if key == "className" { "class" } else { key };
                let value = value.to_dom_string().unwrap_or_default();
                self.backend.set_attribute(node, name, &value)
            }
        }
    }

    /// Mount a new instance of `component`.
    fn mount(&self, component: &Component, props: &Props, children: &[Child]) -> Result<B::Node> {
        let id = self
            .state
            .borrow_mut()
            .instances
            .insert(ComponentInstance::new(component.clone(), props, children));

        tracing::trace!(instance=%id, component=%component.name(), "mounting component");

        let node = self.render_instance(id)?;
        self.state
            .borrow_mut()
            .instances
            .get_mut(id)
            .ok_or(Error::InstanceNotFound(id))?
            .node = Some(node.clone());
        Ok(node)
    }

    fn render_instance(&self, id: InstanceId) -> Result<B::Node> {
        let (component, props, children) = {
            let state = self.state.borrow();
            let instance = state.instances.get(id).ok_or(Error::InstanceNotFound(id))?;
            (
                instance.component.clone(),
                instance.props.clone(),
                instance.children.clone(),
            )
        };

        let outer = self.enter(id);
        let result = component.call(Scope::new(self, id, &props, &children));
        self.leave(outer);

        // The frame is restored before any child component gets mounted.
        let element = result?;
        self.materialize(&element)
    }

    /// Make `instance` the rendering instance with a fresh hook cursor.
    /// Returns the previous frame, to be restored with [`Self::leave`].
    fn enter(&self, instance: InstanceId) -> Option<RenderFrame> {
        self.state
            .borrow_mut()
            .frame
            .replace(RenderFrame {
                instance,
                cursor: 0,
            })
    }

    fn leave(&self, outer: Option<RenderFrame>) {
        self.state.borrow_mut().frame = outer;
    }
}

impl<B: Backend> HookHost for Inner<B> {
    fn claim_slot(&self, initial: Box<dyn Any>) -> Result<(InstanceId, usize)> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;

        let frame = state.frame.as_mut().ok_or(Error::NoActiveComponent)?;
        let (id, slot) = (frame.instance, frame.cursor);
        frame.cursor += 1;

        let instance = state
            .instances
            .get_mut(id)
            .ok_or(Error::InstanceNotFound(id))?;
        if instance.hooks.len() <= slot {
            instance.hooks.push(initial);
        }
        Ok((id, slot))
    }

    fn read_slot(
        &self,
        id: InstanceId,
        slot: usize,
        reader: &mut dyn FnMut(&dyn Any),
    ) -> Result<()> {
        let state = self.state.borrow();
        let instance = state.instances.get(id).ok_or(Error::InstanceNotFound(id))?;
        let value = instance
            .hooks
            .get(slot)
            .ok_or(Error::MissingHookSlot { instance: id, slot })?;
        reader(value.as_ref());
        Ok(())
    }

    fn write_slot(&self, id: InstanceId, slot: usize, value: Box<dyn Any>) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let instance = state
            .instances
            .get_mut(id)
            .ok_or(Error::InstanceNotFound(id))?;
        match instance.hooks.get_mut(slot) {
            Some(current) => {
                *current = value;
                Ok(())
            }
            None => Err(Error::MissingHookSlot { instance: id, slot }),
        }
    }

    fn rerender(&self, id: InstanceId) -> Result<()> {
        tracing::trace!(instance=%id, "re-rendering component");

        let new = self.render_instance(id)?;
        let old = self
            .state
            .borrow()
            .instances
            .get(id)
            .ok_or(Error::InstanceNotFound(id))?
            .node
            .clone();

        if let Some(old) = old {
            self.backend.replace_with(&old, &new)?;
            tracing::trace!(instance=%id, "replaced component node");

            // Parents whose render returned this component directly share its
            // node and must follow the swap.
            let mut state = self.state.borrow_mut();
            for instance in state.instances.iter_mut() {
                if instance.node.as_ref() == Some(&old) {
                    instance.node = Some(new.clone());
                }
            }
        } else {
            // Updated during its own first render, before mount stored a node.
            if let Some(instance) = self.state.borrow_mut().instances.get_mut(id) {
                instance.node = Some(new);
            }
        }

        Ok(())
    }

    fn downgrade(&self) -> Weak<dyn HookHost> {
        self.this.clone()
    }
}

/// Whether `tag` can be used as an element name.
fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{backend::MemoryBackend, create_element};

    #[test]
    fn test_is_valid_tag() {
        assert!(is_valid_tag("div"));
        assert!(is_valid_tag("my-element"));
        assert!(is_valid_tag("h1"));
        assert!(!is_valid_tag(""));
        assert!(!is_valid_tag("1abc"));
        assert!(!is_valid_tag("a b"));
        assert!(!is_valid_tag("<div>"));
    }

    #[test]
    fn test_frame_is_restored_after_nested_render() {
        fn inner(cx: Scope<'_>) -> Result<Element> {
            let (a, _) = cx.use_state("inner")?;
            Ok(create_element("span", None, [Child::from(a)]))
        }

        fn outer(cx: Scope<'_>) -> Result<Element> {
            let (a, _) = cx.use_state(1u32)?;
            let (b, _) = cx.use_state(2u32)?;
            Ok(create_element(
                "div",
                None,
                [
                    Child::from(a + b),
                    Child::from(create_element(Component::new(inner), None, [])),
                ],
            ))
        }

        let engine = Engine::new(MemoryBackend::new());
        let host = engine
            .render(create_element(Component::new(outer), None, []), None)
            .unwrap();

        assert_eq!(host.outer_html(), r#"<div id="root"><div>3<span>inner</span></div></div>"#);
        assert_eq!(engine.hook_count(InstanceId::from_raw(0)), Some(2));
        assert_eq!(engine.hook_count(InstanceId::from_raw(1)), Some(1));
        assert!(engine.inner.state.borrow().frame.is_none());
    }

    #[test]
    fn test_unknown_instance() {
        let engine = Engine::new(MemoryBackend::new());
        let missing = InstanceId::from_raw(99);

        assert!(matches!(
            engine.render_instance(missing),
            Err(Error::InstanceNotFound(id)) if id == missing
        ));
        assert!(matches!(
            engine.inner.rerender(missing),
            Err(Error::InstanceNotFound(id)) if id == missing
        ));
        assert!(matches!(
            engine.inner.write_slot(missing, 0, Box::new(1u32)),
            Err(Error::InstanceNotFound(_))
        ));
        assert_eq!(engine.instance_node(missing), None);
        assert_eq!(engine.hook_count(missing), None);
    }

    #[test]
    fn test_unclaimed_hook_slot() {
        fn stateless(_cx: Scope<'_>) -> Result<Element> {
            Ok(create_element("p", None, []))
        }

        let engine = Engine::new(MemoryBackend::new());
        engine
            .render(create_element(Component::new(stateless), None, []), None)
            .unwrap();
        let id = InstanceId::from_raw(0);

        let mut called = false;
        let result = engine.inner.read_slot(id, 0, &mut |_| called = true);
        assert!(matches!(
            result,
            Err(Error::MissingHookSlot { slot: 0, .. })
        ));
        assert!(!called);

        let err = engine
            .inner
            .write_slot(id, 1, Box::new(1u32))
            .unwrap_err();
        assert_eq!(err.to_string(), "instance 0 has no hook slot 1");
    }
}
