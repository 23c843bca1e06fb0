use std::rc::Rc;

use crate::{
    engine::{hook, HookHost, InstanceId, ShallowEq},
    vdom::{Child, Element, Props},
    Result,
};

type RenderFn = dyn Fn(Scope<'_>) -> Result<Element>;

/// A function component.
///
/// Wraps a function (or closure) that receives a [`Scope`] and returns the
/// [`Element`] to render. Cloning is cheap; clones compare equal.
///
/// ```rust
/// use tin::{create_element, Child, Component, Element, Scope};
///
/// fn hello(cx: Scope<'_>) -> tin::Result<Element> {
///     let name = cx.props().get_str("name").unwrap_or("world").to_string();
///     Ok(create_element("p", None, [Child::from(format!("hello {}", name))]))
/// }
///
/// let component = Component::new(hello);
/// ```
#[derive(Clone)]
pub struct Component {
    name: &'static str,
    render: Rc<RenderFn>,
}

impl Component {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Scope<'_>) -> Result<Element> + 'static,
    {
        Self {
            name: std::any::type_name::<F>(),
            render: Rc::new(f),
        }
    }

    /// The Rust type name of the wrapped function.
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub(crate) fn call(&self, scope: Scope<'_>) -> Result<Element> {
        (self.render)(scope)
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.render, &other.render)
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Component").field(&self.name).finish()
    }
}

/// The argument passed to a component while it renders.
///
/// Gives access to the props and children supplied by the parent and to the
/// state hook of the instance being rendered.
pub struct Scope<'a> {
    host: &'a dyn HookHost,
    instance: InstanceId,
    props: &'a Props,
    children: &'a [Child],
}

impl<'a> Scope<'a> {
    pub(crate) fn new(
        host: &'a dyn HookHost,
        instance: InstanceId,
        props: &'a Props,
        children: &'a [Child],
    ) -> Self {
        Self {
            host,
            instance,
            props,
            children,
        }
    }

    #[inline]
    pub fn props(&self) -> &'a Props {
        self.props
    }

    #[inline]
    pub fn children(&self) -> &'a [Child] {
        self.children
    }

    /// Id of the instance being rendered.
    #[inline]
    pub fn instance_id(&self) -> InstanceId {
        self.instance
    }

    /// Declare a piece of state for this component.
    ///
    /// Returns the current value and a [`hook::Setter`] for it. State is keyed
    /// by call order: the n-th `use_state` call of a render always maps to the
    /// n-th slot, so hooks must be called in the same order on every render.
    /// Updates are gated by [`ShallowEq`].
    pub fn use_state<T>(&self, initial: T) -> Result<(T, hook::Setter<T>)>
    where
        T: Clone + ShallowEq + 'static,
    {
        hook::use_state(self.host, initial)
    }
}
