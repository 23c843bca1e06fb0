use std::{any::Any, rc::Rc};

use crate::{
    component::Component,
    vdom::{Child, Props},
};

/// Identity of a mounted component instance.
///
/// Ids come from a counter owned by the engine and are never reused, even
/// after the dom node of an instance was replaced.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct InstanceId(u64);

impl InstanceId {
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

pub(crate) struct ComponentInstance<N> {
    pub component: Component,
    /// Arguments last supplied by the parent.
    pub props: Rc<Props>,
    pub children: Rc<[Child]>,
    /// State hook values, indexed by call order. Only ever grows.
    pub hooks: Vec<Box<dyn Any>>,
    /// The live dom node currently representing this instance.
    /// `None` until the first render finished.
    pub node: Option<N>,
}

impl<N> ComponentInstance<N> {
    pub fn new(component: Component, props: &Props, children: &[Child]) -> Self {
        Self {
            component,
            props: Rc::new(props.clone()),
            children: children.into(),
            hooks: Vec::new(),
            node: None,
        }
    }
}

/// Registry of all mounted instances.
///
/// Instances are never removed, so ids map directly to indices.
pub(crate) struct InstanceManager<N> {
    instances: Vec<ComponentInstance<N>>,
}

impl<N> InstanceManager<N> {
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
        }
    }

    #[inline]
    fn id_to_index(id: InstanceId) -> usize {
        id.0 as usize
    }

    #[inline]
    fn index_to_id(index: usize) -> InstanceId {
        InstanceId(index as u64)
    }

    pub fn insert(&mut self, instance: ComponentInstance<N>) -> InstanceId {
        let id = Self::index_to_id(self.instances.len());
        self.instances.push(instance);
        id
    }

    pub fn get(&self, id: InstanceId) -> Option<&ComponentInstance<N>> {
        self.instances.get(Self::id_to_index(id))
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut ComponentInstance<N>> {
        self.instances.get_mut(Self::id_to_index(id))
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ComponentInstance<N>> {
        self.instances.iter_mut()
    }
}
