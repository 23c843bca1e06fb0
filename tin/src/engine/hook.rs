//! The state hook.

use std::{
    any::Any,
    marker::PhantomData,
    rc::{Rc, Weak},
};

use crate::{Error, Result};

use super::{InstanceId, ShallowEq};

/// The part of the engine the state hook talks to.
///
/// Kept object safe so that [`crate::Scope`] and [`Setter`] do not need to
/// know the rendering backend.
pub(crate) trait HookHost {
    /// Claim the next slot of the instance that is currently rendering.
    ///
    /// Initializes the slot with `initial` if it has never been claimed.
    fn claim_slot(&self, initial: Box<dyn Any>) -> Result<(InstanceId, usize)>;

    fn read_slot(
        &self,
        instance: InstanceId,
        slot: usize,
        reader: &mut dyn FnMut(&dyn Any),
    ) -> Result<()>;

    fn write_slot(&self, instance: InstanceId, slot: usize, value: Box<dyn Any>) -> Result<()>;

    /// Render the instance again and swap its dom node.
    fn rerender(&self, instance: InstanceId) -> Result<()>;

    fn downgrade(&self) -> Weak<dyn HookHost>;
}

pub(crate) fn use_state<T>(host: &dyn HookHost, initial: T) -> Result<(T, Setter<T>)>
where
    T: Clone + ShallowEq + 'static,
{
    let (instance, slot) = host.claim_slot(Box::new(initial))?;
    let value = read_typed::<T>(host, instance, slot)?;

    let setter = Setter {
        host: host.downgrade(),
        instance,
        slot,
        _marker: PhantomData,
    };
    Ok((value, setter))
}

fn read_typed<T: Clone + 'static>(
    host: &dyn HookHost,
    instance: InstanceId,
    slot: usize,
) -> Result<T> {
    let mut value = None;
    host.read_slot(instance, slot, &mut |raw| {
        value = raw.downcast_ref::<T>().cloned();
    })?;
    value.ok_or(Error::HookTypeMismatch {
        instance,
        slot,
        expected: std::any::type_name::<T>(),
    })
}

/// Writes a new value into a state slot.
///
/// Bound to one instance and slot. Writing a value that differs from the
/// current one re-renders the owning instance synchronously and replaces its
/// dom node before returning. Writing a value that is [`ShallowEq`] to the
/// current one does nothing.
pub struct Setter<T> {
    host: Weak<dyn HookHost>,
    instance: InstanceId,
    slot: usize,
    _marker: PhantomData<fn(T)>,
}

impl<T> Clone for Setter<T> {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
            instance: self.instance,
            slot: self.slot,
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Setter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Setter")
            .field("instance", &self.instance)
            .field("slot", &self.slot)
            .finish()
    }
}

impl<T> Setter<T>
where
    T: Clone + ShallowEq + 'static,
{
    pub fn instance_id(&self) -> InstanceId {
        self.instance
    }

    /// Replace the state with `value`.
    pub fn set(&self, value: T) -> Result<()> {
        self.update(move |_| value)
    }

    /// Compute the new state from the previous one.
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&T) -> T,
    {
        let host = match self.host.upgrade() {
            Some(host) => host,
            None => {
                tracing::warn!(
                    instance=%self.instance,
                    "Tried to update state of a dropped engine"
                );
                return Ok(());
            }
        };

        let prev = read_typed::<T>(&*host, self.instance, self.slot)?;
        let next = f(&prev);
        if next.shallow_eq(&prev) {
            tracing::debug!(
                instance=%self.instance,
                slot=self.slot,
                "state unchanged, skipping render"
            );
            return Ok(());
        }

        host.write_slot(self.instance, self.slot, Box::new(next))?;
        host.rerender(self.instance)
    }

    /// The value currently stored in the slot.
    ///
    /// Returns `None` if the engine was dropped.
    pub fn current(&self) -> Option<T> {
        let host: Rc<dyn HookHost> = self.host.upgrade()?;
        read_typed::<T>(&*host, self.instance, self.slot).ok()
    }
}
