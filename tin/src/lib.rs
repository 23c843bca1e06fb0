//! A minimal component runtime.
//!
//! Elements built with [`create_element`] (or [`view!`]) describe what to
//! render. An [`Engine`] turns them into dom nodes through a
//! [`backend::Backend`], mounts function [`Component`]s and keeps their
//! state. Updating state with a [`Setter`] re-renders the owning component
//! and swaps its whole dom subtree.

// Lets the `view!` macro refer to `::tin` from inside this crate.
extern crate self as tin;

pub mod backend;
pub mod component;
mod config;
pub mod engine;
mod error;
pub mod vdom;
pub mod web;

pub use self::{
    component::{Component, Scope},
    config::Config,
    engine::{hook::Setter, Engine, InstanceId, ShallowEq},
    error::{Error, Result},
    vdom::{create_element, AttrValue, Child, Element, ElementKind, Event, EventHandler, Props},
};

#[cfg(feature = "macros")]
pub use tin_macros::view;

/// Render `root` into `parent` in the browser.
///
/// The engine is kept alive for the rest of the page, since event handlers
/// hold on to it.
pub fn launch(root: Element, parent: web_sys::Element) -> Result<()> {
    let engine = Engine::new(web::WebBackend::new()?);
    engine.render(root, Some(parent.into()))?;
    // TODO: return a handle that unmounts the tree once an unmount path exists.
    std::mem::forget(engine);
    Ok(())
}
