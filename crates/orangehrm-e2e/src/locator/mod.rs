// Locator Resolver
//
// Turns declarative descriptors into lazy element handles bound to a
// browsing context. Resolution is pure: it compiles a selector and pairs it
// with the context. Existence and visibility are only evaluated when a
// handle is acted upon.

mod descriptor;
mod selector;
mod table;

pub use descriptor::{LocatorDescriptor, RoleOptions, Strategy};
pub use selector::{Position, Segment, Selector};
pub use table::{Elements, LocatorTable};

use crate::context::SharedContext;
use crate::element::ElementHandle;
use crate::error::Result;
use std::sync::Arc;

/// Compiles a descriptor into its engine selector.
pub fn compile(descriptor: &LocatorDescriptor) -> Selector {
    let selector = Selector::new(descriptor.strategy().clone());
    match descriptor.index() {
        Some(index) => selector.nth(index),
        None => selector,
    }
}

/// Binds a descriptor to a browsing context.
///
/// Never fails and never touches the page: a descriptor that matches
/// nothing yields a handle whose `is_visible()` is `false`.
pub fn resolve(context: &SharedContext, descriptor: &LocatorDescriptor) -> ElementHandle {
    let selector = compile(descriptor);
    tracing::debug!(
        strategy = descriptor.strategy().tag(),
        selector = %selector,
        "resolved locator"
    );
    ElementHandle::new(Arc::clone(context), selector)
}

/// Resolves a loosely-typed (JSON) descriptor.
///
/// Fails with `Error::InvalidLocator` when the value matches no known shape.
pub fn resolve_value(context: &SharedContext, value: &serde_json::Value) -> Result<ElementHandle> {
    let descriptor = LocatorDescriptor::try_from(value.clone())?;
    Ok(resolve(context, &descriptor))
}
