//! Wires between components.

use std::fmt;

use tracing::debug;

use crate::component::Component;
use crate::error::ConnectError;

/// A directed edge: `source`'s output feeds one of `target`'s inputs.
///
/// A wire is an index over the fan-in stored on the target; it can only be
/// created together with that fan-in entry, through [`Wire::new`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Wire {
    source: Component,
    target: Component,
}

impl Wire {
    /// Connect `source` to `target`, adding `source` to `target`'s fan-in.
    ///
    /// # Errors
    ///
    /// - [`ConnectError::CapacityExceeded`] if `target` has no free input.
    /// - [`ConnectError::WouldCycle`] if `source` is `target` or already
    ///   depends on `target`.
    ///
    /// On error neither the wire nor the fan-in entry is created.
    pub fn new(source: &Component, target: &Component) -> Result<Self, ConnectError> {
        if source == target || source.depends_on(target) {
            return Err(ConnectError::WouldCycle {
                from: source.id(),
                to: target.id(),
            });
        }
        target.add_input(source)?;
        debug!(source = %source.id(), target = %target.id(), "wire connected");
        Ok(Self {
            source: source.clone(),
            target: target.clone(),
        })
    }

    #[inline]
    pub fn source(&self) -> &Component {
        &self.source
    }

    #[inline]
    pub fn target(&self) -> &Component {
        &self.target
    }

    /// Check if the wire touches `component` at either end.
    pub fn touches(&self, component: &Component) -> bool {
        self.source == *component || self.target == *component
    }

    /// Check if the target's fan-in still holds the source.
    pub fn is_live(&self) -> bool {
        self.target.has_input(&self.source)
    }
}

impl fmt::Debug for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wire")
            .field("source", &self.source.id())
            .field("target", &self.target.id())
            .finish()
    }
}
