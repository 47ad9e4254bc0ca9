//! Error types for circuit editing and evaluation.

use thiserror::Error;

use crate::component::ComponentId;
use crate::kind::ComponentKind;

/// Errors that can occur when adding a fan-in edge.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// Target already has as many inputs as its kind allows.
    #[error("{kind} accepts at most {max_inputs} input(s)")]
    CapacityExceeded {
        kind: ComponentKind,
        max_inputs: usize,
    },

    /// Edge would close a feedback loop.
    #[error("connecting {from} to {to} would create a cycle")]
    WouldCycle {
        from: ComponentId,
        to: ComponentId,
    },
}

/// Errors that can occur while mutating a circuit model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Referenced a component that is not part of the model.
    #[error("component {0} is not part of the model")]
    UnknownComponent(ComponentId),

    /// Wire no longer matches an entry in its target's fan-in.
    #[error("wire {from} -> {to} has no matching fan-in edge")]
    StaleWire {
        from: ComponentId,
        to: ComponentId,
    },

    /// Maximum component count exceeded.
    #[error("maximum components exceeded ({0})")]
    MaxComponentsExceeded(usize),

    /// Edge could not be created.
    #[error(transparent)]
    Connect(#[from] ConnectError),
}

/// Errors that can occur during evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Component feeds back into its own fan-in.
    #[error("feedback loop through component {0}")]
    Cycle(ComponentId),

    /// Upstream chain is deeper than the configured limit.
    #[error("maximum depth exceeded ({0})")]
    MaxDepthExceeded(usize),
}
