//! Gateboard: evaluation core of a visual logic-circuit editor.
//!
//! # Overview
//!
//! A circuit is a directed graph of placed components (input sources, logic
//! gates and display sinks) joined by wires. Key properties:
//!
//! - **Closed component registry** — ten kinds with fixed fan-in limits
//! - **Fan-in is the source of truth** — wires index edges stored on targets
//! - **Pull-based evaluation** — outputs are recomputed on every read
//! - **Bounded recursion** — feedback loops fail closed instead of hanging
//!
//! # Example
//!
//! ```
//! use gateboard_core::{Component, ComponentKind, Model};
//!
//! // Half adder: sum = A XOR B, carry = A AND B
//! let mut model = Model::new();
//!
//! let a = Component::new(ComponentKind::HighInput, 0, 0);
//! let b = Component::new(ComponentKind::HighInput, 0, 50);
//! let xor = Component::new(ComponentKind::Xor, 100, 0);
//! let and = Component::new(ComponentKind::And, 100, 50);
//! let sum = Component::new(ComponentKind::Output, 200, 0);
//! let carry = Component::new(ComponentKind::Output, 200, 50);
//!
//! for component in [&a, &b, &xor, &and, &sum, &carry] {
//!     model.add_component(component.clone()).unwrap();
//! }
//!
//! model.connect(&a, &xor).unwrap();
//! model.connect(&b, &xor).unwrap();
//! model.connect(&a, &and).unwrap();
//! model.connect(&b, &and).unwrap();
//! model.connect(&xor, &sum).unwrap();
//! model.connect(&and, &carry).unwrap();
//!
//! let outputs = model.refresh_outputs();
//! assert_eq!(outputs[&sum.id()], false); // 1 + 1 = 10
//! assert_eq!(outputs[&carry.id()], true);
//! ```
//!
//! # Editing without a model
//!
//! Components can also be wired and evaluated directly, which is how an
//! editor previews a gate before it is placed:
//!
//! ```
//! use gateboard_core::{Component, ComponentKind, ConnectError};
//!
//! let high = Component::new(ComponentKind::HighInput, 0, 0);
//! let not = Component::new(ComponentKind::Not, 50, 0);
//!
//! not.add_input(&high).unwrap();
//! assert!(!not.calculate_output());
//!
//! // NOT takes a single input
//! assert!(matches!(
//!     not.add_input(&high),
//!     Err(ConnectError::CapacityExceeded { max_inputs: 1, .. })
//! ));
//! ```

pub mod component;
pub mod error;
pub mod eval;
pub mod kind;
pub mod limits;
pub mod model;
pub mod wire;

pub use component::{Bounds, Component, ComponentId, Position};
pub use error::{ConnectError, EvalError, ModelError};
pub use eval::evaluate;
pub use kind::{ComponentKind, GateOp, KindClass, Rgb, Size};
pub use limits::Limits;
pub use model::Model;
pub use wire::Wire;
