//! Pull-based circuit evaluation.
//!
//! Nothing is cached: every call walks the upstream subgraph and recomputes
//! each gate from the stored states of the source components it reaches.

use std::collections::{BTreeMap, HashSet};

use tracing::{trace, warn};

use crate::component::{Component, ComponentId};
use crate::error::EvalError;
use crate::limits::Limits;
use crate::model::Model;

impl Component {
    /// Compute this component's output from the current graph.
    ///
    /// Sources return their stored state; gates and sinks recompute from their
    /// inputs, treating missing operands as `false`. Never fails: a feedback
    /// loop, or a chain deeper than the default depth limit, fails closed to
    /// `false`.
    pub fn calculate_output(&self) -> bool {
        match self.try_calculate_output(&Limits::default()) {
            Ok(value) => value,
            Err(err) => {
                warn!(component = %self.id(), %err, "evaluation failed closed");
                false
            }
        }
    }

    /// Compute this component's output, bounded by `limits.max_depth`.
    ///
    /// # Errors
    ///
    /// - [`EvalError::Cycle`] if a component is reached again through its own
    ///   fan-in.
    /// - [`EvalError::MaxDepthExceeded`] if an acyclic chain is deeper than
    ///   the limit.
    pub fn try_calculate_output(&self, limits: &Limits) -> Result<bool, EvalError> {
        let mut on_path = HashSet::new();
        self.eval_at(0, limits.max_depth, &mut on_path)
    }

    fn eval_at(
        &self,
        depth: usize,
        max_depth: usize,
        on_path: &mut HashSet<ComponentId>,
    ) -> Result<bool, EvalError> {
        let kind = self.kind();
        if kind.is_source() {
            return Ok(self.state());
        }
        if !on_path.insert(self.id()) {
            return Err(EvalError::Cycle(self.id()));
        }
        if depth >= max_depth {
            return Err(EvalError::MaxDepthExceeded(max_depth));
        }

        let inputs = self.inputs_ref();
        let mut values = Vec::with_capacity(inputs.len());
        for input in inputs.iter() {
            values.push(input.eval_at(depth + 1, max_depth, on_path)?);
        }
        on_path.remove(&self.id());

        let value = kind.apply(&values);
        trace!(component = %self.id(), %kind, ?values, value, "evaluated");
        Ok(value)
    }
}

/// Evaluate every sink in `model` without writing anything back.
///
/// Returns a map from sink ID to its freshly computed value. IDs are handed
/// out when a component is created, so the map iterates in creation order.
///
/// # Errors
///
/// Returns an error if any sink sits downstream of a feedback loop or of a
/// chain deeper than the model's depth limit.
pub fn evaluate(model: &Model) -> Result<BTreeMap<ComponentId, bool>, EvalError> {
    let limits = model.limits();
    model
        .sinks()
        .map(|sink| {
            sink.try_calculate_output(&limits)
                .map(|value| (sink.id(), value))
        })
        .collect()
}
