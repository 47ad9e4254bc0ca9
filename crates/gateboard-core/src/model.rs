//! The circuit model: components, wires and sink output states.

use std::collections::BTreeMap;

use tracing::{debug, instrument, warn};

use crate::component::{Component, ComponentId};
use crate::error::ModelError;
use crate::limits::Limits;
use crate::wire::Wire;

/// Aggregate root of a circuit being edited.
///
/// The model holds the placed components (in placement order), the wires
/// between them, and the last known state of every sink. Edges live in each
/// component's fan-in; the wire list is an index over those edges and is only
/// changed together with them:
/// - [`Model::connect`] / [`Model::add_wire`] record a wire whose fan-in entry
///   exists
/// - [`Model::remove_wire`] drops the wire and its fan-in entry
/// - [`Model::remove_component`] drops every touching wire and detaches the
///   component from every fan-in
#[derive(Debug)]
pub struct Model {
    components: Vec<Component>,
    wires: Vec<Wire>,
    output_states: BTreeMap<ComponentId, bool>,
    limits: Limits,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Create an empty model with default limits.
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Create an empty model with custom limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            components: Vec::new(),
            wires: Vec::new(),
            output_states: BTreeMap::new(),
            limits,
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Place a component in the model.
    ///
    /// Sinks get an entry in the output-state map seeded with their stored
    /// state. Adding a component that is already present does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MaxComponentsExceeded`] when the model is full.
    pub fn add_component(&mut self, component: Component) -> Result<(), ModelError> {
        if self.contains(&component) {
            return Ok(());
        }
        if self.components.len() >= self.limits.max_components {
            return Err(ModelError::MaxComponentsExceeded(
                self.limits.max_components,
            ));
        }
        if component.kind().is_sink() {
            self.output_states.insert(component.id(), component.state());
        }
        debug!(component = %component.id(), kind = %component.kind(), "component added");
        self.components.push(component);
        Ok(())
    }

    /// Remove a component and everything attached to it.
    ///
    /// Every wire touching the component is dropped and the component is
    /// detached from the fan-in of every remaining component. Returns `false`
    /// if the component was not in the model.
    pub fn remove_component(&mut self, component: &Component) -> bool {
        let Some(index) = self.components.iter().position(|c| c == component) else {
            return false;
        };
        let removed = self.components.remove(index);
        let id = removed.id();
        self.output_states.remove(&id);

        let wires_before = self.wires.len();
        self.wires.retain(|w| !w.touches(&removed));
        let edges: usize = self.components.iter().map(|c| c.detach(id)).sum();

        debug!(
            component = %id,
            wires = wires_before - self.wires.len(),
            edges,
            "component removed"
        );
        true
    }

    /// Record a wire built with [`Wire::new`].
    ///
    /// Capacity was already checked when the wire was built and is not
    /// re-validated. A rejected wire is rolled back: if its fan-in edge is not
    /// covered by another recorded wire, the edge is removed from the target.
    ///
    /// # Errors
    ///
    /// - [`ModelError::UnknownComponent`] if either end is not in the model.
    /// - [`ModelError::StaleWire`] if the target's fan-in no longer holds an
    ///   unrecorded edge from the source.
    pub fn add_wire(&mut self, wire: Wire) -> Result<(), ModelError> {
        let (source, target) = (wire.source(), wire.target());
        let unrecorded = self.unrecorded_edges(source, target);

        let checked = self
            .check_member(source)
            .and_then(|()| self.check_member(target));
        if let Err(err) = checked {
            if unrecorded > 0 {
                target.remove_input(source);
                debug!(source = %source.id(), target = %target.id(), "rejected wire rolled back");
            }
            return Err(err);
        }
        if unrecorded == 0 {
            return Err(ModelError::StaleWire {
                from: source.id(),
                to: target.id(),
            });
        }

        debug!(source = %source.id(), target = %target.id(), "wire added");
        self.wires.push(wire);
        Ok(())
    }

    /// Fan-in edges from `source` into `target` that no recorded wire covers.
    fn unrecorded_edges(&self, source: &Component, target: &Component) -> usize {
        let edges = target.inputs_ref().iter().filter(|c| *c == source).count();
        let recorded = self
            .wires
            .iter()
            .filter(|w| w.source() == source && w.target() == target)
            .count();
        edges.saturating_sub(recorded)
    }

    /// Build a wire between two components of the model and record it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownComponent`] if either end is not in the
    /// model, or [`ModelError::Connect`] if the wire could not be built. No
    /// edge is created on error.
    pub fn connect(&mut self, source: &Component, target: &Component) -> Result<Wire, ModelError> {
        self.check_member(source)?;
        self.check_member(target)?;
        let wire = Wire::new(source, target)?;
        self.wires.push(wire.clone());
        Ok(wire)
    }

    /// Remove a wire and the fan-in edge it stands for.
    ///
    /// Returns `false` if no such wire is recorded.
    pub fn remove_wire(&mut self, wire: &Wire) -> bool {
        let Some(index) = self.wires.iter().position(|w| w == wire) else {
            return false;
        };
        let removed = self.wires.remove(index);
        removed.target().remove_input(removed.source());
        debug!(
            source = %removed.source().id(),
            target = %removed.target().id(),
            "wire removed"
        );
        true
    }

    /// Drop every component, wire and output state.
    ///
    /// Handles held elsewhere keep their fan-in.
    pub fn clear(&mut self) {
        debug!(
            components = self.components.len(),
            wires = self.wires.len(),
            "model cleared"
        );
        self.components.clear();
        self.wires.clear();
        self.output_states.clear();
    }

    /// Components in placement order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Look up a component by ID.
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id() == id)
    }

    pub fn contains(&self, component: &Component) -> bool {
        self.components.iter().any(|c| c == component)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Sink components in placement order.
    pub fn sinks(&self) -> impl Iterator<Item = &Component> + '_ {
        self.components.iter().filter(|c| c.kind().is_sink())
    }

    /// Recorded wires leaving `component` (its fan-out).
    pub fn wires_from<'a>(&'a self, component: &'a Component) -> impl Iterator<Item = &'a Wire> {
        self.wires.iter().filter(move |w| w.source() == component)
    }

    /// Recorded wires entering `component`.
    pub fn wires_into<'a>(&'a self, component: &'a Component) -> impl Iterator<Item = &'a Wire> {
        self.wires.iter().filter(move |w| w.target() == component)
    }

    /// Last recorded sink states, without recomputing.
    pub fn output_states(&self) -> &BTreeMap<ComponentId, bool> {
        &self.output_states
    }

    /// Recompute every sink, store the value on the sink and in the
    /// output-state map, and return the map.
    ///
    /// A sink whose upstream chain exceeds the depth limit reads `false`.
    #[instrument(level = "debug", skip_all, fields(sinks = self.output_states.len()))]
    pub fn refresh_outputs(&mut self) -> &BTreeMap<ComponentId, bool> {
        for sink in self.components.iter().filter(|c| c.kind().is_sink()) {
            let value = match sink.try_calculate_output(&self.limits) {
                Ok(value) => value,
                Err(err) => {
                    warn!(sink = %sink.id(), %err, "sink failed closed");
                    false
                }
            };
            sink.set_state(value);
            self.output_states.insert(sink.id(), value);
        }
        &self.output_states
    }

    fn check_member(&self, component: &Component) -> Result<(), ModelError> {
        if self.contains(component) {
            Ok(())
        } else {
            Err(ModelError::UnknownComponent(component.id()))
        }
    }
}
