//! Placed circuit components and their fan-in.

use std::cell::{Cell, Ref, RefCell};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::error::ConnectError;
use crate::kind::ComponentKind;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide unique identifier of a placed component.
///
/// Identifiers are handed out in creation order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u64);

impl ComponentId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw identifier value.
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Canvas position of a component. Cosmetic only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle covered by a component body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    /// Check if a canvas point falls inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

struct Inner {
    id: ComponentId,
    kind: ComponentKind,
    position: Cell<Position>,
    state: Cell<bool>,
    inputs: RefCell<Vec<Component>>,
}

/// Shared handle to a placed component.
///
/// Cloning the handle is cheap and yields another reference to the same
/// component; equality and hashing go by [`ComponentId`]. A component only
/// knows its upstream inputs (fan-in), never its consumers.
///
/// Handles are single-threaded (`!Send`): a circuit is edited and evaluated
/// on one owning thread.
#[derive(Clone)]
pub struct Component(Rc<Inner>);

impl Component {
    /// Create a new component of `kind` at canvas position (`x`, `y`).
    ///
    /// Source kinds start at their fixed value, everything else starts low.
    pub fn new(kind: ComponentKind, x: i32, y: i32) -> Self {
        Self(Rc::new(Inner {
            id: ComponentId::next(),
            kind,
            position: Cell::new(Position::new(x, y)),
            state: Cell::new(kind.initial_state()),
            inputs: RefCell::new(Vec::with_capacity(kind.max_inputs())),
        }))
    }

    #[inline]
    pub fn id(&self) -> ComponentId {
        self.0.id
    }

    #[inline]
    pub fn kind(&self) -> ComponentKind {
        self.0.kind
    }

    pub fn position(&self) -> Position {
        self.0.position.get()
    }

    /// Move the component. Has no effect on evaluation.
    pub fn set_position(&self, x: i32, y: i32) {
        self.0.position.set(Position::new(x, y));
    }

    /// Rectangle covered by the component body at its current position.
    pub fn bounds(&self) -> Bounds {
        let Position { x, y } = self.position();
        let size = self.kind().size();
        Bounds {
            x,
            y,
            width: size.width,
            height: size.height,
        }
    }

    /// Stored state. For gates and sinks this is whatever was last written,
    /// not a fresh evaluation.
    #[inline]
    pub fn state(&self) -> bool {
        self.0.state.get()
    }

    /// Overwrite the stored state. Downstream components are not notified.
    #[inline]
    pub fn set_state(&self, state: bool) {
        self.0.state.set(state);
    }

    /// Flip the stored state, returning the new value.
    pub fn toggle(&self) -> bool {
        let state = !self.state();
        self.set_state(state);
        state
    }

    /// Snapshot of the fan-in, in connection order.
    pub fn inputs(&self) -> Vec<Component> {
        self.0.inputs.borrow().clone()
    }

    pub(crate) fn inputs_ref(&self) -> Ref<'_, Vec<Component>> {
        self.0.inputs.borrow()
    }

    pub fn input_count(&self) -> usize {
        self.0.inputs.borrow().len()
    }

    /// Check if `input` currently feeds this component.
    pub fn has_input(&self, input: &Component) -> bool {
        self.0.inputs.borrow().iter().any(|c| c == input)
    }

    pub fn can_accept_more_inputs(&self) -> bool {
        self.remaining_inputs() > 0
    }

    /// Number of free input slots left.
    pub fn remaining_inputs(&self) -> usize {
        self.kind().max_inputs().saturating_sub(self.input_count())
    }

    /// Append `input` to the fan-in.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::CapacityExceeded`] when every input slot is
    /// taken; the fan-in is left untouched. Self-loops and cycles are not
    /// checked here, see [`Wire::new`](crate::Wire::new) for the guarded path.
    pub fn add_input(&self, input: &Component) -> Result<(), ConnectError> {
        if !self.can_accept_more_inputs() {
            return Err(ConnectError::CapacityExceeded {
                kind: self.kind(),
                max_inputs: self.kind().max_inputs(),
            });
        }
        self.0.inputs.borrow_mut().push(input.clone());
        trace!(component = %self.id(), input = %input.id(), "input added");
        Ok(())
    }

    /// Remove the first occurrence of `input` from the fan-in.
    ///
    /// Returns `false` (and does nothing) if `input` was not connected.
    pub fn remove_input(&self, input: &Component) -> bool {
        let mut inputs = self.0.inputs.borrow_mut();
        match inputs.iter().position(|c| c == input) {
            Some(index) => {
                inputs.remove(index);
                trace!(component = %self.id(), input = %input.id(), "input removed");
                true
            }
            None => false,
        }
    }

    /// Remove every occurrence of `id` from the fan-in, returning how many
    /// entries were dropped.
    pub(crate) fn detach(&self, id: ComponentId) -> usize {
        let mut inputs = self.0.inputs.borrow_mut();
        let before = inputs.len();
        inputs.retain(|c| c.id() != id);
        before - inputs.len()
    }

    /// Check if `other` is reachable by walking this component's fan-in.
    ///
    /// Terminates on cyclic graphs.
    pub fn depends_on(&self, other: &Component) -> bool {
        let mut seen = HashSet::new();
        let mut stack = self.inputs();
        while let Some(node) = stack.pop() {
            if node == *other {
                return true;
            }
            if seen.insert(node.id()) {
                stack.extend(node.inputs_ref().iter().cloned());
            }
        }
        false
    }

    /// Longest path from this component down to a component with no inputs.
    ///
    /// A component without inputs has depth 0. Edges that close a loop are
    /// ignored, so the result is finite for any graph.
    pub fn depth(&self) -> usize {
        let mut memo = HashMap::new();
        let mut on_path = HashSet::new();
        self.depth_inner(&mut memo, &mut on_path)
    }

    fn depth_inner(
        &self,
        memo: &mut HashMap<ComponentId, usize>,
        on_path: &mut HashSet<ComponentId>,
    ) -> usize {
        if let Some(&depth) = memo.get(&self.id()) {
            return depth;
        }
        on_path.insert(self.id());
        let mut depth = 0;
        for input in self.inputs_ref().iter() {
            if on_path.contains(&input.id()) {
                continue;
            }
            depth = depth.max(1 + input.depth_inner(memo, on_path));
        }
        on_path.remove(&self.id());
        memo.insert(self.id(), depth);
        depth
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Component {}

impl Hash for Component {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Inputs are printed by id so cyclic wiring does not recurse.
        let inputs: Vec<ComponentId> = self.inputs_ref().iter().map(Component::id).collect();
        f.debug_struct("Component")
            .field("id", &self.id())
            .field("kind", &self.kind())
            .field("position", &self.position())
            .field("state", &self.state())
            .field("inputs", &inputs)
            .finish()
    }
}
