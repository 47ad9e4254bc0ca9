//! Resource limits for circuit editing and evaluation.

/// Resource limits for a circuit model.
///
/// Evaluation recurses through every upstream component on each call.
/// Feedback loops wired in directly through
/// [`Component::add_input`](crate::Component::add_input) are detected on their
/// own; `max_depth` only bounds the recursion on long acyclic chains.
///
/// The default component cap is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum recursion depth of a single evaluation.
    pub max_depth: usize,
    /// Maximum number of components held by a model.
    pub max_components: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 4096,
            max_components: usize::MAX,
        }
    }
}

impl Limits {
    /// Create limits with custom values.
    pub fn new(max_depth: usize, max_components: usize) -> Self {
        Self {
            max_depth,
            max_components,
        }
    }

    /// Permissive limits for testing and benchmarks.
    pub fn permissive() -> Self {
        Self {
            max_depth: 16384,
            max_components: usize::MAX,
        }
    }

    /// Strict limits for small teaching boards.
    pub fn strict() -> Self {
        Self {
            max_depth: 16,
            max_components: 256,
        }
    }
}
