//! Routing decision returned by a node alongside its updated state.

/// Where to go after a node runs.
///
/// `Continue` follows the graph's edges (unconditional or conditional);
/// `End` stops the run regardless of edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Next {
    /// Follow the edge (or conditional router) out of this node.
    Continue,
    /// Stop the run here.
    End,
}
