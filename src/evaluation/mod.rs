//! Specifies evaluation logic which computes cost and feasibility of partial and
//! complete routes. Partial route state lives in forward and backward labels which
//! are extended one arc at a time; joining two labels at a split vertex yields the
//! cost of the assembled route without rescanning either side.

use crate::models::common::{ArcAttributes, Cost, VertexAttributes};
use rosomaxa::prelude::Float;

mod cost;
pub use self::cost::*;

mod hfvrp;
pub use self::hfvrp::*;

mod labels;
pub use self::labels::*;

/// Defines a concatenation based route evaluation.
///
/// All operations are pure functions of their arguments and an immutable problem
/// snapshot: they never mutate shared state, perform I/O or block, so the host search
/// is free to call them concurrently from multiple worker threads, including for
/// speculative moves which are discarded.
pub trait Evaluation: Send + Sync {
    /// A label type accumulated when a route is scanned from its start.
    type ForwardLabel: Copy + Send + Sync;
    /// A label type accumulated when a route is scanned from its end.
    type BackwardLabel: Copy + Send + Sync;

    /// Creates a forward label at a route start vertex.
    fn create_forward_label(&self, vertex: &VertexAttributes) -> Self::ForwardLabel;

    /// Creates a backward label at a route end vertex.
    fn create_backward_label(&self, vertex: &VertexAttributes) -> Self::BackwardLabel;

    /// Extends a forward label from its predecessor over the connecting arc to the
    /// given vertex, producing a new label.
    fn propagate_forward(
        &self,
        predecessor: &Self::ForwardLabel,
        predecessor_vertex: &VertexAttributes,
        vertex: &VertexAttributes,
        arc: &ArcAttributes,
    ) -> Self::ForwardLabel;

    /// Extends a backward label from its successor over the connecting arc to the
    /// given vertex, producing a new label.
    fn propagate_backward(
        &self,
        successor: &Self::BackwardLabel,
        successor_vertex: &VertexAttributes,
        vertex: &VertexAttributes,
        arc: &ArcAttributes,
    ) -> Self::BackwardLabel;

    /// Computes the cost of the route assembled by joining a forward and a backward
    /// label at the given split vertex. The cost depends on nothing but the two
    /// labels and the split vertex, which makes the operation O(1) per edge.
    fn concatenate(
        &self,
        forward: &Self::ForwardLabel,
        backward: &Self::BackwardLabel,
        split_vertex: &VertexAttributes,
    ) -> Cost;

    /// Computes the cost of a complete route from the forward label accumulated at
    /// its end.
    fn compute_cost(&self, forward: &Self::ForwardLabel) -> Cost;

    /// Returns true if the route behind the forward label satisfies capacity, range
    /// and work time constraints of its cost optimal vehicle type.
    fn is_feasible(&self, forward: &Self::ForwardLabel) -> bool;

    /// Returns route cost components in a fixed order consumers rely on: distance,
    /// range excess, weight overload, volume overload, overtime, toll distance.
    fn get_cost_components(&self, forward: &Self::ForwardLabel) -> Vec<Float>;
}

/// Provides access to the forward label accumulated at the end of route sentinel.
/// Implemented by the host framework's route type.
pub trait EndOfRouteLabel<T> {
    /// Returns the forward label stored at the end of route sentinel.
    fn end_of_route_label(&self) -> &T;
}
