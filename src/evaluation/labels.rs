#[cfg(test)]
#[path = "../../tests/unit/evaluation/labels_test.rs"]
mod labels_test;

use crate::models::common::{ArcAttributes, Distance, Duration, VertexAttributes, Volume, Weight};

/// Accumulated state of a partial route scanned from its start up to some position.
/// A value type: extensions return new labels, nothing is mutated in place, and every
/// accumulator is monotonically non-decreasing along the direction of travel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ForwardLabel {
    /// Accumulated travel distance.
    pub distance: Distance,
    /// Accumulated distance inside toll zones.
    pub toll_distance: Distance,
    /// Accumulated load weight.
    pub load_weight: Weight,
    /// Accumulated load volume.
    pub load_volume: Volume,
    /// Accumulated work time: travel plus service.
    pub work_time: Duration,
}

/// Accumulated state of a partial route scanned from its end down to some position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BackwardLabel {
    /// Accumulated travel distance.
    pub distance: Distance,
    /// Accumulated distance inside toll zones.
    pub toll_distance: Distance,
    /// Accumulated load weight.
    pub load_weight: Weight,
    /// Accumulated load volume.
    pub load_volume: Volume,
    /// Accumulated work time: travel plus service.
    pub work_time: Duration,
}

impl ForwardLabel {
    /// Creates a label at a route start vertex: zero travelled accumulators, the
    /// vertex own demand, and its service time unless the vertex is a depot.
    pub fn create(vertex: &VertexAttributes) -> Self {
        Self {
            distance: 0.,
            toll_distance: 0.,
            load_weight: vertex.demand_weight,
            load_volume: vertex.demand_volume,
            work_time: if vertex.is_depot { 0. } else { vertex.service_time },
        }
    }

    /// Extends the label over one arc to the given vertex, accumulating the arc and
    /// the new vertex contributions.
    pub fn extend(&self, vertex: &VertexAttributes, arc: &ArcAttributes) -> Self {
        Self {
            distance: self.distance + arc.distance,
            toll_distance: self.toll_distance + arc.toll_distance,
            load_weight: self.load_weight + vertex.demand_weight,
            load_volume: self.load_volume + vertex.demand_volume,
            work_time: self.work_time
                + arc.travel_time
                + if vertex.is_depot { 0. } else { vertex.service_time },
        }
    }
}

impl BackwardLabel {
    /// Creates a label at a route end vertex. All accumulators start at zero: the
    /// vertex own contribution is deferred to the extension step from its
    /// predecessor, mirroring how the forward convention charges the vertex a label
    /// currently sits at.
    pub fn create(_vertex: &VertexAttributes) -> Self {
        Self::default()
    }

    /// Extends the label backward over one arc, accumulating the arc together with
    /// the successor own demand and service time.
    pub fn extend(&self, successor: &VertexAttributes, arc: &ArcAttributes) -> Self {
        Self {
            distance: self.distance + arc.distance,
            toll_distance: self.toll_distance + arc.toll_distance,
            load_weight: self.load_weight + successor.demand_weight,
            load_volume: self.load_volume + successor.demand_volume,
            work_time: self.work_time
                + arc.travel_time
                + if successor.is_depot { 0. } else { successor.service_time },
        }
    }
}

/// Aggregated totals of a route, the input of vehicle selection and costing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RouteTotals {
    /// Total travel distance.
    pub distance: Distance,
    /// Total distance inside toll zones.
    pub toll_distance: Distance,
    /// Total load weight.
    pub load_weight: Weight,
    /// Total load volume.
    pub load_volume: Volume,
    /// Total work time.
    pub work_time: Duration,
}

impl RouteTotals {
    /// Joins accumulators of a forward and a backward label which meet at a split
    /// vertex. The split vertex contribution is already included in exactly one of
    /// the two labels by construction, so a component wise sum is exact.
    pub fn join(forward: &ForwardLabel, backward: &BackwardLabel) -> Self {
        Self {
            distance: forward.distance + backward.distance,
            toll_distance: forward.toll_distance + backward.toll_distance,
            load_weight: forward.load_weight + backward.load_weight,
            load_volume: forward.load_volume + backward.load_volume,
            work_time: forward.work_time + backward.work_time,
        }
    }
}

impl From<&ForwardLabel> for RouteTotals {
    fn from(label: &ForwardLabel) -> Self {
        Self {
            distance: label.distance,
            toll_distance: label.toll_distance,
            load_weight: label.load_weight,
            load_volume: label.load_volume,
            work_time: label.work_time,
        }
    }
}
