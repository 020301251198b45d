use crate::models::common::{Distance, Duration, Volume, Weight};

/// Static attributes of a graph vertex. The vertex itself is owned by the host
/// framework, this record is read-only for the evaluation.
#[derive(Clone, Copy, Debug, Default)]
pub struct VertexAttributes {
    /// Demand weight collected at the vertex.
    pub demand_weight: Weight,
    /// Demand volume collected at the vertex.
    pub demand_volume: Volume,
    /// Service time spent at the vertex.
    pub service_time: Duration,
    /// Whether the vertex is a depot.
    pub is_depot: bool,
}

impl VertexAttributes {
    /// Creates attributes of a customer vertex.
    pub fn customer(demand_weight: Weight, demand_volume: Volume, service_time: Duration) -> Self {
        Self { demand_weight, demand_volume, service_time, is_depot: false }
    }

    /// Creates attributes of a depot vertex which has no own demand or service time.
    pub fn depot() -> Self {
        Self { demand_weight: 0., demand_volume: 0., service_time: 0., is_depot: true }
    }
}

/// Static attributes of a graph arc. The arc itself is owned by the host framework,
/// this record is read-only for the evaluation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArcAttributes {
    /// Travel distance.
    pub distance: Distance,
    /// Travel time.
    pub travel_time: Duration,
    /// A part of the travel distance which lies inside a toll zone.
    pub toll_distance: Distance,
}

impl ArcAttributes {
    /// Creates arc attributes which lie completely outside toll zones.
    pub fn new(distance: Distance, travel_time: Duration) -> Self {
        Self { distance, travel_time, toll_distance: 0. }
    }
}
