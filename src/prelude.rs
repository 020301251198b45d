//! This module reimports commonly used types.

pub use crate::models::common::{
    ArcAttributes, Cost, Distance, Duration, VertexAttributes, Volume, Weight,
};
pub use crate::models::problem::{
    EconomicParameters, Fleet, PenaltyWeights, PowertrainClass, VehicleType,
};

pub use crate::evaluation::{
    BackwardLabel, CostBreakdown, CostModel, EndOfRouteLabel, Evaluation, ForwardLabel,
    HfvrpEvaluation, RouteSummary, RouteTotals,
};

pub use crate::format::{EvaluationConfig, create_evaluation, deserialize_config};

// Reimport rosomaxa utils
pub use rosomaxa::prelude::{Float, GenericError, GenericResult};
