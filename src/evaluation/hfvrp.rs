#[cfg(test)]
#[path = "../../tests/unit/evaluation/hfvrp_test.rs"]
mod hfvrp_test;

use crate::evaluation::{
    BackwardLabel, CostBreakdown, CostModel, EndOfRouteLabel, Evaluation, ForwardLabel, RouteTotals,
};
use crate::models::common::{ArcAttributes, Cost, Distance, Duration, VertexAttributes, Volume, Weight};
use crate::models::problem::{EconomicParameters, Fleet, PenaltyWeights};
use rosomaxa::prelude::{Float, GenericResult};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// A report oriented cost and utilization summary of a single route, keyed by named
/// field. Unlike [`Evaluation::compute_cost`], its total includes the fixed depot
/// departure cost, matching what a dispatcher is billed for the route.
#[derive(Clone, Debug, Serialize)]
pub struct RouteSummary {
    /// Route travel distance.
    pub distance: Distance,
    /// Distance inside toll zones.
    pub toll_distance: Distance,
    /// Route duration: travel plus service time.
    pub duration: Duration,
    /// Load weight collected on the route.
    pub load_weight: Weight,
    /// Load volume collected on the route.
    pub load_volume: Volume,
    /// Id of the selected vehicle type.
    pub vehicle_type: usize,
    /// Weight capacity of the selected vehicle type.
    pub capacity_weight: Weight,
    /// Volume capacity of the selected vehicle type.
    pub capacity_volume: Volume,
    /// Fixed cost charged for departing the depot.
    pub fixed_cost: Cost,
    /// Energy cost: liquid fuel plus electricity.
    pub fuel_cost: Cost,
    /// Distance proportional maintenance cost.
    pub maintenance_cost: Cost,
    /// Driver wage cost.
    pub wage_cost: Cost,
    /// Toll cost.
    pub toll_cost: Cost,
    /// Amortized acquisition or lease cost.
    pub amortized_acquisition_cost: Cost,
    /// Green incentive discount.
    pub green_discount: Cost,
    /// Soft constraint penalties.
    pub penalty_cost: Cost,
    /// Route total including the fixed departure cost.
    pub cost: Cost,
}

/// A concatenation based evaluation for the heterogeneous fleet VRP. Holds an
/// immutable fleet catalog and economic parameters snapshot and selects the cost
/// optimal vehicle type anew on every query.
///
/// Penalty factor setters are the single mutable surface: they reconfigure the whole
/// instance and must not run concurrently with evaluation calls. No internal
/// synchronization is provided; the exclusive borrow they require is the contract
/// ("single writer, quiesce evaluators before reconfiguring").
pub struct HfvrpEvaluation {
    cost_model: CostModel,
}

impl HfvrpEvaluation {
    /// Creates a new instance of `HfvrpEvaluation` from validated problem models.
    /// Fails if economic parameters are out of range.
    pub fn new(fleet: Fleet, economics: EconomicParameters) -> GenericResult<Self> {
        Self::with_penalties(fleet, economics, PenaltyWeights::default())
    }

    /// Creates a new instance of `HfvrpEvaluation` with custom penalty weights.
    pub fn with_penalties(
        fleet: Fleet,
        economics: EconomicParameters,
        penalties: PenaltyWeights,
    ) -> GenericResult<Self> {
        economics.validate()?;

        Ok(Self { cost_model: CostModel::new(fleet, economics, penalties) })
    }

    /// Returns the fleet catalog.
    pub fn fleet(&self) -> &Fleet {
        self.cost_model.fleet()
    }

    /// Returns the economic parameters snapshot.
    pub fn economics(&self) -> &EconomicParameters {
        self.cost_model.economics()
    }

    /// Returns the weight applied to capacity overloads.
    pub fn overload_penalty_factor(&self) -> Float {
        self.cost_model.penalties().overload
    }

    /// Sets the weight applied to capacity overloads.
    pub fn set_overload_penalty_factor(&mut self, factor: Float) {
        self.cost_model.penalties_mut().overload = factor;
    }

    /// Returns the multiplier which scales volume overloads relative to weight ones.
    pub fn volume_overload_multiplier(&self) -> Float {
        self.cost_model.penalties().volume_overload_multiplier
    }

    /// Sets the multiplier which scales volume overloads relative to weight ones.
    pub fn set_volume_overload_multiplier(&mut self, multiplier: Float) {
        self.cost_model.penalties_mut().volume_overload_multiplier = multiplier;
    }

    /// Returns the weight applied to distance above the vehicle range.
    pub fn range_excess_penalty_factor(&self) -> Float {
        self.cost_model.penalties().range_excess
    }

    /// Sets the weight applied to distance above the vehicle range.
    pub fn set_range_excess_penalty_factor(&mut self, factor: Float) {
        self.cost_model.penalties_mut().range_excess = factor;
    }

    /// Returns the weight applied to work time above the limit.
    pub fn overtime_penalty_factor(&self) -> Float {
        self.cost_model.penalties().overtime
    }

    /// Sets the weight applied to work time above the limit.
    pub fn set_overtime_penalty_factor(&mut self, factor: Float) {
        self.cost_model.penalties_mut().overtime = factor;
    }

    /// Selects the cheapest vehicle type for externally supplied route aggregates and
    /// returns its id together with the cost breakdown.
    pub fn choose_vehicle(&self, totals: &RouteTotals) -> (usize, CostBreakdown) {
        self.cost_model.best_vehicle(totals)
    }

    /// Returns the id of the cheapest vehicle type for a complete route.
    pub fn compute_best_vehicle_id_of_route<R>(&self, route: &R) -> usize
    where
        R: EndOfRouteLabel<ForwardLabel>,
    {
        let totals = RouteTotals::from(route.end_of_route_label());

        self.cost_model.best_vehicle(&totals).0
    }

    /// Builds a report oriented summary of a complete route.
    pub fn summarize_route<R>(&self, route: &R) -> RouteSummary
    where
        R: EndOfRouteLabel<ForwardLabel>,
    {
        let totals = RouteTotals::from(route.end_of_route_label());
        let (vehicle_type, breakdown) = self.cost_model.best_vehicle(&totals);
        let vehicle = &self.fleet().vehicle_types[vehicle_type];
        let fixed_cost = self.economics().depot_departure_cost();

        RouteSummary {
            distance: totals.distance,
            toll_distance: totals.toll_distance,
            duration: totals.work_time,
            load_weight: totals.load_weight,
            load_volume: totals.load_volume,
            vehicle_type,
            capacity_weight: vehicle.capacity_weight,
            capacity_volume: vehicle.capacity_volume,
            fixed_cost,
            fuel_cost: breakdown.fuel,
            maintenance_cost: breakdown.maintenance,
            wage_cost: breakdown.wage,
            toll_cost: breakdown.toll,
            amortized_acquisition_cost: breakdown.amortized_acquisition,
            green_discount: breakdown.green_discount,
            penalty_cost: breakdown.penalty,
            cost: breakdown.total + fixed_cost,
        }
    }

    /// Computes the liquidation value of initial fleet vehicles not used by any route
    /// of the final solution. See [`CostModel::resale_value_for_unused_vehicles`].
    pub fn resale_value_for_unused_vehicles(&self, used_counts: &FxHashMap<usize, usize>) -> Cost {
        self.cost_model.resale_value_for_unused_vehicles(used_counts)
    }
}

impl Evaluation for HfvrpEvaluation {
    type ForwardLabel = ForwardLabel;
    type BackwardLabel = BackwardLabel;

    fn create_forward_label(&self, vertex: &VertexAttributes) -> ForwardLabel {
        ForwardLabel::create(vertex)
    }

    fn create_backward_label(&self, vertex: &VertexAttributes) -> BackwardLabel {
        BackwardLabel::create(vertex)
    }

    fn propagate_forward(
        &self,
        predecessor: &ForwardLabel,
        _predecessor_vertex: &VertexAttributes,
        vertex: &VertexAttributes,
        arc: &ArcAttributes,
    ) -> ForwardLabel {
        predecessor.extend(vertex, arc)
    }

    fn propagate_backward(
        &self,
        successor: &BackwardLabel,
        successor_vertex: &VertexAttributes,
        _vertex: &VertexAttributes,
        arc: &ArcAttributes,
    ) -> BackwardLabel {
        successor.extend(successor_vertex, arc)
    }

    fn concatenate(
        &self,
        forward: &ForwardLabel,
        backward: &BackwardLabel,
        split_vertex: &VertexAttributes,
    ) -> Cost {
        let totals = RouteTotals::join(forward, backward);
        let (_, breakdown) = self.cost_model.best_vehicle(&totals);

        // a split at the depot means a new route departs from it
        let fixed_cost =
            if split_vertex.is_depot { self.economics().depot_departure_cost() } else { 0. };

        breakdown.total + fixed_cost
    }

    fn compute_cost(&self, forward: &ForwardLabel) -> Cost {
        self.cost_model.best_vehicle(&RouteTotals::from(forward)).1.total
    }

    fn is_feasible(&self, forward: &ForwardLabel) -> bool {
        let totals = RouteTotals::from(forward);
        let (vehicle_type, _) = self.cost_model.best_vehicle(&totals);
        let vehicle = &self.fleet().vehicle_types[vehicle_type];

        self.cost_model.violations(vehicle, &totals).iter().all(|&violation| violation == 0.)
    }

    fn get_cost_components(&self, forward: &ForwardLabel) -> Vec<Float> {
        let totals = RouteTotals::from(forward);
        let (vehicle_type, _) = self.cost_model.best_vehicle(&totals);
        let vehicle = &self.fleet().vehicle_types[vehicle_type];
        let [overload_weight, overload_volume, range_excess, overtime] =
            self.cost_model.violations(vehicle, &totals);

        vec![totals.distance, range_excess, overload_weight, overload_volume, overtime, totals.toll_distance]
    }
}
