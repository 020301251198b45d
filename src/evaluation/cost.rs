#[cfg(test)]
#[path = "../../tests/unit/evaluation/cost_test.rs"]
mod cost_test;

use crate::evaluation::RouteTotals;
use crate::models::common::Cost;
use crate::models::problem::{EconomicParameters, Fleet, PenaltyWeights, PowertrainClass, VehicleType};
use rosomaxa::prelude::Float;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

const SECONDS_PER_HOUR: Float = 3600.;

/// Compares floating point numbers, ordering `NaN` as the greatest value. This
/// reproduces the `compare_floats` helper that earlier `rosomaxa` releases exported.
#[inline]
fn compare_floats(a: Float, b: Float) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        None => match (a.is_nan(), b.is_nan()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => Ordering::Equal,
        },
    }
}

/// Decomposed cost terms of serving a route with a concrete vehicle type.
/// An output-only value record, never stored by the evaluation.
#[derive(Clone, Copy, Debug, Default)]
pub struct CostBreakdown {
    /// Energy cost: liquid fuel plus electricity.
    pub fuel: Cost,
    /// Distance proportional maintenance cost.
    pub maintenance: Cost,
    /// Driver wage cost.
    pub wage: Cost,
    /// Toll cost for the distance inside toll zones.
    pub toll: Cost,
    /// Amortized acquisition or lease cost, zero for initial fleet vehicles.
    pub amortized_acquisition: Cost,
    /// Green incentive discount subtracted from the total.
    pub green_discount: Cost,
    /// Soft constraint penalties: overload, range excess, overtime.
    pub penalty: Cost,
    /// Total cost including the base travel cost. Can be negative when the discount
    /// outweighs a small route cost, and is deliberately not clamped.
    pub total: Cost,
}

/// A per vehicle type total cost of ownership model over an immutable fleet and
/// economic parameters snapshot. Also hosts the vehicle selector which picks the
/// cheapest type for given route totals.
#[derive(Clone, Debug)]
pub struct CostModel {
    fleet: Fleet,
    economics: EconomicParameters,
    penalties: PenaltyWeights,
}

impl CostModel {
    /// Creates a new instance of `CostModel`.
    pub fn new(fleet: Fleet, economics: EconomicParameters, penalties: PenaltyWeights) -> Self {
        Self { fleet, economics, penalties }
    }

    /// Returns the fleet catalog.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Returns the economic parameters snapshot.
    pub fn economics(&self) -> &EconomicParameters {
        &self.economics
    }

    /// Returns the current penalty weights.
    pub fn penalties(&self) -> &PenaltyWeights {
        &self.penalties
    }

    /// Returns mutable penalty weights. Reconfiguration must not race with
    /// evaluation calls, which the exclusive borrow rules out at compile time.
    pub fn penalties_mut(&mut self) -> &mut PenaltyWeights {
        &mut self.penalties
    }

    /// Computes the decomposed cost of serving the given route totals with the
    /// vehicle type at `type_idx` of the catalog.
    pub fn cost_for_vehicle(&self, type_idx: usize, totals: &RouteTotals) -> CostBreakdown {
        let vehicle = &self.fleet.vehicle_types[type_idx];
        let economics = &self.economics;

        let fuel = totals.distance
            * (vehicle.consumption_liquid * economics.diesel_price
                + vehicle.consumption_electric * economics.electricity_price);
        let maintenance = totals.distance * vehicle.maintenance_cost_per_km;

        let daily_wage = if vehicle.is_heavy() { economics.wage_heavy } else { economics.wage_standard };
        let wage = totals.work_time / SECONDS_PER_HOUR * (daily_wage / economics.hours_per_day);

        let toll = match vehicle.powertrain {
            PowertrainClass::Conventional => totals.toll_distance * economics.toll_rate,
            PowertrainClass::Electric => 0.,
        };

        let amortized_acquisition = self.amortized_acquisition_cost(vehicle);
        let green_discount = self.green_discount();
        let penalty = self.penalty_cost(vehicle, totals);

        let total = totals.distance + fuel + maintenance + wage + toll + amortized_acquisition
            - green_discount
            + penalty;

        CostBreakdown { fuel, maintenance, wage, toll, amortized_acquisition, green_discount, penalty, total }
    }

    /// Evaluates every vehicle type of the catalog and returns the index of the
    /// cheapest one together with its cost breakdown. Ties are broken by catalog
    /// order: the first minimum wins. O(F) in the catalog size, no caching.
    pub fn best_vehicle(&self, totals: &RouteTotals) -> (usize, CostBreakdown) {
        (1..self.fleet.vehicle_types.len()).fold((0, self.cost_for_vehicle(0, totals)), |(best_idx, best), idx| {
            let candidate = self.cost_for_vehicle(idx, totals);
            if compare_floats(candidate.total, best.total) == Ordering::Less {
                (idx, candidate)
            } else {
                (best_idx, best)
            }
        })
    }

    /// Returns violation amounts of the four soft constraints for the given vehicle
    /// type: weight overload, volume overload, range excess, overtime.
    pub fn violations(&self, vehicle: &VehicleType, totals: &RouteTotals) -> [Float; 4] {
        [
            (totals.load_weight - vehicle.capacity_weight).max(0.),
            (totals.load_volume - vehicle.capacity_volume).max(0.),
            (totals.distance - vehicle.max_range).max(0.),
            (totals.work_time - self.fleet.work_time_limit).max(0.),
        ]
    }

    /// Computes the liquidation value of initial fleet vehicles not assigned to any
    /// route of the final solution. `used_counts` maps a vehicle type index to the
    /// amount of routes served by that type. Called once per solution, not per move.
    pub fn resale_value_for_unused_vehicles(&self, used_counts: &FxHashMap<usize, usize>) -> Cost {
        self.fleet
            .vehicle_types
            .iter()
            .enumerate()
            .filter(|(_, vehicle)| vehicle.in_initial_fleet())
            .map(|(type_idx, vehicle)| {
                let used = used_counts.get(&type_idx).copied().unwrap_or(0);
                let unused = vehicle.initial_count.saturating_sub(used);

                unused as Float * vehicle.acquisition_cost * self.economics.resale_rate(vehicle.powertrain)
            })
            .sum()
    }

    fn penalty_cost(&self, vehicle: &VehicleType, totals: &RouteTotals) -> Cost {
        let [overload_weight, overload_volume, range_excess, overtime] = self.violations(vehicle, totals);
        let penalties = &self.penalties;

        overload_weight * penalties.overload
            + overload_volume * penalties.overload * penalties.volume_overload_multiplier
            + range_excess * penalties.range_excess
            + overtime * penalties.overtime
    }

    fn amortized_acquisition_cost(&self, vehicle: &VehicleType) -> Cost {
        if vehicle.in_initial_fleet() {
            // acquisition cost of an already owned vehicle is sunk
            0.
        } else if vehicle.is_leased() {
            vehicle.daily_lease_cost
        } else {
            let resale_rate = self.economics.resale_rate(vehicle.powertrain);

            vehicle.acquisition_cost * (1. - resale_rate)
                / (self.economics.lifetime_years * self.economics.working_days_per_year)
        }
    }

    fn green_discount(&self) -> Cost {
        if self.fleet.initial_fleet_size == 0 {
            0.
        } else {
            self.economics.daily_revenue * self.economics.green_share
                / (self.economics.working_days_per_year * self.fleet.initial_fleet_size as Float)
        }
    }
}
