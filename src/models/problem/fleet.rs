#[cfg(test)]
#[path = "../../../tests/unit/models/problem/fleet_test.rs"]
mod fleet_test;

use crate::models::common::{Cost, Distance, Duration, Volume, Weight};
use rosomaxa::prelude::{Float, GenericResult};

/// A weight capacity above which a vehicle type counts as heavy and its driver is paid
/// the heavy wage rate.
pub const HEAVY_CAPACITY_THRESHOLD: Weight = 3500.;

/// Specifies a powertrain class of a vehicle type. The class drives toll eligibility
/// and the resale fraction used in acquisition cost amortization.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PowertrainClass {
    /// A combustion engine vehicle which pays tolls inside toll zones.
    Conventional,
    /// A battery electric vehicle which is exempt from tolls.
    Electric,
}

/// Specifies a vehicle type of a heterogeneous fleet. A type is identified by its
/// index in catalog order; all fields are type level constants which are never
/// overridden per evaluation call.
#[derive(Clone, Debug)]
pub struct VehicleType {
    /// Maximum load weight.
    pub capacity_weight: Weight,
    /// Maximum load volume.
    pub capacity_volume: Volume,
    /// Maximum route distance.
    pub max_range: Distance,
    /// A purchase cost of a new vehicle of this type.
    pub acquisition_cost: Cost,
    /// A daily equivalent lease cost. A value greater than zero marks the type as
    /// leased rather than purchased.
    pub daily_lease_cost: Cost,
    /// Electric energy consumption, kWh per km.
    pub consumption_electric: Float,
    /// Liquid fuel consumption, liter per km.
    pub consumption_liquid: Float,
    /// Maintenance cost per km driven.
    pub maintenance_cost_per_km: Cost,
    /// A powertrain class.
    pub powertrain: PowertrainClass,
    /// Amount of vehicles of this type owned before the planning period. Acquisition
    /// cost of such vehicles is sunk and not amortized into route costs.
    pub initial_count: usize,
}

impl VehicleType {
    /// Returns true if vehicles of this type are drawn from the initial fleet.
    pub fn in_initial_fleet(&self) -> bool {
        self.initial_count > 0
    }

    /// Returns true if the type is leased rather than purchased.
    pub fn is_leased(&self) -> bool {
        self.daily_lease_cost > 0.
    }

    /// Returns true if the type counts as heavy for wage purposes.
    pub fn is_heavy(&self) -> bool {
        self.capacity_weight > HEAVY_CAPACITY_THRESHOLD
    }

    fn validate(&self, type_idx: usize) -> GenericResult<()> {
        let fields = [
            ("capacity_weight", self.capacity_weight),
            ("capacity_volume", self.capacity_volume),
            ("max_range", self.max_range),
            ("acquisition_cost", self.acquisition_cost),
            ("daily_lease_cost", self.daily_lease_cost),
            ("consumption_electric", self.consumption_electric),
            ("consumption_liquid", self.consumption_liquid),
            ("maintenance_cost_per_km", self.maintenance_cost_per_km),
        ];

        fields.iter().try_for_each(|&(name, value)| {
            if value.is_finite() && value >= 0. {
                Ok(())
            } else {
                Err(format!("vehicle type {type_idx} has invalid {name}: {value}").into())
            }
        })
    }
}

/// Represents a heterogeneous vehicle fleet available to serve routes. The catalog is
/// validated once at construction, evaluation calls never re-validate it.
#[derive(Clone, Debug)]
pub struct Fleet {
    /// Vehicle types in catalog order. The catalog index is the vehicle type id.
    pub vehicle_types: Vec<VehicleType>,
    /// A work time limit shared by all vehicle types, a policy constant.
    pub work_time_limit: Duration,
    /// Total amount of vehicles owned before the planning period.
    pub initial_fleet_size: usize,
}

impl Fleet {
    /// Creates a new instance of `Fleet`. Fails on an empty catalog, a negative work
    /// time limit, or a vehicle type with out of range fields.
    pub fn new(vehicle_types: Vec<VehicleType>, work_time_limit: Duration) -> GenericResult<Fleet> {
        if vehicle_types.is_empty() {
            return Err("fleet must have at least one vehicle type".into());
        }

        if !work_time_limit.is_finite() || work_time_limit < 0. {
            return Err(format!("invalid work time limit: {work_time_limit}").into());
        }

        vehicle_types.iter().enumerate().try_for_each(|(type_idx, vehicle)| vehicle.validate(type_idx))?;

        let initial_fleet_size = vehicle_types.iter().map(|vehicle| vehicle.initial_count).sum();

        Ok(Fleet { vehicle_types, work_time_limit, initial_fleet_size })
    }
}
