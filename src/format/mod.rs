//! Defines logic to deserialize and validate the evaluation configuration: a vehicle
//! type catalog given as positional records, an optional initial fleet list, the work
//! time limit, and keyed economic parameters with documented defaults. Validation
//! happens once here, before any evaluation occurs; the core never re-validates per
//! call.

#[cfg(test)]
#[path = "../../tests/unit/format/format_test.rs"]
mod format_test;

use crate::evaluation::HfvrpEvaluation;
use crate::models::common::Duration;
use crate::models::problem::{
    DEFAULT_HOURS_PER_DAY, DEFAULT_LIFETIME_YEARS, DEFAULT_RESALE_RATE_CONVENTIONAL,
    DEFAULT_RESALE_RATE_ELECTRIC, DEFAULT_WORKING_DAYS_PER_YEAR, EconomicParameters, Fleet,
    PowertrainClass, VehicleType,
};
use rosomaxa::prelude::{Float, GenericError, GenericResult};
use rosomaxa::utils::InfoLogger;
use serde::Deserialize;
use std::io::{BufReader, Read};

/// A positional vehicle type record as it arrives from an external configuration
/// source. Field order is fixed:
///
/// `[acquisition_cost, capacity_weight, capacity_volume, max_range,
///   consumption_electric, consumption_liquid, maintenance_cost_per_km,
///   powertrain, daily_lease_cost]`
///
/// where `powertrain` is `0` for conventional and `1` for electric. A record with a
/// wrong arity or a non numeric field is rejected at deserialization time.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct VehicleTypeRecord(
    /// Acquisition cost.
    pub Float,
    /// Capacity weight.
    pub Float,
    /// Capacity volume.
    pub Float,
    /// Maximum range.
    pub Float,
    /// Electric energy consumption, kWh per km.
    pub Float,
    /// Liquid fuel consumption, liter per km.
    pub Float,
    /// Maintenance cost per km.
    pub Float,
    /// Powertrain class flag.
    pub u8,
    /// Daily lease cost.
    pub Float,
);

impl TryFrom<&VehicleTypeRecord> for VehicleType {
    type Error = GenericError;

    fn try_from(record: &VehicleTypeRecord) -> Result<Self, Self::Error> {
        let &VehicleTypeRecord(
            acquisition_cost,
            capacity_weight,
            capacity_volume,
            max_range,
            consumption_electric,
            consumption_liquid,
            maintenance_cost_per_km,
            powertrain,
            daily_lease_cost,
        ) = record;

        let powertrain = match powertrain {
            0 => PowertrainClass::Conventional,
            1 => PowertrainClass::Electric,
            unknown => return Err(format!("unknown powertrain class: {unknown}").into()),
        };

        Ok(VehicleType {
            capacity_weight,
            capacity_volume,
            max_range,
            acquisition_cost,
            daily_lease_cost,
            consumption_electric,
            consumption_liquid,
            maintenance_cost_per_km,
            powertrain,
            initial_count: 0,
        })
    }
}

/// Keyed economic parameters as they arrive from an external configuration source.
/// An absent key reads as zero except where a different default is documented.
#[derive(Clone, Debug, Deserialize)]
pub struct EconomicParametersConfig {
    /// A fixed depot departure utility fee.
    #[serde(default)]
    pub utility_other: Float,
    /// A fixed daily maintenance overhead.
    #[serde(default)]
    pub maintenance_cost: Float,
    /// Electricity price per kWh.
    #[serde(default)]
    pub price_elec: Float,
    /// Diesel price per liter.
    #[serde(default)]
    pub price_diesel: Float,
    /// Standard working hours per day. Defaults to 8.
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: Float,
    /// Daily wage of a standard vehicle driver.
    #[serde(default)]
    pub wage_semi: Float,
    /// Daily wage of a heavy vehicle driver.
    #[serde(default)]
    pub wage_heavy: Float,
    /// Toll rate per km driven inside a toll zone.
    #[serde(default)]
    pub toll_per_km_inside: Float,
    /// Expected revenue per vehicle and day.
    #[serde(default)]
    pub revenue: Float,
    /// A share of the annual revenue granted as a fleet wide green incentive.
    #[serde(default)]
    pub green_upside: Float,
    /// Vehicle lifetime used to amortize purchase costs, in years. Defaults to 8.
    #[serde(default = "default_lifetime_years")]
    pub lifetime_years: Float,
    /// Amount of working days per year. Defaults to 250.
    #[serde(default = "default_working_days_per_year")]
    pub working_days_per_year: Float,
    /// Resale fraction of a conventional vehicle. Defaults to 0.4.
    #[serde(default = "default_resale_rate_conventional")]
    pub resale_rate_conventional: Float,
    /// Resale fraction of an electric vehicle. Defaults to 0.25.
    #[serde(default = "default_resale_rate_electric")]
    pub resale_rate_electric: Float,
}

impl Default for EconomicParametersConfig {
    fn default() -> Self {
        Self {
            utility_other: 0.,
            maintenance_cost: 0.,
            price_elec: 0.,
            price_diesel: 0.,
            hours_per_day: default_hours_per_day(),
            wage_semi: 0.,
            wage_heavy: 0.,
            toll_per_km_inside: 0.,
            revenue: 0.,
            green_upside: 0.,
            lifetime_years: default_lifetime_years(),
            working_days_per_year: default_working_days_per_year(),
            resale_rate_conventional: default_resale_rate_conventional(),
            resale_rate_electric: default_resale_rate_electric(),
        }
    }
}

/// A complete evaluation configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct EvaluationConfig {
    /// Vehicle type catalog as positional records.
    pub vehicles: Vec<VehicleTypeRecord>,
    /// Vehicles owned before the planning period. Each record must match one of the
    /// catalog records; occurrences populate per type ownership counts.
    #[serde(default)]
    pub initial_vehicles: Vec<VehicleTypeRecord>,
    /// A work time limit shared by all vehicle types, in seconds.
    pub max_work_time: Duration,
    /// Keyed economic parameters.
    #[serde(default)]
    pub parameters: EconomicParametersConfig,
}

/// Reads an evaluation configuration from a json stream.
pub fn deserialize_config<R: Read>(reader: BufReader<R>) -> GenericResult<EvaluationConfig> {
    serde_json::from_reader(reader)
        .map_err(|err| format!("cannot deserialize evaluation config: {err}").into())
}

/// Creates a ready to use evaluation from a configuration, validating it once.
pub fn create_evaluation(config: &EvaluationConfig) -> GenericResult<HfvrpEvaluation> {
    let fleet = create_fleet(config)?;
    let economics = create_economics(&config.parameters);

    HfvrpEvaluation::new(fleet, economics)
}

/// Same as [`create_evaluation`], additionally reporting the loaded catalog.
pub fn create_evaluation_with_logger(
    config: &EvaluationConfig,
    logger: &InfoLogger,
) -> GenericResult<HfvrpEvaluation> {
    let evaluation = create_evaluation(config)?;
    let fleet = evaluation.fleet();

    (logger)(
        format!(
            "loaded fleet with {} vehicle types and {} initial fleet vehicles",
            fleet.vehicle_types.len(),
            fleet.initial_fleet_size
        )
        .as_str(),
    );

    Ok(evaluation)
}

fn create_fleet(config: &EvaluationConfig) -> GenericResult<Fleet> {
    let mut vehicle_types =
        config.vehicles.iter().map(VehicleType::try_from).collect::<GenericResult<Vec<_>>>()?;

    config.initial_vehicles.iter().try_for_each(|record| {
        config
            .vehicles
            .iter()
            .position(|candidate| candidate == record)
            .map(|type_idx| vehicle_types[type_idx].initial_count += 1)
            .ok_or_else(|| {
                GenericError::from("initial fleet record does not match any vehicle type")
            })
    })?;

    Fleet::new(vehicle_types, config.max_work_time)
}

fn create_economics(config: &EconomicParametersConfig) -> EconomicParameters {
    EconomicParameters {
        depot_utility_cost: config.utility_other,
        maintenance_overhead: config.maintenance_cost,
        electricity_price: config.price_elec,
        diesel_price: config.price_diesel,
        hours_per_day: config.hours_per_day,
        wage_standard: config.wage_semi,
        wage_heavy: config.wage_heavy,
        toll_rate: config.toll_per_km_inside,
        daily_revenue: config.revenue,
        green_share: config.green_upside,
        lifetime_years: config.lifetime_years,
        working_days_per_year: config.working_days_per_year,
        resale_rate_conventional: config.resale_rate_conventional,
        resale_rate_electric: config.resale_rate_electric,
    }
}

fn default_hours_per_day() -> Float {
    DEFAULT_HOURS_PER_DAY
}

fn default_lifetime_years() -> Float {
    DEFAULT_LIFETIME_YEARS
}

fn default_working_days_per_year() -> Float {
    DEFAULT_WORKING_DAYS_PER_YEAR
}

fn default_resale_rate_conventional() -> Float {
    DEFAULT_RESALE_RATE_CONVENTIONAL
}

fn default_resale_rate_electric() -> Float {
    DEFAULT_RESALE_RATE_ELECTRIC
}
