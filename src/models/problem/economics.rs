#[cfg(test)]
#[path = "../../../tests/unit/models/problem/economics_test.rs"]
mod economics_test;

use crate::models::common::Cost;
use crate::models::problem::PowertrainClass;
use rosomaxa::prelude::{Float, GenericResult};

/// Default amount of standard working hours per day.
pub const DEFAULT_HOURS_PER_DAY: Float = 8.;

/// Default vehicle lifetime used to amortize purchase costs, in years.
pub const DEFAULT_LIFETIME_YEARS: Float = 8.;

/// Default amount of working days per year.
pub const DEFAULT_WORKING_DAYS_PER_YEAR: Float = 250.;

/// Default resale fraction of a conventional vehicle.
pub const DEFAULT_RESALE_RATE_CONVENTIONAL: Float = 0.40;

/// Default resale fraction of an electric vehicle.
pub const DEFAULT_RESALE_RATE_ELECTRIC: Float = 0.25;

/// City or region wide economic parameters. The snapshot is immutable once an
/// evaluation is constructed.
#[derive(Clone, Debug)]
pub struct EconomicParameters {
    /// A fixed utility fee charged once when a route departs the depot.
    pub depot_utility_cost: Cost,
    /// A fixed daily maintenance overhead charged together with the depot utility fee.
    pub maintenance_overhead: Cost,
    /// Electricity price, per kWh.
    pub electricity_price: Float,
    /// Diesel price, per liter.
    pub diesel_price: Float,
    /// Standard working hours per day, used to convert daily wages to hourly ones.
    pub hours_per_day: Float,
    /// Daily wage of a standard vehicle driver.
    pub wage_standard: Cost,
    /// Daily wage of a heavy vehicle driver.
    pub wage_heavy: Cost,
    /// Toll rate per km driven inside a toll zone.
    pub toll_rate: Float,
    /// Expected revenue per vehicle and day.
    pub daily_revenue: Cost,
    /// A share of the annual revenue granted as a fleet wide green incentive.
    pub green_share: Float,
    /// Vehicle lifetime used to amortize purchase costs, in years.
    pub lifetime_years: Float,
    /// Amount of working days per year.
    pub working_days_per_year: Float,
    /// Resale fraction of a conventional vehicle.
    pub resale_rate_conventional: Float,
    /// Resale fraction of an electric vehicle.
    pub resale_rate_electric: Float,
}

impl Default for EconomicParameters {
    fn default() -> Self {
        Self {
            depot_utility_cost: 0.,
            maintenance_overhead: 0.,
            electricity_price: 0.,
            diesel_price: 0.,
            hours_per_day: DEFAULT_HOURS_PER_DAY,
            wage_standard: 0.,
            wage_heavy: 0.,
            toll_rate: 0.,
            daily_revenue: 0.,
            green_share: 0.,
            lifetime_years: DEFAULT_LIFETIME_YEARS,
            working_days_per_year: DEFAULT_WORKING_DAYS_PER_YEAR,
            resale_rate_conventional: DEFAULT_RESALE_RATE_CONVENTIONAL,
            resale_rate_electric: DEFAULT_RESALE_RATE_ELECTRIC,
        }
    }
}

impl EconomicParameters {
    /// A fixed cost charged when a new route departs from the depot.
    pub fn depot_departure_cost(&self) -> Cost {
        self.depot_utility_cost + self.maintenance_overhead
    }

    /// Returns the resale fraction for the given powertrain class.
    pub fn resale_rate(&self, powertrain: PowertrainClass) -> Float {
        match powertrain {
            PowertrainClass::Conventional => self.resale_rate_conventional,
            PowertrainClass::Electric => self.resale_rate_electric,
        }
    }

    /// Validates the snapshot, failing fast on values which would poison evaluation.
    pub fn validate(&self) -> GenericResult<()> {
        let non_negative = [
            ("depot_utility_cost", self.depot_utility_cost),
            ("maintenance_overhead", self.maintenance_overhead),
            ("electricity_price", self.electricity_price),
            ("diesel_price", self.diesel_price),
            ("wage_standard", self.wage_standard),
            ("wage_heavy", self.wage_heavy),
            ("toll_rate", self.toll_rate),
            ("daily_revenue", self.daily_revenue),
            ("green_share", self.green_share),
        ];

        non_negative.iter().try_for_each(|&(name, value)| -> GenericResult<()> {
            if value.is_finite() && value >= 0. {
                Ok(())
            } else {
                Err(format!("economic parameter {name} must be non-negative, got: {value}").into())
            }
        })?;

        let positive = [
            ("hours_per_day", self.hours_per_day),
            ("lifetime_years", self.lifetime_years),
            ("working_days_per_year", self.working_days_per_year),
        ];

        positive.iter().try_for_each(|&(name, value)| -> GenericResult<()> {
            if value.is_finite() && value > 0. {
                Ok(())
            } else {
                Err(format!("economic parameter {name} must be positive, got: {value}").into())
            }
        })?;

        let rates = [
            ("resale_rate_conventional", self.resale_rate_conventional),
            ("resale_rate_electric", self.resale_rate_electric),
        ];

        rates.iter().try_for_each(|&(name, value)| {
            if (0. ..=1.).contains(&value) {
                Ok(())
            } else {
                Err(format!("economic parameter {name} must be within [0., 1.], got: {value}").into())
            }
        })
    }
}

/// Tunable weights of soft constraint penalties. This is the only state which can be
/// reconfigured after an evaluation is constructed, see the penalty factor setters.
#[derive(Clone, Copy, Debug)]
pub struct PenaltyWeights {
    /// A weight applied to a capacity overload.
    pub overload: Float,
    /// A multiplier which scales the volume overload penalty relative to the weight one.
    pub volume_overload_multiplier: Float,
    /// A weight applied to distance driven above the vehicle range.
    pub range_excess: Float,
    /// A weight applied to work time above the limit.
    pub overtime: Float,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self { overload: 1., volume_overload_multiplier: 10., range_excess: 1., overtime: 1. }
    }
}
