//! Read and validate generator options from `generator.toml`.
//!
//! This module defines the [`GeneratorOptions`] struct, which holds every option that controls how
//! an instance is derived from the reference tables, together with the derived time-interval
//! constants. Options are validated once, after which the struct is passed around by reference and
//! never modified.
use crate::input::{input_err_msg, read_toml};
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::path::Path;

/// The default name of the options file inside a data directory
pub const OPTIONS_FILE_NAME: &str = "generator.toml";

/// Number of hours in a day
const HOURS_PER_DAY: u32 = 24;

/// Number of days in a week
const DAYS_PER_WEEK: u32 = 7;

macro_rules! define_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            $value
        }
    };
}

define_param_default!(default_penalty_coefficient, f64, 1.0);
define_param_default!(default_demand_coefficient, f64, 1.0);

/// Options for generating an instance, as defined in the options file.
#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct GeneratorOptions {
    /// LINER-LIB scenario name (e.g. "Baltic"), selecting the demand and fleet roster tables
    pub scenario: String,
    /// UN/LOCODE of the hub port (e.g. "DEBRV")
    pub hub: String,
    /// Number of hours in one time interval
    pub discretisation: u32,
    /// Number of weeks in the time horizon
    pub weeks: u32,
    /// Handling time (in time intervals) at the port with the smallest request
    pub min_handling: u32,
    /// Handling time (in time intervals) at the port with the largest request
    pub max_handling: u32,
    /// Number of time intervals a vessel spends at the hub.
    ///
    /// With two-hour intervals and one day at the hub this is 12: the horizon then runs from
    /// Monday 00:00 to Sunday 00:00 and Sunday is not modelled.
    #[serde(default)]
    pub time_intervals_at_hub: u32,
    /// Number of speeds to generate (reserved)
    #[serde(default)]
    pub speeds_n: Option<u32>,
    /// Price in dollars per metric tonne of bunker
    pub bunker_cost_per_ton: f64,
    /// Whether to generate closing time windows
    #[serde(default)]
    pub tw: bool,
    /// Minimum half-width of a time window, in time intervals
    #[serde(default)]
    pub min_tw: u32,
    /// Maximum half-width of a time window, in time intervals
    #[serde(default)]
    pub max_tw: u32,
    /// Whether to generate maximum transfer times
    #[serde(default)]
    pub transfer: bool,
    /// Minimum transfer time, in time intervals
    #[serde(default)]
    pub min_transfer: u32,
    /// Maximum transfer time, in time intervals
    #[serde(default)]
    pub max_transfer: u32,
    /// If cargo is not served, the operator pays this number times the lost revenue
    #[serde(default = "default_penalty_coefficient")]
    pub penalty_coefficient: f64,
    /// Multiplier applied to every request quantity
    #[serde(default = "default_demand_coefficient")]
    pub demand_coefficient: f64,
    /// Seed for time window and transfer time generation
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Check that the `discretisation` parameter is valid
fn check_discretisation(value: u32) -> Result<()> {
    ensure!(value > 0, "discretisation cannot be zero");
    ensure!(
        HOURS_PER_DAY % value == 0,
        "discretisation must divide a day exactly (got {value} hours)"
    );

    Ok(())
}

/// Check that a `(min, max)` pair of parameters is ordered
fn check_bounds(min: u32, max: u32, name: &str) -> Result<()> {
    ensure!(
        min <= max,
        "min_{name} ({min}) must not be greater than max_{name} ({max})"
    );

    Ok(())
}

/// Check that a coefficient is finite and non-negative
fn check_non_negative(value: f64, name: &str) -> Result<()> {
    ensure!(
        value.is_finite() && value >= 0.0,
        "{name} must be a finite number greater than or equal to zero"
    );

    Ok(())
}

fn check_demand_coefficient(value: f64) -> Result<()> {
    ensure!(
        value.is_finite() && value > 0.0,
        "demand_coefficient must be a finite number greater than zero"
    );

    Ok(())
}

impl GeneratorOptions {
    /// Read an options file from the specified path.
    ///
    /// # Returns
    ///
    /// The file contents as a [`GeneratorOptions`] struct or an error if the file is invalid
    pub fn from_path<P: AsRef<Path>>(file_path: P) -> Result<GeneratorOptions> {
        let file_path = file_path.as_ref();
        let options: GeneratorOptions = read_toml(file_path)?;
        options
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(options)
    }

    /// Number of time intervals in one day
    pub fn time_intervals_per_day(&self) -> u32 {
        HOURS_PER_DAY / self.discretisation
    }

    /// Number of time intervals in the modelled horizon (excluding the time spent at the hub).
    ///
    /// Options must have been validated, which guarantees this does not overflow.
    pub fn time_intervals_in_time_horizon(&self) -> u32 {
        self.weeks * DAYS_PER_WEEK * self.time_intervals_per_day() - self.time_intervals_at_hub
    }

    /// Number of whole days for which a time window is generated.
    ///
    /// Each full day the vessel spends at the hub removes one day.
    pub fn num_days_in_time_horizon(&self) -> u32 {
        DAYS_PER_WEEK * self.weeks - self.time_intervals_at_hub / self.time_intervals_per_day()
    }

    /// Validate options after reading in file
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.scenario.trim().is_empty(), "scenario cannot be empty");
        ensure!(!self.hub.trim().is_empty(), "hub cannot be empty");

        check_discretisation(self.discretisation)?;
        ensure!(self.weeks > 0, "weeks cannot be zero");

        // Must leave at least one modelled time interval
        let total = self
            .weeks
            .checked_mul(DAYS_PER_WEEK * self.time_intervals_per_day())
            .with_context(|| format!("weeks ({}) is too large", self.weeks))?;
        ensure!(
            self.time_intervals_at_hub < total,
            "time_intervals_at_hub ({}) must be less than the {total} time intervals in {} week(s)",
            self.time_intervals_at_hub,
            self.weeks
        );

        check_bounds(self.min_handling, self.max_handling, "handling")?;
        check_bounds(self.min_tw, self.max_tw, "tw")?;
        check_bounds(self.min_transfer, self.max_transfer, "transfer")?;

        check_non_negative(self.bunker_cost_per_ton, "bunker_cost_per_ton")?;
        check_non_negative(self.penalty_coefficient, "penalty_coefficient")?;
        check_demand_coefficient(self.demand_coefficient)?;

        Ok(())
    }
}
