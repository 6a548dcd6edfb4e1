//! Vessel classes describe the types of ship available to serve the ports.
use crate::id::define_id_type;
use crate::options::GeneratorOptions;
use indexmap::IndexMap;

define_id_type! {VesselClassID}

/// A map of [`VesselClass`]es, keyed by name, in the order they appear in the fleet data table
pub type VesselClassMap = IndexMap<VesselClassID, VesselClass>;

/// A speed at which a vessel class may sail, together with its bunker consumption
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct SailingSpeed {
    /// Speed in knots
    pub knots: f64,
    /// Speed in miles per time interval
    pub miles_per_time_interval: f64,
    /// Bunker consumption in tons per mile
    pub tons_per_mile: f64,
    /// Bunker cost in dollars per mile
    pub dollars_per_mile: f64,
    /// Bunker cost in dollars per time interval sailed
    pub dollars_per_time_interval: f64,
}

/// Bunker consumption per mile at `speed`, following the cubic speed-cost law
pub fn cost_for_speed(speed: f64, design_speed: f64, cost_design_speed: f64) -> f64 {
    (speed / design_speed).powi(3) * cost_design_speed
}

/// Technical and cost data for a vessel class, as read from the fleet data table
#[derive(PartialEq, Debug, Clone)]
pub struct VesselClassSpec {
    /// Capacity in FFE
    pub capacity: u32,
    /// Time-charter cost per day
    pub cost_tc: f64,
    /// Draught of a fully loaded vessel
    pub draught: f64,
    /// Minimum speed in knots
    pub min_speed: f64,
    /// Maximum speed in knots
    pub max_speed: f64,
    /// Design speed in knots
    pub design_speed: f64,
    /// Bunker consumption at design speed, in tons per mile
    pub cost_design_speed: f64,
    /// Bunker consumption when idle, in tons per day
    pub cost_idle: f64,
}

/// A class of identical vessels
#[derive(PartialEq, Debug, Clone)]
pub struct VesselClass {
    /// Name of the class (e.g. "Feeder_800")
    pub id: VesselClassID,
    /// Data from the fleet data table
    pub spec: VesselClassSpec,
    /// Time-charter cost per time interval
    pub cost_tc_per_time_interval: f64,
    /// Bunker consumption when idle, in tons per time interval
    pub cost_idle_per_time_interval: f64,
    /// Bunker cost when idle, in dollars per time interval
    pub cost_idle_dollars_per_time_interval: f64,
    /// Design speed in miles per time interval
    pub design_speed_miles_per_time_interval: f64,
    /// Minimum, middle and maximum speeds
    pub speeds: [SailingSpeed; 3],
    /// Number of vessels available
    pub quantity: u32,
}

impl VesselClass {
    /// Create a new vessel class, deriving per-time-interval costs and representative speeds.
    pub fn new(
        id: VesselClassID,
        spec: VesselClassSpec,
        quantity: u32,
        options: &GeneratorOptions,
    ) -> Self {
        let time_intervals_per_day = f64::from(options.time_intervals_per_day());
        let cost_idle_per_time_interval = spec.cost_idle / time_intervals_per_day;

        let speeds = [
            spec.min_speed,
            (spec.min_speed + spec.max_speed) / 2.0,
            spec.max_speed,
        ]
        .map(|knots| {
            let tons_per_mile = cost_for_speed(knots, spec.design_speed, spec.cost_design_speed);
            let dollars_per_mile = tons_per_mile * options.bunker_cost_per_ton;
            let miles_per_time_interval = Self::miles_per_time_interval(knots, options);
            SailingSpeed {
                knots,
                miles_per_time_interval,
                tons_per_mile,
                dollars_per_mile,
                dollars_per_time_interval: dollars_per_mile * miles_per_time_interval,
            }
        });

        Self {
            id,
            cost_tc_per_time_interval: spec.cost_tc / time_intervals_per_day,
            cost_idle_per_time_interval,
            cost_idle_dollars_per_time_interval: cost_idle_per_time_interval
                * options.bunker_cost_per_ton,
            design_speed_miles_per_time_interval: Self::miles_per_time_interval(
                spec.design_speed,
                options,
            ),
            speeds,
            quantity,
            spec,
        }
    }

    /// Convert a speed in knots into miles per time interval
    pub fn miles_per_time_interval(knots: f64, options: &GeneratorOptions) -> f64 {
        knots * f64::from(options.discretisation)
    }
}

/// The capacity of the largest vessel class, or `None` if there are no vessel classes
pub fn max_capacity(vessel_classes: &VesselClassMap) -> Option<u32> {
    vessel_classes.values().map(|vc| vc.spec.capacity).max()
}
