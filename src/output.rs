//! The module responsible for writing instance documents.
//!
//! The instance is converted into an [`InstanceDocument`] whose field names match the JSON reader
//! of the routing solver, then written with `serde_json`. Every real value is rounded to four
//! decimal places.
use crate::generator::Instance;
use crate::port::Port;
use crate::vessel_class::{SailingSpeed, VesselClass};
use anyhow::{Context, Result, ensure};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Number of decimal places kept for real values
const DECIMAL_PLACES: i32 = 4;

/// Round a real value to [`DECIMAL_PLACES`] decimal places
pub fn round4(value: f64) -> f64 {
    let factor = 10f64.powi(DECIMAL_PLACES);
    (value * factor).round() / factor
}

fn round_all(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    values.into_iter().map(round4).collect()
}

/// An instance as read by the routing solver
#[derive(PartialEq, Debug, Serialize)]
pub struct InstanceDocument<'a> {
    num_ports: usize,
    num_vessel_classes: usize,
    num_time_intervals: u32,
    ports: Vec<PortRecord<'a>>,
    vessel_classes: Vec<VesselClassRecord<'a>>,
    distances: Vec<Vec<f64>>,
}

#[derive(PartialEq, Debug, Serialize)]
struct PortRecord<'a> {
    #[serde(rename = "unlo_code")]
    code: &'a str,
    draught: f64,
    #[serde(rename = "cost_per_loaded_or_unloaded_ffe_in_dollars")]
    cost_per_container: f64,
    total_movement_cost_pickup: f64,
    total_movement_cost_delivery: f64,
    #[serde(rename = "call_fee_fixed_in_dollars")]
    call_fee_fixed: f64,
    #[serde(rename = "call_fee_per_ffe_of_vessel_capacity_in_dollars")]
    call_fee_variable: f64,
    #[serde(rename = "call_fee_per_vessel_class_in_dollars")]
    call_fee_vc: Vec<f64>,
    is_hub: bool,
    #[serde(rename = "pickup_demand_in_ffe")]
    pickup_demand: u32,
    #[serde(rename = "delivery_demand_in_ffe")]
    delivery_demand: u32,
    #[serde(rename = "total_revenue_for_pickup")]
    pickup_revenue: f64,
    #[serde(rename = "total_revenue_for_delivery")]
    delivery_revenue: f64,
    #[serde(rename = "unit_revenue_per_pickup_ffe")]
    pickup_unit_revenue: f64,
    #[serde(rename = "unit_revenue_per_delivery_ffe")]
    delivery_unit_revenue: f64,
    #[serde(rename = "allowed_vessel_classes")]
    allowed_vc: &'a [bool],
    #[serde(rename = "pickup_handling_time_in_time_intervals")]
    pickup_handling: u32,
    #[serde(rename = "delivery_handling_time_in_time_intervals")]
    delivery_handling: u32,
    number_of_time_windows: usize,
    time_windows_start_time_intervals: Vec<u32>,
    time_windows_end_time_intervals: Vec<u32>,
    #[serde(rename = "pickup_max_transit_time_in_time_intervals")]
    pickup_transfer: u32,
    #[serde(rename = "delivery_max_transit_time_in_time_intervals")]
    delivery_transfer: u32,
    penalty_if_not_served_pickup: f64,
    penalty_if_not_served_delivery: f64,
    distances: Vec<f64>,
}

impl<'a> PortRecord<'a> {
    fn new(port: &'a Port, distances: &[f64]) -> Self {
        let movement_cost = |demand: u32| round4(port.cost_per_container * f64::from(demand));

        Self {
            code: port.id.as_str(),
            draught: round4(port.draught),
            cost_per_container: round4(port.cost_per_container),
            total_movement_cost_pickup: movement_cost(port.pickup.demand),
            total_movement_cost_delivery: movement_cost(port.delivery.demand),
            call_fee_fixed: round4(port.call_fee_fixed),
            call_fee_variable: round4(port.call_fee_variable),
            call_fee_vc: round_all(port.call_fee_vc.iter().copied()),
            is_hub: port.is_hub,
            pickup_demand: port.pickup.demand,
            delivery_demand: port.delivery.demand,
            pickup_revenue: round4(port.pickup.revenue),
            delivery_revenue: round4(port.delivery.revenue),
            pickup_unit_revenue: round4(port.pickup.unit_revenue),
            delivery_unit_revenue: round4(port.delivery.unit_revenue),
            allowed_vc: &port.allowed_vc,
            pickup_handling: port.pickup.handling,
            delivery_handling: port.delivery.handling,
            number_of_time_windows: port.time_windows.len(),
            time_windows_start_time_intervals: port
                .time_windows
                .iter()
                .map(|tw| tw.start)
                .collect(),
            time_windows_end_time_intervals: port.time_windows.iter().map(|tw| tw.end).collect(),
            pickup_transfer: port.pickup.transfer,
            delivery_transfer: port.delivery.transfer,
            penalty_if_not_served_pickup: round4(port.pickup.penalty_if_not_served),
            penalty_if_not_served_delivery: round4(port.delivery.penalty_if_not_served),
            distances: round_all(distances.iter().copied()),
        }
    }
}

#[derive(PartialEq, Debug, Serialize)]
struct VesselClassRecord<'a> {
    #[serde(rename = "vessel_class_name")]
    name: &'a str,
    #[serde(rename = "capacity_in_ffe")]
    capacity: u32,
    time_charter_cost_per_day: f64,
    time_charter_cost_per_time_interval: f64,
    draught: f64,
    min_speed_in_knots: f64,
    max_speed_in_knots: f64,
    design_speed_in_knots: f64,
    min_speed_in_miles_per_time_interval: f64,
    max_speed_in_miles_per_time_interval: f64,
    design_speed_in_miles_per_time_interval: f64,
    cost_at_design_speed_in_tons_of_bunker_per_mile: f64,
    cost_when_idle_in_tons_of_bunker_per_day: f64,
    cost_when_idle_in_tons_of_bunker_per_time_interval: f64,
    cost_when_idle_in_dollars_per_time_interval: f64,
    number_of_available_vessels: u32,
    speeds_in_knots: Vec<f64>,
    speeds_in_miles_per_time_interval: Vec<f64>,
    speed_costs_in_tons_of_bunker_per_mile: Vec<f64>,
    speed_costs_in_dollars_per_mile: Vec<f64>,
    speed_costs_in_dollars_per_time_interval: Vec<f64>,
}

impl<'a> VesselClassRecord<'a> {
    fn new(vc: &'a VesselClass) -> Self {
        let spec = &vc.spec;
        let [min_speed, _, max_speed] = &vc.speeds;
        let speeds = |f: fn(&SailingSpeed) -> f64| round_all(vc.speeds.iter().map(f));

        Self {
            name: vc.id.as_str(),
            capacity: spec.capacity,
            time_charter_cost_per_day: round4(spec.cost_tc),
            time_charter_cost_per_time_interval: round4(vc.cost_tc_per_time_interval),
            draught: round4(spec.draught),
            min_speed_in_knots: round4(spec.min_speed),
            max_speed_in_knots: round4(spec.max_speed),
            design_speed_in_knots: round4(spec.design_speed),
            min_speed_in_miles_per_time_interval: round4(min_speed.miles_per_time_interval),
            max_speed_in_miles_per_time_interval: round4(max_speed.miles_per_time_interval),
            design_speed_in_miles_per_time_interval: round4(
                vc.design_speed_miles_per_time_interval,
            ),
            cost_at_design_speed_in_tons_of_bunker_per_mile: round4(spec.cost_design_speed),
            cost_when_idle_in_tons_of_bunker_per_day: round4(spec.cost_idle),
            cost_when_idle_in_tons_of_bunker_per_time_interval: round4(
                vc.cost_idle_per_time_interval,
            ),
            cost_when_idle_in_dollars_per_time_interval: round4(
                vc.cost_idle_dollars_per_time_interval,
            ),
            number_of_available_vessels: vc.quantity,
            speeds_in_knots: speeds(|s| s.knots),
            speeds_in_miles_per_time_interval: speeds(|s| s.miles_per_time_interval),
            speed_costs_in_tons_of_bunker_per_mile: speeds(|s| s.tons_per_mile),
            speed_costs_in_dollars_per_mile: speeds(|s| s.dollars_per_mile),
            speed_costs_in_dollars_per_time_interval: speeds(|s| s.dollars_per_time_interval),
        }
    }
}

impl<'a> InstanceDocument<'a> {
    /// Convert an instance into a document
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            num_ports: instance.ports.len(),
            num_vessel_classes: instance.vessel_classes.len(),
            num_time_intervals: instance.num_time_intervals,
            ports: instance
                .ports
                .values()
                .zip(instance.distances.iter_rows())
                .map(|(port, row)| PortRecord::new(port, row))
                .collect(),
            vessel_classes: instance
                .vessel_classes
                .values()
                .map(VesselClassRecord::new)
                .collect(),
            distances: instance
                .distances
                .iter_rows()
                .map(|row| round_all(row.iter().copied()))
                .collect(),
        }
    }
}

/// Write an instance as pretty-printed JSON, followed by a newline
pub fn write_instance<W: Write>(mut writer: W, instance: &Instance) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, &InstanceDocument::new(instance))?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Write an instance to the file at `file_path`.
///
/// An existing file is only replaced if `overwrite` is true.
pub fn write_instance_to_path(
    file_path: &Path,
    instance: &Instance,
    overwrite: bool,
) -> Result<()> {
    ensure!(
        overwrite || !file_path.exists(),
        "Output file {} already exists. Use --overwrite to replace it.",
        file_path.display()
    );

    let file = File::create(file_path)
        .with_context(|| format!("Could not create output file {}", file_path.display()))?;
    write_instance(BufWriter::new(file), instance)
        .with_context(|| format!("Error writing {}", file_path.display()))
}
