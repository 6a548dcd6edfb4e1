//! Code for reading vessel classes from the fleet roster and fleet data tables.
use super::{TableRow, input_err_msg, read_table};
use crate::options::GeneratorOptions;
use crate::vessel_class::{VesselClass, VesselClassID, VesselClassMap, VesselClassSpec};
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;
use std::path::Path;

const FLEET_DATA_FILE_NAME: &str = "fleet_data.csv";

/// Get the name of the fleet roster table for a scenario
fn fleet_roster_file_name(scenario: &str) -> String {
    format!("fleet_{scenario}.csv")
}

#[derive(PartialEq, Debug, Deserialize)]
struct FleetRosterRaw {
    vessel_class: String,
    count: u32,
}

impl TableRow for FleetRosterRaw {
    const NUM_COLUMNS: usize = 2;
}

#[derive(PartialEq, Debug, Deserialize)]
struct FleetDataRaw {
    vessel_class: String,
    capacity: u32,
    cost_tc: f64,
    draught: f64,
    min_speed: f64,
    max_speed: f64,
    design_speed: f64,
    cost_design_speed: f64,
    cost_idle: f64,
}

impl TableRow for FleetDataRaw {
    const NUM_COLUMNS: usize = 9;
}

impl FleetDataRaw {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.capacity > 0,
            "Vessel class {} has zero capacity",
            self.vessel_class
        );
        ensure!(
            self.design_speed > 0.0,
            "Vessel class {} must have a design speed greater than zero",
            self.vessel_class
        );
        ensure!(
            self.min_speed <= self.max_speed,
            "Vessel class {} has a minimum speed greater than its maximum speed",
            self.vessel_class
        );

        Ok(())
    }
}

/// Read the vessel classes of the scenario's fleet.
///
/// Only classes listed in the scenario's fleet roster are kept, in fleet data order. The number of
/// vessels of each class is the roster count divided by the number of weeks, but never less than
/// one.
///
/// # Returns
///
/// The vessel classes or an error if a table is invalid or no class is available.
pub fn read_vessel_classes(
    data_dir: &Path,
    options: &GeneratorOptions,
) -> Result<VesselClassMap> {
    let roster_path = data_dir.join(fleet_roster_file_name(&options.scenario));
    let roster = read_table::<FleetRosterRaw>(&roster_path)?;

    let data_path = data_dir.join(FLEET_DATA_FILE_NAME);
    let data = read_table::<FleetDataRaw>(&data_path)?;

    build_vessel_classes(roster, data, options).with_context(|| input_err_msg(&data_path))
}

fn build_vessel_classes(
    roster: Vec<FleetRosterRaw>,
    data: Vec<FleetDataRaw>,
    options: &GeneratorOptions,
) -> Result<VesselClassMap> {
    let mut counts: IndexMap<String, u32> = roster
        .into_iter()
        .map(|row| (row.vessel_class, row.count))
        .collect();

    let mut vessel_classes = VesselClassMap::new();
    for row in data {
        let Some(count) = counts.shift_remove(&row.vessel_class) else {
            continue;
        };
        row.validate()?;

        let id: VesselClassID = row.vessel_class.into();
        let spec = VesselClassSpec {
            capacity: row.capacity,
            cost_tc: row.cost_tc,
            draught: row.draught,
            min_speed: row.min_speed,
            max_speed: row.max_speed,
            design_speed: row.design_speed,
            cost_design_speed: row.cost_design_speed,
            cost_idle: row.cost_idle,
        };
        let quantity = (count / options.weeks).max(1);
        vessel_classes.insert(
            id.clone(),
            VesselClass::new(id, spec, quantity, options),
        );
    }

    for name in counts.keys() {
        warn!("Vessel class {name} is in the fleet roster but has no fleet data; ignoring");
    }

    ensure!(
        !vessel_classes.is_empty(),
        "None of the vessel classes in the fleet roster for scenario {} were found",
        options.scenario
    );

    Ok(vessel_classes)
}
