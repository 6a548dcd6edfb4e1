//! Common routines for handling input data.
//!
//! The reference tables are tab-delimited text files with a header row. Columns are matched by
//! position, since header names vary between data sets, but every row is deserialised into a
//! struct with named, typed fields.
use crate::distance::DistanceMatrix;
use crate::options::GeneratorOptions;
use crate::port::PortMap;
use crate::request::Request;
use crate::vessel_class::VesselClassMap;
use anyhow::{Context, Result, ensure};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

mod distance;
use distance::read_distances;
mod fleet;
use fleet::read_vessel_classes;
mod port;
use port::read_ports;
mod request;
use request::read_requests;

/// A row of a tab-delimited reference table
pub trait TableRow: DeserializeOwned {
    /// Number of leading columns used. Any further columns are ignored.
    const NUM_COLUMNS: usize;
}

/// Everything read from the reference tables for one scenario
#[derive(Debug, Clone)]
pub struct ReferenceData {
    /// Requests from the scenario's demand table
    pub requests: Vec<Request>,
    /// Ports touched by any request, hub first, without any cargo assigned
    pub ports: PortMap,
    /// Vessel classes in the scenario's fleet
    pub vessel_classes: VesselClassMap,
    /// Distances between the ports, in port order
    pub distances: DistanceMatrix,
}

/// Format an error message to include the file path.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Parse a TOML file at the specified path.
///
/// # Returns
///
/// The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Read all rows of a tab-delimited table, skipping the header row.
///
/// Fields are trimmed of whitespace and blank lines are ignored. A row with too few columns or a
/// value of the wrong type is an error.
pub fn read_table<T: TableRow>(file_path: &Path) -> Result<Vec<T>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(file_path)
        .with_context(|| input_err_msg(file_path))?;

    read_table_rows(reader.records()).with_context(|| input_err_msg(file_path))
}

/// Deserialise the leading [`TableRow::NUM_COLUMNS`] columns of each record
fn read_table_rows<T, I>(records: I) -> Result<Vec<T>>
where
    T: TableRow,
    I: Iterator<Item = csv::Result<StringRecord>>,
{
    records
        .map(|record| -> Result<T> {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);
            ensure!(
                record.len() >= T::NUM_COLUMNS,
                "Line {line} has {} column(s), expected at least {}",
                record.len(),
                T::NUM_COLUMNS
            );

            let record: StringRecord = record.iter().take(T::NUM_COLUMNS).collect();
            record
                .deserialize(None)
                .with_context(|| format!("Invalid value on line {line}"))
        })
        .collect()
}

/// Read the reference tables for the scenario named in `options`.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the reference tables
/// * `options` - Generator options
///
/// # Returns
///
/// The [`ReferenceData`] for the scenario or an error.
pub fn load_reference_data(data_dir: &Path, options: &GeneratorOptions) -> Result<ReferenceData> {
    let requests = read_requests(data_dir, options)?;
    debug!("Read {} requests", requests.len());

    let ports = read_ports(data_dir, &requests, &options.hub)?;
    let vessel_classes = read_vessel_classes(data_dir, options)?;
    let distances = read_distances(data_dir, &ports)?;
    info!(
        "Scenario {}: {} requests, {} ports, {} vessel classes",
        options.scenario,
        requests.len(),
        ports.len(),
        vessel_classes.len()
    );

    Ok(ReferenceData {
        requests,
        ports,
        vessel_classes,
        distances,
    })
}
