//! Code for reading the port registry and building the ports touched by a scenario.
use super::{TableRow, input_err_msg, read_table};
use crate::port::{Port, PortMap, move_hub_first};
use crate::request::Request;
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::IgnoredAny;
use std::path::Path;

const PORTS_FILE_NAME: &str = "ports.csv";

#[derive(PartialEq, Debug, Deserialize)]
struct PortRaw {
    code: String,
    city: IgnoredAny,
    country: IgnoredAny,
    cabotage: IgnoredAny,
    region: IgnoredAny,
    lon: IgnoredAny,
    lat: IgnoredAny,
    draught: f64,
    container_cost: f64,
    transhipment_cost: IgnoredAny,
    fee_fixed: f64,
    fee_variable: f64,
}

impl TableRow for PortRaw {
    const NUM_COLUMNS: usize = 12;
}

/// Read the port registry and create a [`Port`] for every code used by `requests`.
///
/// Ports are created in the order their codes first appear in the requests (origin before
/// destination), then the hub is moved to the front.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the reference tables
/// * `requests` - The scenario's requests
/// * `hub` - Code of the hub port
///
/// # Returns
///
/// A map of ports with the hub first, or an error if a code is missing from the registry or the
/// hub is not used by any request.
pub fn read_ports(data_dir: &Path, requests: &[Request], hub: &str) -> Result<PortMap> {
    let file_path = data_dir.join(PORTS_FILE_NAME);
    let rows = read_table::<PortRaw>(&file_path)?;
    build_ports(rows, requests, hub).with_context(|| input_err_msg(&file_path))
}

fn build_ports<I>(rows: I, requests: &[Request], hub: &str) -> Result<PortMap>
where
    I: IntoIterator<Item = PortRaw>,
{
    // If a code appears more than once, the first row wins
    let mut registry = IndexMap::new();
    for row in rows {
        registry.entry(row.code.clone()).or_insert(row);
    }

    let mut ports = PortMap::new();
    for request in requests {
        for id in [&request.origin, &request.destination] {
            if ports.contains_key(id) {
                continue;
            }

            let row = registry
                .get(id.as_str())
                .with_context(|| format!("Port {id} not found in port registry"))?;
            let port = Port::new(
                id.clone(),
                hub,
                row.draught,
                row.container_cost,
                row.fee_fixed,
                row.fee_variable,
            );
            ports.insert(id.clone(), port);
        }
    }

    ensure!(
        ports.contains_key(hub),
        "Hub port {hub} does not appear in any request"
    );
    move_hub_first(&mut ports);

    Ok(ports)
}
