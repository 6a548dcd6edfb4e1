//! Code for reading the distance table.
use super::{TableRow, input_err_msg, read_table};
use crate::distance::DistanceMatrix;
use crate::port::PortMap;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::IgnoredAny;
use std::path::Path;

const DISTANCES_FILE_NAME: &str = "dist_dense.csv";

#[derive(PartialEq, Debug, Deserialize)]
struct DistanceRaw {
    from: String,
    to: String,
    distance: f64,
    draught: IgnoredAny,
    panama: IgnoredAny,
    suez: IgnoredAny,
}

impl TableRow for DistanceRaw {
    const NUM_COLUMNS: usize = 6;
}

/// Read the distances between the given ports.
///
/// Rows involving a port which is not in `ports` are skipped. Pairs missing from the table have a
/// distance of zero.
pub fn read_distances(data_dir: &Path, ports: &PortMap) -> Result<DistanceMatrix> {
    let file_path = data_dir.join(DISTANCES_FILE_NAME);
    let rows = read_table::<DistanceRaw>(&file_path)?;
    build_distances(rows, ports).with_context(|| input_err_msg(&file_path))
}

fn build_distances<I>(rows: I, ports: &PortMap) -> Result<DistanceMatrix>
where
    I: IntoIterator<Item = DistanceRaw>,
{
    let mut distances = DistanceMatrix::zeros(ports.len());
    for row in rows {
        let (Some(from), Some(to)) = (
            ports.get_index_of(row.from.as_str()),
            ports.get_index_of(row.to.as_str()),
        ) else {
            continue;
        };

        distances
            .set(from, to, row.distance)
            .with_context(|| format!("Invalid distance from {} to {}", row.from, row.to))?;
    }

    Ok(distances)
}
