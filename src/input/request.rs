//! Code for reading the demand table of a scenario.
use super::{TableRow, input_err_msg, read_table};
use crate::options::GeneratorOptions;
use crate::request::Request;
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::path::Path;

/// Get the name of the demand table for a scenario
fn demand_file_name(scenario: &str) -> String {
    format!("Demand_{scenario}.csv")
}

#[derive(PartialEq, Debug, Deserialize)]
struct DemandRaw {
    origin: String,
    destination: String,
    quantity: f64,
    unit_revenue: f64,
}

impl TableRow for DemandRaw {
    const NUM_COLUMNS: usize = 4;
}

impl DemandRaw {
    fn validate(&self, demand_coefficient: f64) -> Result<()> {
        ensure!(
            self.quantity.is_finite() && self.quantity >= 0.0,
            "Request from {} to {} has an invalid quantity ({}): must be a finite number greater \
             than or equal to zero",
            self.origin,
            self.destination,
            self.quantity
        );
        ensure!(
            self.quantity * demand_coefficient <= f64::from(u32::MAX),
            "Request from {} to {} has a quantity of {} FFE, which is too large",
            self.origin,
            self.destination,
            self.quantity * demand_coefficient
        );
        ensure!(
            self.unit_revenue.is_finite() && self.unit_revenue >= 0.0,
            "Request from {} to {} has an invalid unit revenue ({}): must be a finite number \
             greater than or equal to zero",
            self.origin,
            self.destination,
            self.unit_revenue
        );

        Ok(())
    }
}

/// Read the requests of the scenario named in `options`.
///
/// Quantities are scaled by the demand coefficient.
///
/// # Returns
///
/// The requests, in file order, or an error if the table is invalid or empty.
pub fn read_requests(data_dir: &Path, options: &GeneratorOptions) -> Result<Vec<Request>> {
    let file_path = data_dir.join(demand_file_name(&options.scenario));
    let rows = read_table::<DemandRaw>(&file_path)?;
    ensure!(
        !rows.is_empty(),
        "No requests found in {}",
        file_path.display()
    );

    let requests = rows
        .into_iter()
        .map(|row| -> Result<Request> {
            row.validate(options.demand_coefficient)
                .with_context(|| input_err_msg(&file_path))?;
            Ok(Request::new(
                row.origin.into(),
                row.destination.into(),
                row.quantity,
                row.unit_revenue,
                options.demand_coefficient,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(requests)
}
