//! The instance generation pipeline.
//!
//! Reference data is turned into an [`Instance`] in a fixed sequence of steps: demand assignment,
//! per-port derivation, excess-capacity splitting and penalties. Every step works on the same port
//! map and distance matrix, so a port's position is its index everywhere.
use crate::distance::DistanceMatrix;
use crate::input::{ReferenceData, load_reference_data};
use crate::options::GeneratorOptions;
use crate::port::PortMap;
use crate::vessel_class::{VesselClassMap, max_capacity};
use anyhow::{Context, Result};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;

pub mod demand;
use demand::assign_demand;
pub mod derive;
use derive::derive_ports;
pub mod handling;
use handling::HandlingTimeModel;
pub mod penalty;
use penalty::apply_penalties;
pub mod split;
use split::split_excess_capacity;

/// A fully derived instance, ready to be serialised
#[derive(PartialEq, Debug)]
pub struct Instance {
    /// Ports, hub first
    pub ports: PortMap,
    /// Vessel classes
    pub vessel_classes: VesselClassMap,
    /// Distances between ports, in port order
    pub distances: DistanceMatrix,
    /// Number of time intervals in the horizon
    pub num_time_intervals: u32,
}

/// Create the random number generator for a run.
///
/// If no seed is given, one is drawn from the operating system and logged so that the run can be
/// repeated.
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    let seed = seed.unwrap_or_else(|| {
        let seed = rand::rng().random();
        info!("No random seed given; using {seed}");
        seed
    });

    ChaCha8Rng::seed_from_u64(seed)
}

/// Load the reference tables from `data_dir` and generate an instance.
pub fn generate(data_dir: &Path, options: &GeneratorOptions) -> Result<Instance> {
    let data = load_reference_data(data_dir, options)?;
    let mut rng = create_rng(options.seed);

    build_instance(data, options, &mut rng)
}

/// Derive an instance from reference data.
///
/// # Arguments
///
/// * `data` - The reference data for the scenario
/// * `options` - Generator options
/// * `rng` - Source of randomness for time windows and transfer times
///
/// # Returns
///
/// The [`Instance`] or an error if the data is inconsistent.
pub fn build_instance<R: Rng>(
    data: ReferenceData,
    options: &GeneratorOptions,
    rng: &mut R,
) -> Result<Instance> {
    let ReferenceData {
        requests,
        mut ports,
        vessel_classes,
        mut distances,
    } = data;

    let range = assign_demand(&mut ports, &requests)?;
    debug!(
        "Request quantities range from {} to {} FFE",
        range.min, range.max
    );

    let max_capacity =
        max_capacity(&vessel_classes).context("Cannot generate an instance without vessels")?;
    let handling = HandlingTimeModel::new(range, max_capacity, options)?;
    derive_ports(&mut ports, &vessel_classes, &handling, options, rng);

    let num_split = split_excess_capacity(&mut ports, &mut distances, &handling, max_capacity)?;
    if num_split > 0 {
        info!("Split {num_split} port(s) whose demand exceeds {max_capacity} FFE");
    }

    apply_penalties(&mut ports, options.penalty_coefficient);

    Ok(Instance {
        ports,
        vessel_classes,
        distances,
        num_time_intervals: options.time_intervals_in_time_horizon(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, distances, options, ports, requests, vessel_classes};
    use crate::request::Request;
    use rstest::{fixture, rstest};

    #[fixture]
    fn data(
        requests: Vec<Request>,
        ports: PortMap,
        vessel_classes: VesselClassMap,
        distances: DistanceMatrix,
    ) -> ReferenceData {
        ReferenceData {
            requests,
            ports,
            vessel_classes,
            distances,
        }
    }

    #[rstest]
    fn build_instance_works(data: ReferenceData, options: GeneratorOptions) {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let instance = build_instance(data, &options, &mut rng).unwrap();

        assert_eq!(instance.num_time_intervals, 72);
        assert_eq!(instance.ports.len(), 3);
        assert_eq!(instance.distances.len(), 3);
        assert!(instance.ports[0].is_hub);
        assert_eq!(instance.ports["SEGOT"].pickup.penalty_if_not_served, 500.0);
        assert_eq!(instance.ports["PLGDY"].delivery.penalty_if_not_served, 500.0);
    }

    #[rstest]
    fn build_instance_is_reproducible(data: ReferenceData, mut options: GeneratorOptions) {
        options.tw = true;
        options.max_tw = 4;
        options.transfer = true;
        options.max_transfer = 30;

        let first = build_instance(data.clone(), &options, &mut create_rng(Some(3))).unwrap();
        let second = build_instance(data, &options, &mut create_rng(Some(3))).unwrap();
        assert_eq!(first, second);
    }

    #[rstest]
    fn build_instance_malformed_request(mut data: ReferenceData, options: GeneratorOptions) {
        data.requests
            .push(Request::new("SEGOT".into(), "PLGDY".into(), 10.0, 1.0, 1.0));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_error!(
            build_instance(data, &options, &mut rng),
            "Malformed request from SEGOT to PLGDY: exactly one end must be the hub"
        );
    }

    #[rstest]
    fn build_instance_equal_quantities(mut data: ReferenceData, options: GeneratorOptions) {
        for request in &mut data.requests {
            request.quantity = 80;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(build_instance(data, &options, &mut rng).is_err());
    }
}
