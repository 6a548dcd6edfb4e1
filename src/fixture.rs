//! Fixtures for tests

use crate::distance::DistanceMatrix;
use crate::generator::demand::assign_demand;
use crate::options::GeneratorOptions;
use crate::port::{Port, PortMap, move_hub_first};
use crate::request::Request;
use crate::vessel_class::{VesselClass, VesselClassMap, VesselClassSpec};
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn options() -> GeneratorOptions {
    GeneratorOptions {
        scenario: "Baltic".into(),
        hub: "DEBRV".into(),
        discretisation: 2,
        weeks: 1,
        min_handling: 1,
        max_handling: 6,
        time_intervals_at_hub: 12,
        speeds_n: None,
        bunker_cost_per_ton: 600.0,
        tw: false,
        min_tw: 0,
        max_tw: 0,
        transfer: false,
        min_transfer: 0,
        max_transfer: 0,
        penalty_coefficient: 1.0,
        demand_coefficient: 1.0,
        seed: Some(42),
    }
}

/// A pickup at SEGOT and a delivery to PLGDY
#[fixture]
pub fn requests() -> Vec<Request> {
    vec![
        Request::new("SEGOT".into(), "DEBRV".into(), 50.0, 10.0, 1.0),
        Request::new("DEBRV".into(), "PLGDY".into(), 100.0, 5.0, 1.0),
    ]
}

#[fixture]
pub fn port() -> Port {
    Port::new("SEGOT".into(), "DEBRV", 12.0, 100.0, 2000.0, 1.5)
}

/// The hub DEBRV followed by SEGOT and PLGDY, without cargo
#[fixture]
pub fn ports() -> PortMap {
    let mut ports: PortMap = [("SEGOT", 12.0), ("DEBRV", 14.0), ("PLGDY", 9.0)]
        .into_iter()
        .map(|(code, draught)| {
            let port = Port::new(code.into(), "DEBRV", draught, 100.0, 2000.0, 1.5);
            (port.id.clone(), port)
        })
        .collect();
    move_hub_first(&mut ports);

    ports
}

#[fixture]
pub fn ports_with_demand(mut ports: PortMap, requests: Vec<Request>) -> PortMap {
    assign_demand(&mut ports, &requests).unwrap();
    ports
}

#[fixture]
pub fn vessel_class_spec() -> VesselClassSpec {
    VesselClassSpec {
        capacity: 800,
        cost_tc: 5000.0,
        draught: 9.5,
        min_speed: 10.0,
        max_speed: 15.0,
        design_speed: 12.0,
        cost_design_speed: 0.12,
        cost_idle: 2.4,
    }
}

/// A small feeder able to call everywhere and a larger one which cannot enter PLGDY
#[fixture]
pub fn vessel_classes(
    options: GeneratorOptions,
    vessel_class_spec: VesselClassSpec,
) -> VesselClassMap {
    [("Feeder_450", 450, 8.0), ("Feeder_800", 800, 9.5)]
        .into_iter()
        .map(|(name, capacity, draught)| {
            let spec = VesselClassSpec {
                capacity,
                draught,
                ..vessel_class_spec.clone()
            };
            let vc = VesselClass::new(name.into(), spec, 2, &options);
            (vc.id.clone(), vc)
        })
        .collect()
}

/// Distances between DEBRV, SEGOT and PLGDY
#[fixture]
pub fn distances() -> DistanceMatrix {
    let mut distances = DistanceMatrix::zeros(3);
    for (from, to, distance) in [(0, 1, 450.0), (0, 2, 520.0), (1, 2, 380.0)] {
        distances.set(from, to, distance).unwrap();
        distances.set(to, from, distance).unwrap();
    }

    distances
}
