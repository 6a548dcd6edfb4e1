//! Split ports whose demand cannot be carried by a single vessel.
use super::handling::HandlingTimeModel;
use crate::distance::DistanceMatrix;
use crate::port::{Direction, Port, PortID, PortMap};
use anyhow::{Result, ensure};
use log::{info, warn};

/// Suffix appended to the code of a port created by splitting
pub const EXCESS_PORT_SUFFIX: &str = "_EXCESS";

/// Split every port whose pickup or delivery demand exceeds `max_capacity`.
///
/// The original port keeps demand up to `max_capacity` in each direction and a new port, located
/// at the same place, takes the excess. Revenues and handling times of both are recomputed. The
/// new port is appended to `ports` and the distance matrix grows accordingly.
///
/// Only the ports present when this function is called are considered, so a new port is never
/// split again.
///
/// # Returns
///
/// The number of ports which were split.
pub fn split_excess_capacity(
    ports: &mut PortMap,
    distances: &mut DistanceMatrix,
    handling: &HandlingTimeModel,
    max_capacity: u32,
) -> Result<usize> {
    ensure!(
        distances.len() == ports.len(),
        "Distance matrix covers {} ports but there are {}",
        distances.len(),
        ports.len()
    );

    let num_original = ports.len();
    for index in 0..num_original {
        let original = &mut ports[index];
        if Direction::ALL
            .iter()
            .all(|direction| original.cargo(*direction).demand <= max_capacity)
        {
            continue;
        }

        let mut excess = original.clone();
        excess.id = PortID::from(format!("{}{EXCESS_PORT_SUFFIX}", original.id));
        for direction in Direction::ALL {
            let demand = original.cargo(direction).demand;
            let kept = demand.min(max_capacity);

            let cargo = original.cargo_mut(direction);
            cargo.set_demand(kept);
            cargo.handling = handling.handling_time(kept);

            let cargo = excess.cargo_mut(direction);
            cargo.set_demand(demand - kept);
            cargo.handling = handling.handling_time(demand - kept);
        }
        log_split(original, &excess, max_capacity);

        ensure!(
            !ports.contains_key(&excess.id),
            "Cannot split port: a port called {} already exists",
            excess.id
        );
        let new_index = distances.duplicate(index);
        ports.insert(excess.id.clone(), excess);
        debug_assert_eq!(new_index, ports.len() - 1);
    }

    Ok(ports.len() - num_original)
}

fn log_split(original: &Port, excess: &Port, max_capacity: u32) {
    info!(
        "Splitting port {}: excess pickup of {} FFE and delivery of {} FFE moved to {}",
        original.id, excess.pickup.demand, excess.delivery.demand, excess.id
    );

    for direction in Direction::ALL {
        let demand = excess.cargo(direction).demand;
        if demand > max_capacity {
            warn!(
                "Port {} still has {direction:?} demand of {demand} FFE, more than the largest \
                 vessel capacity of {max_capacity} FFE",
                excess.id
            );
        }
    }
}
