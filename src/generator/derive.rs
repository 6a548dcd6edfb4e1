//! Derive the per-port quantities: allowed vessel classes, call fees, handling times, time windows
//! and transfer times.
use super::handling::HandlingTimeModel;
use crate::options::GeneratorOptions;
use crate::port::{Direction, Port, PortMap, TimeWindow};
use crate::vessel_class::VesselClassMap;
use rand::Rng;

/// Derive the per-port quantities for every port.
///
/// Time window half-widths and transfer times are drawn from `rng`, in port order.
pub fn derive_ports<R: Rng>(
    ports: &mut PortMap,
    vessel_classes: &VesselClassMap,
    handling: &HandlingTimeModel,
    options: &GeneratorOptions,
    rng: &mut R,
) {
    for port in ports.values_mut() {
        derive_port(port, vessel_classes, handling, options, rng);
    }
}

fn derive_port<R: Rng>(
    port: &mut Port,
    vessel_classes: &VesselClassMap,
    handling: &HandlingTimeModel,
    options: &GeneratorOptions,
    rng: &mut R,
) {
    port.allowed_vc = vessel_classes
        .values()
        .map(|vc| vc.spec.draught <= port.draught)
        .collect();
    port.call_fee_vc = vessel_classes
        .values()
        .map(|vc| port.call_fee_fixed + port.call_fee_variable * f64::from(vc.spec.capacity))
        .collect();

    let horizon = options.time_intervals_in_time_horizon();
    if port.is_hub {
        for direction in Direction::ALL {
            let cargo = port.cargo_mut(direction);
            cargo.handling = 0;
            cargo.transfer = horizon;
        }
        port.time_windows.clear();
        return;
    }

    for direction in Direction::ALL {
        let cargo = port.cargo_mut(direction);
        cargo.handling = handling.handling_time(cargo.demand);
    }

    port.time_windows = if options.tw {
        let half_width = rng.random_range(options.min_tw..=options.max_tw);
        time_windows(options, half_width)
    } else {
        Vec::new()
    };

    for direction in Direction::ALL {
        port.cargo_mut(direction).transfer = if options.transfer {
            rng.random_range(options.min_transfer..=options.max_transfer)
        } else {
            horizon
        };
    }
}

/// One time window around the start of each modelled day, clipped to the horizon.
pub fn time_windows(options: &GeneratorOptions, half_width: u32) -> Vec<TimeWindow> {
    let horizon = options.time_intervals_in_time_horizon();
    let time_intervals_per_day = options.time_intervals_per_day();

    (0..options.num_days_in_time_horizon())
        .map(|day| {
            let centre = day * time_intervals_per_day;
            TimeWindow {
                start: centre.saturating_sub(half_width),
                end: (centre + half_width).min(horizon),
            }
        })
        .collect()
}
