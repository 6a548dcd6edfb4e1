//! Ports are the locations visited by vessels, one of which is the hub.
use crate::id::define_id_type;
use indexmap::IndexMap;

define_id_type! {PortID}

/// A map of [`Port`]s, keyed by port code.
///
/// The position of a port in the map is its index in every parallel array of the instance
/// (allowed vessel classes, call fees and the distance matrix).
pub type PortMap = IndexMap<PortID, Port>;

/// Direction of a cargo flow, relative to the hub
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Direction {
    /// Cargo loaded at a port and carried to the hub
    Pickup,
    /// Cargo loaded at the hub and carried to a port
    Delivery,
}

impl Direction {
    /// Both directions, pickup first
    pub const ALL: [Direction; 2] = [Direction::Pickup, Direction::Delivery];
}

/// Cargo to be picked up or delivered at a port, with the quantities derived from it
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Cargo {
    /// Demand in FFE
    pub demand: u32,
    /// Total revenue for serving the whole demand
    pub revenue: f64,
    /// Revenue per FFE
    pub unit_revenue: f64,
    /// Time intervals needed to load or unload the demand
    pub handling: u32,
    /// Maximum transfer time to or from the hub, in time intervals
    pub transfer: u32,
    /// Penalty paid if the cargo is not served
    pub penalty_if_not_served: f64,
}

impl Cargo {
    /// Change the demand, recomputing the revenue from the unit revenue
    pub fn set_demand(&mut self, demand: u32) {
        self.demand = demand;
        self.revenue = self.unit_revenue * f64::from(demand);
    }
}

/// A closing time window, in time intervals (both ends inclusive)
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct TimeWindow {
    /// First time interval of the window
    pub start: u32,
    /// Last time interval of the window
    pub end: u32,
}

/// A port taking part in the instance
#[derive(PartialEq, Debug, Clone)]
pub struct Port {
    /// UN/LOCODE of the port
    pub id: PortID,
    /// Maximum draught of vessels able to call at the port
    pub draught: f64,
    /// Cost of loading or unloading one FFE
    pub cost_per_container: f64,
    /// Fixed part of the port call fee
    pub call_fee_fixed: f64,
    /// Part of the port call fee proportional to the vessel capacity (per FFE)
    pub call_fee_variable: f64,
    /// Whether this is the hub
    pub is_hub: bool,
    /// Cargo to be carried from this port to the hub
    pub pickup: Cargo,
    /// Cargo to be carried from the hub to this port
    pub delivery: Cargo,
    /// Whether each vessel class may call at the port, in vessel class order
    pub allowed_vc: Vec<bool>,
    /// Call fee for each vessel class, in vessel class order
    pub call_fee_vc: Vec<f64>,
    /// Closing time windows
    pub time_windows: Vec<TimeWindow>,
}

impl Port {
    /// Create a new port without any cargo.
    ///
    /// Whether the port is the hub is decided here, once, by comparing its code with `hub`.
    pub fn new(
        id: PortID,
        hub: &str,
        draught: f64,
        cost_per_container: f64,
        call_fee_fixed: f64,
        call_fee_variable: f64,
    ) -> Self {
        let is_hub = id.as_str() == hub;
        Self {
            id,
            draught,
            cost_per_container,
            call_fee_fixed,
            call_fee_variable,
            is_hub,
            pickup: Cargo::default(),
            delivery: Cargo::default(),
            allowed_vc: Vec::new(),
            call_fee_vc: Vec::new(),
            time_windows: Vec::new(),
        }
    }

    /// The cargo flowing in the given direction
    pub fn cargo(&self, direction: Direction) -> &Cargo {
        match direction {
            Direction::Pickup => &self.pickup,
            Direction::Delivery => &self.delivery,
        }
    }

    /// The cargo flowing in the given direction, mutably
    pub fn cargo_mut(&mut self, direction: Direction) -> &mut Cargo {
        match direction {
            Direction::Pickup => &mut self.pickup,
            Direction::Delivery => &mut self.delivery,
        }
    }
}

/// Move the hub to the front of the map, keeping every other port in discovery order
pub fn move_hub_first(ports: &mut PortMap) {
    if let Some(index) = ports.values().position(|port| port.is_hub) {
        ports.move_index(index, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::port;
    use rstest::rstest;

    #[test]
    fn port_new_sets_hub() {
        let hub = Port::new("DEBRV".into(), "DEBRV", 14.0, 80.0, 1000.0, 0.5);
        assert!(hub.is_hub);
        let other = Port::new("SEGOT".into(), "DEBRV", 14.0, 80.0, 1000.0, 0.5);
        assert!(!other.is_hub);
    }

    #[rstest]
    fn cargo_set_demand_updates_revenue(mut port: Port) {
        port.cargo_mut(Direction::Delivery).unit_revenue = 5.0;
        port.cargo_mut(Direction::Delivery).set_demand(30);
        assert_eq!(port.delivery.demand, 30);
        assert_eq!(port.delivery.revenue, 150.0);
        assert_eq!(port.cargo(Direction::Pickup), &Cargo::default());
    }

    #[test]
    fn move_hub_first_is_stable() {
        let mut ports = PortMap::new();
        for code in ["SEGOT", "PLGDY", "DEBRV", "DKAAR"] {
            ports.insert(code.into(), Port::new(code.into(), "DEBRV", 10.0, 0.0, 0.0, 0.0));
        }

        move_hub_first(&mut ports);
        let codes: Vec<_> = ports.keys().map(PortID::as_str).collect();
        assert_eq!(codes, ["DEBRV", "SEGOT", "PLGDY", "DKAAR"]);
    }
}
