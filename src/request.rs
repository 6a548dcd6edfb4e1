//! Requests are cargo flows between a port and the hub.
use crate::port::PortID;

/// A single origin-destination cargo flow
#[derive(PartialEq, Debug, Clone)]
pub struct Request {
    /// The port where the cargo is loaded
    pub origin: PortID,
    /// The port where the cargo is unloaded
    pub destination: PortID,
    /// Number of FFE to move, already scaled by the demand coefficient
    pub quantity: u32,
    /// Revenue per FFE moved
    pub unit_revenue: f64,
}

impl Request {
    /// Create a new request, scaling the raw quantity by `demand_coefficient`.
    ///
    /// The scaled quantity is truncated to a whole number of FFE.
    pub fn new(
        origin: PortID,
        destination: PortID,
        raw_quantity: f64,
        unit_revenue: f64,
        demand_coefficient: f64,
    ) -> Self {
        Self {
            origin,
            destination,
            quantity: (raw_quantity * demand_coefficient) as u32,
            unit_revenue,
        }
    }

    /// Total revenue for moving the whole quantity
    pub fn revenue(&self) -> f64 {
        self.unit_revenue * f64::from(self.quantity)
    }
}
