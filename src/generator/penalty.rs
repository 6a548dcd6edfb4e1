//! Penalties for cargo which is not served.
use crate::port::{Direction, PortMap};

/// Set the penalty for not serving each port's cargo to `penalty_coefficient` times its revenue
pub fn apply_penalties(ports: &mut PortMap, penalty_coefficient: f64) {
    for port in ports.values_mut() {
        for direction in Direction::ALL {
            let cargo = port.cargo_mut(direction);
            cargo.penalty_if_not_served = penalty_coefficient * cargo.revenue;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::ports_with_demand;
    use rstest::rstest;

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(2.5)]
    fn apply_penalties_scales_revenue(mut ports_with_demand: PortMap, #[case] coefficient: f64) {
        apply_penalties(&mut ports_with_demand, coefficient);
        for port in ports_with_demand.values() {
            assert_eq!(
                port.pickup.penalty_if_not_served,
                coefficient * port.pickup.revenue
            );
            assert_eq!(
                port.delivery.penalty_if_not_served,
                coefficient * port.delivery.revenue
            );
        }
        assert_eq!(
            ports_with_demand["SEGOT"].pickup.penalty_if_not_served,
            coefficient * 500.0
        );
    }
}
