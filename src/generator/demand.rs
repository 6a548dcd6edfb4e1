//! Assign the demand of each request to the non-hub port it serves.
use crate::port::{Direction, PortMap};
use crate::request::Request;
use anyhow::{Context, Result, bail};
use itertools::Itertools;

/// Smallest and largest request quantity across all requests
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct RequestRange {
    /// Smallest request quantity
    pub min: u32,
    /// Largest request quantity
    pub max: u32,
}

/// Assign demand and revenue from `requests` to `ports`.
///
/// A request from the hub is delivery demand at its destination; a request to the hub is pickup
/// demand at its origin. If several requests serve the same port in the same direction, the last
/// one wins.
///
/// # Returns
///
/// The range of request quantities, or an error if a request does not have exactly one endpoint at
/// the hub.
pub fn assign_demand(ports: &mut PortMap, requests: &[Request]) -> Result<RequestRange> {
    let (min, max) = requests
        .iter()
        .map(|request| request.quantity)
        .minmax()
        .into_option()
        .context("Cannot assign demand: there are no requests")?;

    for request in requests {
        let origin_is_hub = ports
            .get(&request.origin)
            .with_context(|| format!("Unknown origin port {}", request.origin))?
            .is_hub;
        let destination_is_hub = ports
            .get(&request.destination)
            .with_context(|| format!("Unknown destination port {}", request.destination))?
            .is_hub;

        let (id, direction) = match (origin_is_hub, destination_is_hub) {
            (true, false) => (&request.destination, Direction::Delivery),
            (false, true) => (&request.origin, Direction::Pickup),
            _ => bail!(
                "Malformed request from {} to {}: exactly one end must be the hub",
                request.origin,
                request.destination
            ),
        };

        // Port was found above
        let cargo = ports[id].cargo_mut(direction);
        cargo.demand = request.quantity;
        cargo.revenue = request.revenue();
        cargo.unit_revenue = request.unit_revenue;
    }

    Ok(RequestRange { min, max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, ports, requests};
    use rstest::rstest;

    #[rstest]
    fn assign_demand_works(mut ports: PortMap, requests: Vec<Request>) {
        let range = assign_demand(&mut ports, &requests).unwrap();
        assert_eq!(range, RequestRange { min: 50, max: 100 });

        let segot = &ports["SEGOT"];
        assert_eq!(segot.pickup.demand, 50);
        assert_eq!(segot.pickup.revenue, 500.0);
        assert_eq!(segot.pickup.unit_revenue, 10.0);
        assert_eq!(segot.delivery.demand, 0);

        let plgdy = &ports["PLGDY"];
        assert_eq!(plgdy.delivery.demand, 100);
        assert_eq!(plgdy.delivery.revenue, 500.0);
        assert_eq!(plgdy.pickup.demand, 0);

        let hub = &ports["DEBRV"];
        assert_eq!(hub.pickup.demand, 0);
        assert_eq!(hub.delivery.demand, 0);
    }

    #[rstest]
    fn assign_demand_last_request_wins(mut ports: PortMap, mut requests: Vec<Request>) {
        requests.push(Request::new("SEGOT".into(), "DEBRV".into(), 70.0, 2.0, 1.0));
        let range = assign_demand(&mut ports, &requests).unwrap();
        assert_eq!(range, RequestRange { min: 50, max: 100 });
        assert_eq!(ports["SEGOT"].pickup.demand, 70);
        assert_eq!(ports["SEGOT"].pickup.revenue, 140.0);
    }

    #[rstest]
    #[case("DEBRV", "DEBRV")]
    #[case("SEGOT", "PLGDY")]
    fn assign_demand_malformed(
        mut ports: PortMap,
        #[case] origin: &str,
        #[case] destination: &str,
    ) {
        let requests = [Request::new(origin.into(), destination.into(), 10.0, 1.0, 1.0)];
        assert_error!(
            assign_demand(&mut ports, &requests),
            format!(
                "Malformed request from {origin} to {destination}: exactly one end must be the hub"
            )
        );
    }

    #[rstest]
    fn assign_demand_no_requests(mut ports: PortMap) {
        assert!(assign_demand(&mut ports, &[]).is_err());
    }
}
