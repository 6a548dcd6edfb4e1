//! Handling times grow linearly with the demand served at a port.
use super::demand::RequestRange;
use crate::options::GeneratorOptions;
use anyhow::{Result, ensure};

/// Linear interpolation of handling time between the smallest and largest request.
///
/// Demand is capped at the capacity of the largest vessel before interpolating, since no single
/// visit can handle more than that.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct HandlingTimeModel {
    min_quantity: u32,
    max_quantity: u32,
    min_handling: u32,
    max_handling: u32,
    max_capacity: u32,
}

impl HandlingTimeModel {
    /// Create a new model.
    ///
    /// # Returns
    ///
    /// The model, or an error if the smallest and largest (capped) request quantities are equal,
    /// in which case the interpolation is undefined.
    pub fn new(range: RequestRange, max_capacity: u32, options: &GeneratorOptions) -> Result<Self> {
        let min_quantity = range.min.min(max_capacity);
        let max_quantity = range.max.min(max_capacity);
        ensure!(
            max_quantity > min_quantity,
            "Cannot derive handling times: smallest and largest request quantities are both {} \
             FFE (after capping at the largest vessel capacity of {max_capacity} FFE)",
            min_quantity
        );

        Ok(Self {
            min_quantity,
            max_quantity,
            min_handling: options.min_handling,
            max_handling: options.max_handling,
            max_capacity,
        })
    }

    /// Handling time in time intervals for the given demand.
    ///
    /// The result always lies between the minimum and maximum handling times.
    pub fn handling_time(&self, demand: u32) -> u32 {
        let demand = demand.min(self.max_capacity);
        let ratio = (f64::from(demand) - f64::from(self.min_quantity))
            / (f64::from(self.max_quantity) - f64::from(self.min_quantity));
        let span = f64::from(self.max_handling - self.min_handling);

        (ratio.clamp(0.0, 1.0) * span + f64::from(self.min_handling)).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, options};
    use rstest::{fixture, rstest};

    #[fixture]
    fn model(options: GeneratorOptions) -> HandlingTimeModel {
        // Handling between 1 and 6 time intervals
        HandlingTimeModel::new(RequestRange { min: 50, max: 550 }, 800, &options).unwrap()
    }

    #[rstest]
    #[case(50, 1)]
    #[case(550, 6)]
    #[case(300, 4)] // 3.5 rounds away from zero
    #[case(140, 2)] // 1.9
    #[case(0, 1)] // below the smallest request
    #[case(700, 6)] // above the largest request
    fn handling_time_interpolates(
        model: HandlingTimeModel,
        #[case] demand: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(model.handling_time(demand), expected);
    }

    #[rstest]
    fn handling_time_caps_demand(options: GeneratorOptions) {
        // Largest request is above capacity, so it is capped to 400
        let model =
            HandlingTimeModel::new(RequestRange { min: 0, max: 1000 }, 400, &options).unwrap();
        assert_eq!(model.handling_time(400), 6);
        assert_eq!(model.handling_time(200), 4); // 3.5
        assert_eq!(model.handling_time(5000), 6);
    }

    #[rstest]
    fn new_degenerate_range(options: GeneratorOptions) {
        assert_error!(
            HandlingTimeModel::new(RequestRange { min: 100, max: 100 }, 800, &options),
            "Cannot derive handling times: smallest and largest request quantities are both 100 \
             FFE (after capping at the largest vessel capacity of 800 FFE)"
        );
    }

    #[rstest]
    fn new_degenerate_after_capping(options: GeneratorOptions) {
        let range = RequestRange {
            min: 900,
            max: 1000,
        };
        assert!(HandlingTimeModel::new(range, 800, &options).is_err());
    }
}
