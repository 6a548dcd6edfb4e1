//! A square matrix of port-to-port distances, indexed by port position.
use anyhow::{Result, ensure};

/// Distances in nautical miles between every pair of ports.
///
/// Row and column `i` refer to the `i`th port of the port map. The matrix is always square.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Create an `n` by `n` matrix of zero distances
    pub fn zeros(n: usize) -> Self {
        Self {
            rows: vec![vec![0.0; n]; n],
        }
    }

    /// Number of ports covered by the matrix
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix covers no ports
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distance from port `from` to port `to`
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.rows[from][to]
    }

    /// Set the distance from port `from` to port `to`
    pub fn set(&mut self, from: usize, to: usize, distance: f64) -> Result<()> {
        ensure!(
            distance.is_finite() && distance >= 0.0,
            "Invalid distance {distance}: must be a finite number greater than or equal to zero"
        );
        self.rows[from][to] = distance;

        Ok(())
    }

    /// Distances from port `from` to every port
    pub fn row(&self, from: usize) -> &[f64] {
        &self.rows[from]
    }

    /// Iterate over the rows of the matrix
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Add a port located at the same place as port `original`.
    ///
    /// Every existing row gains a column holding its distance to `original`. The new row is a copy
    /// of the original's row with a zero self-distance.
    ///
    /// # Returns
    ///
    /// The index of the new port.
    pub fn duplicate(&mut self, original: usize) -> usize {
        let n = self.rows.len();
        for row in &mut self.rows {
            let distance = row[original];
            row.push(distance);
        }

        let mut new_row = self.rows[original][..n].to_vec();
        new_row.push(0.0);
        self.rows.push(new_row);

        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn matrix() -> DistanceMatrix {
        let mut matrix = DistanceMatrix::zeros(3);
        let distances = [[0.0, 100.0, 250.0], [100.0, 0.0, 180.0], [250.0, 180.0, 0.0]];
        for (from, row) in distances.iter().enumerate() {
            for (to, distance) in row.iter().enumerate() {
                matrix.set(from, to, *distance).unwrap();
            }
        }
        matrix
    }

    #[rstest]
    fn set_rejects_negative(mut matrix: DistanceMatrix) {
        assert!(matrix.set(0, 1, -5.0).is_err());
        assert!(matrix.set(0, 1, f64::NAN).is_err());
        assert_eq!(matrix.get(0, 1), 100.0);
    }

    #[rstest]
    fn duplicate_grows_matrix(mut matrix: DistanceMatrix) {
        let index = matrix.duplicate(1);
        assert_eq!(index, 3);
        assert_eq!(matrix.len(), 4);
        assert!(matrix.iter_rows().all(|row| row.len() == 4));

        // New column: distance to the original
        assert_eq!(matrix.get(0, 3), 100.0);
        assert_eq!(matrix.get(2, 3), 180.0);
        assert_eq!(matrix.get(1, 3), 0.0);

        // New row: copy of the original with zero self-distance
        assert_eq!(matrix.row(3), &[100.0, 0.0, 180.0, 0.0]);
    }

    #[rstest]
    fn duplicate_twice_stays_square(mut matrix: DistanceMatrix) {
        matrix.duplicate(0);
        matrix.duplicate(2);
        assert_eq!(matrix.len(), 5);
        assert!(matrix.iter_rows().all(|row| row.len() == 5));
        assert_eq!(matrix.row(4), &[250.0, 180.0, 0.0, 250.0, 0.0]);
    }
}
