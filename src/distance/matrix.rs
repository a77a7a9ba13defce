//! Dense distance matrix.

use crate::models::Location;

/// A dense n×n distance matrix stored in row-major order, indexed by
/// location ID.
///
/// Built once per run and read-only afterwards. IDs missing from the
/// location set simply leave their row and column at zero.
///
/// # Examples
///
/// ```
/// use cvrp_genetic::models::Location;
/// use cvrp_genetic::distance::DistanceMatrix;
///
/// let locations = vec![
///     Location::depot(0.0, 0.0),
///     Location::new(1, 3.0, 4.0, 10),
///     Location::new(2, 6.0, 8.0, 20),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a symmetric Euclidean distance matrix from coordinates.
    pub fn from_locations(locations: &[Location]) -> Self {
        let size = locations.iter().map(|l| l.id() + 1).max().unwrap_or(0);
        let mut dm = Self::new(size);
        for (i, a) in locations.iter().enumerate() {
            for b in &locations[i + 1..] {
                let d = a.distance_to(b);
                dm.set(a.id(), b.id(), d);
                dm.set(b.id(), a.id(), d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of IDs covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns `true` if every entry is finite and non-negative.
    pub fn is_non_negative(&self) -> bool {
        self.data.iter().all(|d| d.is_finite() && *d >= 0.0)
    }

    /// Returns the nearest of `candidates` to `from`.
    ///
    /// Ties go to the candidate listed first. Returns `None` if `candidates`
    /// yields nothing.
    pub fn nearest<I>(&self, from: usize, candidates: I) -> Option<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut best: Option<(usize, f64)> = None;
        for c in candidates {
            let d = self.get(from, c);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((c, d));
            }
        }
        best.map(|(c, _)| c)
    }
}
