//! CVRP instance: locations, capacity, and the distance table.

use super::location::{Location, DEPOT};
use crate::distance::DistanceMatrix;
use crate::error::CvrpError;

const ABSENT: usize = usize::MAX;

/// Location IDs must stay below this many times the location count.
const ID_SPREAD: usize = 4;

/// Largest asymmetry tolerated between `d(a, b)` and `d(b, a)`.
const SYMMETRY_TOL: f64 = 1e-9;

/// A validated capacitated vehicle routing instance.
///
/// Holds the depot and customers, the homogeneous vehicle capacity, and the
/// read-only distance table that every operator borrows. Construction fails
/// fast on inputs the search cannot handle, most importantly a customer whose
/// demand alone exceeds the capacity. The distance table must be symmetric
/// with finite, non-negative entries, and IDs must be below
/// `4 × number of locations`.
///
/// # Examples
///
/// ```
/// use cvrp_genetic::models::{Location, Problem};
///
/// let problem = Problem::new(
///     vec![
///         Location::depot(0.0, 0.0),
///         Location::new(1, 3.0, 4.0, 4),
///         Location::new(2, 6.0, 8.0, 5),
///     ],
///     10,
/// )
/// .unwrap();
/// assert_eq!(problem.num_customers(), 2);
/// assert!((problem.distance(0, 1) - 5.0).abs() < 1e-10);
///
/// let err = Problem::new(
///     vec![Location::depot(0.0, 0.0), Location::new(1, 1.0, 0.0, 11)],
///     10,
/// );
/// assert!(err.is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    locations: Vec<Location>,
    index: Vec<usize>,
    distances: DistanceMatrix,
    capacity: u32,
}

impl Problem {
    /// Builds an instance with a Euclidean distance table computed from the
    /// location coordinates.
    pub fn new(locations: Vec<Location>, capacity: u32) -> Result<Self, CvrpError> {
        check_ids(&locations)?;
        let distances = DistanceMatrix::from_locations(&locations);
        Self::with_distances(locations, capacity, distances)
    }

    /// Builds an instance around an externally supplied distance table
    /// indexed by location ID.
    pub fn with_distances(
        mut locations: Vec<Location>,
        capacity: u32,
        distances: DistanceMatrix,
    ) -> Result<Self, CvrpError> {
        if capacity == 0 {
            return Err(CvrpError::InvalidConfig(
                "vehicle capacity must be positive".into(),
            ));
        }

        check_ids(&locations)?;
        if !distances.is_non_negative() {
            return Err(CvrpError::InvalidDistanceTable(
                "entries must be finite and non-negative".into(),
            ));
        }
        if !distances.is_symmetric(SYMMETRY_TOL) {
            return Err(CvrpError::InvalidDistanceTable(
                "table must be symmetric".into(),
            ));
        }

        locations.sort_by_key(|l| l.id());
        let bound = locations.last().map_or(0, |l| l.id() + 1);
        let mut index = vec![ABSENT; bound];

        for (pos, loc) in locations.iter().enumerate() {
            if index[loc.id()] != ABSENT {
                return Err(CvrpError::DuplicateLocation(loc.id()));
            }
            index[loc.id()] = pos;

            if loc.id() >= distances.size() {
                return Err(CvrpError::DistanceTableTooSmall {
                    size: distances.size(),
                    id: loc.id(),
                });
            }
            if loc.is_depot() {
                if loc.demand() != 0 {
                    return Err(CvrpError::DepotDemand(loc.demand()));
                }
            } else if loc.demand() > capacity {
                return Err(CvrpError::InfeasibleDemand {
                    id: loc.id(),
                    demand: loc.demand(),
                    capacity,
                });
            }
        }

        if index.first().is_none_or(|&p| p == ABSENT) {
            return Err(CvrpError::MissingDepot);
        }
        if locations.len() < 2 {
            return Err(CvrpError::NoCustomers);
        }

        Ok(Self {
            locations,
            index,
            distances,
            capacity,
        })
    }

    /// Returns the location with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not part of this instance.
    pub fn location(&self, id: usize) -> &Location {
        &self.locations[self.index[id]]
    }

    /// Returns `true` if `id` names a location of this instance.
    pub fn contains(&self, id: usize) -> bool {
        self.index.get(id).is_some_and(|&p| p != ABSENT)
    }

    /// The depot.
    pub fn depot(&self) -> &Location {
        self.location(DEPOT)
    }

    /// All locations sorted by ID, depot first.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Customers sorted by ID (depot excluded).
    pub fn customers(&self) -> &[Location] {
        &self.locations[1..]
    }

    /// Customer IDs in ascending order.
    pub fn customer_ids(&self) -> Vec<usize> {
        self.customers().iter().map(|l| l.id()).collect()
    }

    /// Number of customers (depot excluded).
    pub fn num_customers(&self) -> usize {
        self.locations.len() - 1
    }

    /// One past the largest location ID; sizes ID-indexed scratch tables.
    pub fn id_bound(&self) -> usize {
        self.index.len()
    }

    /// Vehicle capacity (homogeneous fleet).
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// The distance table.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Distance between two location IDs.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }
}

fn check_ids(locations: &[Location]) -> Result<(), CvrpError> {
    let count = locations.len();
    let limit = count.saturating_mul(ID_SPREAD);
    match locations.iter().find(|l| l.id() >= limit) {
        Some(l) => Err(CvrpError::LocationIdOutOfRange {
            id: l.id(),
            count,
            limit,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Location> {
        vec![
            Location::new(2, 6.0, 8.0, 5),
            Location::depot(0.0, 0.0),
            Location::new(1, 3.0, 4.0, 4),
        ]
    }

    #[test]
    fn test_problem_sorts_by_id() {
        let p = Problem::new(sample(), 10).expect("valid");
        assert_eq!(p.depot().id(), 0);
        assert_eq!(p.customer_ids(), vec![1, 2]);
        assert_eq!(p.location(2).demand(), 5);
        assert_eq!(p.id_bound(), 3);
        assert!(p.contains(1));
        assert!(!p.contains(3));
    }

    #[test]
    fn test_problem_infeasible_demand() {
        let err = Problem::new(sample(), 4).unwrap_err();
        assert!(matches!(
            err,
            CvrpError::InfeasibleDemand {
                id: 2,
                demand: 5,
                capacity: 4
            }
        ));
    }

    #[test]
    fn test_problem_missing_depot() {
        let err = Problem::new(vec![Location::new(1, 0.0, 0.0, 1)], 10).unwrap_err();
        assert!(matches!(err, CvrpError::MissingDepot));
    }

    #[test]
    fn test_problem_depot_demand() {
        let err = Problem::new(
            vec![Location::new(0, 0.0, 0.0, 3), Location::new(1, 0.0, 0.0, 1)],
            10,
        )
        .unwrap_err();
        assert!(matches!(err, CvrpError::DepotDemand(3)));
    }

    #[test]
    fn test_problem_duplicate_id() {
        let mut locs = sample();
        locs.push(Location::new(1, 9.0, 9.0, 1));
        let err = Problem::new(locs, 10).unwrap_err();
        assert!(matches!(err, CvrpError::DuplicateLocation(1)));
    }

    #[test]
    fn test_problem_no_customers() {
        let err = Problem::new(vec![Location::depot(0.0, 0.0)], 10).unwrap_err();
        assert!(matches!(err, CvrpError::NoCustomers));
    }

    #[test]
    fn test_problem_zero_capacity() {
        let err = Problem::new(sample(), 0).unwrap_err();
        assert!(matches!(err, CvrpError::InvalidConfig(_)));
    }

    #[test]
    fn test_problem_distance_table_too_small() {
        let dm = DistanceMatrix::new(2);
        let err = Problem::with_distances(sample(), 10, dm).unwrap_err();
        assert!(matches!(err, CvrpError::DistanceTableTooSmall { size: 2, id: 2 }));
    }

    #[test]
    fn test_problem_sparse_ids() {
        let p = Problem::new(
            vec![
                Location::depot(0.0, 0.0),
                Location::new(5, 1.0, 0.0, 1),
                Location::new(3, 2.0, 0.0, 1),
            ],
            10,
        )
        .expect("valid");
        assert_eq!(p.customer_ids(), vec![3, 5]);
        assert_eq!(p.id_bound(), 6);
        assert!(!p.contains(4));
        assert!((p.distance(3, 5) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_problem_rejects_huge_id() {
        let mut locs = sample();
        locs.push(Location::new(usize::MAX, 1.0, 1.0, 1));
        let err = Problem::new(locs, 10).unwrap_err();
        assert!(matches!(
            err,
            CvrpError::LocationIdOutOfRange {
                id: usize::MAX,
                count: 4,
                limit: 16
            }
        ));
    }

    #[test]
    fn test_problem_rejects_sparse_id_far_above_count() {
        let mut locs = sample();
        locs.push(Location::new(200_000, 1.0, 1.0, 1));
        let err = Problem::new(locs.clone(), 10).unwrap_err();
        assert!(matches!(err, CvrpError::LocationIdOutOfRange { id: 200_000, .. }));
        let err = Problem::with_distances(locs, 10, DistanceMatrix::new(3)).unwrap_err();
        assert!(matches!(err, CvrpError::LocationIdOutOfRange { id: 200_000, .. }));
    }

    #[test]
    fn test_problem_rejects_asymmetric_table() {
        #[rustfmt::skip]
        let data = vec![
            0.0, 5.0, 9.0,
            5.0, 0.0, 4.0,
            2.0, 4.0, 0.0,
        ];
        let dm = DistanceMatrix::from_data(3, data).expect("square");
        let err = Problem::with_distances(sample(), 10, dm).unwrap_err();
        assert!(matches!(err, CvrpError::InvalidDistanceTable(_)));
    }

    #[test]
    fn test_problem_rejects_negative_or_nan_table() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let mut dm = DistanceMatrix::new(3);
            dm.set(1, 2, bad);
            dm.set(2, 1, bad);
            let err = Problem::with_distances(sample(), 10, dm).unwrap_err();
            assert!(matches!(err, CvrpError::InvalidDistanceTable(_)));
        }
    }

    #[test]
    fn test_problem_accepts_symmetric_table() {
        #[rustfmt::skip]
        let data = vec![
            0.0, 5.0, 9.0,
            5.0, 0.0, 4.0,
            9.0, 4.0, 0.0,
        ];
        let dm = DistanceMatrix::from_data(3, data).expect("square");
        let p = Problem::with_distances(sample(), 10, dm).expect("valid");
        assert_eq!(p.distance(2, 0), 9.0);
    }
}
