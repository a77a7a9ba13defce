//! Location type (depot and customers).

use serde::{Deserialize, Serialize};

/// ID reserved for the depot.
pub const DEPOT: usize = 0;

/// A depot or customer location in a CVRP instance.
///
/// Location 0 is the depot. Customers carry a non-negative demand that must
/// fit in a single vehicle. Locations are immutable once the problem is
/// built; greedy passes track visited customers in their own local sets.
///
/// # Examples
///
/// ```
/// use cvrp_genetic::models::Location;
///
/// let depot = Location::depot(35.0, 35.0);
/// assert_eq!(depot.id(), 0);
/// assert_eq!(depot.demand(), 0);
/// assert!(depot.is_depot());
///
/// let c = Location::new(1, 41.0, 49.0, 10);
/// assert_eq!(c.id(), 1);
/// assert_eq!(c.demand(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    id: usize,
    x: f64,
    y: f64,
    demand: u32,
}

impl Location {
    /// Creates a new location.
    pub fn new(id: usize, x: f64, y: f64, demand: u32) -> Self {
        Self { id, x, y, demand }
    }

    /// Creates the depot at the given coordinates (id=0, demand=0).
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(DEPOT, x, y, 0)
    }

    /// Location ID (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Demand to deliver at this location.
    pub fn demand(&self) -> u32 {
        self.demand
    }

    /// Returns `true` for the depot.
    pub fn is_depot(&self) -> bool {
        self.id == DEPOT
    }

    /// Euclidean distance to another location.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_new() {
        let l = Location::new(1, 10.0, 20.0, 5);
        assert_eq!(l.id(), 1);
        assert_eq!(l.x(), 10.0);
        assert_eq!(l.y(), 20.0);
        assert_eq!(l.demand(), 5);
        assert!(!l.is_depot());
    }

    #[test]
    fn test_location_depot() {
        let d = Location::depot(35.0, 35.0);
        assert_eq!(d.id(), DEPOT);
        assert_eq!(d.demand(), 0);
        assert!(d.is_depot());
    }

    #[test]
    fn test_location_distance() {
        let a = Location::new(0, 0.0, 0.0, 0);
        let b = Location::new(1, 3.0, 4.0, 0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_location_distance_symmetric() {
        let a = Location::new(0, 1.0, 2.0, 0);
        let b = Location::new(1, 4.0, 6.0, 0);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-10);
    }
}
