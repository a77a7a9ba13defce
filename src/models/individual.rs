//! Individual (candidate solution) type.

use super::location::DEPOT;
use super::Vehicle;
use crate::distance::DistanceMatrix;
use crate::evaluation::objective;

/// One candidate CVRP solution: an ordered list of vehicles.
///
/// Every customer appears in exactly one vehicle route, every route is
/// depot-anchored and capacity-feasible. Individuals are plain values;
/// operators clone before changing anything so the original stays usable.
///
/// # Examples
///
/// ```
/// use cvrp_genetic::models::{Individual, Location, Vehicle};
///
/// let mut v = Vehicle::anchored(10);
/// v.try_route(&Location::new(2, 0.0, 1.0, 3));
/// v.try_route(&Location::new(1, 0.0, 2.0, 3));
/// v.close();
///
/// let ind = Individual::new(vec![v]);
/// assert_eq!(ind.num_vehicles(), 1);
/// assert_eq!(ind.customer_order(), vec![2, 1]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    vehicles: Vec<Vehicle>,
}

impl Individual {
    /// Wraps an ordered list of vehicles.
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    /// Vehicles in order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of vehicles (routes) used.
    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// Replaces the vehicle at `index`.
    pub fn set_vehicle(&mut self, index: usize, vehicle: Vehicle) {
        self.vehicles[index] = vehicle;
    }

    /// Customer IDs in global visiting order, route boundaries discarded.
    pub fn customer_order(&self) -> Vec<usize> {
        self.vehicles.iter().flat_map(|v| v.customers()).collect()
    }

    /// Total number of customer visits.
    pub fn num_customers(&self) -> usize {
        self.vehicles.iter().map(|v| v.customers().count()).sum()
    }

    /// Routes as plain ID sequences, each starting and ending with the depot.
    pub fn routes(&self) -> Vec<Vec<usize>> {
        self.vehicles.iter().map(|v| v.route().to_vec()).collect()
    }

    /// Returns `true` if any route visits `id` (the depot always counts).
    pub fn visits(&self, id: usize) -> bool {
        id == DEPOT || self.vehicles.iter().any(|v| v.customers().any(|c| c == id))
    }

    /// Human-readable listing: one line per vehicle, then the cost.
    pub fn describe(&self, distances: &DistanceMatrix) -> String {
        let mut out = String::new();
        for (i, v) in self.vehicles.iter().enumerate() {
            out.push_str(&format!("Vehicle {} : {}\n", i + 1, v));
        }
        out.push_str(&format!("Cost : {:.3}", objective(self, distances)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    fn vehicle(capacity: u32, stops: &[(usize, u32)]) -> Vehicle {
        let mut v = Vehicle::anchored(capacity);
        for &(id, demand) in stops {
            assert!(v.try_route(&Location::new(id, 0.0, 0.0, demand)));
        }
        v.close();
        v
    }

    #[test]
    fn test_individual_empty() {
        let ind = Individual::new(vec![]);
        assert_eq!(ind.num_vehicles(), 0);
        assert_eq!(ind.num_customers(), 0);
        assert!(ind.customer_order().is_empty());
    }

    #[test]
    fn test_individual_customer_order() {
        let ind = Individual::new(vec![
            vehicle(10, &[(3, 2), (1, 2)]),
            vehicle(10, &[(2, 5)]),
        ]);
        assert_eq!(ind.customer_order(), vec![3, 1, 2]);
        assert_eq!(ind.num_customers(), 3);
        assert_eq!(ind.routes(), vec![vec![0, 3, 1, 0], vec![0, 2, 0]]);
        assert!(ind.visits(2));
        assert!(!ind.visits(4));
    }

    #[test]
    fn test_individual_set_vehicle() {
        let mut ind = Individual::new(vec![vehicle(10, &[(1, 1)]), vehicle(10, &[(2, 1)])]);
        ind.set_vehicle(1, vehicle(10, &[(3, 1)]));
        assert_eq!(ind.customer_order(), vec![1, 3]);
    }

    #[test]
    fn test_individual_describe() {
        let locations = vec![
            Location::depot(0.0, 0.0),
            Location::new(1, 3.0, 4.0, 1),
        ];
        let dm = DistanceMatrix::from_locations(&locations);
        let ind = Individual::new(vec![vehicle(10, &[(1, 1)])]);
        let text = ind.describe(&dm);
        assert!(text.starts_with("Vehicle 1 : (0) == (1) == (0)\n"));
        // 5 + 5 + one vehicle
        assert!(text.ends_with("Cost : 11.000"));
    }
}
