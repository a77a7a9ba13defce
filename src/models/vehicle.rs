//! Vehicle type: one capacity-bounded, depot-anchored route.

use std::fmt;

use super::location::{Location, DEPOT};

/// A vehicle and the route it drives.
///
/// The route is an ordered sequence of location IDs that starts and ends at
/// the depot once the vehicle is closed. The current load is the summed
/// demand of the routed customers and never exceeds the capacity.
///
/// # Examples
///
/// ```
/// use cvrp_genetic::models::{Location, Vehicle};
///
/// let mut v = Vehicle::anchored(10);
/// assert!(v.try_route(&Location::new(1, 0.0, 1.0, 6)));
/// assert!(!v.try_route(&Location::new(2, 0.0, 2.0, 5)));
/// v.close();
/// assert_eq!(v.route(), &[0, 1, 0]);
/// assert_eq!(v.load(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    capacity: u32,
    load: u32,
    route: Vec<usize>,
}

impl Vehicle {
    /// Creates a vehicle with an empty route.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            load: 0,
            route: Vec::new(),
        }
    }

    /// Creates a vehicle whose route already starts at the depot.
    pub fn anchored(capacity: u32) -> Self {
        let mut v = Self::new(capacity);
        v.route.push(DEPOT);
        v
    }

    /// Appends a location if its demand fits in the remaining capacity.
    ///
    /// Returns `false` and leaves the vehicle unchanged otherwise. The depot
    /// always fits and does not count toward the load.
    pub fn try_route(&mut self, location: &Location) -> bool {
        if location.is_depot() {
            self.route.push(DEPOT);
            return true;
        }
        if !self.fits(location.demand()) {
            return false;
        }
        self.load += location.demand();
        self.route.push(location.id());
        true
    }

    /// Returns the vehicle to the depot.
    pub fn close(&mut self) {
        self.route.push(DEPOT);
    }

    /// Returns `true` if an extra `demand` fits in the remaining capacity.
    pub fn fits(&self, demand: u32) -> bool {
        self.load
            .checked_add(demand)
            .is_some_and(|total| total <= self.capacity)
    }

    /// Ordered location IDs, depot anchors included.
    pub fn route(&self) -> &[usize] {
        &self.route
    }

    /// Customer IDs in visiting order (depot visits stripped).
    pub fn customers(&self) -> impl Iterator<Item = usize> + '_ {
        self.route.iter().copied().filter(|&id| id != DEPOT)
    }

    /// Number of stops in the route, depot anchors included.
    pub fn len(&self) -> usize {
        self.route.len()
    }

    /// Returns `true` if nothing has been routed yet.
    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    /// Summed demand of the routed customers.
    pub fn load(&self) -> u32 {
        self.load
    }

    /// Maximum load.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns `true` if the route starts and ends at the depot.
    pub fn is_anchored(&self) -> bool {
        self.route.len() >= 2
            && self.route.first() == Some(&DEPOT)
            && self.route.last() == Some(&DEPOT)
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.route.iter().enumerate() {
            if i > 0 {
                write!(f, " == ")?;
            }
            write!(f, "({id})")?;
        }
        Ok(())
    }
}
