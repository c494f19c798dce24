//! Fluent builder for a [`Fleet`].
//!
//! # Usage
//!
//! ```rust
//! use ems_core::GeoPoint;
//! use ems_model::FleetBuilder;
//!
//! let mut b = FleetBuilder::new();
//! let a = b.add_vehicle(GeoPoint::new(32.71, -117.16));
//! b.add_vehicles(GeoPoint::new(32.75, -117.13), 2);
//! let fleet = b.build(()).unwrap();
//!
//! assert_eq!(fleet.len(), 3);
//! assert!(fleet.get(a).unwrap().is_available());
//! ```

use ems_core::{GeoPoint, VehicleId};

use crate::{AvailabilityListener, Fleet, ModelResult, Vehicle};

/// Assigns sequential `VehicleId`s so roster positions and ids always agree.
#[derive(Default)]
pub struct FleetBuilder {
    vehicles: Vec<Vehicle>,
}

impl FleetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one vehicle stationed at `base`.
    pub fn add_vehicle(&mut self, base: GeoPoint) -> VehicleId {
        let id = VehicleId(self.vehicles.len() as u32);
        self.vehicles.push(Vehicle::new(id, base));
        id
    }

    /// Add `count` vehicles sharing one base.
    pub fn add_vehicles(&mut self, base: GeoPoint, count: usize) -> Vec<VehicleId> {
        (0..count).map(|_| self.add_vehicle(base)).collect()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Construct the fleet and sync `listener` with the initial roster.
    pub fn build<L: AvailabilityListener>(self, listener: L) -> ModelResult<Fleet<L>> {
        Fleet::new(self.vehicles, listener)
    }
}
