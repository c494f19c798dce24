//! Emergency vehicle state.

use ems_core::{CaseId, GeoPoint, VehicleId};

/// One vehicle of the roster.
///
/// `deployed` and the assigned case are private: only [`Fleet`](crate::Fleet)
/// flips them, so every availability change reaches the fleet's listener.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id:   VehicleId,
    /// Station the vehicle returns to after every case.
    pub base: GeoPoint,
    pub(crate) location: GeoPoint,
    pub(crate) deployed: bool,
    pub(crate) case:     Option<CaseId>,
}

impl Vehicle {
    /// A vehicle parked and available at `base`.
    pub fn new(id: VehicleId, base: GeoPoint) -> Self {
        Self { id, base, location: base, deployed: false, case: None }
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    #[inline]
    pub fn is_deployed(&self) -> bool {
        self.deployed
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        !self.deployed
    }

    /// The case this vehicle is serving, if deployed.
    #[inline]
    pub fn case(&self) -> Option<CaseId> {
        self.case
    }
}
