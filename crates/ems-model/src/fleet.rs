//! The vehicle roster and its availability transitions.
//!
//! # Ownership
//!
//! `Fleet` is the single writer of `Vehicle::deployed`.  The simulation
//! driver owns the fleet; dispatch policies and metrics borrow
//! [`Fleet::vehicles`] as `&[Vehicle]` and never copy it.
//!
//! Every transition (`deploy`, `release`, and `move_to` for an available
//! vehicle) is pushed to the [`AvailabilityListener`] before the method
//! returns, so a coverage cache attached as listener can never observe a
//! stale roster.

use ems_core::{CaseId, GeoPoint, VehicleId};

use crate::{ModelError, ModelResult, Vehicle};

// ── AvailabilityListener ──────────────────────────────────────────────────────

/// Receives the full roster after every availability-relevant change.
///
/// Implementors diff against their own tracked state; the roster is passed
/// whole so listeners need no bookkeeping of which vehicle changed.
pub trait AvailabilityListener {
    fn on_availability_changed(&mut self, roster: &[Vehicle]);
}

/// No-op listener for fleets that nobody observes.
impl AvailabilityListener for () {
    fn on_availability_changed(&mut self, _roster: &[Vehicle]) {}
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

pub struct Fleet<L: AvailabilityListener = ()> {
    vehicles: Vec<Vehicle>,
    listener: L,
}

impl<L: AvailabilityListener> Fleet<L> {
    /// Wrap a roster whose `VehicleId`s equal their positions.
    ///
    /// The listener is synced with the initial roster before returning.
    pub fn new(vehicles: Vec<Vehicle>, mut listener: L) -> ModelResult<Self> {
        if let Some((position, v)) = vehicles
            .iter()
            .enumerate()
            .find(|(i, v)| v.id.index() != *i)
        {
            return Err(ModelError::IdMismatch { position, id: v.id });
        }
        listener.on_availability_changed(&vehicles);
        Ok(Self { vehicles, listener })
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    #[inline]
    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Available vehicles in roster order.
    pub fn available(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.iter().filter(|v| v.is_available())
    }

    pub fn available_count(&self) -> usize {
        self.available().count()
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Roster and listener as simultaneous borrows, for callers that read
    /// the roster while querying a listener with `&mut self` methods.
    pub fn split(&mut self) -> (&[Vehicle], &mut L) {
        (&self.vehicles, &mut self.listener)
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Mark `id` as deployed on `case`.
    pub fn deploy(&mut self, id: VehicleId, case: CaseId) -> ModelResult<()> {
        let v = self.vehicles.get_mut(id.index()).ok_or(ModelError::UnknownVehicle(id))?;
        if v.deployed {
            let current = v.case.unwrap_or(CaseId::INVALID);
            return Err(ModelError::AlreadyDeployed { vehicle: id, case: current });
        }
        v.deployed = true;
        v.case = Some(case);
        self.listener.on_availability_changed(&self.vehicles);
        Ok(())
    }

    /// Return `id` to service.  Returns the case it was serving.
    pub fn release(&mut self, id: VehicleId) -> ModelResult<Option<CaseId>> {
        let v = self.vehicles.get_mut(id.index()).ok_or(ModelError::UnknownVehicle(id))?;
        if !v.deployed {
            return Err(ModelError::NotDeployed(id));
        }
        v.deployed = false;
        let case = v.case.take();
        self.listener.on_availability_changed(&self.vehicles);
        Ok(case)
    }

    /// Move `id` to `pos`.  The listener is notified only when an available
    /// vehicle moves, since deployed vehicles cover nothing.
    pub fn move_to(&mut self, id: VehicleId, pos: GeoPoint) -> ModelResult<()> {
        let v = self.vehicles.get_mut(id.index()).ok_or(ModelError::UnknownVehicle(id))?;
        v.location = pos;
        if !v.deployed {
            self.listener.on_availability_changed(&self.vehicles);
        }
        Ok(())
    }
}
