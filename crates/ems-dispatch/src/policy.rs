//! The `DispatchPolicy` trait, the extension point for selection strategies.

use std::time::Duration;

use ems_core::{SimTime, VehicleId};
use ems_model::{Case, Vehicle};

/// Outcome of a successful selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub vehicle:     VehicleId,
    /// Travel time the policy computed for the chosen vehicle, when it
    /// computed one.
    pub travel_time: Option<Duration>,
}

/// Chooses which available vehicle serves a case.
///
/// # Contract
///
/// - Only vehicles with `is_available()` may be returned.
/// - `None` means no vehicle is available; the caller keeps the case queued.
/// - The roster is read-only.  Policies that keep caches (scratch coverage
///   trackers, RNG streams) hold them in `self`.
pub trait DispatchPolicy {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    fn select(&mut self, roster: &[Vehicle], case: &Case, now: SimTime) -> Option<Selection>;
}

impl<P: DispatchPolicy + ?Sized> DispatchPolicy for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn select(&mut self, roster: &[Vehicle], case: &Case, now: SimTime) -> Option<Selection> {
        (**self).select(roster, case, now)
    }
}
