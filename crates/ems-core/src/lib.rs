//! `ems-core`: foundational types for the EMS dispatch simulator.
//!
//! This crate is a dependency of every other `ems-*` crate.  It has no
//! `ems-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `CaseId`, `LocationIdx`                  |
//! | [`geo`]         | `GeoPoint`, haversine distance                        |
//! | [`time`]        | `SimTime`, `SimClock`, `SimConfig`                    |
//! | [`rng`]         | `SimRng` (seeded, splittable)                         |
//! | [`priority`]    | `Priority` (1 = most urgent)                          |
//! | [`error`]       | `EmsError`, `EmsResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod geo;
pub mod ids;
pub mod priority;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EmsError, EmsResult};
pub use geo::GeoPoint;
pub use ids::{CaseId, LocationIdx, VehicleId};
pub use priority::Priority;
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, SimTime};
