//! `ems-model`: vehicles, the fleet roster, cases and lifecycle events.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`vehicle`] | `Vehicle`                                                    |
//! | [`fleet`]   | `Fleet` (roster + availability transitions), `AvailabilityListener` |
//! | [`builder`] | `FleetBuilder` (fluent construction)                         |
//! | [`case`]    | `Case`, `Event`, `EventKind`                                 |
//! | [`error`]   | `ModelError`, `ModelResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.       |

pub mod builder;
pub mod case;
pub mod error;
pub mod fleet;
pub mod vehicle;


pub use builder::FleetBuilder;
pub use case::{Case, Event, EventKind};
pub use error::{ModelError, ModelResult};
pub use fleet::{AvailabilityListener, Fleet};
pub use vehicle::Vehicle;
