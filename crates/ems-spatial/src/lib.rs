//! `ems-spatial`: location sets, spatial snapping, and the travel-time oracle.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`location`] | `LocationSet` (R-tree backed), `Snap`                      |
//! | [`matrix`]   | `TravelTimeMatrix` (origins × destinations, milliseconds)  |
//! | [`oracle`]   | `TravelTimes`: snap points, look up durations             |
//! | [`loader`]   | CSV loaders for location sets and matrices                 |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod loader;
pub mod location;
pub mod matrix;
pub mod oracle;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use loader::{
    load_locations_csv, load_locations_reader, load_matrix_csv, load_matrix_reader,
    load_travel_times,
};
pub use location::{LocationSet, Snap};
pub use matrix::TravelTimeMatrix;
pub use oracle::TravelTimes;
