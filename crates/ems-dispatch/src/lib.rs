//! `ems-dispatch`: vehicle-selection policies.
//!
//! # Crate layout
//!
//! | Module               | Contents                                                   |
//! |----------------------|------------------------------------------------------------|
//! | [`policy`]           | `DispatchPolicy` trait, `Selection`                        |
//! | [`ranking`]          | travel-time and disruption rankings shared by policies     |
//! | [`fastest`]          | `FastestTravelTime`                                        |
//! | [`least_disruption`] | `LeastDisruption`                                          |
//! | [`hybrid`]           | `OptimalWeightedHybrid`                                    |
//! | [`random`]           | `RandomSelector`                                           |
//! | [`kind`]             | `PolicyKind`, `build_policy`                               |
//! | [`error`]            | `DispatchError`, `DispatchResult<T>`                       |
//!
//! # Design notes
//!
//! Policies borrow the roster as `&[Vehicle]` and consider only available
//! vehicles, in roster order.  They never mutate it: the driver applies the
//! returned [`Selection`] through `Fleet::deploy`, which keeps the live
//! coverage tracker in sync.  Coverage-aware policies evaluate hypothetical
//! removals on their own scratch `CoverageTracker`.

pub mod error;
pub mod fastest;
pub mod hybrid;
pub mod kind;
pub mod least_disruption;
pub mod policy;
pub mod random;
pub mod ranking;


pub use error::{DispatchError, DispatchResult};
pub use fastest::FastestTravelTime;
pub use hybrid::OptimalWeightedHybrid;
pub use kind::{build_policy, PolicyKind};
pub use least_disruption::LeastDisruption;
pub use policy::{DispatchPolicy, Selection};
pub use random::RandomSelector;
