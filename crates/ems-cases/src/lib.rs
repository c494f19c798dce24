//! `ems-cases`: where cases come from.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`case_set`]  | `CaseSet` trait                                           |
//! | [`random`]    | `RandomCaseSet` (interval + location + priority generators) |
//! | [`defined`]   | `DefinedCaseSet` (replay of a known list)                 |
//! | [`loader`]    | `load_cases_csv`, `load_cases_reader`                     |
//! | [`scenario`]  | `Scenario`, `ScenarioController`                          |
//! | [`overlay`]   | `ScenarioCaseSet`                                         |
//! | [`error`]     | `CaseError`, `CaseResult<T>`                              |
//!
//! # Overlay model (summary)
//!
//! ```text
//! loop:
//!   case     = current scenario's next case
//!   (s, t)   = controller.retrieve_next_scenario(case.time)
//!   s == current → accept case, move every case set to case.time
//!   otherwise    → switch to s, move every case set to t, retry
//! ```

pub mod case_set;
pub mod defined;
pub mod error;
pub mod loader;
pub mod overlay;
pub mod random;
pub mod scenario;


pub use case_set::CaseSet;
pub use defined::DefinedCaseSet;
pub use error::{CaseError, CaseResult};
pub use loader::{load_cases_csv, load_cases_reader, DATE_FORMAT};
pub use overlay::ScenarioCaseSet;
pub use random::RandomCaseSet;
pub use scenario::{Scenario, ScenarioController};
