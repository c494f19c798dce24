//! Case priority.
//!
//! Priorities are ordinal: `1` is the most urgent, `4` the least.  The
//! hybrid policy's weights assume that scale, so the case loader rejects
//! anything outside it.

use std::fmt;

/// Ordinal urgency of a case (lower = more urgent).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Priority(pub u8);

impl Priority {
    pub const MOST_URGENT: Priority = Priority(1);
    pub const LEAST_URGENT: Priority = Priority(4);

    /// Substituted when a policy needs a priority and the case has none.
    pub const FALLBACK: Priority = Priority(3);

    /// The standard 1–4 triage scale.
    pub const STANDARD: [Priority; 4] = [Priority(1), Priority(2), Priority(3), Priority(4)];

    /// `true` on the 1–4 scale.
    #[inline]
    pub fn is_standard(self) -> bool {
        (Self::MOST_URGENT..=Self::LEAST_URGENT).contains(&self)
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Priority as `f64` for weighting formulas.
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}
