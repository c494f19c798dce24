//! The `CaseSet` trait: a time-ordered source of cases.

use ems_core::SimTime;
use ems_model::Case;

use crate::CaseResult;

/// A source of cases in non-decreasing time order.
///
/// A case set keeps a cursor time.  Generating sources advance it as they
/// emit; [`set_time`](CaseSet::set_time) moves it, which is how a scenario
/// overlay resynchronises every bound source after a switch.
pub trait CaseSet {
    /// The next case, or `None` once the source is exhausted.
    fn next_case(&mut self) -> CaseResult<Option<Case>>;

    /// Current cursor time.
    fn time(&self) -> SimTime;

    fn set_time(&mut self, time: SimTime);

    /// Total number of cases this source will emit, when known.
    fn len_hint(&self) -> Option<usize> {
        None
    }
}

impl<C: CaseSet + ?Sized> CaseSet for Box<C> {
    fn next_case(&mut self) -> CaseResult<Option<Case>> {
        (**self).next_case()
    }

    fn time(&self) -> SimTime {
        (**self).time()
    }

    fn set_time(&mut self, time: SimTime) {
        (**self).set_time(time)
    }

    fn len_hint(&self) -> Option<usize> {
        (**self).len_hint()
    }
}
