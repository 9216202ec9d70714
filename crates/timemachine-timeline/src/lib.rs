//! Timeline aggregation.
//!
//! Pure view-model construction over a user's stored records: type and
//! search filtering, grouping by calendar day, and month-span computation
//! for the navigator. No I/O anywhere in this crate; identical inputs
//! always produce an identical view.

mod month;
mod view;

pub use month::YearMonth;
pub use view::{view, DayGroup, TimelineView, TypeFilter};
