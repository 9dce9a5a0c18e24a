//! Hierarchical hour rollups, earnings and report summaries over logged time
//! entries.
//!
//! Everything in this crate is pure computation over an already fetched and
//! already authorized list of [`ReportEntry`] values. Callers resolve the
//! visible scope with [`resolve_filter`] before fetching, then hand the
//! entries to [`Rollup::build`], [`Earnings::calculate`], the summary
//! functions or [`HoursMatrix::build`].

mod access;
mod dates;
mod earnings;
mod engine;
mod entry;
mod error;
mod hours;
mod ids;
mod matrix;
mod summary;

#[cfg(test)]
pub(crate) mod testing;

pub use access::*;
pub use dates::*;
pub use earnings::*;
pub use engine::*;
pub use entry::*;
pub use error::*;
pub use hours::*;
pub use ids::*;
pub use matrix::*;
pub use summary::*;
