//! Monthly series for one FR Y-9C line item, built from a folder of
//! quarterly filing extracts.
//!
//! Two steps, run in order: [`extract`] reads each filing's report date and
//! the item's value, then [`series`] lays the quarterly values onto a
//! month-end calendar and fills the months in between.

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod series;
pub mod table;

pub use config::{ColumnNames, RunConfig};
pub use pipeline::{run, RunSummary};
