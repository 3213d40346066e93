//! Bar loading

pub mod csv_source;
pub mod provider;

pub use csv_source::CsvBarSource;
pub use provider::{BarSource, DataError};
