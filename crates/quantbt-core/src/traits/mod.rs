//! Core traits for the backtesting toolkit.

mod data_source;
mod indicator;

pub use data_source::DataSource;
pub use indicator::Indicator;
