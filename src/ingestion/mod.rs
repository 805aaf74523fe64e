pub mod aggregate;
pub mod config;
pub mod table;

pub use aggregate::aggregate;
pub use config::AggregationConfig;
pub use table::{parse_log, parse_timestamp};
