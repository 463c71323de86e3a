//! Report module - summarizing cleaning results

pub mod cleaning_report;
pub mod describe_report;
pub mod summary;

pub use cleaning_report::*;
pub use describe_report::*;
pub use summary::*;
