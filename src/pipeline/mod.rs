//! Pipeline module - cleaning stages and the analyses built on them

pub mod clean;
pub mod combine;
pub mod complete;
pub mod describe;
pub mod distribution;
pub mod duplicates;
pub mod error;
pub mod loader;
pub mod magnitude;
pub mod outliers;
pub mod relationship;
pub mod schema;
pub mod strip;

pub use clean::*;
pub use combine::*;
pub use complete::{complete_cases, complete_flags, complete_mask, incomplete_row_count};
pub use describe::*;
pub use distribution::*;
pub use duplicates::*;
pub use error::{PipelineError, PipelineResult};
pub use loader::*;
pub use magnitude::*;
pub use outliers::*;
pub use relationship::*;
pub use schema::*;
pub use strip::*;
