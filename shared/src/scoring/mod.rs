//! Sensory scoring engine for the tasting disciplines

mod scales;
mod sheet;
mod tiers;

pub use scales::*;
pub use sheet::*;
pub use tiers::*;
