//! Shared types and models for the Vinisima Tasting Management Platform
//!
//! This crate contains the sensory scoring engine, the tasting-station
//! submission protocol, and the types shared between the backend and the
//! browser tasting stations (via WASM).

pub mod models;
pub mod scoring;
pub mod session;
pub mod station;
pub mod types;
pub mod validation;

pub use models::*;
pub use scoring::*;
pub use session::*;
pub use station::*;
pub use types::*;
pub use validation::*;
