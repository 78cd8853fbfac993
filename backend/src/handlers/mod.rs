//! HTTP handlers for the Vinisima Tasting Management Platform

pub mod auth;
pub mod cata;
pub mod catador;
pub mod estadisticas;
pub mod health;
pub mod mesa;
pub mod muestra;
pub mod tanda;

pub use auth::*;
pub use cata::*;
pub use catador::*;
pub use estadisticas::*;
pub use health::*;
pub use mesa::*;
pub use muestra::*;
pub use tanda::*;
