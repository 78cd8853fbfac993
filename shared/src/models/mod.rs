//! Domain models for the Vinisima tasting platform

mod cata;
mod catador;
mod mesa;
mod muestra;
mod tanda;
mod usuario;

pub use cata::*;
pub use catador::*;
pub use mesa::*;
pub use muestra::*;
pub use tanda::*;
pub use usuario::*;
