//! Business logic services for the Vinisima Tasting Management Platform

pub mod auth;
pub mod cata;
pub mod catador;
pub mod estadisticas;
pub mod mesa;
pub mod muestra;
pub mod tanda;

pub use auth::AuthService;
pub use cata::CataService;
pub use catador::CatadorService;
pub use estadisticas::EstadisticasService;
pub use mesa::MesaService;
pub use muestra::MuestraService;
pub use tanda::TandaService;
