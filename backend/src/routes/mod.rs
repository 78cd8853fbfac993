//! Route definitions for the Vinisima Tasting Management Platform

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - sample management
        .nest("/muestras", muestra_routes())
        // Protected routes - tasting round management
        .nest("/tandas", tanda_routes())
        // Protected routes - taster roster
        .nest("/catadores", catador_routes())
        // Protected routes - table management
        .nest("/mesas", mesa_routes())
        // Protected routes - sheet submission and lookup
        .nest("/catas", cata_routes())
        // Protected routes - statistics and export
        .nest("/estadisticas", estadisticas_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
}

/// Sample management routes (protected)
fn muestra_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_muestras).post(handlers::create_muestra))
        .route(
            "/:muestra_id",
            get(handlers::get_muestra)
                .put(handlers::update_muestra)
                .delete(handlers::delete_muestra),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Tasting round routes (protected)
fn tanda_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_tandas).post(handlers::create_tanda))
        .route(
            "/:tanda_id",
            get(handlers::get_tanda)
                .put(handlers::update_tanda)
                .delete(handlers::delete_tanda),
        )
        .route("/:tanda_id/estado", put(handlers::cambiar_estado))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Taster roster routes (protected)
fn catador_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_catadores).post(handlers::create_catador))
        .route(
            "/:catador_id",
            get(handlers::get_catador)
                .put(handlers::update_catador)
                .delete(handlers::delete_catador),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Table management routes (protected)
fn mesa_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_mesas).post(handlers::create_mesa))
        .route(
            "/:mesa_id",
            get(handlers::get_mesa)
                .put(handlers::update_mesa)
                .delete(handlers::delete_mesa),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Tasting sheet routes (protected)
fn cata_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::submit_cata))
        .route("/vinos", get(handlers::list_catas_vino))
        .route("/espirituosos", get(handlers::list_catas_espirituosos))
        .route("/:cata_id", get(handlers::get_cata))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Statistics routes (protected)
fn estadisticas_routes() -> Router<AppState> {
    Router::new()
        .route("/resumen", get(handlers::get_resumen))
        .route("/por-tipo", get(handlers::get_por_tipo))
        .route("/top-muestras", get(handlers::get_top_muestras))
        .route("/fases/:disciplina", get(handlers::get_fases))
        .route("/resultados", get(handlers::get_resultados))
        .route_layer(middleware::from_fn(auth_middleware))
}
