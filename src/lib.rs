#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

#[cfg(feature = "server")]
use crate::db::{DbPool, establish_connection_pool, get_connection};
#[cfg(feature = "server")]
use crate::endpoints::Endpoints;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::pagination::Paginator;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::services::{ServiceError, course::CourseService};

pub mod db;
pub mod domain;
pub mod dto;
pub mod endpoints;
mod error_conversions;
pub mod models;
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
pub mod services;

#[cfg(feature = "server")]
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[cfg(feature = "server")]
fn run_migrations(pool: &DbPool) -> std::io::Result<()> {
    let mut conn = get_connection(pool)
        .map_err(|e| std::io::Error::other(format!("Failed to get database connection: {e}")))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let paginator = Paginator::from_setting(&server_config.default_page_size)
        .map_err(|e| std::io::Error::other(ServiceError::from(e).to_string()))?;

    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    if server_config.run_migrations {
        run_migrations(&pool)?;
    }

    let service = CourseService::new(DieselRepository::new(pool), paginator);
    let endpoints = web::Data::new(Endpoints::new(service));

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Listening on {}:{} (default page size {})",
        server_config.address,
        server_config.port,
        paginator.default_page_size()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors())
            .wrap(middleware::Logger::default())
            .app_data(endpoints.clone())
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
