//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_page_size() -> String {
    crate::pagination::DEFAULT_ITEMS_PER_PAGE.to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Settings consumed by the HTTP server bootstrap.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Raw page size setting; parsed by [`crate::pagination::Paginator::from_setting`].
    #[serde(default = "default_page_size")]
    pub default_page_size: String,
    /// Apply embedded migrations on startup.
    #[serde(default)]
    pub run_migrations: bool,
}
