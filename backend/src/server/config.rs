//! HTTP server configuration object and helpers.

use movies_api::config::AppSettings;
use movies_api::inbound::http::state::DEFAULT_BODY_LIMIT;
use movies_api::outbound::persistence::DbPool;
use std::net::SocketAddr;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) body_limit: usize,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr` with no database.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Build from loaded settings. The pool is attached separately once built.
    #[must_use]
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(settings.bind_addr()).with_body_limit(settings.body_limit())
    }

    /// Cap request bodies at `body_limit` bytes.
    #[must_use]
    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    /// Attach a database connection pool.
    ///
    /// Without one, movies are stored in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
