//! Application state for Axum web framework.

use crate::db::AsyncDbPool;
use crate::services::Services;

/// Shared state handed to every request handler.
///
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Direct pool access for health checks
    pub db_pool: AsyncDbPool,
}

impl AppState {
    /// Builds all services on top of `pool`.
    ///
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool);
    /// ```
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            services: Services::new(pool.clone()),
            db_pool: pool,
        }
    }
}
