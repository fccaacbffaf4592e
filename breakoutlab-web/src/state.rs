//! Shared application state.

use std::sync::Arc;

use breakoutlab_core::data::DataProvider;

use crate::config::ServerConfig;

/// Immutable per-process state: configuration plus the market-data
/// provider. Nothing here is mutated after startup, so requests share it
/// without locking.
pub struct AppState {
    pub config: ServerConfig,
    pub provider: Arc<dyn DataProvider>,
}
