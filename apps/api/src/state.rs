use std::sync::Arc;

use crate::config::Config;
use crate::experience::ExperienceEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    #[allow(dead_code)]
    pub config: Config,
    /// Reference data and calculators. Read-only after startup.
    pub engine: Arc<ExperienceEngine>,
}
