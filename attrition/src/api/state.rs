use std::sync::Arc;

use crate::config::Config;
use crate::db::DatabaseBackend;
use crate::llm::{NarrativeClient, NarrativeGenerator};
use crate::services::ScoringService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn DatabaseBackend>,
    pub scoring: ScoringService,
}

impl AppState {
    pub fn new<B>(config: Config, backend: Arc<B>, generator: Arc<dyn NarrativeGenerator>) -> Self
    where
        B: DatabaseBackend + 'static,
    {
        let narrative = NarrativeClient::new(generator, config.narrative.clone());
        let scoring = ScoringService::new(backend.clone(), backend.clone(), narrative);
        let db: Arc<dyn DatabaseBackend> = backend;

        Self {
            config: Arc::new(config),
            db,
            scoring,
        }
    }
}
