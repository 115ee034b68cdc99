use std::sync::Arc;
use tokio::sync::Mutex;

use shared::services::match_service::MatchService;

/// The match service owns the caches and the current-match slot, so every
/// request goes through one lock.
#[derive(Clone)]
pub struct AppState {
    pub match_service: Arc<Mutex<MatchService>>,
}

impl AppState {
    pub fn new(match_service: MatchService) -> Self {
        AppState {
            match_service: Arc::new(Mutex::new(match_service)),
        }
    }
}
