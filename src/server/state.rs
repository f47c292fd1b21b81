use axum::extract::FromRef;

use crate::analysis::AnalysisService;
use crate::session::SessionStore;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedSessionStore = Arc<SessionStore>;
pub type GuardedAnalysisService = Arc<dyn AnalysisService>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub sessions: GuardedSessionStore,
    pub analysis_service: GuardedAnalysisService,
    pub hash: String,
}

impl FromRef<ServerState> for GuardedSessionStore {
    fn from_ref(input: &ServerState) -> Self {
        input.sessions.clone()
    }
}

impl FromRef<ServerState> for GuardedAnalysisService {
    fn from_ref(input: &ServerState) -> Self {
        input.analysis_service.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
