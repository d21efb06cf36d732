//! Shared application state.

use crate::ai::{ProviderKind, ProviderSet};
use crate::chat::ChatOrchestrator;
use crate::dashboard::DashboardService;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Built once at startup; handlers only read it.
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    /// Provider behind `POST /api/chat`.
    pub primary: ProviderKind,
    pub providers: ProviderSet,
    pub dashboard: DashboardService,
}

impl AppState {
    pub fn new(
        db: Arc<DatabaseConnection>,
        primary: ProviderKind,
        providers: ProviderSet,
        dashboard: DashboardService,
    ) -> Arc<Self> {
        Arc::new(Self {
            db,
            primary,
            providers,
            dashboard,
        })
    }

    pub fn orchestrator(&self, kind: ProviderKind) -> ChatOrchestrator {
        ChatOrchestrator::new(self.providers.get(kind))
    }
}
