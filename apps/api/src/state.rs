use std::sync::Arc;

use crate::llm_client::TextGenerator;
use crate::profile::store::ProfileStore;
use crate::render::PageConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Résumé and save directory, persisted across restarts.
    pub profile: Arc<ProfileStore>,
    /// Text-generation backend. Production: `LlmClient`.
    pub llm: Arc<dyn TextGenerator>,
    /// Page geometry for rendered letters.
    pub page_config: PageConfig,
}
