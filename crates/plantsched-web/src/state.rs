use std::sync::Arc;

use plantsched_core::ExtractionBackend;

pub struct AppState {
    /// `None` when no API key was configured at startup; every extraction
    /// request then fails with a configuration error.
    pub backend: Option<Arc<dyn ExtractionBackend>>,
}
