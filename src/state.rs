use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::config::AppConfig;
use crate::database::InventoryStore;
use crate::handlers::protected::offices::ValidationPolicy;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InventoryStore>,
    pub verifier: Arc<TokenVerifier>,
    pub validation: ValidationPolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn InventoryStore>, config: &AppConfig) -> Self {
        Self {
            store,
            verifier: Arc::new(TokenVerifier::new(&config.security.jwt_secret)),
            validation: config.validation.policy(),
        }
    }
}
