/// Application state
use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::store::ActivityStore;

#[derive(Clone)]
pub struct AppState {
    pub service_config: ServiceConfig,
    pub store: Arc<dyn ActivityStore>,
}

impl AppState {
    pub fn new(service_config: ServiceConfig, store: Arc<dyn ActivityStore>) -> Self {
        Self {
            service_config,
            store,
        }
    }
}
