use std::sync::Arc;

use hevra_service::{HevraService, Sources};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<HevraService>,
}
impl AppState {
	pub fn new(config: hevra_config::Config) -> Self {
		Self::with_sources(config, Sources::default())
	}

	pub fn with_sources(config: hevra_config::Config, sources: Sources) -> Self {
		Self { service: Arc::new(HevraService::with_sources(config, sources)) }
	}
}
