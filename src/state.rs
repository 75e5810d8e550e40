//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{RedirectService, ShortenService};
use crate::domain::events::Notifier;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::realtime::BroadcastHub;
use crate::utils::code_generator::CodeGenerator;

/// Services and the real-time hub, cheap to clone per request.
///
/// The hub is held concretely so WebSocket handlers can subscribe; services
/// only see it through [`Notifier`].
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService>,
    pub redirect_service: Arc<RedirectService>,
    pub hub: Arc<BroadcastHub>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        generator: Arc<dyn CodeGenerator>,
        hub: Arc<BroadcastHub>,
        max_attempts: usize,
    ) -> Self {
        let notifier: Arc<dyn Notifier> = hub.clone();

        Self {
            shorten_service: Arc::new(ShortenService::new(
                repository.clone(),
                generator,
                notifier.clone(),
                max_attempts,
            )),
            redirect_service: Arc::new(RedirectService::new(repository, notifier)),
            hub,
        }
    }

    pub fn base_url(&self) -> &str {
        self.hub.base_url()
    }
}
