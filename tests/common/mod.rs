#![allow(dead_code)]

pub mod contract;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use linkpulse::domain::repositories::UrlRepository;
use linkpulse::infrastructure::persistence::InMemoryUrlRepository;
use linkpulse::infrastructure::realtime::BroadcastHub;
use linkpulse::routes::router;
use linkpulse::state::AppState;
use linkpulse::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

pub const BASE_URL: &str = "http://localhost:3000";

/// Yields scripted codes first, then falls back to random ones.
pub struct ScriptedCodeGenerator {
    codes: Mutex<VecDeque<String>>,
    fallback: RandomCodeGenerator,
}

impl ScriptedCodeGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            fallback: RandomCodeGenerator::default(),
        }
    }
}

impl CodeGenerator for ScriptedCodeGenerator {
    fn generate(&self) -> String {
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.generate())
    }
}

pub struct TestApp {
    pub state: AppState,
    pub repository: Arc<InMemoryUrlRepository>,
    pub hub: Arc<BroadcastHub>,
}

pub fn create_test_app() -> TestApp {
    create_test_app_with_generator(Arc::new(RandomCodeGenerator::default()), 10)
}

pub fn create_test_app_with_generator(
    generator: Arc<dyn CodeGenerator>,
    max_attempts: usize,
) -> TestApp {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let hub = Arc::new(BroadcastHub::new(BASE_URL, 64));
    let state = AppState::new(
        repository.clone() as Arc<dyn UrlRepository>,
        generator,
        hub.clone(),
        max_attempts,
    );

    TestApp {
        state,
        repository,
        hub,
    }
}

pub fn test_server(app: &TestApp) -> TestServer {
    TestServer::new(router(app.state.clone())).unwrap()
}
