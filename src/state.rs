use crate::render::{ContextDump, Renderer};
use auth::{Clock, SystemClock};
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use config::Config;
use std::sync::Arc;

/// Shared state handed to every handler. The cookie key is derived once
/// from the configured secret; connections are NOT part of the state, each
/// request opens its own.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub renderer: Arc<dyn Renderer>,
    pub clock: Arc<dyn Clock>,
    key: Key,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let key = Key::derive_from(config.server.secret_key.as_bytes());

        Self {
            config: Arc::new(config),
            renderer: Arc::new(ContextDump),
            clock: Arc::new(SystemClock),
            key,
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.key.clone()
    }
}
