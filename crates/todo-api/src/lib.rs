//! HTTP API for the todo list.
//!
//! One table, five operations. Each handler runs a single statement through
//! the injected [`TodoRepository`](db::TodoRepository).

use std::sync::Arc;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod router;
pub mod telemetry;

pub use router::{app, app_with_state, cors_layer};

use db::TodoRepository;

/// Shared handler state: the storage handle opened at startup.
#[derive(Clone)]
pub struct AppState {
    repo: Arc<dyn TodoRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }
}
