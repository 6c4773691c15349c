//! Carematch childcare booking server
//!
//! A Rust REST API that books childcare days for a guardian's dependent,
//! choosing among the centers of the guardian's postal area.

use std::sync::Arc;

pub mod api;
pub mod booking;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
