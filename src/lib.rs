pub mod adapters;
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod services;
pub mod store;

pub use config::AppConfig;
pub use domain::Sport;
pub use error::{LockboxError, Result};
