pub mod api;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod session;
pub mod ui;

pub use error::{ChatError, Result};
