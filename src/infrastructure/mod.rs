//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Gemini: the lesson generator and evaluator
//! - HTTP: JSON API consumed by the browser client
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod gemini;
pub mod http;
pub mod state;
