//! Application services - Use case implementations
//!
//! - `QuestGateway`: lesson generation and code evaluation with fallbacks
//! - `GameSessionService`: the view router over the progression aggregate

pub mod game_session_service;
pub mod llm;
pub mod quest_gateway;

pub use game_session_service::{GameSessionService, SessionError};
pub use quest_gateway::QuestGateway;
