//! Shared application state

use std::time::Duration;

use anyhow::Result;

use crate::application::services::{GameSessionService, QuestGateway};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::gemini::GeminiClient;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    /// The single game session served by this process
    pub game: GameSessionService<GeminiClient>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let llm_client = GeminiClient::new(
            &config.gemini_base_url,
            &config.gemini_model,
            &config.api_key,
            Duration::from_secs(config.gemini_timeout_secs),
        )?;

        let gateway = QuestGateway::new(llm_client, &config.rules);
        let game = GameSessionService::new(gateway, config.rules);

        Ok(Self { config, game })
    }
}
