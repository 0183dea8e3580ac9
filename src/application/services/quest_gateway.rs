//! Quest Gateway - lesson generation and code evaluation
//!
//! The gateway is the only I/O boundary of the game. It never fails outward:
//! any transport error, bad status, or unusable response is logged and
//! replaced by a fixed fallback value. Transient and malformed failures are
//! deliberately treated the same way.

use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

use crate::application::ports::outbound::{LlmPort, LlmRequest};
use crate::application::services::llm::prompt_builder::{
    build_evaluation_prompt, build_lesson_prompt, evaluation_response_schema,
    lesson_response_schema,
};
use crate::domain::entities::{EvaluationResult, Lesson};
use crate::domain::value_objects::{GameRules, LearningPath};

const LESSON_TEMPERATURE: f32 = 0.9;
const EVALUATION_TEMPERATURE: f32 = 0.2;

/// Reasons a gateway call fell back
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("LLM error: {0}")]
    Llm(String),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Generates quests and grades submissions through an `LlmPort`
pub struct QuestGateway<L: LlmPort> {
    llm: L,
    example_code_max_level: u32,
}

impl<L: LlmPort> QuestGateway<L> {
    pub fn new(llm: L, rules: &GameRules) -> Self {
        Self {
            llm,
            example_code_max_level: rules.example_code_max_level,
        }
    }

    #[cfg(test)]
    pub fn llm(&self) -> &L {
        &self.llm
    }

    /// Generate a quest for the given path and level, or the fallback quest
    #[instrument(skip(self, path), fields(path = path.name))]
    pub async fn request_lesson(&self, path: &LearningPath, level: u32) -> Lesson {
        match self.generate_lesson(path, level).await {
            Ok(lesson) => {
                debug!(title = %lesson.title, "Lesson generated");
                lesson
            }
            Err(e) => {
                error!(error = %e, "Error generating lesson, using fallback");
                Lesson::fallback(path.id)
            }
        }
    }

    /// Grade a submission, or return the fallback verdict
    #[instrument(skip(self, path, task, code), fields(path = path.name, code_len = code.len()))]
    pub async fn request_evaluation(
        &self,
        path: &LearningPath,
        task: &str,
        code: &str,
    ) -> EvaluationResult {
        match self.evaluate(path, task, code).await {
            Ok(result) => {
                debug!(is_correct = result.is_correct, "Submission evaluated");
                result
            }
            Err(e) => {
                error!(error = %e, "Error evaluating code, using fallback");
                EvaluationResult::fallback()
            }
        }
    }

    async fn generate_lesson(&self, path: &LearningPath, level: u32) -> Result<Lesson, GatewayError> {
        let request = LlmRequest::new(build_lesson_prompt(path, level, self.example_code_max_level))
            .with_response_schema(lesson_response_schema())
            .with_temperature(LESSON_TEMPERATURE);

        let response = self
            .llm
            .generate(request)
            .await
            .map_err(|e| GatewayError::Llm(e.to_string()))?;

        debug!(model = %response.model, "Lesson response received");
        let lesson: Lesson = parse_structured(&response.content)?;
        if !lesson.is_complete() {
            return Err(GatewayError::Malformed(
                "lesson is missing a title, narrative, or task".to_string(),
            ));
        }
        Ok(lesson.normalized())
    }

    async fn evaluate(
        &self,
        path: &LearningPath,
        task: &str,
        code: &str,
    ) -> Result<EvaluationResult, GatewayError> {
        let request = LlmRequest::new(build_evaluation_prompt(path, task, code))
            .with_response_schema(evaluation_response_schema())
            .with_temperature(EVALUATION_TEMPERATURE);

        let response = self
            .llm
            .generate(request)
            .await
            .map_err(|e| GatewayError::Llm(e.to_string()))?;

        debug!(model = %response.model, "Evaluation response received");
        let result: EvaluationResult = parse_structured(&response.content)?;
        if result.feedback.trim().is_empty() {
            return Err(GatewayError::Malformed("evaluation has no feedback".to_string()));
        }
        Ok(result)
    }
}

/// Parse a JSON response, tolerating a surrounding markdown fence
fn parse_structured<T: DeserializeOwned>(content: &str) -> Result<T, GatewayError> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);
    Ok(serde_json::from_str(body.trim())?)
}
