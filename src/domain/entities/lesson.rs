//! Quest content and grading results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::PathId;

/// One generated coding quest
///
/// Field names follow the generator's response schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub title: String,
    pub narrative: String,
    pub task: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_code: Option<String>,
}

impl Lesson {
    /// The quest handed out when the generator cannot be reached or answers
    /// with something unusable
    pub fn fallback(path: PathId) -> Self {
        Self {
            title: "The Coder's Gauntlet".to_string(),
            narrative: "The connection to the Oracle has been severed! A temporary challenge awaits you until the connection is restored.".to_string(),
            task: "Create a 'Hello, World!' program in your chosen language. This will prove your readiness for the quests to come.".to_string(),
            example_code: match path {
                PathId::Python => Some("print('Hello, World!')".to_string()),
                _ => None,
            },
        }
    }

    /// Drop an example that carries no code
    pub fn normalized(mut self) -> Self {
        if self
            .example_code
            .as_deref()
            .is_some_and(|code| code.trim().is_empty())
        {
            self.example_code = None;
        }
        self
    }

    /// Whether every required field has content
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.narrative.trim().is_empty()
            && !self.task.trim().is_empty()
    }
}

/// Verdict on a code submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub is_correct: bool,
    pub feedback: String,
}

impl EvaluationResult {
    pub fn fallback() -> Self {
        Self {
            is_correct: false,
            feedback: "A mysterious force prevents me from evaluating your scroll. Check your incantation and the Oracle's connection, then try again.".to_string(),
        }
    }
}

/// Quest log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedQuest {
    pub title: String,
    pub xp_awarded: u32,
    pub completed_at: DateTime<Utc>,
}

impl CompletedQuest {
    pub fn new(title: impl Into<String>, xp_awarded: u32) -> Self {
        Self {
            title: title.into(),
            xp_awarded,
            completed_at: Utc::now(),
        }
    }
}
