//! Prompt building functions for generator and evaluator requests

use serde_json::{json, Value};

use crate::domain::value_objects::LearningPath;

/// Build the "Code Dungeon Master" instruction for a new quest
pub fn build_lesson_prompt(path: &LearningPath, level: u32, example_code_max_level: u32) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "Act as a 'Code Dungeon Master' for a fantasy RPG where players learn programming.\n",
    );
    prompt.push_str(&format!(
        "Create a new quest (a lesson) for a level {} adventurer learning {}.\n\n",
        level, path.name
    ));

    prompt.push_str("The quest should include:\n");
    prompt.push_str("1. A short, engaging fantasy narrative that frames the problem.\n");
    prompt.push_str("2. A clear, specific coding task.\n");
    if level <= example_code_max_level {
        prompt.push_str(&format!(
            "3. A simple code example, since the adventurer is still a beginner (level 1-{}).\n",
            example_code_max_level
        ));
    } else {
        prompt.push_str("3. No code example; this adventurer is experienced enough to do without.\n");
    }
    prompt.push('\n');

    prompt.push_str(
        "The tone should be epic, encouraging, and fun. Keep the scope of the task appropriate for the player's level.\n\n",
    );
    prompt.push_str(
        "Respond ONLY with a valid JSON object following this schema. Do not include markdown formatting like ```json.\n",
    );

    prompt
}

/// Response schema for a generated lesson
pub fn lesson_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "An epic, quest-like title for the lesson."
            },
            "narrative": {
                "type": "STRING",
                "description": "The fantasy story or scenario for the quest."
            },
            "task": {
                "type": "STRING",
                "description": "The specific coding challenge the player must complete."
            },
            "exampleCode": {
                "type": "STRING",
                "description": "A small code snippet to guide the player. Optional."
            }
        },
        "required": ["title", "narrative", "task"]
    })
}

/// Build the "Code Sage" instruction for grading a submission
pub fn build_evaluation_prompt(path: &LearningPath, task: &str, code: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str("As a 'Code Sage', evaluate a code submission in a programming RPG.\n");
    prompt.push_str(&format!("The language is: {}.\n", path.name));
    prompt.push_str(&format!("The assigned task was: \"{}\".\n\n", task));

    prompt.push_str("The student's code is:\n");
    prompt.push_str(&format!("```{}\n", path.id.fence_tag()));
    prompt.push_str(code);
    if !code.ends_with('\n') {
        prompt.push('\n');
    }
    prompt.push_str("```\n\n");

    prompt.push_str(
        "Analyze the code for correctness in solving the task. Provide constructive, encouraging feedback in a fantasy RPG style.\n\n",
    );
    prompt.push_str(
        "Respond ONLY with a valid JSON object following this schema. Do not include markdown formatting like ```json.\n",
    );

    prompt
}

/// Response schema for an evaluation
pub fn evaluation_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "isCorrect": {
                "type": "BOOLEAN",
                "description": "Is the code a correct solution to the task?"
            },
            "feedback": {
                "type": "STRING",
                "description": "Encouraging, RPG-themed feedback for the student."
            }
        },
        "required": ["isCorrect", "feedback"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::PathId;

    #[test]
    fn test_lesson_prompt_names_level_and_path() {
        let prompt = build_lesson_prompt(LearningPath::get(PathId::Csharp), 2, 3);

        assert!(prompt.contains("level 2 adventurer learning C#"));
        assert!(prompt.contains("simple code example"));
        assert!(prompt.contains("Respond ONLY with a valid JSON object"));
    }

    #[test]
    fn test_lesson_prompt_omits_example_past_beginner_levels() {
        let prompt = build_lesson_prompt(LearningPath::get(PathId::Python), 4, 3);
        assert!(prompt.contains("No code example"));
    }

    #[test]
    fn test_evaluation_prompt_fences_code() {
        let prompt = build_evaluation_prompt(
            LearningPath::get(PathId::HtmlCss),
            "Build a heading",
            "<h1>Hail</h1>",
        );

        assert!(prompt.contains("The language is: HTML & CSS."));
        assert!(prompt.contains("\"Build a heading\""));
        assert!(prompt.contains("```html\n<h1>Hail</h1>\n```"));
    }

    #[test]
    fn test_schemas_require_core_fields() {
        assert_eq!(
            lesson_response_schema()["required"],
            json!(["title", "narrative", "task"])
        );
        assert_eq!(
            evaluation_response_schema()["required"],
            json!(["isCorrect", "feedback"])
        );
    }
}
