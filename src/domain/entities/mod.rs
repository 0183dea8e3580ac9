//! Domain entities - Core game objects

mod adventurer;
mod lesson;
mod level_up;

pub use adventurer::{Adventurer, XpGain};
pub use lesson::{CompletedQuest, EvaluationResult, Lesson};
pub use level_up::{AllocationError, LevelUpSession};
