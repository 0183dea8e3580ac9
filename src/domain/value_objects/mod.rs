//! Value objects - Immutable objects defined by their attributes

mod catalog;
mod game_rules;
mod ids;
mod stats;

pub use catalog::{ClassId, LearningPath, PathId, PlayerClass};
pub use game_rules::GameRules;
pub use ids::*;
pub use stats::{Attribute, Stats};
