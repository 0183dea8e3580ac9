//! Domain layer - Core game logic with no external dependencies
//!
//! This layer contains:
//! - Value Objects: catalogs, stats, game rules, identifiers
//! - Entities: Lesson, EvaluationResult, Adventurer, LevelUpSession
//! - Aggregates: the Progression state machine

pub mod aggregates;
pub mod entities;
pub mod value_objects;
