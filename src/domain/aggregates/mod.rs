//! Aggregates - Consistency boundaries over domain entities

mod progression;

pub use progression::{
    Adjustment, Progression, ProgressionError, QuestOutcome, Stage, StageKind,
};
