//! Prompt construction for the quest generator and evaluator

pub mod prompt_builder;
