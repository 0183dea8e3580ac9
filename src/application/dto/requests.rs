//! Request bodies posted by the browser

use serde::Deserialize;

use crate::domain::aggregates::Adjustment;
use crate::domain::value_objects::{Attribute, ClassId, PathId, Stats};

#[derive(Debug, Clone, Deserialize)]
pub struct SelectClassRequest {
    pub class_id: ClassId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectPathRequest {
    pub path_id: PathId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitCodeRequest {
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdjustAttributeRequest {
    pub attribute: Attribute,
    pub adjustment: Adjustment,
}

/// Confirms a level-up; without `stats` the session's pending draft is used
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfirmAllocationRequest {
    #[serde(default)]
    pub stats: Option<Stats>,
}
