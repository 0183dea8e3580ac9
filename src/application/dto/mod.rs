//! Data transfer objects exchanged with the browser

mod requests;
mod screen;

pub use requests::{
    AdjustAttributeRequest, ConfirmAllocationRequest, SelectClassRequest, SelectPathRequest,
    SubmitCodeRequest,
};
pub use screen::{
    class_cards, path_cards, Activity, ClassCard, FeedbackView, PathCard, Screen,
    SubmissionResult,
};
