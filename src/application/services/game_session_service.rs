//! Game Session Service - routes player actions and projects screens
//!
//! Owns the single game session of this process. User actions go to the
//! `Progression` aggregate; the two remote calls go through the
//! `QuestGateway`. The session lock is never held across a gateway call.
//!
//! Lesson requests are single-flight: rendering the learning screen with an
//! empty quest slot issues one request and marks it in flight; further renders
//! issue nothing until it resolves. Every late response is checked against
//! the generation it was issued under and dropped if the quest slot has moved
//! on since.
//!
//! Evaluations likewise run in their own task, so the verdict is applied and
//! the busy flag cleared even if the submitting request goes away.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::application::dto::{Activity, FeedbackView, Screen, SubmissionResult};
use crate::application::ports::outbound::LlmPort;
use crate::application::services::QuestGateway;
use crate::domain::aggregates::{
    Adjustment, Progression, ProgressionError, Stage, StageKind,
};
use crate::domain::entities::{CompletedQuest, EvaluationResult};
use crate::domain::value_objects::{
    Attribute, ClassId, GameRules, LearningPath, LessonId, PathId, Stats,
};

/// Errors surfaced to the browser
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Progression(#[from] ProgressionError),
    /// A submission is already being evaluated
    #[error("The Oracle is still thinking about your last submission")]
    Busy,
    /// The quest changed while the evaluator was working
    #[error("The quest changed before the evaluation returned")]
    StaleResult,
    #[error("Evaluation task failed: {0}")]
    EvaluationTask(#[from] tokio::task::JoinError),
}

struct SessionState {
    progression: Progression,
    /// Generation under which the outstanding lesson request was issued
    lesson_request: Option<u64>,
    evaluating: bool,
    /// Bumped whenever the quest slot is emptied
    generation: u64,
}

impl SessionState {
    fn activity(&self) -> Activity {
        Activity {
            lesson_loading: self.lesson_request.is_some(),
            evaluating: self.evaluating,
        }
    }

    fn advance_generation(&mut self) {
        self.generation += 1;
        self.lesson_request = None;
    }
}

pub struct GameSessionService<L: LlmPort> {
    gateway: Arc<QuestGateway<L>>,
    state: Arc<Mutex<SessionState>>,
}

impl<L: LlmPort> Clone for GameSessionService<L> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            state: Arc::clone(&self.state),
        }
    }
}

impl<L: LlmPort + 'static> GameSessionService<L> {
    pub fn new(gateway: QuestGateway<L>, rules: GameRules) -> Self {
        Self {
            gateway: Arc::new(gateway),
            state: Arc::new(Mutex::new(SessionState {
                progression: Progression::new(rules),
                lesson_request: None,
                evaluating: false,
                generation: 0,
            })),
        }
    }

    /// Project the current screen, requesting a lesson if the learning screen
    /// has none and no request is outstanding
    pub async fn render(&self) -> Screen {
        let mut state = self.state.lock().await;
        self.ensure_lesson_requested(&mut state);
        Screen::project(&state.progression, state.activity())
    }

    /// Returns the handle of the request task if one was issued
    fn ensure_lesson_requested(&self, state: &mut SessionState) -> Option<JoinHandle<()>> {
        let Stage::Learning { adventurer, quest } = state.progression.stage() else {
            return None;
        };
        if quest.lesson.is_some() || state.lesson_request.is_some() {
            return None;
        }

        let path = LearningPath::get(adventurer.path);
        let level = adventurer.level;
        let generation = state.generation;
        state.lesson_request = Some(generation);
        debug!(path = path.name, level, generation, "Requesting lesson");

        let gateway = Arc::clone(&self.gateway);
        let shared = Arc::clone(&self.state);
        Some(tokio::spawn(async move {
            let lesson = gateway.request_lesson(path, level).await;

            let mut state = shared.lock().await;
            if state.lesson_request == Some(generation) {
                state.lesson_request = None;
            }
            if state.generation != generation {
                warn!(
                    generation,
                    current = state.generation,
                    "Discarding lesson for an abandoned quest slot"
                );
                return;
            }
            match state.progression.present_lesson(lesson) {
                Ok(id) => info!(lesson_id = %id, "Lesson presented"),
                Err(e) => warn!(error = %e, "Discarding lesson"),
            }
        }))
    }

    #[instrument(skip(self))]
    pub async fn select_class(&self, class: ClassId) -> Result<Screen, SessionError> {
        let mut state = self.state.lock().await;
        state.progression.select_class(class)?;
        Ok(Screen::project(&state.progression, state.activity()))
    }

    #[instrument(skip(self))]
    pub async fn select_path(&self, path: PathId) -> Result<Screen, SessionError> {
        let mut state = self.state.lock().await;
        state.progression.select_path(path)?;
        self.ensure_lesson_requested(&mut state);
        Ok(Screen::project(&state.progression, state.activity()))
    }

    /// Send the player's code to the evaluator and apply the verdict
    ///
    /// The evaluation runs in a spawned task that owns the verdict; this
    /// future only waits for it.
    #[instrument(skip(self, code), fields(code_len = code.len()))]
    pub async fn submit_code(&self, code: String) -> Result<SubmissionResult, SessionError> {
        let (path, task, lesson_id, generation) = {
            let mut state = self.state.lock().await;
            if state.evaluating {
                return Err(SessionError::Busy);
            }
            let Stage::Learning { adventurer, quest } = state.progression.stage() else {
                return Err(ProgressionError::WrongStage {
                    expected: StageKind::Learning,
                    actual: state.progression.stage().kind(),
                }
                .into());
            };
            let active = quest
                .lesson
                .as_ref()
                .ok_or(ProgressionError::NoActiveLesson)?;
            if quest.is_completed() {
                return Err(ProgressionError::QuestAlreadyCompleted.into());
            }
            let captured = (
                LearningPath::get(adventurer.path),
                active.lesson.task.clone(),
                active.id,
                state.generation,
            );
            state.evaluating = true;
            captured
        };

        let gateway = Arc::clone(&self.gateway);
        let shared = Arc::clone(&self.state);
        let evaluation = tokio::spawn(async move {
            let result = gateway.request_evaluation(path, &task, &code).await;
            Self::apply_evaluation(&shared, lesson_id, generation, result).await
        });
        evaluation.await?
    }

    async fn apply_evaluation(
        shared: &Mutex<SessionState>,
        lesson_id: LessonId,
        generation: u64,
        result: EvaluationResult,
    ) -> Result<SubmissionResult, SessionError> {
        let mut state = shared.lock().await;
        state.evaluating = false;
        if state.generation != generation {
            warn!(generation, "Discarding evaluation for an abandoned quest");
            return Err(SessionError::StaleResult);
        }

        let feedback = FeedbackView::from(&result);
        let outcome = state
            .progression
            .record_quest_result(lesson_id, result)
            .map_err(|e| match e {
                ProgressionError::LessonMismatch => SessionError::StaleResult,
                other => other.into(),
            })?;
        info!(?outcome, "Submission graded");

        Ok(SubmissionResult {
            feedback,
            outcome,
            screen: Screen::project(&state.progression, state.activity()),
        })
    }

    /// Clear a solved quest and start generating the next one
    #[instrument(skip(self))]
    pub async fn next_quest(&self) -> Result<Screen, SessionError> {
        let mut state = self.state.lock().await;
        state.progression.begin_next_quest()?;
        state.advance_generation();
        self.ensure_lesson_requested(&mut state);
        Ok(Screen::project(&state.progression, state.activity()))
    }

    #[instrument(skip(self))]
    pub async fn adjust_attribute(
        &self,
        attribute: Attribute,
        adjustment: Adjustment,
    ) -> Result<Screen, SessionError> {
        let mut state = self.state.lock().await;
        state.progression.adjust_attribute(attribute, adjustment)?;
        Ok(Screen::project(&state.progression, state.activity()))
    }

    /// Commit the level-up allocation
    ///
    /// Without explicit `stats`, the draft built through `adjust_attribute`
    /// is committed.
    #[instrument(skip(self))]
    pub async fn confirm_allocation(&self, stats: Option<Stats>) -> Result<Screen, SessionError> {
        let mut state = self.state.lock().await;
        let stats = match (stats, state.progression.stage()) {
            (Some(stats), _) => stats,
            (None, Stage::LevelUp { session, .. }) => session.pending,
            (None, other) => {
                return Err(ProgressionError::WrongStage {
                    expected: StageKind::LevelUp,
                    actual: other.kind(),
                }
                .into())
            }
        };
        state.progression.allocate_points(stats)?;
        state.advance_generation();
        self.ensure_lesson_requested(&mut state);
        Ok(Screen::project(&state.progression, state.activity()))
    }

    pub async fn quest_log(&self) -> Vec<CompletedQuest> {
        let state = self.state.lock().await;
        state
            .progression
            .stage()
            .adventurer()
            .map(|a| a.quest_log.clone())
            .unwrap_or_default()
    }
}
