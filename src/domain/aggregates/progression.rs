//! Progression aggregate - the player's journey through the game's stages
//!
//! The aggregate owns every piece of game state. Each `Stage` variant carries
//! only the data its screen needs, so impossible combinations (learning
//! without a class, a level-up with no adventurer) cannot be represented.

use serde::Serialize;
use tracing::info;

use crate::domain::entities::{
    Adventurer, AllocationError, EvaluationResult, Lesson, LevelUpSession, XpGain,
};
use crate::domain::value_objects::{
    Attribute, ClassId, GameRules, LessonId, PathId, PlayerClass, Stats,
};

/// Discriminant of `Stage`, used for error reporting and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    ClassSelection,
    PathSelection,
    Learning,
    LevelUp,
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StageKind::ClassSelection => "class selection",
            StageKind::PathSelection => "path selection",
            StageKind::Learning => "learning",
            StageKind::LevelUp => "level up",
        };
        f.write_str(name)
    }
}

/// A lesson that has been handed to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveLesson {
    pub id: LessonId,
    pub lesson: Lesson,
}

/// The quest currently on the learning screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestSlot {
    pub lesson: Option<ActiveLesson>,
    /// Latest verdict for this lesson
    pub feedback: Option<EvaluationResult>,
}

impl QuestSlot {
    /// A correct verdict closes the quest
    pub fn is_completed(&self) -> bool {
        self.feedback.as_ref().is_some_and(|f| f.is_correct)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    ClassSelection,
    PathSelection {
        class: ClassId,
        stats: Stats,
    },
    Learning {
        adventurer: Adventurer,
        quest: QuestSlot,
    },
    LevelUp {
        adventurer: Adventurer,
        session: LevelUpSession,
    },
}

impl Stage {
    pub fn kind(&self) -> StageKind {
        match self {
            Stage::ClassSelection => StageKind::ClassSelection,
            Stage::PathSelection { .. } => StageKind::PathSelection,
            Stage::Learning { .. } => StageKind::Learning,
            Stage::LevelUp { .. } => StageKind::LevelUp,
        }
    }

    pub fn adventurer(&self) -> Option<&Adventurer> {
        match self {
            Stage::Learning { adventurer, .. } | Stage::LevelUp { adventurer, .. } => {
                Some(adventurer)
            }
            _ => None,
        }
    }
}

/// Outcome of grading a quest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestOutcome {
    Failed,
    Completed { xp_awarded: u32 },
    LeveledUp { xp_awarded: u32, level: u32 },
}

/// How a level-up control changes an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("Action requires the {expected} stage, but the game is in {actual}")]
    WrongStage {
        expected: StageKind,
        actual: StageKind,
    },
    #[error("No quest is currently active")]
    NoActiveLesson,
    #[error("A quest is already active")]
    LessonAlreadyPresent,
    #[error("The result is for a different quest")]
    LessonMismatch,
    #[error("This quest has already been completed")]
    QuestAlreadyCompleted,
    #[error("The current quest has not been completed yet")]
    QuestNotCompleted,
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

/// The progression controller
#[derive(Debug, Clone)]
pub struct Progression {
    stage: Stage,
    rules: GameRules,
}

impl Progression {
    pub fn new(rules: GameRules) -> Self {
        Self {
            stage: Stage::ClassSelection,
            rules,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    fn wrong_stage(&self, expected: StageKind) -> ProgressionError {
        ProgressionError::WrongStage {
            expected,
            actual: self.stage.kind(),
        }
    }

    pub fn select_class(&mut self, class: ClassId) -> Result<(), ProgressionError> {
        if !matches!(self.stage, Stage::ClassSelection) {
            return Err(self.wrong_stage(StageKind::ClassSelection));
        }
        let stats = PlayerClass::get(class).base_stats;
        info!(?class, "Class selected");
        self.stage = Stage::PathSelection { class, stats };
        Ok(())
    }

    pub fn select_path(&mut self, path: PathId) -> Result<(), ProgressionError> {
        let Stage::PathSelection { class, stats } = self.stage else {
            return Err(self.wrong_stage(StageKind::PathSelection));
        };
        info!(?class, ?path, "Path selected, entering learning stage");
        self.stage = Stage::Learning {
            adventurer: Adventurer::new(class, path, stats),
            quest: QuestSlot::default(),
        };
        Ok(())
    }

    /// Put a freshly generated lesson into the empty quest slot
    pub fn present_lesson(&mut self, lesson: Lesson) -> Result<LessonId, ProgressionError> {
        let Stage::Learning { quest, .. } = &mut self.stage else {
            return Err(self.wrong_stage(StageKind::Learning));
        };
        if quest.lesson.is_some() {
            return Err(ProgressionError::LessonAlreadyPresent);
        }
        let id = LessonId::new();
        quest.lesson = Some(ActiveLesson { id, lesson });
        quest.feedback = None;
        Ok(id)
    }

    /// Apply the evaluator's verdict for the given lesson
    pub fn record_quest_result(
        &mut self,
        lesson: LessonId,
        result: EvaluationResult,
    ) -> Result<QuestOutcome, ProgressionError> {
        let rules = self.rules;
        let Stage::Learning { adventurer, quest } = &mut self.stage else {
            return Err(self.wrong_stage(StageKind::Learning));
        };
        let active = quest.lesson.as_ref().ok_or(ProgressionError::NoActiveLesson)?;
        if active.id != lesson {
            return Err(ProgressionError::LessonMismatch);
        }
        if quest.is_completed() {
            return Err(ProgressionError::QuestAlreadyCompleted);
        }

        let is_correct = result.is_correct;
        let title = active.lesson.title.clone();
        quest.feedback = Some(result);
        if !is_correct {
            return Ok(QuestOutcome::Failed);
        }

        let (xp_awarded, gain) = adventurer.complete_quest(&title, &rules);
        info!(%title, xp_awarded, xp = adventurer.xp, "Quest completed");

        match gain {
            XpGain::Accumulated => Ok(QuestOutcome::Completed { xp_awarded }),
            XpGain::LeveledUp { level } => {
                let adventurer = adventurer.clone();
                info!(level, points = adventurer.available_points, "Level up");
                let session = LevelUpSession::new(adventurer.stats, adventurer.available_points);
                self.stage = Stage::LevelUp {
                    adventurer,
                    session,
                };
                Ok(QuestOutcome::LeveledUp { xp_awarded, level })
            }
        }
    }

    /// Leave a completed quest so the next one can be generated
    pub fn begin_next_quest(&mut self) -> Result<(), ProgressionError> {
        let Stage::Learning { quest, .. } = &mut self.stage else {
            return Err(self.wrong_stage(StageKind::Learning));
        };
        if !quest.is_completed() {
            return Err(ProgressionError::QuestNotCompleted);
        }
        *quest = QuestSlot::default();
        Ok(())
    }

    /// Spend or refund a single point on the level-up screen
    pub fn adjust_attribute(
        &mut self,
        attribute: Attribute,
        adjustment: Adjustment,
    ) -> Result<(), ProgressionError> {
        let Stage::LevelUp { session, .. } = &mut self.stage else {
            return Err(self.wrong_stage(StageKind::LevelUp));
        };
        match adjustment {
            Adjustment::Increment => session.increment(attribute)?,
            Adjustment::Decrement => session.decrement(attribute)?,
        }
        Ok(())
    }

    /// Commit a full allocation and return to learning with an empty quest slot
    pub fn allocate_points(&mut self, new_stats: Stats) -> Result<(), ProgressionError> {
        let Stage::LevelUp { adventurer, session } = &mut self.stage else {
            return Err(self.wrong_stage(StageKind::LevelUp));
        };
        session.validate(&new_stats)?;

        let mut adventurer = adventurer.clone();
        adventurer.stats = new_stats;
        adventurer.available_points = 0;
        info!(level = adventurer.level, stats = ?new_stats, "Attribute points allocated");
        self.stage = Stage::Learning {
            adventurer,
            quest: QuestSlot::default(),
        };
        Ok(())
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(GameRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(title: &str) -> Lesson {
        Lesson {
            title: title.to_string(),
            narrative: "A dragon guards the loop.".to_string(),
            task: "Print the numbers 1 to 10.".to_string(),
            example_code: None,
        }
    }

    fn correct() -> EvaluationResult {
        EvaluationResult {
            is_correct: true,
            feedback: "Well done!".to_string(),
        }
    }

    fn learning_mage() -> Progression {
        let mut progression = Progression::default();
        progression.select_class(ClassId::Mage).unwrap();
        progression.select_path(PathId::Python).unwrap();
        progression
    }

    /// Present a lesson, pass it, and move on if still learning
    fn pass_quest(progression: &mut Progression, title: &str) -> QuestOutcome {
        let id = progression.present_lesson(lesson(title)).unwrap();
        let outcome = progression.record_quest_result(id, correct()).unwrap();
        if progression.stage().kind() == StageKind::Learning {
            progression.begin_next_quest().unwrap();
        }
        outcome
    }

    fn adventurer(progression: &Progression) -> &Adventurer {
        progression.stage().adventurer().unwrap()
    }

    #[test]
    fn test_class_then_path_enters_learning() {
        let mut progression = Progression::default();
        progression.select_class(ClassId::Rogue).unwrap();
        assert!(matches!(
            progression.stage(),
            Stage::PathSelection { class: ClassId::Rogue, stats } if stats.dexterity == 15
        ));

        progression.select_path(PathId::Cpp).unwrap();
        let adventurer = adventurer(&progression);
        assert_eq!(adventurer.level, 1);
        assert_eq!(adventurer.xp, 0);
        assert_eq!(adventurer.path, PathId::Cpp);
    }

    #[test]
    fn test_selection_stages_cannot_be_revisited() {
        let mut progression = learning_mage();
        assert!(matches!(
            progression.select_class(ClassId::Rogue),
            Err(ProgressionError::WrongStage {
                expected: StageKind::ClassSelection,
                actual: StageKind::Learning,
            })
        ));
        assert!(progression.select_path(PathId::Php).is_err());
    }

    #[test]
    fn test_incorrect_result_only_stores_feedback() {
        let mut progression = learning_mage();
        let id = progression.present_lesson(lesson("First")).unwrap();
        let outcome = progression
            .record_quest_result(
                id,
                EvaluationResult {
                    is_correct: false,
                    feedback: "Not quite.".to_string(),
                },
            )
            .unwrap();

        assert_eq!(outcome, QuestOutcome::Failed);
        let Stage::Learning { adventurer, quest } = progression.stage() else {
            panic!("Expected learning stage");
        };
        assert_eq!(adventurer.xp, 0);
        assert!(adventurer.quest_log.is_empty());
        assert_eq!(quest.feedback.as_ref().unwrap().feedback, "Not quite.");
        assert!(!quest.is_completed());
    }

    #[test]
    fn test_mage_levels_up_after_four_quests() {
        let mut progression = learning_mage();

        assert_eq!(
            pass_quest(&mut progression, "Q1"),
            QuestOutcome::Completed { xp_awarded: 30 }
        );
        assert_eq!(adventurer(&progression).xp, 30);

        pass_quest(&mut progression, "Q2");
        pass_quest(&mut progression, "Q3");
        assert_eq!(
            pass_quest(&mut progression, "Q4"),
            QuestOutcome::LeveledUp {
                xp_awarded: 30,
                level: 2
            }
        );

        let Stage::LevelUp { adventurer, session } = progression.stage() else {
            panic!("Expected level up stage");
        };
        assert_eq!(adventurer.level, 2);
        assert_eq!(adventurer.xp, 20);
        assert_eq!(adventurer.available_points, 2);
        assert_eq!(adventurer.quest_log.len(), 4);
        assert_eq!(session.points_granted, 2);
    }

    #[test]
    fn test_allocating_two_intelligence_returns_to_learning() {
        let mut progression = learning_mage();
        for i in 0..4 {
            pass_quest(&mut progression, &format!("Q{}", i));
        }

        progression
            .adjust_attribute(Attribute::Intelligence, Adjustment::Increment)
            .unwrap();
        progression
            .adjust_attribute(Attribute::Intelligence, Adjustment::Increment)
            .unwrap();
        let Stage::LevelUp { session, .. } = progression.stage() else {
            panic!("Expected level up stage");
        };
        let pending = session.pending;
        progression.allocate_points(pending).unwrap();

        let Stage::Learning { adventurer, quest } = progression.stage() else {
            panic!("Expected learning stage");
        };
        assert_eq!(adventurer.stats.intelligence, 17);
        assert_eq!(adventurer.available_points, 0);
        assert!(quest.lesson.is_none());
    }

    #[test]
    fn test_partial_allocation_is_rejected() {
        let mut progression = learning_mage();
        for i in 0..4 {
            pass_quest(&mut progression, &format!("Q{}", i));
        }

        let partial = Stats::new(16, 8, 7, 10);
        assert_eq!(
            progression.allocate_points(partial),
            Err(ProgressionError::Allocation(
                AllocationError::PointsUnspent { remaining: 1 }
            ))
        );
        assert_eq!(progression.stage().kind(), StageKind::LevelUp);
    }

    #[test]
    fn test_completed_quest_cannot_be_graded_twice() {
        let mut progression = learning_mage();
        let id = progression.present_lesson(lesson("Once")).unwrap();
        progression.record_quest_result(id, correct()).unwrap();

        assert_eq!(
            progression.record_quest_result(id, correct()),
            Err(ProgressionError::QuestAlreadyCompleted)
        );
        assert_eq!(adventurer(&progression).xp, 30);
    }

    #[test]
    fn test_next_quest_requires_completion() {
        let mut progression = learning_mage();
        progression.present_lesson(lesson("Pending")).unwrap();
        assert_eq!(
            progression.begin_next_quest(),
            Err(ProgressionError::QuestNotCompleted)
        );
    }

    #[test]
    fn test_result_for_other_lesson_is_rejected() {
        let mut progression = learning_mage();
        progression.present_lesson(lesson("Current")).unwrap();
        assert_eq!(
            progression.record_quest_result(LessonId::new(), correct()),
            Err(ProgressionError::LessonMismatch)
        );
    }

    #[test]
    fn test_lesson_slot_holds_one_lesson() {
        let mut progression = learning_mage();
        progression.present_lesson(lesson("A")).unwrap();
        assert_eq!(
            progression.present_lesson(lesson("B")),
            Err(ProgressionError::LessonAlreadyPresent)
        );
    }
}
