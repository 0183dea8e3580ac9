//! Screen projection - what the browser renders for each stage

use serde::Serialize;

use crate::domain::aggregates::{Progression, QuestOutcome, Stage};
use crate::domain::entities::{Adventurer, CompletedQuest, EvaluationResult, Lesson};
use crate::domain::value_objects::{
    ClassId, LearningPath, LessonId, PathId, PlayerClass, Stats,
};

/// Card on the class selection screen
#[derive(Debug, Clone, Serialize)]
pub struct ClassCard {
    pub id: ClassId,
    pub name: &'static str,
    pub description: &'static str,
    pub pros: &'static str,
    pub cons: &'static str,
    pub base_stats: Stats,
}

impl From<&PlayerClass> for ClassCard {
    fn from(class: &PlayerClass) -> Self {
        Self {
            id: class.id,
            name: class.name,
            description: class.description,
            pros: class.pros,
            cons: class.cons,
            base_stats: class.base_stats,
        }
    }
}

/// Card on the path selection screen
#[derive(Debug, Clone, Serialize)]
pub struct PathCard {
    pub id: PathId,
    pub name: &'static str,
    pub description: &'static str,
}

impl From<&LearningPath> for PathCard {
    fn from(path: &LearningPath) -> Self {
        Self {
            id: path.id,
            name: path.name,
            description: path.description,
        }
    }
}

pub fn class_cards() -> Vec<ClassCard> {
    PlayerClass::all().iter().map(ClassCard::from).collect()
}

pub fn path_cards() -> Vec<PathCard> {
    LearningPath::all().iter().map(PathCard::from).collect()
}

/// Sidebar shown next to the quest
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSheet {
    /// e.g. "Mage Adept"
    pub title: String,
    pub class: ClassId,
    pub path: PathCard,
    pub level: u32,
    pub xp: u32,
    pub xp_per_level: u32,
    pub stats: Stats,
    /// Most recent first
    pub quest_log: Vec<CompletedQuest>,
}

impl CharacterSheet {
    fn new(adventurer: &Adventurer, xp_per_level: u32) -> Self {
        let class = PlayerClass::get(adventurer.class);
        Self {
            title: format!("{} Adept", class.name),
            class: adventurer.class,
            path: LearningPath::get(adventurer.path).into(),
            level: adventurer.level,
            xp: adventurer.xp,
            xp_per_level,
            stats: adventurer.stats,
            quest_log: adventurer.quest_log.iter().rev().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LessonView {
    pub id: LessonId,
    pub title: String,
    pub narrative: String,
    pub task: String,
    pub example_code: Option<String>,
}

impl LessonView {
    fn new(id: LessonId, lesson: &Lesson) -> Self {
        Self {
            id,
            title: lesson.title.clone(),
            narrative: lesson.narrative.clone(),
            task: lesson.task.clone(),
            example_code: lesson.example_code.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackView {
    pub is_correct: bool,
    /// "Success!" or "A Setback..."
    pub heading: &'static str,
    pub message: String,
}

impl From<&EvaluationResult> for FeedbackView {
    fn from(result: &EvaluationResult) -> Self {
        Self {
            is_correct: result.is_correct,
            heading: if result.is_correct {
                "Success!"
            } else {
                "A Setback..."
            },
            message: result.feedback.clone(),
        }
    }
}

/// Transient request flags owned by the session, not the progression
#[derive(Debug, Clone, Copy, Default)]
pub struct Activity {
    pub lesson_loading: bool,
    pub evaluating: bool,
}

/// One of the four mutually exclusive screens
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    ClassSelection {
        classes: Vec<ClassCard>,
    },
    PathSelection {
        class: ClassCard,
        paths: Vec<PathCard>,
    },
    Learning {
        sheet: CharacterSheet,
        lesson: Option<LessonView>,
        feedback: Option<FeedbackView>,
        lesson_loading: bool,
        evaluating: bool,
        /// Submission is open: a lesson is shown, not yet solved, nothing in flight
        can_submit: bool,
        /// The quest is solved and the next one may be requested
        can_advance: bool,
    },
    LevelUp {
        level: u32,
        points_remaining: u32,
        stats: Stats,
        baseline: Stats,
        can_confirm: bool,
    },
}

impl Screen {
    pub fn project(progression: &Progression, activity: Activity) -> Self {
        let rules = progression.rules();
        match progression.stage() {
            Stage::ClassSelection => Screen::ClassSelection {
                classes: class_cards(),
            },
            Stage::PathSelection { class, .. } => Screen::PathSelection {
                class: PlayerClass::get(*class).into(),
                paths: path_cards(),
            },
            Stage::Learning { adventurer, quest } => {
                let completed = quest.is_completed();
                Screen::Learning {
                    sheet: CharacterSheet::new(adventurer, rules.xp_per_level),
                    lesson: quest
                        .lesson
                        .as_ref()
                        .map(|active| LessonView::new(active.id, &active.lesson)),
                    feedback: quest.feedback.as_ref().map(FeedbackView::from),
                    lesson_loading: activity.lesson_loading,
                    evaluating: activity.evaluating,
                    can_submit: quest.lesson.is_some() && !completed && !activity.evaluating,
                    can_advance: completed,
                }
            }
            Stage::LevelUp { adventurer, session } => {
                let points_remaining = session.points_remaining();
                Screen::LevelUp {
                    level: adventurer.level,
                    points_remaining,
                    stats: session.pending,
                    baseline: session.baseline,
                    can_confirm: points_remaining == 0,
                }
            }
        }
    }
}

/// Response to a code submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResult {
    pub feedback: FeedbackView,
    pub outcome: QuestOutcome,
    pub screen: Screen,
}
