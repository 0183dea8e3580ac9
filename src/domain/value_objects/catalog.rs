//! Static catalogs of character classes and learning paths
//!
//! Both tables are immutable and indexed by their id's discriminant, so a
//! lookup never scans.

use serde::{Deserialize, Serialize};

use super::stats::Stats;

/// Identifier of a playable class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassId {
    Mage = 0,
    Rogue = 1,
    Artisan = 2,
}

impl ClassId {
    #[cfg(test)]
    pub const ALL: [ClassId; 3] = [ClassId::Mage, ClassId::Rogue, ClassId::Artisan];
}

/// A playable class and its starting attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerClass {
    pub id: ClassId,
    pub name: &'static str,
    pub description: &'static str,
    pub pros: &'static str,
    pub cons: &'static str,
    pub base_stats: Stats,
}

static PLAYER_CLASSES: [PlayerClass; 3] = [
    PlayerClass {
        id: ClassId::Mage,
        name: "Mage",
        description: "Masters of logic and abstraction, Mages excel at complex algorithms and data structures.",
        pros: "High Intelligence & Lore. Gains bonus XP from algorithm-heavy quests.",
        cons: "Low Stamina. Debugging complex logical errors can be mentally taxing.",
        base_stats: Stats::new(15, 8, 7, 10),
    },
    PlayerClass {
        id: ClassId::Rogue,
        name: "Rogue",
        description: "Swift and precise, Rogues are experts in scripting, automation, and finding clever shortcuts.",
        pros: "High Dexterity. Excels at writing clean, efficient code quickly.",
        cons: "Low Lore. May overlook deeper theoretical concepts.",
        base_stats: Stats::new(10, 15, 8, 7),
    },
    PlayerClass {
        id: ClassId::Artisan,
        name: "Artisan",
        description: "Patient and thorough builders, Artisans create robust, well-documented, and maintainable systems.",
        pros: "High Stamina. Can work on large codebases for long periods without burnout.",
        cons: "Low Dexterity. Slower initial development speed due to meticulous planning.",
        base_stats: Stats::new(8, 7, 15, 10),
    },
];

impl PlayerClass {
    pub fn get(id: ClassId) -> &'static PlayerClass {
        &PLAYER_CLASSES[id as usize]
    }

    pub fn all() -> &'static [PlayerClass] {
        &PLAYER_CLASSES
    }
}

/// Identifier of a learning path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathId {
    Python = 0,
    Csharp = 1,
    Cpp = 2,
    Php = 3,
    HtmlCss = 4,
    IdaPro = 5,
}

impl PathId {
    #[cfg(test)]
    pub const ALL: [PathId; 6] = [
        PathId::Python,
        PathId::Csharp,
        PathId::Cpp,
        PathId::Php,
        PathId::HtmlCss,
        PathId::IdaPro,
    ];

    /// Language tag used when fencing submitted code in a prompt
    pub fn fence_tag(&self) -> &'static str {
        match self {
            PathId::Python => "python",
            PathId::Csharp => "csharp",
            PathId::Cpp => "cpp",
            PathId::Php => "php",
            PathId::HtmlCss => "html",
            PathId::IdaPro => "ida",
        }
    }
}

/// A programming language (or discipline) the player studies
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearningPath {
    pub id: PathId,
    pub name: &'static str,
    pub description: &'static str,
}

static LEARNING_PATHS: [LearningPath; 6] = [
    LearningPath {
        id: PathId::Python,
        name: "Python",
        description: "The versatile language of serpents, ideal for scripting, data science, and web backends.",
    },
    LearningPath {
        id: PathId::Csharp,
        name: "C#",
        description: "The structured language of the .NET kingdom, perfect for game development and enterprise applications.",
    },
    LearningPath {
        id: PathId::Cpp,
        name: "C++",
        description: "The ancient and powerful language, offering raw performance for systems programming and high-frequency trading.",
    },
    LearningPath {
        id: PathId::Php,
        name: "PHP",
        description: "The pragmatic language that powers a vast portion of the web, known for its straightforwardness.",
    },
    LearningPath {
        id: PathId::HtmlCss,
        name: "HTML & CSS",
        description: "The twin arts of structure and style, the foundation of all web sorcery.",
    },
    LearningPath {
        id: PathId::IdaPro,
        name: "IDA Pro",
        description: "The arcane art of reverse engineering, deciphering the secrets of compiled binaries.",
    },
];

impl LearningPath {
    pub fn get(id: PathId) -> &'static LearningPath {
        &LEARNING_PATHS[id as usize]
    }

    pub fn all() -> &'static [LearningPath] {
        &LEARNING_PATHS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_matches_id() {
        for id in ClassId::ALL {
            assert_eq!(PlayerClass::get(id).id, id);
        }
        for id in PathId::ALL {
            assert_eq!(LearningPath::get(id).id, id);
        }
    }

    #[test]
    fn test_mage_base_stats() {
        let mage = PlayerClass::get(ClassId::Mage);
        assert_eq!(mage.name, "Mage");
        assert_eq!(mage.base_stats, Stats::new(15, 8, 7, 10));
    }

    #[test]
    fn test_path_ids_deserialize_from_snake_case() {
        let id: PathId = serde_json::from_str("\"html_css\"").unwrap();
        assert_eq!(id, PathId::HtmlCss);
        assert_eq!(LearningPath::get(id).name, "HTML & CSS");
    }
}
