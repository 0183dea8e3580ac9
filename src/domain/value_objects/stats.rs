//! Character attributes

use serde::{Deserialize, Serialize};

/// One of the four character attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Intelligence,
    Dexterity,
    Stamina,
    Lore,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Intelligence,
        Attribute::Dexterity,
        Attribute::Stamina,
        Attribute::Lore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Intelligence => "intelligence",
            Attribute::Dexterity => "dexterity",
            Attribute::Stamina => "stamina",
            Attribute::Lore => "lore",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The attribute block of a character
///
/// Lore feeds the XP reward of every completed quest; the other attributes
/// are flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub intelligence: u32,
    pub dexterity: u32,
    pub stamina: u32,
    pub lore: u32,
}

impl Stats {
    pub const fn new(intelligence: u32, dexterity: u32, stamina: u32, lore: u32) -> Self {
        Self {
            intelligence,
            dexterity,
            stamina,
            lore,
        }
    }

    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Intelligence => self.intelligence,
            Attribute::Dexterity => self.dexterity,
            Attribute::Stamina => self.stamina,
            Attribute::Lore => self.lore,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut u32 {
        match attribute {
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Stamina => &mut self.stamina,
            Attribute::Lore => &mut self.lore,
        }
    }

    #[cfg(test)]
    pub fn with(mut self, attribute: Attribute, value: u32) -> Self {
        *self.get_mut(attribute) = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_with_address_the_same_field() {
        let stats = Stats::new(1, 2, 3, 4);
        for attribute in Attribute::ALL {
            let bumped = stats.with(attribute, 40);
            assert_eq!(bumped.get(attribute), 40);
            for other in Attribute::ALL.iter().filter(|a| **a != attribute) {
                assert_eq!(bumped.get(*other), stats.get(*other));
            }
        }
    }

    #[test]
    fn test_attribute_serializes_snake_case() {
        let json = serde_json::to_string(&Attribute::Intelligence).unwrap();
        assert_eq!(json, "\"intelligence\"");
    }
}
