use serde::{Deserialize, Serialize};

/// Where a modifier can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    #[default]
    Item,
    Flask,
    Jewel,
    AbyssJewel,
    Crafted,
    Monster,
    Chest,
    Area,
    Atlas,
    Misc,
    Delve,
    Unveiled,
    /// Any domain this crate has no special handling for
    #[serde(other)]
    Other,
}

/// How a modifier is generated onto an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenerationType {
    #[default]
    Prefix,
    Suffix,
    Implicit,
    Unique,
    Corrupted,
    Enchantment,
    #[serde(other)]
    Other,
}

/// A single stat roll range carried by a modifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    /// Stat identifier, e.g. `local_minimum_added_physical_damage`
    pub id: String,
    pub min: f64,
    pub max: f64,
}

impl StatEntry {
    pub fn new(id: impl Into<String>, min: f64, max: f64) -> Self {
        StatEntry {
            id: id.into(),
            min,
            max,
        }
    }
}

/// A modifier record as loaded from the content database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modifier {
    /// Filled in from the key of the mods file when loaded
    #[serde(default)]
    pub id: String,
    /// Modifier family, e.g. `LocalAddedPhysicalDamage`. Looked up in the override table.
    #[serde(rename = "type")]
    pub mod_type: String,
    #[serde(default)]
    pub domain: Domain,
    #[serde(default)]
    pub generation_type: GenerationType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub required_level: u32,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub is_essence_only: bool,
    /// Stat ranges in authored order
    #[serde(default)]
    pub stats: Vec<StatEntry>,
}

impl Modifier {
    /// Create a bare modifier with the given stats and default metadata
    pub fn new(id: impl Into<String>, mod_type: impl Into<String>, stats: Vec<StatEntry>) -> Self {
        Modifier {
            id: id.into(),
            mod_type: mod_type.into(),
            domain: Domain::default(),
            generation_type: GenerationType::default(),
            name: String::new(),
            required_level: 0,
            groups: Vec::new(),
            is_essence_only: false,
            stats,
        }
    }

    pub fn has_stats(&self) -> bool {
        !self.stats.is_empty()
    }
}
