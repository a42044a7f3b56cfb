//! The stat translation table: authored phrase rules keyed by stat ids.
//!
//! The JSON shape is an array of entries:
//!
//! ```json
//! [{
//!   "ids": ["local_minimum_added_physical_damage", "local_maximum_added_physical_damage"],
//!   "English": [{
//!     "condition": [{}, {}],
//!     "format": ["#", "#"],
//!     "index_handlers": [[], []],
//!     "string": "Adds {0} to {1} Physical Damage"
//!   }],
//!   "hidden": false
//! }]
//! ```
//!
//! Keys starting with an uppercase letter are language rule sets. All other
//! keys (`ids` aside) are ignored.

use crate::config::ConfigError;
use crate::transform::Transform;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_LANGUAGE: &str = "English";

/// Format value marking a slot that is not shown
pub const IGNORED_FORMAT: &str = "ignore";

/// Inclusive numeric bounds a slot's minimum roll must fall within
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Condition {
    pub fn any() -> Self {
        Condition::default()
    }

    pub fn at_least(min: f64) -> Self {
        Condition {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Condition {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Condition {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn admits(&self, value: f64) -> bool {
        if let Some(min) = self.min {
            if value < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return false;
            }
        }
        true
    }
}

/// One conditional phrasing of a translation entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRule {
    /// One condition per slot
    pub condition: Vec<Condition>,
    /// Transforms per slot, applied to min, max and live value alike
    #[serde(default)]
    pub index_handlers: Vec<Vec<Transform>>,
    /// Per-slot template; `#` is replaced by the slot's token
    pub format: Vec<String>,
    /// Overall template; `{i}` is replaced by slot `i`'s formatted text
    pub string: String,
}

impl RenderRule {
    pub fn handlers(&self, slot: usize) -> &[Transform] {
        self.index_handlers
            .get(slot)
            .map(|h| h.as_slice())
            .unwrap_or(&[])
    }

    pub fn format(&self, slot: usize) -> &str {
        self.format.get(slot).map(|f| f.as_str()).unwrap_or("#")
    }
}

/// A phrase group covering one or more stat ids
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawEntry")]
pub struct TranslationEntry {
    /// Slot `i` phrases `ids[i]`
    pub ids: Vec<String>,
    /// Rules in authored order, per language
    pub rules: BTreeMap<String, Vec<RenderRule>>,
}

impl TranslationEntry {
    /// Build an entry with a single language
    pub fn new(ids: Vec<String>, language: &str, rules: Vec<RenderRule>) -> Self {
        let mut by_language = BTreeMap::new();
        by_language.insert(language.to_string(), rules);
        TranslationEntry {
            ids,
            rules: by_language,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.ids.len()
    }

    /// Slot position of a stat id in this entry
    pub fn slot_of(&self, stat_id: &str) -> Option<usize> {
        self.ids.iter().position(|id| id == stat_id)
    }

    /// Rules for a language, empty if the entry has none
    pub fn rules_for(&self, language: &str) -> &[RenderRule] {
        self.rules
            .get(language)
            .map(|r| r.as_slice())
            .unwrap_or(&[])
    }

    /// Check slot arrays line up with `ids`
    pub fn check(&self) -> Result<(), String> {
        if self.ids.is_empty() {
            return Err("entry has no stat ids".to_string());
        }
        let slots = self.ids.len();
        for (language, rules) in &self.rules {
            for (n, rule) in rules.iter().enumerate() {
                if rule.condition.len() != slots {
                    return Err(format!(
                        "{} rule {}: {} conditions for {} ids",
                        language,
                        n,
                        rule.condition.len(),
                        slots
                    ));
                }
                if rule.format.len() != slots {
                    return Err(format!(
                        "{} rule {}: {} formats for {} ids",
                        language,
                        n,
                        rule.format.len(),
                        slots
                    ));
                }
                if rule.index_handlers.len() != slots {
                    return Err(format!(
                        "{} rule {}: {} handler lists for {} ids",
                        language,
                        n,
                        rule.index_handlers.len(),
                        slots
                    ));
                }
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawEntry {
    ids: Vec<String>,
    #[serde(flatten)]
    rest: BTreeMap<String, serde_json::Value>,
}

impl TryFrom<RawEntry> for TranslationEntry {
    type Error = String;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        let mut rules = BTreeMap::new();
        for (key, value) in raw.rest {
            if !key.starts_with(|c: char| c.is_uppercase()) {
                continue;
            }
            let parsed: Vec<RenderRule> = serde_json::from_value(value)
                .map_err(|e| format!("rules for language '{}': {}", key, e))?;
            rules.insert(key, parsed);
        }
        Ok(TranslationEntry {
            ids: raw.ids,
            rules,
        })
    }
}

/// Ordered translation entries, read-only once built
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<TranslationEntry>")]
pub struct TranslationTable {
    entries: Vec<TranslationEntry>,
    /// First entry (in table order) that mentions each stat id
    first_entry: HashMap<String, usize>,
}

impl TranslationTable {
    pub fn new(entries: Vec<TranslationEntry>) -> Self {
        let mut first_entry = HashMap::new();
        for (index, entry) in entries.iter().enumerate() {
            for id in &entry.ids {
                first_entry.entry(id.clone()).or_insert(index);
            }
        }
        TranslationTable {
            entries,
            first_entry,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&TranslationEntry> {
        self.entries.get(index)
    }

    /// The first entry whose ids contain `stat_id`, with its table position
    pub fn entry_for_stat(&self, stat_id: &str) -> Option<(usize, &TranslationEntry)> {
        let index = *self.first_entry.get(stat_id)?;
        Some((index, &self.entries[index]))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append the entries of another table after this one's
    pub fn extend(&mut self, other: TranslationTable) {
        let mut entries = std::mem::take(&mut self.entries);
        entries.extend(other.entries);
        *self = TranslationTable::new(entries);
    }

    /// Reject entries whose rule arrays do not match their slot count
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, entry) in self.entries.iter().enumerate() {
            entry
                .check()
                .map_err(|reason| ConfigError::InvalidEntry { index, reason })?;
        }
        Ok(())
    }
}

impl From<Vec<TranslationEntry>> for TranslationTable {
    fn from(entries: Vec<TranslationEntry>) -> Self {
        TranslationTable::new(entries)
    }
}
