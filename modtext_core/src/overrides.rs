use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fixed text for one modifier type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideConfig {
    #[serde(rename = "type")]
    pub mod_type: String,
    pub lines: Vec<String>,
}

/// Modifier types whose text bypasses stat translation entirely
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<String, Vec<String>>,
}

impl OverrideTable {
    pub fn new() -> Self {
        OverrideTable::default()
    }

    /// Types whose stats have no usable translation.
    ///
    /// Only types whose text is the same at every tier belong here.
    pub fn builtin() -> Self {
        let mut table = OverrideTable::new();
        table.insert("AbyssJewelSocket", vec!["Has 1 Abyssal Socket".to_string()]);
        table
    }

    pub fn insert(&mut self, mod_type: impl Into<String>, lines: Vec<String>) {
        self.entries.insert(mod_type.into(), lines);
    }

    /// Add configured overrides; they replace builtin text for the same type
    pub fn extend(&mut self, configs: impl IntoIterator<Item = OverrideConfig>) {
        for config in configs {
            self.insert(config.mod_type, config.lines);
        }
    }

    pub fn get(&self, mod_type: &str) -> Option<&[String]> {
        self.entries.get(mod_type).map(|lines| lines.as_slice())
    }

    pub fn contains(&self, mod_type: &str) -> bool {
        self.entries.contains_key(mod_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
