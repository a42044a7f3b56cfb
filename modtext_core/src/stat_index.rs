use crate::translation::TranslationTable;
use crate::types::Modifier;
use std::collections::HashMap;

/// Stable integer positions for stat ids, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct StatIndex {
    ids: Vec<String>,
    positions: HashMap<String, usize>,
}

impl StatIndex {
    pub fn new() -> Self {
        StatIndex::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = StatIndex::new();
        for id in ids {
            index.insert(id);
        }
        index
    }

    /// Index every stat id mentioned by the table, in table order
    pub fn from_translations(table: &TranslationTable) -> Self {
        StatIndex::from_ids(
            table
                .entries()
                .iter()
                .flat_map(|entry| entry.ids.iter().cloned()),
        )
    }

    /// Index every stat id carried by the given modifiers
    pub fn from_mods<'a>(mods: impl IntoIterator<Item = &'a Modifier>) -> Self {
        StatIndex::from_ids(
            mods.into_iter()
                .flat_map(|m| m.stats.iter().map(|s| s.id.clone())),
        )
    }

    /// Position of `id`, assigning the next one if it is new
    pub fn insert(&mut self, id: impl Into<String>) -> usize {
        let id = id.into();
        if let Some(&position) = self.positions.get(&id) {
            return position;
        }
        let position = self.ids.len();
        self.positions.insert(id.clone(), position);
        self.ids.push(id);
        position
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn id(&self, position: usize) -> Option<&str> {
        self.ids.get(position).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sorted positions of the indexed stats a modifier touches.
    ///
    /// Modifiers touching the same stats share a signature; unknown ids are skipped.
    pub fn signature(&self, modifier: &Modifier) -> Vec<usize> {
        let mut positions: Vec<usize> = modifier
            .stats
            .iter()
            .filter_map(|s| self.position(&s.id))
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }
}
