use crate::translation::{TranslationEntry, TranslationTable};
use crate::types::StatEntry;

/// A translation entry bound to the numbers of one modifier.
///
/// Arrays are sized to the entry's slot count; slots no stat filled stay 0.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationLine<'t> {
    pub entry: &'t TranslationEntry,
    /// Position of `entry` in its table
    pub entry_index: usize,
    pub mins: Vec<f64>,
    pub maxs: Vec<f64>,
    /// Live rolled values, present only when the caller supplied them
    pub values: Option<Vec<f64>>,
}

impl<'t> TranslationLine<'t> {
    fn open(entry: &'t TranslationEntry, entry_index: usize, with_values: bool) -> Self {
        let slots = entry.slot_count();
        TranslationLine {
            entry,
            entry_index,
            mins: vec![0.0; slots],
            maxs: vec![0.0; slots],
            values: with_values.then(|| vec![0.0; slots]),
        }
    }

    fn fill(&mut self, slot: usize, stat: &StatEntry, value: Option<f64>) {
        self.mins[slot] = stat.min;
        self.maxs[slot] = stat.max;
        if let (Some(values), Some(v)) = (self.values.as_mut(), value) {
            values[slot] = v;
        }
    }

    pub fn min(&self, slot: usize) -> f64 {
        self.mins.get(slot).copied().unwrap_or(0.0)
    }

    pub fn max(&self, slot: usize) -> f64 {
        self.maxs.get(slot).copied().unwrap_or(0.0)
    }

    pub fn value(&self, slot: usize) -> Option<f64> {
        self.values
            .as_ref()
            .map(|v| v.get(slot).copied().unwrap_or(0.0))
    }
}

/// Group a modifier's stats into translation lines.
///
/// Each stat seeds at most one line: the first table entry mentioning it.
/// Later stats of the same modifier that the entry also covers are folded
/// into that line. Stats no entry mentions are dropped.
///
/// `values` holds live rolls aligned with `stats`, if any.
pub fn match_lines<'t>(
    stats: &[StatEntry],
    table: &'t TranslationTable,
    values: Option<&[f64]>,
) -> Vec<TranslationLine<'t>> {
    let live = |i: usize| values.and_then(|v| v.get(i).copied());
    let mut consumed = vec![false; stats.len()];
    let mut lines = Vec::new();

    for (i, stat) in stats.iter().enumerate() {
        if consumed[i] {
            continue;
        }
        let Some((entry_index, entry)) = table.entry_for_stat(&stat.id) else {
            tracing::debug!(stat = %stat.id, "no translation for stat");
            continue;
        };
        consumed[i] = true;

        let mut line = TranslationLine::open(entry, entry_index, values.is_some());
        if let Some(slot) = entry.slot_of(&stat.id) {
            line.fill(slot, stat, live(i));
        }

        for (j, other) in stats.iter().enumerate().skip(i + 1) {
            if consumed[j] {
                continue;
            }
            if let Some(slot) = entry.slot_of(&other.id) {
                line.fill(slot, other, live(j));
                consumed[j] = true;
            }
        }

        lines.push(line);
    }

    lines
}
