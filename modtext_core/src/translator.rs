use crate::matcher::{match_lines, TranslationLine};
use crate::overrides::OverrideTable;
use crate::render::render_lines;
use crate::translation::{TranslationTable, DEFAULT_LANGUAGE};
use crate::types::Modifier;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslateError {
    /// Low and high tier modifiers matched different translation lines
    #[error("tier '{low}' and tier '{high}' do not line up at line {position}")]
    RangeMismatch {
        low: String,
        high: String,
        position: usize,
    },
}

/// Renders modifier text from a translation table.
///
/// Holds only read-only data, so one translator can serve any number of
/// threads at once.
#[derive(Debug, Clone)]
pub struct Translator {
    table: TranslationTable,
    overrides: OverrideTable,
    language: String,
}

impl Translator {
    pub fn new(table: TranslationTable, overrides: OverrideTable) -> Self {
        Translator {
            table,
            overrides,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Describe a modifier, one string per display line.
    ///
    /// `values` are live rolls aligned with the modifier's stats.
    pub fn translate(&self, modifier: &Modifier, values: Option<&[f64]>) -> Vec<String> {
        self.translate_with_placeholder(modifier, values, None)
    }

    /// Like [`translate`](Self::translate), with every number replaced by `placeholder`
    pub fn translate_with_placeholder(
        &self,
        modifier: &Modifier,
        values: Option<&[f64]>,
        placeholder: Option<&str>,
    ) -> Vec<String> {
        if let Some(lines) = self.overrides.get(&modifier.mod_type) {
            return lines.to_vec();
        }
        let lines = match_lines(&modifier.stats, &self.table, values);
        render_lines(&lines, &self.language, placeholder)
    }

    /// Describe the span from a modifier's lowest tier to its highest.
    ///
    /// Lines are paired by position: entry and minimums from `low`, maximums
    /// from `high`. Lists that do not line up are still paired best-effort
    /// and a warning is logged; see [`try_translate_range`](Self::try_translate_range).
    pub fn translate_range(&self, low: &Modifier, high: &Modifier) -> Vec<String> {
        if let Some(lines) = self.override_for(low, high) {
            return lines;
        }
        let low_lines = match_lines(&low.stats, &self.table, None);
        let high_lines = match_lines(&high.stats, &self.table, None);
        if let Some(position) = first_mismatch(&low_lines, &high_lines) {
            tracing::warn!(
                low = %low.id,
                high = %high.id,
                position,
                low_lines = low_lines.len(),
                high_lines = high_lines.len(),
                "tier translation lines do not line up"
            );
        }
        render_lines(&combine(low_lines, &high_lines), &self.language, None)
    }

    /// Strict [`translate_range`](Self::translate_range): mismatched tiers are an error
    pub fn try_translate_range(
        &self,
        low: &Modifier,
        high: &Modifier,
    ) -> Result<Vec<String>, TranslateError> {
        if let Some(lines) = self.override_for(low, high) {
            return Ok(lines);
        }
        let low_lines = match_lines(&low.stats, &self.table, None);
        let high_lines = match_lines(&high.stats, &self.table, None);
        if let Some(position) = first_mismatch(&low_lines, &high_lines) {
            return Err(TranslateError::RangeMismatch {
                low: low.id.clone(),
                high: high.id.clone(),
                position,
            });
        }
        Ok(render_lines(
            &combine(low_lines, &high_lines),
            &self.language,
            None,
        ))
    }

    fn override_for(&self, low: &Modifier, high: &Modifier) -> Option<Vec<String>> {
        self.overrides
            .get(&low.mod_type)
            .or_else(|| self.overrides.get(&high.mod_type))
            .map(|lines| lines.to_vec())
    }
}

/// Take each low line's maximums from the high line at the same position.
/// Low lines with no counterpart keep their own maximums.
fn combine<'t>(
    low: Vec<TranslationLine<'t>>,
    high: &[TranslationLine<'t>],
) -> Vec<TranslationLine<'t>> {
    low.into_iter()
        .enumerate()
        .map(|(i, mut line)| {
            if let Some(other) = high.get(i) {
                line.maxs = other.maxs.clone();
            }
            line
        })
        .collect()
}

fn first_mismatch(low: &[TranslationLine<'_>], high: &[TranslationLine<'_>]) -> Option<usize> {
    low.iter()
        .zip(high)
        .position(|(l, h)| l.entry_index != h.entry_index)
        .or_else(|| (low.len() != high.len()).then(|| low.len().min(high.len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatEntry;

    fn translator() -> Translator {
        let table = TranslationTable::from_json(
            r##"[
                {
                    "ids": ["min_phys", "max_phys"],
                    "English": [{
                        "condition": [{}, {}],
                        "format": ["#", "#"],
                        "index_handlers": [[], []],
                        "string": "Adds {0} to {1} Physical Damage"
                    }]
                },
                {
                    "ids": ["X"],
                    "English": [{
                        "condition": [{}],
                        "format": ["+# Added Physical Damage"],
                        "index_handlers": [[]],
                        "string": "{0}"
                    }]
                },
                {
                    "ids": ["life"],
                    "English": [{
                        "condition": [{}],
                        "format": ["+#"],
                        "index_handlers": [[]],
                        "string": "{0} to maximum Life"
                    }]
                }
            ]"##,
        )
        .unwrap();
        Translator::new(table, OverrideTable::builtin())
    }

    fn x_mod(id: &str, min: f64, max: f64) -> Modifier {
        Modifier::new(id, "AddedPhysical", vec![StatEntry::new("X", min, max)])
    }

    #[test]
    fn test_translate_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Translator>();
    }

    #[test]
    fn test_empty_modifier() {
        let t = translator();
        assert!(t.translate(&Modifier::new("Empty", "Nothing", vec![]), None).is_empty());
    }

    #[test]
    fn test_override_short_circuits() {
        let t = translator();
        let m = Modifier::new(
            "Abyss1",
            "AbyssJewelSocket",
            vec![StatEntry::new("X", 8.0, 13.0)],
        );
        assert_eq!(t.translate(&m, None), vec!["Has 1 Abyssal Socket"]);
        assert_eq!(t.translate_range(&m, &x_mod("X2", 1.0, 2.0)), vec!["Has 1 Abyssal Socket"]);
        assert_eq!(t.translate_range(&x_mod("X2", 1.0, 2.0), &m), vec!["Has 1 Abyssal Socket"]);
    }

    #[test]
    fn test_translate_is_repeatable() {
        let t = translator();
        let m = Modifier::new(
            "Rare1",
            "Mixed",
            vec![
                StatEntry::new("life", 40.0, 49.0),
                StatEntry::new("max_phys", 10.0, 12.0),
                StatEntry::new("min_phys", 3.0, 4.0),
            ],
        );
        let first = t.translate(&m, None);
        assert_eq!(
            first,
            vec!["+(40-49) to maximum Life", "Adds (3-4) to (10-12) Physical Damage"]
        );
        assert_eq!(t.translate(&m, None), first);
    }

    #[test]
    fn test_range_takes_low_mins_and_high_maxs() {
        let t = translator();
        let low = x_mod("Phys1", 8.0, 10.0);
        let high = x_mod("Phys8", 18.0, 20.0);
        assert_eq!(t.translate_range(&low, &high), vec!["+(8-20) Added Physical Damage"]);
        assert_eq!(
            t.try_translate_range(&low, &high).unwrap(),
            vec!["+(8-20) Added Physical Damage"]
        );
    }

    #[test]
    fn test_range_mismatch_is_best_effort_or_error() {
        let t = translator();
        let low = Modifier::new(
            "Low",
            "Mixed",
            vec![StatEntry::new("X", 8.0, 10.0), StatEntry::new("life", 5.0, 9.0)],
        );
        let high = x_mod("High", 18.0, 20.0);
        assert_eq!(
            t.translate_range(&low, &high),
            vec!["+(8-20) Added Physical Damage", "+(5-9) to maximum Life"]
        );
        assert_eq!(
            t.try_translate_range(&low, &high),
            Err(TranslateError::RangeMismatch {
                low: "Low".to_string(),
                high: "High".to_string(),
                position: 1,
            })
        );
    }

    #[test]
    fn test_range_entry_identity_mismatch() {
        let t = translator();
        let low = x_mod("Low", 1.0, 2.0);
        let high = Modifier::new("High", "Life", vec![StatEntry::new("life", 5.0, 9.0)]);
        match t.try_translate_range(&low, &high) {
            Err(TranslateError::RangeMismatch { position, .. }) => assert_eq!(position, 0),
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_placeholder_and_live_values() {
        let t = translator();
        let m = x_mod("Phys1", 8.0, 13.0);
        assert_eq!(
            t.translate_with_placeholder(&m, None, Some("#")),
            vec!["+(#-#) Added Physical Damage"]
        );
        assert_eq!(t.translate(&m, Some(&[9.0])), vec!["+9(8-13) Added Physical Damage"]);
    }

    #[test]
    fn test_unknown_language_renders_nothing() {
        let t = translator().with_language("French");
        assert_eq!(t.language(), "French");
        assert!(t.translate(&x_mod("Phys1", 8.0, 13.0), None).is_empty());
    }
}
