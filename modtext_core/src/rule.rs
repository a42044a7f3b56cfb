use crate::matcher::TranslationLine;
use crate::translation::RenderRule;

/// Pick the first rule of the line's entry, in authored order, whose
/// per-slot conditions all admit the line.
///
/// Only the line's minimum rolls are tested; `maxs` never takes part.
pub fn select_rule<'t>(line: &TranslationLine<'t>, language: &str) -> Option<&'t RenderRule> {
    let rule = line
        .entry
        .rules_for(language)
        .iter()
        .find(|rule| admits(rule, line));

    if rule.is_none() {
        tracing::trace!(
            entry = line.entry_index,
            language,
            mins = ?line.mins,
            "no rule matches line"
        );
    }
    rule
}

fn admits(rule: &RenderRule, line: &TranslationLine<'_>) -> bool {
    rule.condition
        .iter()
        .enumerate()
        .all(|(slot, condition)| condition.admits(line.min(slot)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_lines;
    use crate::translation::TranslationTable;
    use crate::types::StatEntry;

    fn table() -> TranslationTable {
        TranslationTable::from_json(
            r##"[{
                "ids": ["fire_res"],
                "English": [
                    {"condition": [{"min": 1}], "format": ["+#%"], "index_handlers": [[]],
                     "string": "{0} to Fire Resistance"},
                    {"condition": [{"max": -1}], "format": ["#%"], "index_handlers": [["negate"]],
                     "string": "{0} reduced Fire Resistance"}
                ],
                "German": [
                    {"condition": [{}], "format": ["+#%"], "index_handlers": [[]],
                     "string": "{0} Feuerwiderstand"}
                ]
            }]"##,
        )
        .unwrap()
    }

    fn select(min: f64, max: f64, language: &str) -> Option<String> {
        let table = table();
        let stats = vec![StatEntry::new("fire_res", min, max)];
        let lines = match_lines(&stats, &table, None);
        select_rule(&lines[0], language).map(|r| r.string.clone())
    }

    #[test]
    fn test_first_satisfied_rule_is_chosen() {
        assert_eq!(select(10.0, 20.0, "English").unwrap(), "{0} to Fire Resistance");
        assert_eq!(select(-20.0, -10.0, "English").unwrap(), "{0} reduced Fire Resistance");
    }

    #[test]
    fn test_lower_bound_skips_rule() {
        assert_eq!(select(0.5, 20.0, "English"), None);
    }

    #[test]
    fn test_selection_ignores_maxs() {
        // min below every bound, max would satisfy the first rule
        assert_eq!(select(-5.0, 30.0, "English").unwrap(), "{0} reduced Fire Resistance");
    }

    #[test]
    fn test_language_selects_rule_set() {
        assert_eq!(select(0.0, 0.0, "German").unwrap(), "{0} Feuerwiderstand");
        assert_eq!(select(10.0, 20.0, "Klingon"), None);
    }
}
