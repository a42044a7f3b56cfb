//! Turn matched translation lines into display text.

use crate::matcher::TranslationLine;
use crate::rule::select_rule;
use crate::transform::apply_all;
use crate::translation::{RenderRule, IGNORED_FORMAT};

/// Render every line with its selected rule, in line order.
///
/// Lines without an applicable rule produce nothing.
pub fn render_lines(
    lines: &[TranslationLine<'_>],
    language: &str,
    placeholder: Option<&str>,
) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| select_rule(line, language).map(|rule| (line, rule)))
        .flat_map(|(line, rule)| render_line(line, rule, placeholder))
        .collect()
}

/// Render one line with a given rule. The result is split on newlines.
pub fn render_line(
    line: &TranslationLine<'_>,
    rule: &RenderRule,
    placeholder: Option<&str>,
) -> Vec<String> {
    // An empty placeholder counts as none
    let placeholder = placeholder.filter(|p| !p.is_empty());

    let slots: Vec<String> = (0..line.entry.slot_count())
        .map(|slot| {
            let format = rule.format(slot);
            if format == IGNORED_FORMAT {
                return String::new();
            }
            format.replacen('#', &slot_token(line, rule, slot, placeholder), 1)
        })
        .collect();

    substitute(&rule.string, &slots)
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// The text that stands in for `#` in a slot's format
fn slot_token(
    line: &TranslationLine<'_>,
    rule: &RenderRule,
    slot: usize,
    placeholder: Option<&str>,
) -> String {
    let handlers = rule.handlers(slot);
    let min = apply_all(handlers, line.min(slot)).to_string();
    let max = apply_all(handlers, line.max(slot)).to_string();

    if min == max {
        return placeholder.map(str::to_string).unwrap_or(min);
    }

    // A placeholder stands in for any live value, zero included
    let (min, max, value) = match placeholder {
        Some(p) => (
            p.to_string(),
            p.to_string(),
            line.value(slot).map(|_| p.to_string()),
        ),
        None => {
            let value = line
                .value(slot)
                .map(|v| apply_all(handlers, v))
                .filter(|v| v.is_present())
                .map(|v| v.to_string());
            (min, max, value)
        }
    };
    match value {
        Some(value) => format!("{}({}-{})", value, min, max),
        None => format!("({}-{})", min, max),
    }
}

/// Replace `{i}` markers with `slots[i]`. Markers with no slot are kept.
fn substitute(template: &str, slots: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let marker = after
            .find('}')
            .map(|close| (close, &after[..close]))
            .filter(|(_, digits)| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|(close, digits)| {
                let index: usize = digits.parse().ok()?;
                slots.get(index).map(|text| (close, text))
            });

        match marker {
            Some((close, text)) => {
                out.push_str(text);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_lines;
    use crate::translation::TranslationTable;
    use crate::types::StatEntry;

    fn phys_table(handler: &str) -> TranslationTable {
        TranslationTable::from_json(&format!(
            r#"[{{
                "ids": ["X"],
                "English": [{{
                    "condition": [{{}}],
                    "format": ["+# Added Physical Damage"],
                    "index_handlers": [[{}]],
                    "string": "{{0}}"
                }}]
            }}]"#,
            handler
        ))
        .unwrap()
    }

    fn render_x(
        table: &TranslationTable,
        min: f64,
        max: f64,
        values: Option<&[f64]>,
        placeholder: Option<&str>,
    ) -> Vec<String> {
        let stats = vec![StatEntry::new("X", min, max)];
        let lines = match_lines(&stats, table, values);
        render_lines(&lines, "English", placeholder)
    }

    #[test]
    fn test_range_token() {
        let table = phys_table("");
        assert_eq!(
            render_x(&table, 8.0, 13.0, None, None),
            vec!["+(8-13) Added Physical Damage"]
        );
    }

    #[test]
    fn test_transform_applies_to_both_bounds() {
        let table = phys_table(r#""divide_by_two_0dp""#);
        assert_eq!(
            render_x(&table, 8.0, 13.0, None, None),
            vec!["+(4-6) Added Physical Damage"]
        );
    }

    #[test]
    fn test_equal_bounds_render_single_value() {
        let table = phys_table("");
        assert_eq!(
            render_x(&table, 5.0, 5.0, None, None),
            vec!["+5 Added Physical Damage"]
        );
        assert_eq!(
            render_x(&table, 5.0, 5.0, None, Some("#")),
            vec!["+# Added Physical Damage"]
        );
    }

    #[test]
    fn test_bounds_equal_after_transform_collapse() {
        let table = phys_table(r#""divide_by_two_0dp""#);
        assert_eq!(
            render_x(&table, 8.0, 9.0, None, None),
            vec!["+4 Added Physical Damage"]
        );
    }

    #[test]
    fn test_live_value_prefixes_range() {
        let table = phys_table("");
        assert_eq!(
            render_x(&table, 8.0, 13.0, Some(&[11.0]), None),
            vec!["+11(8-13) Added Physical Damage"]
        );
    }

    #[test]
    fn test_zero_live_value_is_hidden() {
        let table = phys_table("");
        assert_eq!(
            render_x(&table, -3.0, 13.0, Some(&[0.0]), None),
            vec!["+(-3-13) Added Physical Damage"]
        );
    }

    #[test]
    fn test_placeholder_replaces_numbers() {
        let table = phys_table("");
        assert_eq!(
            render_x(&table, 8.0, 13.0, None, Some("X")),
            vec!["+(X-X) Added Physical Damage"]
        );
        assert_eq!(
            render_x(&table, 8.0, 13.0, Some(&[10.0]), Some("X")),
            vec!["+X(X-X) Added Physical Damage"]
        );
        assert_eq!(
            render_x(&table, 8.0, 13.0, None, Some("")),
            vec!["+(8-13) Added Physical Damage"]
        );
    }

    #[test]
    fn test_placeholder_shows_zero_live_value() {
        let table = phys_table("");
        assert_eq!(
            render_x(&table, 8.0, 13.0, Some(&[0.0]), Some("P")),
            vec!["+P(P-P) Added Physical Damage"]
        );
        // without a placeholder a zero live value stays hidden
        assert_eq!(
            render_x(&table, 8.0, 13.0, Some(&[0.0]), None),
            vec!["+(8-13) Added Physical Damage"]
        );
    }

    #[test]
    fn test_transform_applies_to_live_value() {
        let table = phys_table(r#""negate""#);
        assert_eq!(
            render_x(&table, 8.0, 13.0, Some(&[10.0]), None),
            vec!["+-10(-8--13) Added Physical Damage"]
        );
    }

    #[test]
    fn test_live_value_zero_after_transform_is_hidden() {
        let table = phys_table(r#""divide_by_two_0dp""#);
        assert_eq!(
            render_x(&table, 8.0, 13.0, Some(&[1.0]), None),
            vec!["+(4-6) Added Physical Damage"]
        );
    }

    #[test]
    fn test_multi_slot_and_newlines() {
        let table = TranslationTable::from_json(
            r##"[{
                "ids": ["min_fire", "max_fire", "hidden"],
                "English": [{
                    "condition": [{}, {}, {}],
                    "format": ["#", "#", "ignore"],
                    "index_handlers": [[], [], []],
                    "string": "Adds {0} to {1} Fire Damage\nSecond line{2}"
                }]
            }]"##,
        )
        .unwrap();
        let stats = vec![
            StatEntry::new("min_fire", 10.0, 12.0),
            StatEntry::new("max_fire", 20.0, 20.0),
            StatEntry::new("hidden", 1.0, 1.0),
        ];
        let lines = match_lines(&stats, &table, None);
        assert_eq!(
            render_lines(&lines, "English", None),
            vec!["Adds (10-12) to 20 Fire Damage", "Second line"]
        );
    }

    #[test]
    fn test_substitute_keeps_unknown_markers() {
        let slots = vec!["a".to_string(), "b".to_string()];
        assert_eq!(substitute("{1}{0}{2}{x}{", &slots), "ba{2}{x}{");
        assert_eq!(substitute("{0} and {0}", &slots), "a and a");
    }

    #[test]
    fn test_line_without_rule_is_skipped() {
        let table = TranslationTable::from_json(
            r##"[
                {"ids": ["a"], "English": [{"condition": [{"min": 10}], "format": ["#"],
                  "index_handlers": [[]], "string": "A {0}"}]},
                {"ids": ["b"], "English": [{"condition": [{}], "format": ["#"],
                  "index_handlers": [[]], "string": "B {0}"}]}
            ]"##,
        )
        .unwrap();
        let stats = vec![StatEntry::new("a", 1.0, 20.0), StatEntry::new("b", 2.0, 2.0)];
        let lines = match_lines(&stats, &table, None);
        assert_eq!(render_lines(&lines, "English", None), vec!["B 2"]);
    }
}
