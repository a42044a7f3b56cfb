//! modtext_core - render item modifier text from stat translation tables
//!
//! A modifier's stats are grouped into translation lines, each line picks a
//! conditional phrasing, its numbers go through the named transforms, and the
//! phrase templates are filled in.

pub mod config;
pub mod matcher;
pub mod overrides;
pub mod render;
pub mod rule;
pub mod stat_index;
pub mod transform;
pub mod translation;
pub mod translator;
pub mod types;

pub use config::{Config, ConfigError, Settings};
pub use matcher::{match_lines, TranslationLine};
pub use overrides::{OverrideConfig, OverrideTable};
pub use render::{render_line, render_lines};
pub use rule::select_rule;
pub use stat_index::StatIndex;
pub use transform::{DisplayValue, Transform};
pub use translation::{Condition, RenderRule, TranslationEntry, TranslationTable};
pub use translator::{TranslateError, Translator};
pub use types::*;
