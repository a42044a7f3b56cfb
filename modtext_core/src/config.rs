use crate::overrides::{OverrideConfig, OverrideTable};
use crate::translation::{TranslationTable, DEFAULT_LANGUAGE};
use crate::translator::Translator;
use crate::types::Modifier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings file contents (`modtext.toml`)
///
/// ```toml
/// language = "English"
/// translations = "data/stat_translations"
/// mods = "data/mods.json"
///
/// [[overrides]]
/// type = "AbyssJewelSocket"
/// lines = ["Has 1 Abyssal Socket"]
/// ```
///
/// Relative paths resolve against the settings file's directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_language")]
    pub language: String,
    /// Text shown instead of numbers, if set
    #[serde(default)]
    pub placeholder: Option<String>,
    /// A stat translation JSON file, or a directory of them
    pub translations: PathBuf,
    #[serde(default)]
    pub mods: Option<PathBuf>,
    #[serde(default)]
    pub overrides: Vec<OverrideConfig>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Everything needed to render modifier text, loaded from disk
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub translations: TranslationTable,
    pub mods: HashMap<String, Modifier>,
    pub overrides: OverrideTable,
}

impl Config {
    /// Load the settings file and the content it points at
    pub fn load(settings_path: &Path) -> Result<Self, ConfigError> {
        let content = Self::read_file_with_context(settings_path)?;
        let settings: Settings = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            error: e,
            path: settings_path.to_path_buf(),
        })?;
        let base = settings_path.parent().unwrap_or_else(|| Path::new(""));

        let translations = Self::load_translations(&base.join(&settings.translations))?;
        let mods = match &settings.mods {
            Some(path) => Self::load_mods(&base.join(path))?,
            None => HashMap::new(),
        };
        let mut overrides = OverrideTable::builtin();
        overrides.extend(settings.overrides.iter().cloned());

        tracing::info!(
            entries = translations.len(),
            mods = mods.len(),
            overrides = overrides.len(),
            "content loaded"
        );

        Ok(Config {
            settings,
            translations,
            mods,
            overrides,
        })
    }

    /// Build a translator in the configured language
    pub fn translator(&self) -> Translator {
        Translator::new(self.translations.clone(), self.overrides.clone())
            .with_language(self.settings.language.clone())
    }

    /// Load and validate a translation table from a file or directory.
    ///
    /// A directory contributes every `.json` file in file name order.
    pub fn load_translations(path: &Path) -> Result<TranslationTable, ConfigError> {
        let table = if path.is_dir() {
            let mut files = Vec::new();
            for entry in Self::read_dir_with_context(path)? {
                let file = entry?.path();
                if file.extension().map_or(false, |ext| ext == "json") {
                    files.push(file);
                }
            }
            files.sort();

            let mut table = TranslationTable::default();
            for file in files {
                let content = Self::read_file_with_context(&file)?;
                table.extend(Self::parse_json_with_context(&content, &file)?);
            }
            table
        } else {
            let content = Self::read_file_with_context(path)?;
            Self::parse_json_with_context(&content, path)?
        };

        table.validate()?;
        Ok(table)
    }

    /// Load a mods file: an object keyed by modifier id
    pub fn load_mods(path: &Path) -> Result<HashMap<String, Modifier>, ConfigError> {
        let content = Self::read_file_with_context(path)?;
        let mut mods: HashMap<String, Modifier> = Self::parse_json_with_context(&content, path)?;
        for (id, modifier) in mods.iter_mut() {
            modifier.id = id.clone();
        }
        Ok(mods)
    }

    // Helper functions for error context

    fn read_dir_with_context(dir: &Path) -> Result<std::fs::ReadDir, ConfigError> {
        std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })
    }

    fn read_file_with_context(path: &Path) -> Result<String, ConfigError> {
        std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })
    }

    fn parse_json_with_context<T: serde::de::DeserializeOwned>(
        content: &str,
        path: &Path,
    ) -> Result<T, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Json {
            error: e,
            path: path.to_path_buf(),
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error with optional file path
    #[error("IO error{}: {error}", path_suffix(.path.as_deref()))]
    Io {
        #[source]
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    /// Content file that is not valid JSON for its type
    #[error("Parse error in '{}': {error}", .path.display())]
    Json {
        #[source]
        error: serde_json::Error,
        path: PathBuf,
    },
    /// Settings file that is not valid TOML
    #[error("Parse error in '{}': {error}", .path.display())]
    Toml {
        #[source]
        error: toml::de::Error,
        path: PathBuf,
    },
    /// Translation entry whose rules do not fit its stat ids
    #[error("Invalid translation entry {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

fn path_suffix(path: Option<&Path>) -> String {
    path.map(|p| format!(" in '{}'", p.display()))
        .unwrap_or_default()
}

impl ConfigError {
    /// Get the file path associated with this error, if any
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            ConfigError::Io { path, .. } => path.as_deref(),
            ConfigError::Json { path, .. } | ConfigError::Toml { path, .. } => Some(path),
            ConfigError::InvalidEntry { .. } => None,
        }
    }

    /// Get a user-friendly description of where the error occurred
    pub fn location_description(&self) -> String {
        match self {
            ConfigError::Io { path: Some(p), .. } => format!("File: {}", p.display()),
            ConfigError::Io { path: None, .. } => "Unknown location".to_string(),
            ConfigError::Json { error, path } => format!(
                "File: {}\nPosition: line {}, column {}",
                path.display(),
                error.line(),
                error.column()
            ),
            ConfigError::Toml { error, path } => {
                let mut desc = format!("File: {}", path.display());
                if let Some(span) = error.span() {
                    desc.push_str(&format!("\nPosition: bytes {}..{}", span.start, span.end));
                }
                desc
            }
            ConfigError::InvalidEntry { index, .. } => format!("Translation entry #{}", index),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io {
            error: e,
            path: None,
        }
    }
}
