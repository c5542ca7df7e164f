//! Configuration loader for makehtml.
//!
//! `defaults/makehtml.default.json` is embedded into every binary so that the
//! documented defaults and runtime behavior stay in sync. Applications layer
//! user files (JSON, or TOML by extension) on top of those defaults via
//! [`Loader`] before deserializing into [`MakeHtmlConfig`].
//!
//! List-valued options (`special_characters`, `replacements`,
//! `quote_detection.quote_types`) are not part of the embedded file; their
//! defaults come from serde so that a user list replaces the default list
//! instead of being merged into it element by element.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use makehtml::formats::html::{CharacterRule, FormattingRules, QuoteDetection, ReplacementRule};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_JSON: &str = include_str!("../defaults/makehtml.default.json");

/// Top-level configuration consumed by makehtml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeHtmlConfig {
    pub output: OutputConfig,
    pub quote_detection: QuoteDetectionConfig,
    #[serde(default)]
    pub special_characters: SpecialCharactersConfig,
    #[serde(default)]
    pub replacements: Vec<ReplacementConfig>,
}

/// Tags used for emitted blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub heading_tag: String,
    pub paragraph_tag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDetectionConfig {
    pub enabled: bool,
    pub threshold: usize,
    pub wrap_tag: String,
    /// Each entry is counted as a whole string.
    #[serde(default = "default_quote_types")]
    pub quote_types: Vec<String>,
}

fn default_quote_types() -> Vec<String> {
    makehtml::formats::html::formatting_rules::default_quote_types()
}

/// Special-character wrapping, in either of its two accepted shapes.
///
/// ```json
/// "special_characters": [{ "character": "©", "wrap_tag": "sup", "enabled": true }]
/// "special_characters": { "copyright_symbol": { "enabled": true, "wrap_tag": "sup" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecialCharactersConfig {
    Modern(Vec<CharacterConfig>),
    Legacy {
        #[serde(default)]
        copyright_symbol: Option<LegacySymbolConfig>,
        #[serde(default)]
        registered_symbol: Option<LegacySymbolConfig>,
    },
}

impl Default for SpecialCharactersConfig {
    fn default() -> Self {
        SpecialCharactersConfig::Modern(Vec::new())
    }
}

impl SpecialCharactersConfig {
    /// Normalizes either shape into ordered rules.
    pub fn rules(&self) -> Vec<CharacterRule> {
        match self {
            SpecialCharactersConfig::Modern(entries) => entries
                .iter()
                .map(|entry| CharacterRule {
                    character: entry.character.clone(),
                    wrap_tag: entry.wrap_tag.clone(),
                    enabled: entry.enabled,
                })
                .collect(),
            SpecialCharactersConfig::Legacy {
                copyright_symbol,
                registered_symbol,
            } => [("©", copyright_symbol), ("®", registered_symbol)]
                .into_iter()
                .filter_map(|(character, symbol)| {
                    symbol
                        .as_ref()
                        .filter(|symbol| symbol.enabled)
                        .map(|symbol| CharacterRule::new(character, symbol.wrap_tag.clone()))
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterConfig {
    #[serde(default)]
    pub character: String,
    #[serde(default = "default_wrap_tag")]
    pub wrap_tag: String,
    #[serde(default = "enabled")]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacySymbolConfig {
    #[serde(default = "enabled")]
    pub enabled: bool,
    #[serde(default = "default_wrap_tag")]
    pub wrap_tag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacementConfig {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub replace: String,
    #[serde(default = "enabled")]
    pub case_sensitive: bool,
}

fn default_wrap_tag() -> String {
    "sup".to_string()
}

fn enabled() -> bool {
    true
}

impl From<&MakeHtmlConfig> for FormattingRules {
    fn from(config: &MakeHtmlConfig) -> Self {
        let quotes = &config.quote_detection;
        FormattingRules {
            heading_tag: config.output.heading_tag.clone(),
            paragraph_tag: config.output.paragraph_tag.clone(),
            quote_detection: QuoteDetection {
                enabled: quotes.enabled,
                threshold: quotes.threshold,
                wrap_tag: quotes.wrap_tag.clone(),
                quote_types: Vec::new(),
            }
            .with_quote_types(quotes.quote_types.iter().cloned()),
            special_characters: config.special_characters.rules(),
            replacements: config
                .replacements
                .iter()
                .map(|r| ReplacementRule {
                    search: r.search.clone(),
                    replace: r.replace.clone(),
                    case_sensitive: r.case_sensitive,
                })
                .collect(),
        }
    }
}

impl From<MakeHtmlConfig> for FormattingRules {
    fn from(config: MakeHtmlConfig) -> Self {
        FormattingRules::from(&config)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_JSON, FileFormat::Json));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let source = File::from(path).format(file_format(path)).required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let source = File::from(path).format(file_format(path)).required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MakeHtmlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// `.toml` files are read as TOML, everything else as JSON.
fn file_format(path: &Path) -> FileFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => FileFormat::Toml,
        _ => FileFormat::Json,
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MakeHtmlConfig, ConfigError> {
    Loader::new().build()
}

/// The per-user configuration file, `<config dir>/makehtml/config.json`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("makehtml").join("config.json"))
}

/// Writes the embedded defaults to `path`, creating parent directories.
pub fn write_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, DEFAULT_JSON)?;
    log::debug!("wrote default configuration to {}", path.display());
    Ok(())
}
