//! Pipeline configuration.
//!
//! Read once from a JSON file at startup. Every field has a default, so a
//! config file only needs to name what differs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analyzer::splitter::MarkerStyle;
use crate::error::LoadError;

/// Default cut-off below which language candidates are dropped.
pub const DEFAULT_MIN_PROBABILITY: f64 = 0.1;

/// Where the lexicons and language profiles live, and how translated text
/// is marked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Folder holding `emojisID.<locale>.json`.
    pub emoji_folder: PathBuf,
    /// Folder holding `emoticonsID.<locale>.json`.
    pub emoticon_folder: PathBuf,
    /// Locale of the lexicon files and of the translation note.
    pub locale: String,
    /// Folder of n-gram language profiles. `None` disables identification,
    /// so every text comes back `UND`.
    pub profile_folder: Option<PathBuf>,
    /// Candidates under this probability are discarded by the model.
    pub min_probability: f64,
    /// Folds Latin diacritics before language scoring.
    pub strip_diacritics: bool,
    /// Marker style for review bodies.
    pub review_markers: MarkerStyle,
    /// Marker style for owner answers.
    pub answer_markers: MarkerStyle,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            emoji_folder: PathBuf::from("resources/emojis"),
            emoticon_folder: PathBuf::from("resources/emoticons"),
            locale: "es".to_owned(),
            profile_folder: None,
            min_probability: DEFAULT_MIN_PROBABILITY,
            strip_diacritics: false,
            review_markers: MarkerStyle::review(),
            answer_markers: MarkerStyle::answer(),
        }
    }
}

impl PipelineConfig {
    /// Reads and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Io` if the file cannot be read,
    /// `LoadError::Malformed` if it is not valid JSON for this struct, and
    /// `LoadError::InvalidConfig` if [`validate`](Self::validate) rejects it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| LoadError::malformed(path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the emoji lexicon resource.
    pub fn emoji_path(&self) -> PathBuf {
        self.emoji_folder
            .join(emolex_types::LexiconClass::Emoji.file_name(&self.locale))
    }

    /// Path of the emoticon lexicon resource.
    pub fn emoticon_path(&self) -> PathBuf {
        self.emoticon_folder
            .join(emolex_types::LexiconClass::Emoticon.file_name(&self.locale))
    }

    /// Checks the values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidConfig` for an empty locale, an empty
    /// marker, or a `min_probability` outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.locale.trim().is_empty() {
            return Err(LoadError::InvalidConfig {
                reason: "locale must not be empty".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.min_probability) {
            return Err(LoadError::InvalidConfig {
                reason: format!(
                    "min_probability must be within [0, 1], got {}",
                    self.min_probability
                ),
            });
        }
        for (name, style) in [
            ("review_markers", &self.review_markers),
            ("answer_markers", &self.answer_markers),
        ] {
            if style.marker.is_empty() {
                return Err(LoadError::InvalidConfig {
                    reason: format!("{name}.marker must not be empty"),
                });
            }
        }
        Ok(())
    }
}
