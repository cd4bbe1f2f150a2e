//! N-gram profile language model.
//!
//! A deterministic naive-Bayes scorer over character 1–3-gram profiles.
//!
//! ## Profile Format
//!
//! One JSON file per language:
//!
//! ```json
//! { "name": "es", "freq": { "e": 1500, " de": 420, "os ": 390 }, "n_words": [9000, 8000, 7000] }
//! ```
//!
//! `freq` counts each gram; `n_words[n - 1]` is the total count of grams of
//! length `n`, so `freq[g] / n_words[len(g) - 1]` is the gram's relative
//! frequency in that language.
//!
//! ## Scoring
//!
//! 1. Normalize the text and extract its grams (see [`crate::analyzer`]).
//! 2. Skip grams no profile knows. If none are known, return nothing.
//! 3. Per language, sum `ln(relative_frequency + SMOOTHING)` over the grams.
//! 4. Softmax the sums into probabilities.
//! 5. Drop candidates under `min_probability`, then sort by probability,
//!    highest first. The sort is stable: ties keep profile order.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::{Candidate, LanguageModel};
use crate::analyzer::ngram::{extract_ngrams, MAX_NGRAM};
use crate::analyzer::normalizer::{NormalizerConfig, TextNormalizer};
use crate::config::DEFAULT_MIN_PROBABILITY;
use crate::error::LoadError;

/// Added to every relative frequency so unseen grams cost a finite penalty.
const SMOOTHING: f64 = 1e-6;

/// Gram counts for one language.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageProfile {
    /// Locale code, e.g. `es` or `zh-cn`.
    pub name: String,
    /// Count of each gram.
    pub freq: FxHashMap<String, u64>,
    /// Total gram count per gram length, index `n - 1`.
    pub n_words: Vec<u64>,
}

impl LanguageProfile {
    /// Builds a profile in memory.
    pub fn new<I, S>(name: impl Into<String>, freq: I, n_words: [u64; MAX_NGRAM]) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            freq: freq.into_iter().map(|(g, c)| (g.into(), c)).collect(),
            n_words: n_words.to_vec(),
        }
    }

    /// Reads a profile from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Io`, `LoadError::Malformed`, or
    /// `LoadError::InvalidProfile` if the name is empty or `n_words` is
    /// shorter than three or holds a zero.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let profile: Self = serde_json::from_str(&raw).map_err(|e| LoadError::malformed(path, e))?;
        profile.validate(path)?;
        Ok(profile)
    }

    fn validate(&self, path: &Path) -> Result<(), LoadError> {
        let invalid = |reason: &str| LoadError::InvalidProfile {
            path: path.to_owned(),
            reason: reason.to_owned(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("empty name"));
        }
        if self.n_words.len() < MAX_NGRAM {
            return Err(invalid("n_words must hold one total per gram length 1..=3"));
        }
        if self.n_words[..MAX_NGRAM].contains(&0) {
            return Err(invalid("n_words totals must be positive"));
        }
        Ok(())
    }
}

/// Naive-Bayes language model over n-gram profiles.
#[derive(Debug, Clone)]
pub struct NgramProfileModel {
    languages: Vec<String>,
    /// Gram → relative frequency in each language, indexed like `languages`.
    vocabulary: FxHashMap<String, Vec<f64>>,
    normalizer: TextNormalizer,
    min_probability: f64,
}

impl Default for NgramProfileModel {
    fn default() -> Self {
        Self::empty()
    }
}

impl NgramProfileModel {
    /// A model with no languages. Every text gets an empty distribution.
    pub fn empty() -> Self {
        Self {
            languages: Vec::new(),
            vocabulary: FxHashMap::default(),
            normalizer: TextNormalizer::default(),
            min_probability: DEFAULT_MIN_PROBABILITY,
        }
    }

    /// Builds a model from profiles, in the given order.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidProfile` if a profile is invalid or two
    /// profiles share a name.
    pub fn from_profiles(
        profiles: impl IntoIterator<Item = LanguageProfile>,
        min_probability: f64,
    ) -> Result<Self, LoadError> {
        let profiles: Vec<LanguageProfile> = profiles.into_iter().collect();
        let mut model = Self::empty();
        model.min_probability = min_probability;

        for profile in &profiles {
            profile.validate(Path::new(&profile.name))?;
            if model.languages.contains(&profile.name) {
                return Err(LoadError::InvalidProfile {
                    path: PathBuf::from(&profile.name),
                    reason: "duplicate language".into(),
                });
            }
            model.languages.push(profile.name.clone());
        }

        let width = model.languages.len();
        for (lang, profile) in profiles.iter().enumerate() {
            for (gram, &count) in &profile.freq {
                let n = gram.chars().count();
                if n == 0 || n > MAX_NGRAM {
                    continue;
                }
                let relative = count as f64 / profile.n_words[n - 1] as f64;
                model
                    .vocabulary
                    .entry(gram.clone())
                    .or_insert_with(|| vec![0.0; width])[lang] = relative;
            }
        }
        Ok(model)
    }

    /// Loads every profile in a folder, in file-name order.
    ///
    /// Hidden files and subdirectories are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Io` if the folder cannot be listed, plus the
    /// errors of [`LanguageProfile::load`] and
    /// [`from_profiles`](Self::from_profiles).
    pub fn load_folder(folder: impl AsRef<Path>, min_probability: f64) -> Result<Self, LoadError> {
        let folder = folder.as_ref();
        let mut paths = Vec::new();
        for entry in fs::read_dir(folder).map_err(|e| LoadError::io(folder, e))? {
            let path = entry.map_err(|e| LoadError::io(folder, e))?.path();
            let hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'));
            if hidden || !path.is_file() {
                tracing::warn!(path = %path.display(), "skipping non-profile entry");
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        let profiles = paths
            .iter()
            .map(LanguageProfile::load)
            .collect::<Result<Vec<_>, _>>()?;
        let model = Self::from_profiles(profiles, min_probability)?;

        tracing::info!(
            folder = %folder.display(),
            languages = model.languages.len(),
            grams = model.vocabulary.len(),
            "language profiles loaded"
        );
        Ok(model)
    }

    /// Replaces the text normalizer.
    ///
    /// With diacritic stripping on, profile grams are folded the same way as
    /// text. Grams that fold together add their relative frequencies.
    pub fn with_normalizer(mut self, config: NormalizerConfig) -> Self {
        let normalizer = TextNormalizer::new(config);
        self.normalizer = normalizer;
        if !config.strip_diacritics {
            return self;
        }

        // Sorted so collisions always sum in the same order.
        let mut grams: Vec<(String, Vec<f64>)> = self.vocabulary.drain().collect();
        grams.sort_by(|a, b| a.0.cmp(&b.0));
        for (gram, relative) in grams {
            let key: String = gram.chars().map(|c| normalizer.fold(c)).collect();
            let slot = self
                .vocabulary
                .entry(key)
                .or_insert_with(|| vec![0.0; relative.len()]);
            for (sum, r) in slot.iter_mut().zip(&relative) {
                *sum += r;
            }
        }
        self
    }

    /// The normalizer applied to text before scoring.
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Language names, in profile order.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Candidates under this probability are dropped.
    pub fn min_probability(&self) -> f64 {
        self.min_probability
    }
}

impl LanguageModel for NgramProfileModel {
    fn probabilities(&self, text: &str) -> Vec<Candidate> {
        if self.languages.is_empty() {
            return Vec::new();
        }

        let normalized = self.normalizer.normalize(text);
        let mut scores = vec![0.0f64; self.languages.len()];
        let mut known = 0usize;

        extract_ngrams(&normalized, |gram| {
            if let Some(relative) = self.vocabulary.get(gram) {
                known += 1;
                for (score, &p) in scores.iter_mut().zip(relative) {
                    *score += (p + SMOOTHING).ln();
                }
            }
        });

        if known == 0 {
            return Vec::new();
        }

        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for score in &mut scores {
            *score = (*score - max).exp();
        }
        let total: f64 = scores.iter().sum();

        let mut candidates: Vec<Candidate> = self
            .languages
            .iter()
            .zip(&scores)
            .map(|(lang, &weight)| Candidate::new(lang.as_str(), weight / total))
            .filter(|c| c.probability >= self.min_probability)
            .collect();
        candidates.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        candidates
    }
}
