//! Language identification.
//!
//! A [`LanguageModel`] turns text into a probability distribution over
//! candidate locales. [`LanguageIdentifier`] reduces that distribution to a
//! single [`LanguageGuess`].
//!
//! ## Selection Rule
//!
//! Candidates are scanned in the order the model returns them, keeping one
//! whose probability is **strictly** greater than the best seen so far. The
//! running best starts at `0.0`, so:
//!
//! - ties go to the candidate visited first;
//! - a candidate with probability `0.0` is never selected, and a distribution
//!   made only of zeros yields the `UND` / `-1.0` sentinel just like an empty
//!   one.

pub mod profile;

use emolex_types::LanguageGuess;

pub use profile::{LanguageProfile, NgramProfileModel};

/// One entry of a model's output distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Locale as the model names it: `es`, `en`, `zh-cn`, `pt_BR`...
    pub locale: String,
    /// Probability in `[0, 1]`.
    pub probability: f64,
}

impl Candidate {
    /// Creates a candidate.
    pub fn new(locale: impl Into<String>, probability: f64) -> Self {
        Self {
            locale: locale.into(),
            probability,
        }
    }

    /// Language part of the locale, before any `-` or `_` region tag.
    pub fn language(&self) -> &str {
        self.locale
            .split(['-', '_'])
            .next()
            .unwrap_or(self.locale.as_str())
    }
}

/// Anything that can produce a language distribution for a text.
///
/// Implementations must not fail: text they cannot judge gets an empty
/// distribution.
pub trait LanguageModel {
    /// Candidate languages for `text`, in the model's preferred order.
    fn probabilities(&self, text: &str) -> Vec<Candidate>;
}

impl<F> LanguageModel for F
where
    F: Fn(&str) -> Vec<Candidate>,
{
    fn probabilities(&self, text: &str) -> Vec<Candidate> {
        self(text)
    }
}

/// Picks the best candidate from a distribution.
///
/// See the module docs for the exact rule.
pub fn select_best(candidates: &[Candidate]) -> LanguageGuess {
    let mut best: Option<&Candidate> = None;
    let mut best_probability = 0.0f64;

    for candidate in candidates {
        if candidate.probability > best_probability {
            best = Some(candidate);
            best_probability = candidate.probability;
        }
    }

    match best {
        Some(candidate) => {
            LanguageGuess::new(candidate.language().to_uppercase(), best_probability)
        }
        None => LanguageGuess::undetermined(),
    }
}

/// Wraps a [`LanguageModel`] and reduces its output to one guess.
#[derive(Debug, Clone)]
pub struct LanguageIdentifier<M> {
    model: M,
}

impl<M: LanguageModel> LanguageIdentifier<M> {
    /// Creates an identifier around a model.
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// The wrapped model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Best language for `text`, or the `UND` sentinel.
    pub fn identify(&self, text: &str) -> LanguageGuess {
        let candidates = self.model.probabilities(text);
        let guess = select_best(&candidates);
        tracing::trace!(
            candidates = candidates.len(),
            language = %guess.language_code,
            reliability = guess.reliability,
            "language identified"
        );
        guess
    }
}
