//! Core types for the Emolex review annotation pipeline.
//!
//! This crate holds the plain data that flows between the annotation stages
//! and out to whatever writes the final rows. Keeping them separate means:
//!
//! - **No heavy dependencies**: consumers only need `serde` to read results
//! - **Owned values**: every result is produced per call and owned by the caller
//! - **Clean boundaries**: the core crate depends on these types, never the reverse

#![warn(missing_docs)]

use core::fmt;
use serde::{Deserialize, Serialize};

/// Language code reported when no candidate could be selected.
pub const UNDETERMINED_LANGUAGE: &str = "UND";

/// Reliability reported together with [`UNDETERMINED_LANGUAGE`].
pub const UNDETERMINED_RELIABILITY: f64 = -1.0;

/// The two independent lexicon classes.
///
/// The class decides how a symbol is matched inside text:
/// emoji match anywhere, emoticons only between whitespace or string
/// boundaries.
///
/// `#[repr(u8)]` keeps the tag one byte wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LexiconClass {
    /// Graphic symbols, matched as bare literals.
    Emoji = 0,
    /// Punctuation/letter faces, matched only when whitespace-flanked.
    Emoticon = 1,
}

impl LexiconClass {
    /// Stem of the resource file holding this class's dictionary.
    #[must_use]
    #[inline]
    pub const fn file_stem(self) -> &'static str {
        match self {
            LexiconClass::Emoji => "emojisID",
            LexiconClass::Emoticon => "emoticonsID",
        }
    }

    /// Resource file name for a locale, e.g. `emojisID.es.json`.
    #[must_use]
    pub fn file_name(self, locale: &str) -> String {
        format!("{}.{}.json", self.file_stem(), locale)
    }
}

impl fmt::Display for LexiconClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexiconClass::Emoji => f.write_str("emoji"),
            LexiconClass::Emoticon => f.write_str("emoticon"),
        }
    }
}

/// Output of a single lexicon pass over a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationResult {
    /// Input text with every match replaced by ` gloss `, then trimmed.
    pub normalized_text: String,
    /// Every matched symbol key, concatenated in match order.
    pub matched_symbols: String,
    /// Number of matches; the denominator of `mean_polarity`.
    pub match_count: usize,
    /// Mean polarity over all matches, `0.0` when nothing matched.
    pub mean_polarity: f64,
}

impl AnnotationResult {
    /// Result for a text in which nothing matched.
    pub fn unmatched(text: &str) -> Self {
        Self {
            normalized_text: text.trim().to_owned(),
            matched_symbols: String::new(),
            match_count: 0,
            mean_polarity: 0.0,
        }
    }

    /// Returns `true` if at least one symbol matched.
    #[inline]
    pub fn has_matches(&self) -> bool {
        self.match_count > 0
    }
}

/// Best language guess for a text.
///
/// Either an uppercase two-letter code with its probability, or the
/// `UND` / `-1.0` sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageGuess {
    /// Uppercase language code, or [`UNDETERMINED_LANGUAGE`].
    pub language_code: String,
    /// Probability of the winning candidate, or [`UNDETERMINED_RELIABILITY`].
    pub reliability: f64,
}

impl LanguageGuess {
    /// Creates a guess for a determined language.
    pub fn new(language_code: impl Into<String>, reliability: f64) -> Self {
        Self {
            language_code: language_code.into(),
            reliability,
        }
    }

    /// The `UND` / `-1.0` sentinel.
    pub fn undetermined() -> Self {
        Self::new(UNDETERMINED_LANGUAGE, UNDETERMINED_RELIABILITY)
    }

    /// Returns `true` unless this is the sentinel.
    #[inline]
    pub fn is_determined(&self) -> bool {
        self.language_code != UNDETERMINED_LANGUAGE
    }
}

impl Default for LanguageGuess {
    fn default() -> Self {
        Self::undetermined()
    }
}

impl fmt::Display for LanguageGuess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3})", self.language_code, self.reliability)
    }
}

/// A display text and the source-language text it was translated from.
///
/// When the raw text carried no translation marker both fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPair {
    /// Text as shown to the reader, possibly machine-translated.
    pub display_text: String,
    /// Text in the author's own language.
    pub original_text: String,
}

impl TextPair {
    /// Pair for a text that was never translated.
    pub fn untranslated(text: &str) -> Self {
        let text = text.trim();
        Self {
            display_text: text.to_owned(),
            original_text: text.to_owned(),
        }
    }

    /// Returns `true` if display and original differ.
    #[inline]
    pub fn is_translated(&self) -> bool {
        self.display_text != self.original_text
    }
}

/// Annotation of one text block (a review body or an owner answer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockAnnotation {
    /// Display text after both emoji and emoticon glossing.
    pub display_text: String,
    /// Source-language text, untouched by glossing.
    pub original_text: String,
    /// Concatenated emoji symbols found.
    pub emoji_symbols: String,
    /// Mean emoji polarity.
    pub emoji_mean_polarity: f64,
    /// Concatenated emoticon symbols found.
    pub emoticon_symbols: String,
    /// Mean emoticon polarity.
    pub emoticon_mean_polarity: f64,
    /// Language of the original text.
    pub language_code: String,
    /// Probability of `language_code`.
    pub language_reliability: f64,
}

impl BlockAnnotation {
    /// Assembles a block from the outputs of each stage.
    pub fn from_parts(
        pair: TextPair,
        emoji: AnnotationResult,
        emoticon: AnnotationResult,
        language: LanguageGuess,
    ) -> Self {
        Self {
            display_text: emoticon.normalized_text,
            original_text: pair.original_text,
            emoji_symbols: emoji.matched_symbols,
            emoji_mean_polarity: emoji.mean_polarity,
            emoticon_symbols: emoticon.matched_symbols,
            emoticon_mean_polarity: emoticon.mean_polarity,
            language_code: language.language_code,
            language_reliability: language.reliability,
        }
    }

    /// Ordered `(column, value)` pairs; `suffix` is `Review` or `Answer`.
    fn push_fields(&self, suffix: &str, out: &mut Vec<(String, String)>) {
        out.push((format!("text{suffix}Original"), self.original_text.clone()));
        out.push((format!("text{suffix}"), self.display_text.clone()));
        out.push((format!("emojisText{suffix}"), self.emoji_symbols.clone()));
        out.push((
            format!("emojisPolarity{suffix}"),
            fmt_score(self.emoji_mean_polarity),
        ));
        out.push((format!("emoticonsText{suffix}"), self.emoticon_symbols.clone()));
        out.push((
            format!("emoticonsPolarity{suffix}"),
            fmt_score(self.emoticon_mean_polarity),
        ));
        out.push((format!("langText{suffix}"), self.language_code.clone()));
        out.push((
            format!("langReliabilityText{suffix}"),
            fmt_score(self.language_reliability),
        ));
    }
}

/// Formats a score so integral values keep their `.0` (`-1.0`, `0.0`).
fn fmt_score(value: f64) -> String {
    format!("{value:?}")
}

/// Annotations for a review and its optional owner answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAnnotation {
    /// The review body.
    pub review: BlockAnnotation,
    /// The owner answer, absent when there was none.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub answer: Option<BlockAnnotation>,
}

impl ReviewAnnotation {
    /// Ordered `(column, value)` pairs for a tabular writer.
    ///
    /// Review columns come first; answer columns are omitted entirely
    /// when there is no answer.
    pub fn row_fields(&self) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(16);
        self.review.push_fields("Review", &mut out);
        if let Some(answer) = &self.answer {
            answer.push_fields("Answer", &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str) -> BlockAnnotation {
        BlockAnnotation::from_parts(
            TextPair::untranslated(text),
            AnnotationResult::unmatched(text),
            AnnotationResult::unmatched(text),
            LanguageGuess::new("ES", 0.9),
        )
    }

    #[test]
    fn class_file_names() {
        assert_eq!(LexiconClass::Emoji.file_name("es"), "emojisID.es.json");
        assert_eq!(
            LexiconClass::Emoticon.file_name("en"),
            "emoticonsID.en.json"
        );
    }

    #[test]
    fn class_size_is_1_byte() {
        assert_eq!(size_of::<LexiconClass>(), 1);
    }

    #[test]
    fn unmatched_trims_and_zeroes() {
        let r = AnnotationResult::unmatched("  hola  ");
        assert_eq!(r.normalized_text, "hola");
        assert!(r.matched_symbols.is_empty());
        assert_eq!(r.match_count, 0);
        assert_eq!(r.mean_polarity, 0.0);
        assert!(!r.has_matches());
    }

    #[test]
    fn sentinel_guess() {
        let g = LanguageGuess::undetermined();
        assert_eq!(g.language_code, "UND");
        assert_eq!(g.reliability, -1.0);
        assert!(!g.is_determined());
        assert_eq!(LanguageGuess::default(), g);
        assert!(LanguageGuess::new("ES", 0.5).is_determined());
    }

    #[test]
    fn untranslated_pair() {
        let p = TextPair::untranslated(" hola ");
        assert_eq!(p.display_text, "hola");
        assert_eq!(p.original_text, "hola");
        assert!(!p.is_translated());
    }

    #[test]
    fn row_fields_without_answer() {
        let annotation = ReviewAnnotation {
            review: block("hola"),
            answer: None,
        };
        let fields = annotation.row_fields();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[0], ("textReviewOriginal".to_owned(), "hola".to_owned()));
        assert_eq!(fields[1], ("textReview".to_owned(), "hola".to_owned()));
        assert_eq!(fields[6], ("langTextReview".to_owned(), "ES".to_owned()));
        assert!(fields.iter().all(|(k, _)| k.ends_with("Review") || k.ends_with("ReviewOriginal")));
    }

    #[test]
    fn row_fields_with_answer() {
        let annotation = ReviewAnnotation {
            review: block("hola"),
            answer: Some(block("gracias")),
        };
        let fields = annotation.row_fields();
        assert_eq!(fields.len(), 16);
        assert_eq!(fields[8].0, "textAnswerOriginal");
        assert_eq!(fields[9], ("textAnswer".to_owned(), "gracias".to_owned()));
        assert_eq!(fields[15].0, "langReliabilityTextAnswer");
    }

    #[test]
    fn sentinel_row_keeps_decimal_point() {
        let annotation = ReviewAnnotation {
            review: BlockAnnotation::from_parts(
                TextPair::untranslated("hola"),
                AnnotationResult::unmatched("hola"),
                AnnotationResult::unmatched("hola"),
                LanguageGuess::undetermined(),
            ),
            answer: None,
        };
        let fields = annotation.row_fields();
        let columns: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            columns,
            [
                "textReviewOriginal",
                "textReview",
                "emojisTextReview",
                "emojisPolarityReview",
                "emoticonsTextReview",
                "emoticonsPolarityReview",
                "langTextReview",
                "langReliabilityTextReview",
            ]
        );
        assert_eq!(fields[3].1, "0.0");
        assert_eq!(fields[5].1, "0.0");
        assert_eq!(fields[6].1, "UND");
        assert_eq!(fields[7].1, "-1.0");
    }

    #[test]
    fn fractional_scores_print_shortest() {
        assert_eq!(fmt_score(0.8), "0.8");
        assert_eq!(fmt_score(-0.25), "-0.25");
        assert_eq!(fmt_score(1.0), "1.0");
    }

    #[test]
    fn absent_answer_not_serialized() {
        let annotation = ReviewAnnotation {
            review: block("hola"),
            answer: None,
        };
        let json = serde_json::to_string(&annotation).unwrap();
        assert!(!json.contains("answer"));
    }
}
