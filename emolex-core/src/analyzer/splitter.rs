//! Translation splitting.
//!
//! Machine-translated review text arrives as
//!
//! ```text
//! (Traducido por Google) <translated text> (Original) <original text>
//! ```
//!
//! The splitter separates the two halves so that language identification
//! sees the author's own words while annotation works on what the reader
//! sees. Review bodies and owner answers use slightly different markers (the
//! answer marker swallows a trailing space), so the marker is configuration,
//! not a constant.

use emolex_types::TextPair;
use serde::{Deserialize, Serialize};

/// Marker that introduces the original-language segment.
pub const ORIGINAL_MARKER: &str = "(Original)";

/// The separator and machine-translation note used by one kind of text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerStyle {
    /// Separator between translated and original text. Split happens on the
    /// first occurrence.
    pub marker: String,
    /// Note stripped from the translated segment, wherever it occurs in it.
    /// Empty disables stripping.
    pub translation_note: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self::review()
    }
}

impl MarkerStyle {
    /// Style of review bodies: no trailing space in either marker.
    pub fn review() -> Self {
        Self::for_locale("es", false)
    }

    /// Style of owner answers: both markers end in a space.
    pub fn answer() -> Self {
        Self::for_locale("es", true)
    }

    /// Style for a locale's machine-translation note.
    ///
    /// Unknown locales fall back to Spanish.
    pub fn for_locale(locale: &str, trailing_space: bool) -> Self {
        let note = match locale {
            "en" => "(Translated by Google)",
            "fr" => "(Traduit par Google)",
            "pt" => "(Traduzido pelo Google)",
            "it" => "(Tradotto da Google)",
            "de" => "(Von Google übersetzt)",
            _ => "(Traducido por Google)",
        };
        let tail = if trailing_space { " " } else { "" };
        Self {
            marker: format!("{ORIGINAL_MARKER}{tail}"),
            translation_note: format!("{note}{tail}"),
        }
    }
}

/// Splits raw text into display and original segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationSplitter {
    style: MarkerStyle,
}

impl TranslationSplitter {
    /// Creates a splitter for a marker style.
    pub fn new(style: MarkerStyle) -> Self {
        Self { style }
    }

    /// The marker style in use.
    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    /// Splits `raw` on the first marker.
    ///
    /// Without a marker, or with nothing but whitespace after it, both halves
    /// are the trimmed input.
    pub fn split(&self, raw: &str) -> TextPair {
        split(raw, &self.style)
    }
}

/// Splits `raw` on the first occurrence of `style.marker`.
pub fn split(raw: &str, style: &MarkerStyle) -> TextPair {
    let raw = raw.trim();
    if style.marker.is_empty() {
        return TextPair::untranslated(raw);
    }

    match raw.split_once(style.marker.as_str()) {
        Some((translated, original)) if !original.trim().is_empty() => {
            let display = if style.translation_note.is_empty() {
                translated.trim().to_owned()
            } else {
                translated
                    .replace(style.translation_note.as_str(), "")
                    .trim()
                    .to_owned()
            };
            TextPair {
                display_text: display,
                original_text: original.trim().to_owned(),
            }
        }
        _ => TextPair::untranslated(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(raw: &str) -> TextPair {
        TranslationSplitter::default().split(raw)
    }

    fn answer(raw: &str) -> TextPair {
        TranslationSplitter::new(MarkerStyle::answer()).split(raw)
    }

    #[test]
    fn splits_on_marker() {
        let p = review("hola (Original) hello");
        assert_eq!(p.display_text, "hola");
        assert_eq!(p.original_text, "hello");
        assert!(p.is_translated());
    }

    #[test]
    fn no_marker_keeps_text() {
        let p = review("hola");
        assert_eq!(p.display_text, "hola");
        assert_eq!(p.original_text, "hola");
    }

    #[test]
    fn no_marker_trims() {
        let p = review("  hola  \n");
        assert_eq!(p, TextPair::untranslated("hola"));
    }

    #[test]
    fn strips_translation_note() {
        let p = review("(Traducido por Google) Muy buen vino (Original) Very good wine");
        assert_eq!(p.display_text, "Muy buen vino");
        assert_eq!(p.original_text, "Very good wine");
    }

    #[test]
    fn answer_marker_needs_trailing_space() {
        let p = answer("(Traducido por Google) Gracias (Original) Thanks");
        assert_eq!(p.display_text, "Gracias");
        assert_eq!(p.original_text, "Thanks");

        // Without the space after the marker the answer style sees no marker.
        let p = answer("Gracias (Original)Thanks");
        assert_eq!(p.display_text, "Gracias (Original)Thanks");
        assert_eq!(p.original_text, p.display_text);

        // The review style splits it.
        let p = review("Gracias (Original)Thanks");
        assert_eq!(p.original_text, "Thanks");
    }

    #[test]
    fn splits_on_first_marker_only() {
        let p = review("uno (Original) dos (Original) tres");
        assert_eq!(p.display_text, "uno");
        assert_eq!(p.original_text, "dos (Original) tres");
    }

    #[test]
    fn trailing_marker_is_not_a_split() {
        let p = review("hola (Original)");
        assert_eq!(p.display_text, "hola (Original)");
        assert_eq!(p.original_text, "hola (Original)");
    }

    #[test]
    fn leading_marker_leaves_empty_display() {
        let p = review("(Original) hello");
        assert_eq!(p.display_text, "");
        assert_eq!(p.original_text, "hello");
    }

    #[test]
    fn note_only_stripped_from_display() {
        let p = review("Bien (Original) (Traducido por Google) raro");
        assert_eq!(p.display_text, "Bien");
        assert_eq!(p.original_text, "(Traducido por Google) raro");
    }

    #[test]
    fn locale_notes() {
        let en = MarkerStyle::for_locale("en", false);
        assert_eq!(en.translation_note, "(Translated by Google)");
        let p = split("(Translated by Google) Great (Original) Genial", &en);
        assert_eq!(p.display_text, "Great");
        assert_eq!(p.original_text, "Genial");

        let unknown = MarkerStyle::for_locale("xx", true);
        assert_eq!(unknown, MarkerStyle::answer());
    }

    #[test]
    fn empty_note_disables_stripping() {
        let style = MarkerStyle {
            marker: "||".into(),
            translation_note: String::new(),
        };
        let p = split("(Traducido por Google) a || b", &style);
        assert_eq!(p.display_text, "(Traducido por Google) a");
        assert_eq!(p.original_text, "b");
    }

    #[test]
    fn empty_input() {
        assert_eq!(review(""), TextPair::untranslated(""));
    }
}
