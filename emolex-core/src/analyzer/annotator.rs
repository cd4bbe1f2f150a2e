//! Lexicon Annotator
//!
//! Replaces every lexicon symbol found in a text with its gloss and averages
//! the polarity of what was found.
//!
//! ## How It Scans
//!
//! Entries are processed one at a time, in lexicon order, against a working
//! buffer that carries the replacements made for earlier entries. For each
//! entry:
//!
//! 1. Find the first occurrence at or after offset 0.
//! 2. Record it, then resume searching one character after its **start**,
//!    not after its end. Occurrences of a symbol may therefore overlap: `aa`
//!    occurs twice in `aaa`, at offsets 0 and 1.
//! 3. Once the buffer is exhausted, splice ` gloss ` over every recorded
//!    span. Where a span overlaps the previous one, only its uncovered tail is
//!    replaced, so each occurrence still contributes one gloss.
//!
//! Every occurrence adds the entry's polarity to the sum, bumps the match
//! count and appends the symbol key to the matched-symbols string.
//!
//! Because occurrences are collected before splicing, a gloss that itself
//! contains the symbol is never rescanned by that same entry. Later entries do
//! see earlier glosses.
//!
//! Do not switch to replacing each occurrence as soon as it is found: the
//! gloss would overwrite the overlapping second `aa` in `aaa` and lose it.
//!
//! ## Example
//!
//! ```
//! use emolex_core::analyzer::annotator::annotate;
//! use emolex_core::lexicon::Lexicon;
//! use emolex_types::LexiconClass;
//!
//! let lexicon = Lexicon::from_entries(LexiconClass::Emoji, [("😊", "happy", 0.8)]).unwrap();
//! let result = annotate(&lexicon, "Genial 😊");
//!
//! assert_eq!(result.normalized_text, "Genial  happy");
//! assert_eq!(result.matched_symbols, "😊");
//! assert_eq!(result.mean_polarity, 0.8);
//! ```

use emolex_types::AnnotationResult;
use smallvec::SmallVec;

use crate::lexicon::{Lexicon, LexiconEntry};

/// Byte span `[start, end)` of one occurrence.
type Span = (usize, usize);

/// Most texts hold a handful of occurrences per symbol at most.
type SpanBuf = SmallVec<[Span; 8]>;

/// Annotates `text` with one lexicon.
///
/// Never fails: text with no occurrences comes back trimmed and unchanged,
/// with an empty symbol string and a mean polarity of `0.0`. The result is a
/// pure function of the lexicon (including its order) and the text.
pub fn annotate(lexicon: &Lexicon, text: &str) -> AnnotationResult {
    let mut buf = text.to_owned();
    let mut scratch = String::new();
    let mut spans = SpanBuf::new();

    let mut matched_symbols = String::new();
    let mut sum = 0.0f64;
    let mut count = 0usize;

    for entry in lexicon.entries() {
        spans.clear();
        collect_overlapping(entry, &buf, &mut spans);
        if spans.is_empty() {
            continue;
        }

        for _ in &spans {
            sum += entry.polarity();
            count += 1;
            matched_symbols.push_str(entry.symbol());
        }

        splice_glosses(&buf, &spans, entry.gloss(), &mut scratch);
        std::mem::swap(&mut buf, &mut scratch);
    }

    AnnotationResult {
        normalized_text: buf.trim().to_owned(),
        matched_symbols,
        match_count: count,
        mean_polarity: mean(sum, count),
    }
}

/// `sum / count`, with the undefined cases pinned to `0.0`.
///
/// `0 / 0` is NaN in IEEE arithmetic; so is `inf - inf` from a pathological
/// lexicon. Either way the caller gets `0.0`.
#[inline]
fn mean(sum: f64, count: usize) -> f64 {
    let mean = sum / count as f64;
    if mean.is_nan() {
        0.0
    } else {
        mean
    }
}

/// Records every occurrence of `entry` in `haystack`, restarting each search
/// one character past the previous match start.
fn collect_overlapping(entry: &LexiconEntry, haystack: &str, spans: &mut SpanBuf) {
    let mut from = 0usize;
    while let Some((start, end)) = entry.spec().find_at(haystack, from) {
        spans.push((start, end));
        from = start + char_width_at(haystack, start);
    }
}

/// Width in bytes of the character starting at `at`, or 1 at the very end.
#[inline(always)]
fn char_width_at(s: &str, at: usize) -> usize {
    s[at..].chars().next().map_or(1, char::len_utf8)
}

/// Writes `src` into `out` with ` gloss ` in place of each span.
///
/// Spans arrive sorted by start. An overlapping span is clipped to begin
/// where the previous one ended.
fn splice_glosses(src: &str, spans: &[Span], gloss: &str, out: &mut String) {
    out.clear();
    out.reserve(src.len() + spans.len() * (gloss.len() + 2));

    let mut cursor = 0usize;
    for &(start, end) in spans {
        let start = start.max(cursor);
        out.push_str(&src[cursor..start]);
        out.push(' ');
        out.push_str(gloss);
        out.push(' ');
        cursor = end.max(cursor);
    }
    out.push_str(&src[cursor..]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use emolex_types::LexiconClass;

    fn emoji(entries: &[(&str, &str, f64)]) -> Lexicon {
        Lexicon::from_entries(LexiconClass::Emoji, entries.iter().copied()).unwrap()
    }

    fn emoticon(entries: &[(&str, &str, f64)]) -> Lexicon {
        Lexicon::from_entries(LexiconClass::Emoticon, entries.iter().copied()).unwrap()
    }

    #[test]
    fn no_matches_returns_trimmed_input() {
        let lex = emoji(&[("😊", "happy", 0.8)]);
        let r = annotate(&lex, "  sin nada aquí  ");
        assert_eq!(r.normalized_text, "sin nada aquí");
        assert_eq!(r.matched_symbols, "");
        assert_eq!(r.match_count, 0);
        assert_eq!(r.mean_polarity, 0.0);
    }

    #[test]
    fn empty_lexicon_only_trims() {
        let r = annotate(&Lexicon::empty(LexiconClass::Emoji), "\t hola :) 😊 \n");
        assert_eq!(r, AnnotationResult::unmatched("hola :) 😊"));
    }

    #[test]
    fn empty_text() {
        let r = annotate(&emoji(&[("😊", "happy", 0.8)]), "");
        assert_eq!(r.normalized_text, "");
        assert_eq!(r.mean_polarity, 0.0);
    }

    #[test]
    fn single_emoji_replaced_with_spaced_gloss() {
        let r = annotate(&emoji(&[("😊", "happy", 0.8)]), "muy bien😊gracias");
        assert_eq!(r.normalized_text, "muy bien happy gracias");
        assert_eq!(r.matched_symbols, "😊");
        assert_eq!(r.match_count, 1);
        assert_eq!(r.mean_polarity, 0.8);
    }

    #[test]
    fn repeated_emoji_counted_each_time() {
        let r = annotate(&emoji(&[("😊", "happy", 0.5)]), "😊😊😊");
        assert_eq!(r.matched_symbols, "😊😊😊");
        assert_eq!(r.match_count, 3);
        assert_eq!(r.normalized_text, "happy  happy  happy");
        assert_eq!(r.mean_polarity, 0.5);

        // Sum-then-divide, so a mean of repeats need not equal the polarity.
        let r = annotate(&emoji(&[("😊", "happy", 0.8)]), "😊😊😊");
        assert!((r.mean_polarity - 0.8).abs() < 1e-12);
    }

    #[test]
    fn overlapping_occurrences_both_count() {
        let lex = emoji(&[("aa", "X", 1.0)]);
        let r = annotate(&lex, "aaa");
        assert_eq!(r.match_count, 2);
        assert_eq!(r.matched_symbols, "aaaa");
        assert_eq!(r.mean_polarity, 1.0);
        assert_eq!(r.normalized_text, "X  X");
    }

    #[test]
    fn overlap_counts_more_than_non_overlapping_find() {
        let lex = emoji(&[("aa", "X", 1.0)]);
        let r = annotate(&lex, "aaaa");
        assert_eq!("aaaa".matches("aa").count(), 2);
        assert_eq!(r.match_count, 3);
    }

    #[test]
    fn mean_over_mixed_polarities() {
        let lex = emoji(&[("😊", "happy", 0.8), ("😢", "sad", -0.4)]);
        let r = annotate(&lex, "😢 y 😊 y 😊");
        assert_eq!(r.match_count, 3);
        assert_eq!(r.matched_symbols, "😊😊😢");
        assert!((r.mean_polarity - (0.8 + 0.8 - 0.4) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn matched_symbols_follow_lexicon_order() {
        let forward = emoji(&[("😊", "happy", 1.0), ("😢", "sad", -1.0)]);
        let backward = emoji(&[("😢", "sad", -1.0), ("😊", "happy", 1.0)]);
        let text = "😊 😢";
        assert_eq!(annotate(&forward, text).matched_symbols, "😊😢");
        assert_eq!(annotate(&backward, text).matched_symbols, "😢😊");
    }

    #[test]
    fn earlier_entry_claims_shared_span() {
        let lex = emoji(&[("ab", "first", 1.0), ("b", "second", -1.0)]);
        let r = annotate(&lex, "ab");
        assert_eq!(r.matched_symbols, "ab");
        assert_eq!(r.normalized_text, "first");
    }

    #[test]
    fn later_entries_see_earlier_glosses() {
        let lex = emoji(&[("😊", "ok", 1.0), ("ok", "fine", 0.0)]);
        let r = annotate(&lex, "😊");
        assert_eq!(r.matched_symbols, "😊ok");
        assert_eq!(r.normalized_text, "fine");
        assert_eq!(r.mean_polarity, 0.5);
    }

    #[test]
    fn gloss_containing_symbol_terminates() {
        let lex = emoji(&[("a", "a", 1.0)]);
        let r = annotate(&lex, "a");
        assert_eq!(r.match_count, 1);
        assert_eq!(r.normalized_text, "a");
    }

    #[test]
    fn emoticon_needs_whitespace() {
        let lex = emoticon(&[(":)", "smile", 0.5)]);
        let r = annotate(&lex, "hola:) adios");
        assert_eq!(r.match_count, 0);
        assert_eq!(r.normalized_text, "hola:) adios");
    }

    #[test]
    fn emoticon_flanks_are_consumed_and_respaced() {
        let lex = emoticon(&[(";)", "wink", 0.5)]);
        let r = annotate(&lex, "Genial ;) vale");
        assert_eq!(r.normalized_text, "Genial wink vale");
        assert_eq!(r.matched_symbols, ";)");
    }

    #[test]
    fn adjacent_emoticons_sharing_a_space_both_match() {
        let lex = emoticon(&[(":)", "smile", 1.0)]);
        let r = annotate(&lex, "a :) :) b");
        assert_eq!(r.match_count, 2);
        assert_eq!(r.matched_symbols, ":):)");
        assert_eq!(r.normalized_text, "a smile  smile b");
    }

    #[test]
    fn emoticon_at_both_ends() {
        let lex = emoticon(&[(":(", "frown", -1.0)]);
        let r = annotate(&lex, ":( mal :(");
        assert_eq!(r.match_count, 2);
        assert_eq!(r.normalized_text, "frown mal frown");
        assert_eq!(r.mean_polarity, -1.0);
    }

    #[test]
    fn opposite_polarities_average_to_zero() {
        let lex = emoji(&[("😊", "happy", 1.0), ("😢", "sad", -1.0)]);
        let r = annotate(&lex, "😊😢");
        assert_eq!(r.match_count, 2);
        assert_eq!(r.mean_polarity, 0.0);
    }

    #[test]
    fn infinite_polarities_collapse_to_zero() {
        let lex = emoji(&[("+", "up", f64::INFINITY), ("-", "down", f64::NEG_INFINITY)]);
        let r = annotate(&lex, "+ -");
        assert_eq!(r.match_count, 2);
        assert_eq!(r.mean_polarity, 0.0);
    }

    #[test]
    fn multibyte_restart_stays_on_char_boundary() {
        let lex = emoji(&[("ñ", "enye", 0.0)]);
        let r = annotate(&lex, "ññ");
        assert_eq!(r.match_count, 2);
        assert_eq!(r.normalized_text, "enye  enye");
    }

    #[test]
    fn deterministic_across_runs() {
        let lex = emoji(&[("😊", "happy", 0.1), ("😢", "sad", 0.2), ("👍", "ok", 0.3)]);
        let text = "👍 😢 😊 😊 👍 nada";
        let first = annotate(&lex, text);
        for _ in 0..10 {
            let again = annotate(&lex, text);
            assert_eq!(again, first);
            assert_eq!(again.mean_polarity.to_bits(), first.mean_polarity.to_bits());
        }
    }

    #[test]
    fn splice_clips_overlaps() {
        let mut out = String::new();
        splice_glosses("aaa", &[(0, 2), (1, 3)], "X", &mut out);
        assert_eq!(out, " X  X ");

        splice_glosses("xaay", &[(1, 3)], "G", &mut out);
        assert_eq!(out, "x G y");
    }
}
