//! Character n-gram extraction.
//!
//! Feeds the language model. Each word of normalized text is padded with a
//! space on both sides, then every character 1-, 2- and 3-gram of the padded
//! word is emitted, except the bare padding space. Padding lets grams like
//! `" de"` or `"os "` capture how words start and end.
//!
//! For a word of `k` characters exactly `3k + 1` grams are emitted.

use memchr::memchr_iter;
use smallvec::SmallVec;

/// Longest gram emitted.
pub const MAX_NGRAM: usize = 3;

/// Extracts n-grams from normalized text.
///
/// Expects output of [`TextNormalizer`](super::normalizer::TextNormalizer):
/// words separated by single ASCII spaces. Empty input emits nothing.
///
/// # Example
///
/// ```
/// use emolex_core::analyzer::ngram::extract_ngrams;
///
/// let mut grams = Vec::new();
/// extract_ngrams("el", |g| grams.push(g.to_owned()));
///
/// assert_eq!(grams, ["e", "l", " e", "el", "l ", " el", "el "]);
/// ```
pub fn extract_ngrams<F>(normalized: &str, mut callback: F)
where
    F: FnMut(&str),
{
    let bytes = normalized.as_bytes();
    let mut padded = String::new();
    let mut bounds: SmallVec<[usize; 32]> = SmallVec::new();
    let mut start = 0usize;

    let mut emit_word = |word: &str| {
        if word.is_empty() {
            return;
        }
        padded.clear();
        padded.push(' ');
        padded.push_str(word);
        padded.push(' ');

        bounds.clear();
        bounds.extend(padded.char_indices().map(|(i, _)| i));
        bounds.push(padded.len());
        let chars = bounds.len() - 1;

        for n in 1..=MAX_NGRAM.min(chars) {
            for i in 0..=chars - n {
                let gram = &padded[bounds[i]..bounds[i + n]];
                if gram != " " {
                    callback(gram);
                }
            }
        }
    };

    // Splitting on ASCII space keeps every slice on a char boundary.
    for i in memchr_iter(b' ', bytes) {
        emit_word(&normalized[start..i]);
        start = i + 1;
    }
    emit_word(&normalized[start..]);
}
