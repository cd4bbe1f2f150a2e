//! Text normalization for language identification.
//!
//! The language model only cares about letters. Before n-grams are taken,
//! text is lowercased (Unicode-aware), every non-letter becomes a space, and
//! runs of spaces collapse into one. Leading and trailing spaces are dropped.
//!
//! Annotation never goes through here: glossing works on the text exactly
//! as the author wrote it.

/// Configuration options for language-model normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Drops Latin diacritics so that "canción" and "cancion" share n-grams.
    /// Off by default: accents are strong language signals.
    pub strip_diacritics: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            strip_diacritics: false,
        }
    }
}

/// Letter-only, lowercase, single-spaced normalizer.
///
/// # Examples
///
/// ```
/// use emolex_core::analyzer::normalizer::TextNormalizer;
///
/// let normalizer = TextNormalizer::default();
/// assert_eq!(normalizer.normalize("  ¡Muy BUENO!! 10/10 :) "), "muy bueno");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer first and reuses its capacity.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let mut pending_space = false;

        for ch in input.chars() {
            if !ch.is_alphabetic() {
                pending_space = !out.is_empty();
                continue;
            }

            for lowered in ch.to_lowercase() {
                if pending_space {
                    out.push(' ');
                    pending_space = false;
                }
                out.push(self.fold(lowered));
            }
        }
    }

    /// Applies diacritic folding to one lowercase char, if enabled.
    #[inline]
    pub fn fold(&self, c: char) -> char {
        if self.config.strip_diacritics {
            fold_latin(c)
        } else {
            c
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> NormalizerConfig {
        self.config
    }

    /// Normalizes text and returns a new String.
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }
}

#[inline]
fn fold_latin(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'ī' => 'i',
        'ñ' | 'ń' | 'ň' => 'n',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ō' | 'ő' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'š' | 'ś' | 'ş' => 's',
        'ž' | 'ź' | 'ż' => 'z',
        _ => c,
    }
}
