//! Symbol lexicons.
//!
//! A lexicon maps a symbol (an emoji like `😊` or an emoticon like `;)`) to
//! its gloss and polarity. Two instances exist per pipeline, one per
//! [`LexiconClass`], and both are read-only once loaded.
//!
//! ## Resource Format
//!
//! ```json
//! {
//!   "😊": { "synsetID": "bn:00043591n", "polarity": 0.8 },
//!   "😢": { "synsetID": "bn:00069254n", "polarity": -0.6 }
//! }
//! ```
//!
//! `gloss` and `label` are accepted in place of `synsetID`. Extra fields are
//! ignored.
//!
//! ## Iteration Order
//!
//! Entries iterate in load order: the order of keys in the JSON object, or
//! insertion order for [`Lexicon::from_entries`]. The annotator walks entries
//! in this order, so it decides both the order of matched symbols and which
//! symbol claims a span first when two could match it.

use std::fs;
use std::path::Path;

use emolex_types::LexiconClass;
use memchr::memmem;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::LoadError;

/// ASCII whitespace as a regex class: space, `\t`, `\n`, `\x0B`, `\x0C`, `\r`.
const FLANK: &str = r"[\t\n\x0B\x0C\r ]";

/// How an entry's symbol is located in text.
#[derive(Debug, Clone)]
pub enum MatchSpec {
    /// The symbol anywhere, as a byte literal.
    Literal(memmem::Finder<'static>),
    /// The symbol flanked on both sides by ASCII whitespace or a string
    /// boundary. The flanking whitespace is part of the match.
    Flanked(Regex),
}

impl MatchSpec {
    /// Builds the match spec a class uses for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidPattern` if the flanked pattern fails to
    /// compile (only possible for absurdly large symbols).
    pub fn for_class(class: LexiconClass, symbol: &str) -> Result<Self, LoadError> {
        match class {
            LexiconClass::Emoji => Ok(MatchSpec::Literal(
                memmem::Finder::new(symbol.as_bytes()).into_owned(),
            )),
            LexiconClass::Emoticon => {
                let pattern = format!("(?:^|{FLANK}){}(?:{FLANK}|$)", regex::escape(symbol));
                Regex::new(&pattern)
                    .map(MatchSpec::Flanked)
                    .map_err(|source| LoadError::InvalidPattern {
                        symbol: symbol.to_owned(),
                        source,
                    })
            }
        }
    }

    /// Finds the first match starting at or after byte `from`.
    ///
    /// Returns the `[start, end)` byte span. Anchors see the whole
    /// haystack, so `^` never matches at a `from` greater than zero.
    #[inline]
    pub fn find_at(&self, haystack: &str, from: usize) -> Option<(usize, usize)> {
        if from > haystack.len() {
            return None;
        }
        match self {
            MatchSpec::Literal(finder) => finder
                .find(&haystack.as_bytes()[from..])
                .map(|i| (from + i, from + i + finder.needle().len())),
            MatchSpec::Flanked(re) => re.find_at(haystack, from).map(|m| (m.start(), m.end())),
        }
    }
}

/// One symbol's match spec, gloss and polarity.
#[derive(Debug, Clone)]
pub struct LexiconEntry {
    symbol: String,
    spec: MatchSpec,
    gloss: String,
    polarity: f64,
}

impl LexiconEntry {
    /// The symbol key.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// How the symbol is located.
    #[inline]
    pub fn spec(&self) -> &MatchSpec {
        &self.spec
    }

    /// Canonical text substituted for each match.
    #[inline]
    pub fn gloss(&self) -> &str {
        &self.gloss
    }

    /// Externally supplied polarity; opaque to this crate.
    #[inline]
    pub fn polarity(&self) -> f64 {
        self.polarity
    }
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(rename = "synsetID", alias = "gloss", alias = "label")]
    gloss: String,
    polarity: f64,
}

/// An immutable, ordered symbol dictionary of one class.
#[derive(Debug, Clone)]
pub struct Lexicon {
    class: LexiconClass,
    entries: Vec<LexiconEntry>,
    index: FxHashMap<String, usize>,
}

impl Lexicon {
    /// A lexicon with no entries. Annotating with it only trims.
    pub fn empty(class: LexiconClass) -> Self {
        Self {
            class,
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Builds a lexicon from `(symbol, gloss, polarity)` triples, keeping
    /// their order.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::EmptySymbol` or `LoadError::DuplicateSymbol` for
    /// invalid keys, and `LoadError::InvalidPattern` if a match spec fails to
    /// build.
    pub fn from_entries<I, S, G>(class: LexiconClass, entries: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (S, G, f64)>,
        S: Into<String>,
        G: Into<String>,
    {
        let mut lexicon = Self::empty(class);
        for (symbol, gloss, polarity) in entries {
            lexicon.insert(symbol.into(), gloss.into(), polarity)?;
        }
        Ok(lexicon)
    }

    /// Parses a lexicon from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Malformed` if the text is not an object of
    /// `{ synsetID, polarity }` entries, plus the errors of
    /// [`from_entries`](Self::from_entries).
    pub fn from_json_str(class: LexiconClass, json: &str) -> Result<Self, LoadError> {
        Self::parse(class, json, Path::new("<inline>"))
    }

    /// Loads a lexicon from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Io` if the file cannot be read, plus the errors of
    /// [`from_json_str`](Self::from_json_str).
    pub fn load(class: LexiconClass, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let lexicon = Self::parse(class, &raw, path)?;

        tracing::info!(
            class = %class,
            path = %path.display(),
            entries = lexicon.len(),
            "lexicon loaded"
        );
        Ok(lexicon)
    }

    /// Loads `<folder>/<stem>.<locale>.json` for the class.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_from_folder(
        class: LexiconClass,
        folder: impl AsRef<Path>,
        locale: &str,
    ) -> Result<Self, LoadError> {
        Self::load(class, folder.as_ref().join(class.file_name(locale)))
    }

    fn parse(class: LexiconClass, json: &str, path: &Path) -> Result<Self, LoadError> {
        let object: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| LoadError::malformed(path, e))?;

        let mut lexicon = Self::empty(class);
        lexicon.entries.reserve(object.len());
        for (symbol, value) in object {
            let raw: RawEntry =
                serde_json::from_value(value).map_err(|e| LoadError::malformed(path, e))?;
            lexicon.insert(symbol, raw.gloss, raw.polarity)?;
        }
        Ok(lexicon)
    }

    fn insert(&mut self, symbol: String, gloss: String, polarity: f64) -> Result<(), LoadError> {
        if symbol.is_empty() {
            return Err(LoadError::EmptySymbol { class: self.class });
        }
        if self.index.contains_key(&symbol) {
            return Err(LoadError::DuplicateSymbol {
                class: self.class,
                symbol,
            });
        }

        let spec = MatchSpec::for_class(self.class, &symbol)?;
        self.index.insert(symbol.clone(), self.entries.len());
        self.entries.push(LexiconEntry {
            symbol,
            spec,
            gloss,
            polarity,
        });
        Ok(())
    }

    /// The class this lexicon was built for.
    #[inline]
    pub fn class(&self) -> LexiconClass {
        self.class
    }

    /// Entries in load order.
    #[inline]
    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    /// Looks up an entry by symbol.
    pub fn get(&self, symbol: &str) -> Option<&LexiconEntry> {
        self.index.get(symbol).map(|&i| &self.entries[i])
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the lexicon has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
