//! Emolex core: emoji/emoticon annotation and language identification for
//! review text.
//!
//! ```text
//! review ─► TranslationSplitter ─► LanguageIdentifier(original)
//!                               └► annotate(emoji) ─► annotate(emoticon)
//! ```
//!
//! - [`lexicon`]: symbol dictionaries and their per-class match rules
//! - [`analyzer`]: annotator, translation splitter, normalizer, n-grams
//! - [`langid`]: language models and best-guess selection
//! - [`pipeline`]: the stages wired together per review/answer block
//!
//! Only loading can fail ([`LoadError`]). Per-text work always returns a
//! value, falling back to `0.0` polarity or the `UND` language sentinel.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod langid;
pub mod lexicon;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::LoadError;
pub use lexicon::{Lexicon, LexiconEntry, MatchSpec};
pub use pipeline::ReviewAnnotationPipeline;

pub use emolex_types::{
    AnnotationResult, BlockAnnotation, LanguageGuess, LexiconClass, ReviewAnnotation, TextPair,
};
