//! Text analysis stages.
//!
//! This module provides the text processing components:
//! - **Annotator**: Replaces lexicon symbols with glosses and scores polarity
//! - **Splitter**: Separates machine-translated text from its original
//! - **Normalizer**: Reduces text to lowercase letters for language scoring
//! - **Ngram**: Extracts character 1–3-grams for language scoring

pub mod annotator;
pub mod ngram;
pub mod normalizer;
pub mod splitter;

pub use annotator::annotate;
pub use normalizer::TextNormalizer;
pub use splitter::{MarkerStyle, TranslationSplitter};
