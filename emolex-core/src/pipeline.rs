//! Review annotation pipeline.
//!
//! Runs every stage over a review body and, separately, over its owner
//! answer:
//!
//! ```text
//! raw text ─► split ─┬─ original ─► identify language
//!                    └─ display ──► emoji glossing ─► emoticon glossing
//! ```
//!
//! The pipeline holds only read-only state (two lexicons, a language model,
//! two splitters) and each call owns its buffers, so a single instance can
//! serve many threads at once when the model is `Sync`.

use emolex_types::{BlockAnnotation, LexiconClass, ReviewAnnotation};

use crate::analyzer::annotator::annotate;
use crate::analyzer::normalizer::NormalizerConfig;
use crate::analyzer::splitter::{MarkerStyle, TranslationSplitter};
use crate::config::PipelineConfig;
use crate::error::LoadError;
use crate::langid::{LanguageIdentifier, LanguageModel, NgramProfileModel};
use crate::lexicon::Lexicon;

/// Annotates review and answer text blocks.
#[derive(Debug, Clone)]
pub struct ReviewAnnotationPipeline<M = NgramProfileModel> {
    emoji: Lexicon,
    emoticon: Lexicon,
    identifier: LanguageIdentifier<M>,
    review_splitter: TranslationSplitter,
    answer_splitter: TranslationSplitter,
}

impl ReviewAnnotationPipeline<NgramProfileModel> {
    /// Loads lexicons and language profiles named by a config.
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid or any resource is missing or
    /// malformed. Nothing is retried.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, LoadError> {
        config.validate()?;

        let emoji = Lexicon::load(LexiconClass::Emoji, config.emoji_path())?;
        let emoticon = Lexicon::load(LexiconClass::Emoticon, config.emoticon_path())?;
        let model = match &config.profile_folder {
            Some(folder) => NgramProfileModel::load_folder(folder, config.min_probability)?,
            None => {
                tracing::warn!("no profile folder configured; every language will be UND");
                NgramProfileModel::empty()
            }
        }
        .with_normalizer(NormalizerConfig {
            strip_diacritics: config.strip_diacritics,
        });

        Ok(Self::new(emoji, emoticon, model).with_marker_styles(
            config.review_markers.clone(),
            config.answer_markers.clone(),
        ))
    }
}

impl<M: LanguageModel> ReviewAnnotationPipeline<M> {
    /// Assembles a pipeline with the default review and answer markers.
    ///
    /// # Panics
    ///
    /// Debug builds assert that each lexicon is of the class its slot expects.
    pub fn new(emoji: Lexicon, emoticon: Lexicon, model: M) -> Self {
        debug_assert_eq!(emoji.class(), LexiconClass::Emoji, "emoji slot");
        debug_assert_eq!(emoticon.class(), LexiconClass::Emoticon, "emoticon slot");
        Self {
            emoji,
            emoticon,
            identifier: LanguageIdentifier::new(model),
            review_splitter: TranslationSplitter::new(MarkerStyle::review()),
            answer_splitter: TranslationSplitter::new(MarkerStyle::answer()),
        }
    }

    /// Replaces the marker styles of both block kinds.
    pub fn with_marker_styles(mut self, review: MarkerStyle, answer: MarkerStyle) -> Self {
        self.review_splitter = TranslationSplitter::new(review);
        self.answer_splitter = TranslationSplitter::new(answer);
        self
    }

    /// The emoji lexicon.
    pub fn emoji_lexicon(&self) -> &Lexicon {
        &self.emoji
    }

    /// The emoticon lexicon.
    pub fn emoticon_lexicon(&self) -> &Lexicon {
        &self.emoticon
    }

    /// The language identifier.
    pub fn identifier(&self) -> &LanguageIdentifier<M> {
        &self.identifier
    }

    /// Runs all stages over one block with an explicit splitter.
    pub fn annotate_block(&self, raw: &str, splitter: &TranslationSplitter) -> BlockAnnotation {
        let pair = splitter.split(raw);
        let language = self.identifier.identify(&pair.original_text);
        let emoji = annotate(&self.emoji, &pair.display_text);
        let emoticon = annotate(&self.emoticon, &emoji.normalized_text);

        tracing::debug!(
            translated = pair.is_translated(),
            emoji = emoji.match_count,
            emoticons = emoticon.match_count,
            language = %language.language_code,
            "block annotated"
        );

        BlockAnnotation::from_parts(pair, emoji, emoticon, language)
    }

    /// Annotates a review body using the review marker style.
    pub fn annotate_review_text(&self, raw: &str) -> BlockAnnotation {
        self.annotate_block(raw, &self.review_splitter)
    }

    /// Annotates an owner answer using the answer marker style.
    pub fn annotate_answer_text(&self, raw: &str) -> BlockAnnotation {
        self.annotate_block(raw, &self.answer_splitter)
    }

    /// Annotates a review and, when present and not blank, its answer.
    pub fn annotate(&self, review: &str, answer: Option<&str>) -> ReviewAnnotation {
        ReviewAnnotation {
            review: self.annotate_review_text(review),
            answer: answer
                .filter(|a| !a.trim().is_empty())
                .map(|a| self.annotate_answer_text(a)),
        }
    }
}
