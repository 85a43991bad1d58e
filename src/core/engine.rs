use crate::config::WeightSpec;
use crate::core::phonetic::{Language, PhoneticEncoding, PhoneticStrategy};
use crate::core::types::{Sample, SampleSet, ScoreKind, ScoreRecord};
use crate::core::vocabulary::VocabularyStats;
use crate::lookup::NoveltyLookup;
use crate::scoring::{aggregate, novelty, phonetic, rhythm, similarity};
use tracing::{debug, info};

/// Scores samples along every dimension enabled in the weight spec.
/// Holds no per-sample state; vocabulary statistics are passed in.
pub struct ScoringEngine<L: NoveltyLookup> {
    weights: WeightSpec,
    language: Language,
    strategy: Box<dyn PhoneticStrategy>,
    lookup: L,
}

impl<L: NoveltyLookup> ScoringEngine<L> {
    pub fn new(weights: WeightSpec, language: Language, lookup: L) -> Self {
        Self {
            weights,
            language,
            strategy: language.strategy(),
            lookup,
        }
    }

    pub fn weights(&self) -> &WeightSpec {
        &self.weights
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn enabled(&self, kind: ScoreKind) -> bool {
        self.weights.is_enabled(kind)
    }

    pub fn score_sample(&self, sample: &Sample, vocabulary: &VocabularyStats) -> ScoreRecord {
        let mut record = ScoreRecord::new();
        let tokens = sample.tokens();

        if self.enabled(ScoreKind::WordNovelty) {
            record.set(
                ScoreKind::WordNovelty,
                novelty::word_novelty(tokens, self.language, &self.lookup),
            );
        }

        if self.enabled(ScoreKind::ContextNovelty) {
            record.set(
                ScoreKind::ContextNovelty,
                novelty::context_novelty(tokens, self.language, &self.lookup),
            );
        }

        if self.enabled(ScoreKind::ParticipantSimilarity) {
            record.set(
                ScoreKind::ParticipantSimilarity,
                similarity::vocabulary_similarity(&vocabulary.by_subject, sample.subject(), tokens),
            );
        }

        if self.enabled(ScoreKind::SentenceSimilarity) {
            record.set(
                ScoreKind::SentenceSimilarity,
                similarity::vocabulary_similarity(&vocabulary.by_variable, sample.variable(), tokens),
            );
        }

        if self.enabled(ScoreKind::RhythmicScore) || self.enabled(ScoreKind::PhoneticScore) {
            let encoding: PhoneticEncoding = self.strategy.encode(&sample.normalized_sentence());

            if self.enabled(ScoreKind::RhythmicScore) {
                record.set(
                    ScoreKind::RhythmicScore,
                    rhythm::rhythmic_score(&encoding, self.strategy.as_ref()),
                );
            }

            if self.enabled(ScoreKind::PhoneticScore) {
                record.set(ScoreKind::PhoneticScore, phonetic::phonetic_score(&encoding));
            }
        }

        record.set(ScoreKind::TotalScore, aggregate::total_score(&record, &self.weights));

        debug!(
            "{}/{} '{}': {:?}",
            sample.subject(),
            sample.variable(),
            sample.sentence(),
            record.iter().collect::<Vec<_>>()
        );
        record
    }

    /// Builds vocabulary statistics once, then scores every sample in
    /// subject order.
    pub fn score_all<'a>(&self, samples: &'a SampleSet) -> Vec<(&'a Sample, ScoreRecord)> {
        let vocabulary = VocabularyStats::build(samples);
        info!(
            "Scoring {} samples from {} subjects ({})",
            samples.len(),
            vocabulary.by_subject.entity_count(),
            self.language
        );
        samples
            .iter()
            .map(|sample| (sample, self.score_sample(sample, &vocabulary)))
            .collect()
    }
}
