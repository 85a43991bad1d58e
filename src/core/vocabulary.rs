// src/core/vocabulary.rs
use crate::core::types::{Sample, SampleSet};
use std::collections::HashMap;

/// Smallest and largest relative word frequency seen across all entities
/// of one table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationExtremes {
    pub min: f64,
    pub max: f64,
}

/// Relative word frequencies per entity (a subject or a variable).
/// Built once by `VocabularyBuilder`, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct VocabularyTable {
    entries: HashMap<String, HashMap<String, f64>>,
    extremes: Option<PopulationExtremes>,
}

impl VocabularyTable {
    /// Relative frequency of `word` for `entity`, 0.0 if never seen.
    pub fn frequency(&self, entity: &str, word: &str) -> f64 {
        self.entries
            .get(entity)
            .and_then(|words| words.get(word))
            .copied()
            .unwrap_or(0.0)
    }

    /// `None` only for a table built from no samples.
    pub fn extremes(&self) -> Option<PopulationExtremes> {
        self.extremes
    }

    pub fn entity_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Default)]
struct EntityCounts {
    words: HashMap<String, u64>,
    total: u64,
}

impl EntityCounts {
    fn add(&mut self, word: &str) {
        *self.words.entry(word.to_string()).or_insert(0) += 1;
        self.total += 1;
    }
}

/// Accumulates raw word counts; `finish` turns them into a table.
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    counts: HashMap<String, EntityCounts>,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_words<'a>(&mut self, entity: &str, words: impl IntoIterator<Item = &'a String>) {
        let counts = self.counts.entry(entity.to_string()).or_default();
        for word in words {
            counts.add(word);
        }
    }

    pub fn finish(self) -> VocabularyTable {
        let mut extremes: Option<PopulationExtremes> = None;
        let entries = self
            .counts
            .into_iter()
            .map(|(entity, counts)| {
                let total = counts.total as f64;
                let words: HashMap<String, f64> = counts
                    .words
                    .into_iter()
                    .map(|(word, count)| (word, count as f64 / total))
                    .collect();
                for &freq in words.values() {
                    extremes = Some(match extremes {
                        Some(e) => PopulationExtremes {
                            min: e.min.min(freq),
                            max: e.max.max(freq),
                        },
                        None => PopulationExtremes { min: freq, max: freq },
                    });
                }
                (entity, words)
            })
            .collect();

        VocabularyTable { entries, extremes }
    }
}

/// The two vocabulary tables every similarity score reads.
#[derive(Debug, Clone, Default)]
pub struct VocabularyStats {
    pub by_subject: VocabularyTable,
    pub by_variable: VocabularyTable,
}

impl VocabularyStats {
    /// Single pass over all accepted samples.
    pub fn build(samples: &SampleSet) -> Self {
        Self::from_samples(samples.iter())
    }

    pub fn from_samples<'a>(samples: impl IntoIterator<Item = &'a Sample>) -> Self {
        let mut by_subject = VocabularyBuilder::new();
        let mut by_variable = VocabularyBuilder::new();
        for sample in samples {
            by_subject.add_words(sample.subject(), sample.tokens());
            by_variable.add_words(sample.variable(), sample.tokens());
        }
        Self {
            by_subject: by_subject.finish(),
            by_variable: by_variable.finish(),
        }
    }
}
