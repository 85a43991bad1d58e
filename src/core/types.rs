// src/core/types.rs
use crate::error::{CreativityError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Every accepted sentence has exactly this many words.
pub const SENTENCE_LENGTH: usize = 4;

/// Upper bound of every per-dimension score and of the total.
pub const MAX_SCORE: u8 = 20;

/// Characters stripped from both ends of a sentence before tokenizing.
const EDGE_PUNCTUATION: &[char] = &[' ', ',', ';', '.', ':', '!', '?'];

/// Strips edge punctuation and lowercases. Inner punctuation is kept.
pub fn normalize_sentence(sentence: &str) -> String {
    sentence.trim_matches(EDGE_PUNCTUATION).to_lowercase()
}

/// Rounds half to even, the convention all score formulas share.
pub fn round_score(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Clamps a raw integer into the [0, 20] score range.
pub fn clamp_score(value: i64) -> u8 {
    value.clamp(0, MAX_SCORE as i64) as u8
}

/// One participant's answer to one four-letter puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    subject: String,
    variable: String,
    sentence: String,
    tokens: [String; SENTENCE_LENGTH],
}

impl Sample {
    /// Returns `None` unless the sentence splits into exactly four words.
    pub fn new(subject: &str, variable: &str, sentence: &str) -> Option<Self> {
        let words: Vec<String> = normalize_sentence(sentence)
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let tokens: [String; SENTENCE_LENGTH] = words.try_into().ok()?;
        Some(Self {
            subject: subject.to_string(),
            variable: variable.to_string(),
            sentence: sentence.to_string(),
            tokens,
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The sentence exactly as the participant wrote it.
    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    /// Lowercase words, edge punctuation removed.
    pub fn tokens(&self) -> &[String; SENTENCE_LENGTH] {
        &self.tokens
    }

    pub fn normalized_sentence(&self) -> String {
        normalize_sentence(&self.sentence)
    }
}

/// Accepted samples grouped by subject, both levels in first-seen order.
/// A repeated (subject, variable) pair replaces the sentence in place.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    groups: Vec<(String, Vec<Sample>)>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sample: Sample) {
        let group_idx = match self.groups.iter().position(|(s, _)| s == sample.subject()) {
            Some(idx) => idx,
            None => {
                self.groups.push((sample.subject().to_string(), Vec::new()));
                self.groups.len() - 1
            }
        };
        let group = &mut self.groups[group_idx].1;
        if let Some(existing) = group.iter_mut().find(|s| s.variable() == sample.variable()) {
            *existing = sample;
        } else {
            group.push(sample);
        }
    }

    /// Iterates subject by subject, then variable by variable.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.groups.iter().flat_map(|(_, samples)| samples.iter())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, samples)| samples.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<Sample> for SampleSet {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        let mut set = Self::new();
        for sample in iter {
            set.insert(sample);
        }
        set
    }
}

/// The creativity dimensions, in output column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScoreKind {
    WordNovelty,
    ContextNovelty,
    ParticipantSimilarity,
    SentenceSimilarity,
    RhythmicScore,
    PhoneticScore,
    TotalScore,
}

impl ScoreKind {
    pub const ALL: [ScoreKind; 7] = [
        ScoreKind::WordNovelty,
        ScoreKind::ContextNovelty,
        ScoreKind::ParticipantSimilarity,
        ScoreKind::SentenceSimilarity,
        ScoreKind::RhythmicScore,
        ScoreKind::PhoneticScore,
        ScoreKind::TotalScore,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScoreKind::WordNovelty => "WORD_NOVELTY",
            ScoreKind::ContextNovelty => "CONTEXT_NOVELTY",
            ScoreKind::ParticipantSimilarity => "PARTICIPANT_SIMILARITY",
            ScoreKind::SentenceSimilarity => "SENTENCE_SIMILARITY",
            ScoreKind::RhythmicScore => "RHYTHMIC_SCORE",
            ScoreKind::PhoneticScore => "PHONETIC_SCORE",
            ScoreKind::TotalScore => "TOTAL_SCORE",
        }
    }
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScoreKind {
    type Err = CreativityError;

    fn from_str(s: &str) -> Result<Self> {
        ScoreKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s.trim())
            .ok_or_else(|| CreativityError::UnknownScore(s.trim().to_string()))
    }
}

/// Scores computed for one (subject, variable) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreRecord {
    scores: BTreeMap<ScoreKind, u8>,
}

impl ScoreRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a score, clamped to [0, 20].
    pub fn set(&mut self, kind: ScoreKind, value: u8) {
        self.scores.insert(kind, value.min(MAX_SCORE));
    }

    pub fn get(&self, kind: ScoreKind) -> Option<u8> {
        self.scores.get(&kind).copied()
    }

    /// Scores in column order.
    pub fn iter(&self) -> impl Iterator<Item = (ScoreKind, u8)> + '_ {
        self.scores.iter().map(|(&kind, &value)| (kind, value))
    }
}
