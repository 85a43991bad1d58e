//! Scorer configuration
//!
//! Weight specification parsing plus lookup settings read from the
//! environment.

use crate::core::types::ScoreKind;
use crate::error::{CreativityError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use tracing::warn;

/// How much one dimension contributes to the total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weight {
    /// Factor in [0, 1]
    pub weight: f64,
    /// Bonus dimensions are summed and rounded separately
    pub is_bonus: bool,
}

/// Enabled dimensions and their weights. Dimensions absent here are
/// neither computed nor printed.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightSpec {
    weights: BTreeMap<ScoreKind, Weight>,
}

impl Default for WeightSpec {
    fn default() -> Self {
        let weights = [
            (ScoreKind::WordNovelty, 0.4, false),
            (ScoreKind::ContextNovelty, 0.4, false),
            (ScoreKind::ParticipantSimilarity, 0.1, false),
            (ScoreKind::SentenceSimilarity, 0.1, false),
            (ScoreKind::RhythmicScore, 0.1, true),
            (ScoreKind::PhoneticScore, 0.1, true),
        ]
        .into_iter()
        .map(|(kind, weight, is_bonus)| (kind, Weight { weight, is_bonus }))
        .collect();
        Self { weights }
    }
}

impl WeightSpec {
    /// Builds a spec from explicit entries. `TotalScore` cannot be weighted.
    pub fn from_entries(entries: impl IntoIterator<Item = (ScoreKind, Weight)>) -> Result<Self> {
        let mut weights = BTreeMap::new();
        for (kind, weight) in entries {
            if kind == ScoreKind::TotalScore {
                return Err(CreativityError::config("TOTAL_SCORE is derived and cannot be weighted"));
            }
            if !(0.0..=1.0).contains(&weight.weight) {
                return Err(CreativityError::InvalidWeight {
                    score: kind.to_string(),
                    value: weight.weight.to_string(),
                });
            }
            weights.insert(kind, weight);
        }
        if weights.is_empty() {
            return Err(CreativityError::config("no creativity scores selected"));
        }
        Ok(Self { weights })
    }

    /// Parses `WORD_NOVELTY:0.6,RHYTHMIC_SCORE:+0.1`. A leading `+` marks
    /// a bonus dimension. Later duplicates replace earlier ones.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut entries: Vec<(ScoreKind, Weight)> = Vec::new();
        for item in spec.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let (name, raw_weight) = item
                .split_once(':')
                .ok_or_else(|| CreativityError::config(format!("expected NAME:WEIGHT, got '{}'", item)))?;
            let kind: ScoreKind = name.parse()?;

            let raw_weight = raw_weight.trim();
            let (is_bonus, number) = match raw_weight.strip_prefix('+') {
                Some(rest) => (true, rest),
                None => (false, raw_weight),
            };
            let weight: f64 = number.parse().map_err(|_| CreativityError::InvalidWeight {
                score: kind.to_string(),
                value: raw_weight.to_string(),
            })?;

            if let Some(pos) = entries.iter().position(|(k, _)| *k == kind) {
                warn!("{} given more than once, keeping the last weight", kind);
                entries.remove(pos);
            }
            entries.push((kind, Weight { weight, is_bonus }));
        }
        Self::from_entries(entries)
    }

    pub fn is_enabled(&self, kind: ScoreKind) -> bool {
        self.weights.contains_key(&kind)
    }

    pub fn weight(&self, kind: ScoreKind) -> Option<Weight> {
        self.weights.get(&kind).copied()
    }

    /// Enabled dimensions in column order.
    pub fn iter(&self) -> impl Iterator<Item = (ScoreKind, Weight)> + '_ {
        self.weights.iter().map(|(&kind, &weight)| (kind, weight))
    }

    /// Output columns: the enabled dimensions followed by `TotalScore`.
    pub fn columns(&self) -> Vec<ScoreKind> {
        self.weights
            .keys()
            .copied()
            .chain(std::iter::once(ScoreKind::TotalScore))
            .collect()
    }
}

/// Settings for the HTTP novelty lookups.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Prefix of the word-frequency corpus API; the corpus name follows
    pub word_frequency_base: String,
    pub search_base: String,
    pub search_api_key: Option<String>,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// Extra attempts after a failed call
    pub max_retries: u32,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            word_frequency_base: "http://api.corpora.uni-leipzig.de/ws/words/".to_string(),
            search_base: "https://api.scaleserp.com/search".to_string(),
            search_api_key: None,
            timeout_secs: 10,
            max_retries: 0,
        }
    }
}

impl LookupConfig {
    /// Defaults overridden by `CREATIVITY_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = env::var("CREATIVITY_SEARCH_API_KEY") {
            if !key.trim().is_empty() {
                config.search_api_key = Some(key.trim().to_string());
            }
        }

        if let Ok(base) = env::var("CREATIVITY_WORD_FREQUENCY_BASE") {
            config.word_frequency_base = base;
        }

        if let Ok(base) = env::var("CREATIVITY_SEARCH_BASE") {
            config.search_base = base;
        }

        if let Ok(timeout) = env::var("CREATIVITY_LOOKUP_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(t) if t > 0 => config.timeout_secs = t,
                _ => warn!("Ignoring invalid CREATIVITY_LOOKUP_TIMEOUT_SECS '{}'", timeout),
            }
        }

        if let Ok(retries) = env::var("CREATIVITY_LOOKUP_RETRIES") {
            match retries.parse::<u32>() {
                Ok(r) => config.max_retries = r,
                Err(_) => warn!("Ignoring invalid CREATIVITY_LOOKUP_RETRIES '{}'", retries),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_matches_documented_weights() {
        let spec = WeightSpec::default();
        assert_eq!(spec.iter().count(), 6);
        assert_eq!(
            spec.weight(ScoreKind::WordNovelty),
            Some(Weight { weight: 0.4, is_bonus: false })
        );
        assert_eq!(
            spec.weight(ScoreKind::PhoneticScore),
            Some(Weight { weight: 0.1, is_bonus: true })
        );
        assert_eq!(spec.columns().last(), Some(&ScoreKind::TotalScore));
    }

    #[test]
    fn parse_marks_bonus_dimensions() {
        let spec = WeightSpec::parse("WORD_NOVELTY:0.6, RHYTHMIC_SCORE:+0.2,,").unwrap();
        assert_eq!(
            spec.weight(ScoreKind::RhythmicScore),
            Some(Weight { weight: 0.2, is_bonus: true })
        );
        assert!(!spec.is_enabled(ScoreKind::ContextNovelty));
        assert_eq!(
            spec.columns(),
            vec![ScoreKind::WordNovelty, ScoreKind::RhythmicScore, ScoreKind::TotalScore]
        );
    }

    #[test]
    fn columns_follow_declaration_order() {
        let spec = WeightSpec::parse("PHONETIC_SCORE:+0.1,WORD_NOVELTY:1").unwrap();
        assert_eq!(
            spec.columns(),
            vec![ScoreKind::WordNovelty, ScoreKind::PhoneticScore, ScoreKind::TotalScore]
        );
    }

    #[test]
    fn last_duplicate_wins() {
        let spec = WeightSpec::parse("WORD_NOVELTY:0.2,WORD_NOVELTY:+0.3").unwrap();
        assert_eq!(
            spec.weight(ScoreKind::WordNovelty),
            Some(Weight { weight: 0.3, is_bonus: true })
        );
    }

    #[test]
    fn unknown_dimension_fails_fast() {
        assert!(matches!(
            WeightSpec::parse("WORD_NOVELTY:0.5,ORIGINALITY:0.5"),
            Err(CreativityError::UnknownScore(name)) if name == "ORIGINALITY"
        ));
    }

    #[test]
    fn malformed_entries_are_rejected() {
        assert!(WeightSpec::parse("WORD_NOVELTY").is_err());
        assert!(WeightSpec::parse("WORD_NOVELTY:abc").is_err());
        assert!(WeightSpec::parse("WORD_NOVELTY:1.5").is_err());
        assert!(WeightSpec::parse("TOTAL_SCORE:0.5").is_err());
        assert!(WeightSpec::parse(" , ").is_err());
    }

    #[test]
    fn lookup_config_defaults() {
        let config = LookupConfig::default();
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_retries, 0);
        assert!(config.search_api_key.is_none());
    }

    #[test]
    fn lookup_config_fills_missing_fields_from_defaults() {
        let config: LookupConfig =
            serde_json::from_str(r#"{ "search_api_key": "abc", "max_retries": 2 }"#).unwrap();
        assert_eq!(config.search_api_key.as_deref(), Some("abc"));
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.search_base, LookupConfig::default().search_base);
    }
}
