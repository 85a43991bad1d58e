// src/scoring/similarity.rs
use crate::core::types::{clamp_score, round_score, MAX_SCORE, SENTENCE_LENGTH};
use crate::core::vocabulary::{PopulationExtremes, VocabularyTable};

/// Rescales the mean relative frequency of the sentence's words against
/// the population extremes. Habitual words score near 0, unusual ones
/// near 20.
pub fn vocabulary_similarity(
    table: &VocabularyTable,
    entity: &str,
    tokens: &[String; SENTENCE_LENGTH],
) -> u8 {
    let Some(PopulationExtremes { min, max }) = table.extremes() else {
        return 0;
    };
    let mean = tokens
        .iter()
        .map(|word| table.frequency(entity, word))
        .sum::<f64>()
        / SENTENCE_LENGTH as f64;

    let rescaled = 1.0 - (mean - min) / (max - min).max(1.0);
    clamp_score(round_score(rescaled.clamp(0.0, 1.0) * MAX_SCORE as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Sample, SampleSet};
    use crate::core::vocabulary::VocabularyStats;

    fn stats(rows: &[(&str, &str, &str)]) -> VocabularyStats {
        let samples: SampleSet = rows
            .iter()
            .filter_map(|(s, v, sentence)| Sample::new(s, v, sentence))
            .collect();
        VocabularyStats::build(&samples)
    }

    #[test]
    fn identical_extremes_score_twenty() {
        let stats = stats(&[("s1", "EKEL", "eins zwei drei vier")]);
        let extremes = stats.by_subject.extremes().unwrap();
        assert_eq!(extremes.min, extremes.max);

        let tokens = ["eins", "zwei", "drei", "vier"].map(String::from);
        assert_eq!(vocabulary_similarity(&stats.by_subject, "s1", &tokens), 20);
        assert_eq!(vocabulary_similarity(&stats.by_variable, "EKEL", &tokens), 20);
    }

    #[test]
    fn repeated_words_lower_the_score() {
        let stats = stats(&[
            ("s1", "EKEL", "esel esel esel lacht"),
            ("s2", "EKEL", "eins zwei drei vier"),
        ]);
        let repetitive = ["esel", "esel", "esel", "lacht"].map(String::from);
        let varied = ["eins", "zwei", "drei", "vier"].map(String::from);

        // mean = (3 * 0.75 + 0.25) / 4 = 0.625, min = 0.25 -> 1 - 0.375 = 0.625 -> 12.5
        assert_eq!(vocabulary_similarity(&stats.by_subject, "s1", &repetitive), 12);
        assert_eq!(vocabulary_similarity(&stats.by_subject, "s2", &varied), 20);
        assert!(
            vocabulary_similarity(&stats.by_variable, "EKEL", &repetitive)
                < vocabulary_similarity(&stats.by_variable, "EKEL", &varied)
        );
    }

    #[test]
    fn empty_table_scores_zero() {
        let table = VocabularyTable::default();
        let tokens = ["a", "b", "c", "d"].map(String::from);
        assert_eq!(vocabulary_similarity(&table, "s1", &tokens), 0);
    }
}
