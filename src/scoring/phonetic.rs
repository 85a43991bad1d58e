// src/scoring/phonetic.rs
use crate::core::phonetic::WordSound;
use crate::core::types::{clamp_score, round_score, MAX_SCORE};
use crate::fuzzy::distance::{levenshtein, longest_common_substring};

/// Normalized (edit distance, common substring) of one pair of codes.
/// Edit distance is divided by the longer code, the common substring by
/// the shorter one. Empty codes contribute 0.
pub fn pair_similarity(code1: &str, code2: &str) -> (f64, f64) {
    let len1 = code1.chars().count();
    let len2 = code2.chars().count();
    let longer = len1.max(len2);
    let shorter = len1.min(len2);

    let distance = if longer == 0 {
        0.0
    } else {
        levenshtein(code1, code2) as f64 / longer as f64
    };
    let common = if shorter == 0 {
        0.0
    } else {
        longest_common_substring(code1, code2) as f64 / shorter as f64
    };
    (distance, common)
}

/// How alike the words of a sentence sound, over all unordered pairs.
pub fn phonetic_score(encoding: &[WordSound]) -> u8 {
    let mut pairs = 0usize;
    let mut distance_sum = 0.0;
    let mut common_sum = 0.0;

    for (i, first) in encoding.iter().enumerate() {
        for second in &encoding[i + 1..] {
            let (distance, common) = pair_similarity(&first.code, &second.code);
            distance_sum += distance;
            common_sum += common;
            pairs += 1;
        }
    }

    if pairs == 0 {
        return 0;
    }
    let max = MAX_SCORE as f64;
    let score = 0.5 * (1.0 - distance_sum / pairs as f64) * max + 0.5 * (common_sum / pairs as f64) * max;
    clamp_score(round_score(score))
}
