// src/scoring/rhythm.rs
use crate::core::phonetic::{PhoneticStrategy, WordSound};
use crate::core::types::{clamp_score, MAX_SCORE};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

/// Points per rhyme component before the per-rhyme cap.
const POINTS_PER_STEP: usize = 5;

/// A set of words sharing a trailing sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rhyme {
    pub words: BTreeSet<String>,
    /// The longest shared trailing code
    pub sound: String,
}

impl Rhyme {
    /// Rhyme length and group size each earn up to 20 points.
    pub fn points(&self) -> usize {
        let cap = MAX_SCORE as usize;
        let length = self.sound.chars().count();
        let length_points = (length * POINTS_PER_STEP).saturating_sub(POINTS_PER_STEP).min(cap);
        let size_points = (self.words.len().saturating_sub(1) * POINTS_PER_STEP).min(cap);
        length_points + size_points
    }
}

fn tail(chars: &[char], n: usize) -> &[char] {
    &chars[chars.len().saturating_sub(n)..]
}

/// Finds every rhyme in a sentence.
///
/// Each pair of distinct words is compared from the end of their codes
/// inward until the code suffixes differ. A shared suffix of length `x`
/// counts only if the words themselves (tail-normalized beyond the first
/// sound) also agree on their last `x + 1` letters; otherwise that length
/// is skipped. When several sounds bind the same word group, the longest
/// sound is kept.
pub fn find_rhymes(encoding: &[WordSound], strategy: &dyn PhoneticStrategy) -> Vec<Rhyme> {
    let mut sound_groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for (i, first) in encoding.iter().enumerate() {
        for second in &encoding[i + 1..] {
            if first.word == second.word {
                continue;
            }
            let sound1: Vec<char> = first.code.chars().collect();
            let sound2: Vec<char> = second.code.chars().collect();

            for x in 1..=sound1.len().min(sound2.len()) {
                if tail(&sound1, x) != tail(&sound2, x) {
                    break;
                }

                let (word1, word2) = if x > 1 {
                    (
                        strategy.normalize_rhyme_tail(&first.word),
                        strategy.normalize_rhyme_tail(&second.word),
                    )
                } else {
                    (first.word.clone(), second.word.clone())
                };
                let word1: Vec<char> = word1.chars().collect();
                let word2: Vec<char> = word2.chars().collect();
                if tail(&word1, x + 1) != tail(&word2, x + 1) {
                    continue;
                }

                let group = sound_groups.entry(tail(&sound1, x).iter().collect()).or_default();
                group.insert(first.word.clone());
                group.insert(second.word.clone());
            }
        }
    }

    let mut longest: BTreeMap<BTreeSet<String>, String> = BTreeMap::new();
    for (sound, words) in sound_groups {
        match longest.entry(words) {
            Entry::Vacant(slot) => {
                slot.insert(sound);
            }
            Entry::Occupied(mut slot) => {
                if sound.chars().count() > slot.get().chars().count() {
                    slot.insert(sound);
                }
            }
        }
    }

    longest
        .into_iter()
        .map(|(words, sound)| Rhyme { words, sound })
        .collect()
}

/// Sum of rhyme points, saturating at 20.
pub fn rhythmic_score(encoding: &[WordSound], strategy: &dyn PhoneticStrategy) -> u8 {
    if encoding.len() < 2 {
        return 0;
    }
    let total: usize = find_rhymes(encoding, strategy).iter().map(Rhyme::points).sum();
    clamp_score(total.min(MAX_SCORE as usize) as i64)
}
