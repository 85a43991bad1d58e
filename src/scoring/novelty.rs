// src/scoring/novelty.rs
use crate::core::phonetic::Language;
use crate::core::types::{clamp_score, round_score, MAX_SCORE, SENTENCE_LENGTH};
use crate::lookup::NoveltyLookup;
use tracing::debug;

/// Context novelty starts with this many classes...
pub const NOVELTY_CLASSES: u32 = 20;
/// ...and fewer results than this land in the top class.
pub const NOVELTY_UPPER_BOUND: u64 = 512;

/// Non-adjacent word pairs queried in addition to the consecutive ones.
const SKIP_PAIRS: [(usize, usize); 3] = [(0, 2), (0, 3), (1, 3)];

/// Maps a search-result count onto a class: every doubling of the bound
/// beyond `upper_bound` costs one class, never going below 1.
pub fn novelty_class(num_results: u64, num_classes: u32, upper_bound: u64) -> u32 {
    let mut classes = num_classes;
    let mut bound = upper_bound;
    while num_results > bound && classes > 1 {
        bound = bound.saturating_mul(2);
        classes -= 1;
    }
    classes
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Rarity of a single word: the more common of its lowercase and
/// capitalized spellings, `None` when neither is known.
fn word_class<L: NoveltyLookup>(lookup: &L, word: &str, language: Language) -> Option<u32> {
    let lower = word.to_lowercase();
    let upper = capitalize(&lower);
    [lower, upper]
        .iter()
        .filter_map(|form| lookup.word_frequency_class(form, language))
        .map(|class| (class + 1).min(MAX_SCORE as u32))
        .min()
}

/// Mean frequency-class rarity of the four words. Unknown words add 0 but
/// still count in the denominator.
pub fn word_novelty<L: NoveltyLookup>(
    tokens: &[String; SENTENCE_LENGTH],
    language: Language,
    lookup: &L,
) -> u8 {
    let sum: u32 = tokens
        .iter()
        .map(|token| {
            let class = word_class(lookup, token, language);
            if class.is_none() {
                debug!("'{}' unknown to the frequency corpus, scoring 0", token);
            }
            class.unwrap_or(0)
        })
        .sum();
    clamp_score(round_score(sum as f64 / SENTENCE_LENGTH as f64))
}

/// The six phrase queries of a sentence: three consecutive pairs joined
/// with `+`, three skip pairs joined with `*`, each quoted.
pub fn context_phrases(tokens: &[String; SENTENCE_LENGTH]) -> Vec<String> {
    let consecutive = tokens
        .windows(2)
        .map(|pair| format!("\"{} + {}\"", pair[0], pair[1]));
    let skipping = SKIP_PAIRS
        .iter()
        .map(|&(a, b)| format!("\"{} * {}\"", tokens[a], tokens[b]));
    consecutive.chain(skipping).collect()
}

/// Mean novelty class over the six phrase queries. Failed queries add 0.
pub fn context_novelty<L: NoveltyLookup>(
    tokens: &[String; SENTENCE_LENGTH],
    language: Language,
    lookup: &L,
) -> u8 {
    let phrases = context_phrases(tokens);
    let sum: u32 = phrases
        .iter()
        .map(|phrase| {
            lookup
                .phrase_result_count(phrase, language)
                .map(|count| novelty_class(count, NOVELTY_CLASSES, NOVELTY_UPPER_BOUND))
                .unwrap_or(0)
        })
        .sum();
    clamp_score(round_score(sum as f64 / phrases.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapLookup {
        classes: HashMap<String, u32>,
        counts: HashMap<String, u64>,
        queried: RefCell<Vec<String>>,
    }

    impl NoveltyLookup for MapLookup {
        fn word_frequency_class(&self, word: &str, _language: Language) -> Option<u32> {
            self.queried.borrow_mut().push(word.to_string());
            self.classes.get(word).copied()
        }

        fn phrase_result_count(&self, phrase: &str, _language: Language) -> Option<u64> {
            self.queried.borrow_mut().push(phrase.to_string());
            self.counts.get(phrase).copied()
        }
    }

    fn tokens(words: [&str; 4]) -> [String; 4] {
        words.map(String::from)
    }

    #[test]
    fn novelty_class_boundaries() {
        // The bound only doubles while the count exceeds it, so 512 stays in
        // class 20 and 10_000_000 lands in class 5. The sometimes quoted
        // 512 -> 19 and 10_000_000 -> 1 do not follow from that loop.
        assert_eq!(novelty_class(0, 20, 512), 20);
        assert_eq!(novelty_class(511, 20, 512), 20);
        assert_eq!(novelty_class(512, 20, 512), 20);
        assert_eq!(novelty_class(513, 20, 512), 19);
        assert_eq!(novelty_class(1024, 20, 512), 19);
        assert_eq!(novelty_class(1025, 20, 512), 18);
        assert_eq!(novelty_class(10_000_000, 20, 512), 5);
        assert_eq!(novelty_class(u64::MAX, 20, 512), 1);
    }

    #[test]
    fn capitalize_lowercases_the_rest() {
        assert_eq!(capitalize("über"), "Über");
        assert_eq!(capitalize("hOSE"), "Hose");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn word_novelty_takes_the_more_common_spelling() {
        let lookup = MapLookup {
            classes: HashMap::from([
                ("dose".to_string(), 14),
                ("Dose".to_string(), 11),
                ("hose".to_string(), 25),
                ("kiste".to_string(), 9),
                ("tasche".to_string(), 7),
            ]),
            ..Default::default()
        };
        // dose: min(15, 12) = 12, hose: 20, kiste: 10, tasche: 8 -> 50 / 4 = 12.5
        let score = word_novelty(&tokens(["kiste", "tasche", "dose", "hose"]), Language::De, &lookup);
        assert_eq!(score, 12);
        assert_eq!(lookup.queried.borrow().len(), 8);
    }

    #[test]
    fn unknown_words_still_count_in_denominator() {
        let lookup = MapLookup {
            classes: HashMap::from([("kiste".to_string(), 19)]),
            ..Default::default()
        };
        let score = word_novelty(&tokens(["kiste", "xq", "yq", "zq"]), Language::De, &lookup);
        assert_eq!(score, 5);
    }

    #[test]
    fn context_phrases_cover_six_pairs() {
        let phrases = context_phrases(&tokens(["a", "b", "c", "d"]));
        assert_eq!(
            phrases,
            vec!["\"a + b\"", "\"b + c\"", "\"c + d\"", "\"a * c\"", "\"a * d\"", "\"b * d\""]
        );
    }

    #[test]
    fn context_novelty_averages_classes() {
        let lookup = MapLookup {
            counts: HashMap::from([
                ("\"a + b\"".to_string(), 0),
                ("\"b + c\"".to_string(), 100),
                ("\"c + d\"".to_string(), 1000),
                ("\"a * c\"".to_string(), 10_000_000),
            ]),
            ..Default::default()
        };
        // 20 + 20 + 19 + 5 + 0 + 0 = 64 -> 11
        assert_eq!(context_novelty(&tokens(["a", "b", "c", "d"]), Language::En, &lookup), 11);
    }

    #[test]
    fn context_novelty_all_failed_is_zero() {
        let lookup = MapLookup::default();
        assert_eq!(context_novelty(&tokens(["a", "b", "c", "d"]), Language::De, &lookup), 0);
    }
}
