// src/core/phonetic.rs
use crate::error::{CreativityError, Result};
use rphonetic::{Cologne, Encoder, Soundex};
use std::fmt;
use std::str::FromStr;

/// A word together with its phonetic code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSound {
    pub word: String,
    pub code: String,
}

impl WordSound {
    pub fn new(word: impl Into<String>, code: impl Into<String>) -> Self {
        Self { word: word.into(), code: code.into() }
    }
}

/// Ordered (word, code) pairs for one sentence.
pub type PhoneticEncoding = Vec<WordSound>;

/// Which external lookup a caller is about to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    WordFrequency,
    PhraseResultCount,
}

/// Language-specific parameters of a lookup endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Word-frequency corpus name
    Corpus { corpus: &'static str },
    /// Search engine localisation parameters
    Search {
        google_domain: &'static str,
        location: &'static str,
        gl: &'static str,
        hl: &'static str,
    },
}

/// Everything that differs between languages: how words sound, how
/// rhyme tails are normalized, and where lookups go.
pub trait PhoneticStrategy: Send + Sync {
    /// Encodes an already normalized (lowercase, edge-stripped) sentence.
    fn encode(&self, sentence: &str) -> PhoneticEncoding;

    fn endpoint(&self, kind: LookupKind) -> Endpoint;

    /// Maps the final letter of a word onto its rhyme-equivalent letter.
    fn normalize_rhyme_tail(&self, word: &str) -> String {
        word.to_string()
    }
}

/// Cologne phonetics over the whole sentence at once.
pub struct GermanStrategy {
    encoder: Cologne,
}

impl GermanStrategy {
    pub fn new() -> Self {
        Self { encoder: Cologne }
    }
}

impl Default for GermanStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneticStrategy for GermanStrategy {
    fn encode(&self, sentence: &str) -> PhoneticEncoding {
        // Hyphenated compounds are separate sound units.
        sentence
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|word| !word.is_empty())
            .map(|word| WordSound::new(word, self.encoder.encode(word)))
            .collect()
    }

    fn endpoint(&self, kind: LookupKind) -> Endpoint {
        match kind {
            LookupKind::WordFrequency => Endpoint::Corpus { corpus: "deu_news_2012_1M" },
            LookupKind::PhraseResultCount => Endpoint::Search {
                google_domain: "google.de",
                location: "Germany",
                gl: "de",
                hl: "de",
            },
        }
    }

    /// d/t and s/z are interchangeable at the end of a German word.
    fn normalize_rhyme_tail(&self, word: &str) -> String {
        let mut normalized = word.to_string();
        match normalized.pop() {
            Some('d') => normalized.push('t'),
            Some('s') => normalized.push('z'),
            Some(other) => normalized.push(other),
            None => {}
        }
        normalized
    }
}

/// Folds Latin diacritics onto ASCII and drops every other non-letter.
fn ascii_letters(word: &str) -> String {
    let mut folded = String::with_capacity(word.len());
    for c in word.chars() {
        match c {
            'a'..='z' | 'A'..='Z' => folded.push(c),
            'à' | 'á' | 'â' | 'ä' | 'ã' | 'å' | 'æ' => folded.push('a'),
            'ç' => folded.push('c'),
            'è' | 'é' | 'ê' | 'ë' => folded.push('e'),
            'ì' | 'í' | 'î' | 'ï' => folded.push('i'),
            'ñ' => folded.push('n'),
            'ò' | 'ó' | 'ô' | 'ö' | 'õ' | 'ø' => folded.push('o'),
            'ù' | 'ú' | 'û' | 'ü' => folded.push('u'),
            'ý' | 'ÿ' => folded.push('y'),
            'ß' => folded.push_str("ss"),
            _ => {}
        }
    }
    folded
}

/// Soundex, one word at a time.
pub struct EnglishStrategy {
    encoder: Soundex,
}

impl EnglishStrategy {
    pub fn new() -> Self {
        Self { encoder: Soundex::default() }
    }
}

impl Default for EnglishStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneticStrategy for EnglishStrategy {
    fn encode(&self, sentence: &str) -> PhoneticEncoding {
        sentence
            .split_whitespace()
            .map(|word| {
                // Soundex only accepts ASCII letters.
                let letters = ascii_letters(word);
                let code = if letters.is_empty() {
                    String::new()
                } else {
                    self.encoder.encode(&letters)
                };
                WordSound::new(word, code)
            })
            .collect()
    }

    fn endpoint(&self, kind: LookupKind) -> Endpoint {
        match kind {
            LookupKind::WordFrequency => Endpoint::Corpus { corpus: "eng_news_2013_3M" },
            LookupKind::PhraseResultCount => Endpoint::Search {
                google_domain: "google.com",
                location: "United States",
                gl: "us",
                hl: "en",
            },
        }
    }
}

/// Language selector for phonetic encoding and lookup endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    De,
    En,
}

impl LookupKind {
    pub const ALL: [LookupKind; 2] = [LookupKind::WordFrequency, LookupKind::PhraseResultCount];
}

impl Language {
    pub const ALL: [Language; 2] = [Language::De, Language::En];

    pub fn strategy(self) -> Box<dyn PhoneticStrategy> {
        match self {
            Language::De => Box::new(GermanStrategy::new()),
            Language::En => Box::new(EnglishStrategy::new()),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::De => "DE",
            Language::En => "EN",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CreativityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DE" => Ok(Language::De),
            "EN" => Ok(Language::En),
            _ => Err(CreativityError::UnsupportedLanguage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn german_encodes_each_word() {
        let encoding = GermanStrategy::new().encode("kiste tasche dose hose");
        let words: Vec<&str> = encoding.iter().map(|ws| ws.word.as_str()).collect();
        assert_eq!(words, vec!["kiste", "tasche", "dose", "hose"]);
        assert!(encoding.iter().all(|ws| !ws.code.is_empty()));
        assert!(encoding[2].code.ends_with('8'));
        assert!(encoding[3].code.ends_with('8'));
    }

    #[test]
    fn german_splits_hyphenated_words() {
        let encoding = GermanStrategy::new().encode("bett-decke liegt");
        assert_eq!(encoding.len(), 3);
        assert_eq!(encoding[0].word, "bett");
    }

    #[test]
    fn english_uses_soundex() {
        let encoding = EnglishStrategy::new().encode("robert rupert");
        assert_eq!(encoding.len(), 2);
        assert_eq!(encoding[0].code, "R163");
        assert_eq!(encoding[0].code, encoding[1].code);
    }

    #[test]
    fn english_folds_accented_letters() {
        let encoding = EnglishStrategy::new().encode("cats adore fresh café");
        assert_eq!(encoding.len(), 4);
        assert_eq!(encoding[3].word, "café");
        assert_eq!(encoding[3].code, EnglishStrategy::new().encode("cafe")[0].code);

        let naive = EnglishStrategy::new().encode("naïve");
        assert_eq!(naive[0].code, EnglishStrategy::new().encode("naive")[0].code);
    }

    #[test]
    fn english_words_without_letters_get_empty_codes() {
        let encoding = EnglishStrategy::new().encode("über 42 ☃ straße");
        assert_eq!(encoding.len(), 4);
        assert!(!encoding[0].code.is_empty());
        assert_eq!(encoding[1].code, "");
        assert_eq!(encoding[2].code, "");
        assert_eq!(encoding[3].code, EnglishStrategy::new().encode("strasse")[0].code);
    }

    #[test]
    fn german_tail_normalization() {
        let de = GermanStrategy::new();
        assert_eq!(de.normalize_rhyme_tail("hund"), "hunt");
        assert_eq!(de.normalize_rhyme_tail("haus"), "hauz");
        assert_eq!(de.normalize_rhyme_tail("baum"), "baum");
        assert_eq!(de.normalize_rhyme_tail(""), "");
        assert_eq!(EnglishStrategy::new().normalize_rhyme_tail("hand"), "hand");
    }

    #[test]
    fn language_parsing() {
        assert_eq!("de".parse::<Language>().unwrap(), Language::De);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert!("FR".parse::<Language>().is_err());
    }
}
