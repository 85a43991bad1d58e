//! Novelty lookups: word-frequency classes and search-result counts.
//!
//! Callers only ever see `Option`; every transport, status or decoding
//! problem becomes `None` here.

use crate::config::LookupConfig;
use crate::core::phonetic::{Endpoint, Language, LookupKind};
use crate::error::{CreativityError, Result};
use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// The external services the novelty scores depend on.
pub trait NoveltyLookup {
    /// Frequency class of `word` in the language corpus; lower is more common.
    fn word_frequency_class(&self, word: &str, language: Language) -> Option<u32>;

    /// Number of search results for an exact phrase query.
    fn phrase_result_count(&self, phrase: &str, language: Language) -> Option<u64>;
}

impl<T: NoveltyLookup + ?Sized> NoveltyLookup for &T {
    fn word_frequency_class(&self, word: &str, language: Language) -> Option<u32> {
        (**self).word_frequency_class(word, language)
    }

    fn phrase_result_count(&self, phrase: &str, language: Language) -> Option<u64> {
        (**self).phrase_result_count(phrase, language)
    }
}

/// Why a single lookup produced nothing.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("search reported failure")]
    Unsuccessful,

    #[error("missing field {0}")]
    MissingField(&'static str),

    #[error("no API key configured")]
    MissingApiKey,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Blocking HTTP implementation backed by the Leipzig corpora API and a
/// search-results API.
pub struct HttpLookup {
    client: Client,
    config: LookupConfig,
    endpoints: HashMap<(Language, LookupKind), Endpoint>,
}

impl HttpLookup {
    pub fn new(config: LookupConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CreativityError::LookupClient(e.to_string()))?;
        if config.search_api_key.is_none() {
            warn!("No search API key configured, CONTEXT_NOVELTY lookups will score 0");
        }
        let endpoints = Language::ALL
            .into_iter()
            .flat_map(|language| {
                let strategy = language.strategy();
                LookupKind::ALL
                    .into_iter()
                    .map(move |kind| ((language, kind), strategy.endpoint(kind)))
                    .collect::<Vec<_>>()
            })
            .collect();
        Ok(Self { client, config, endpoints })
    }

    fn endpoint(&self, language: Language, kind: LookupKind) -> Option<Endpoint> {
        self.endpoints.get(&(language, kind)).copied()
    }

    fn with_retries<T>(
        &self,
        what: &str,
        mut attempt: impl FnMut() -> std::result::Result<T, LookupError>,
    ) -> Option<T> {
        let attempts = self.config.max_retries + 1;
        for n in 1..=attempts {
            match attempt() {
                Ok(value) => return Some(value),
                // Nothing to retry without a key.
                Err(LookupError::MissingApiKey) => return None,
                Err(e) => warn!("Lookup for {} failed (attempt {}/{}): {}", what, n, attempts, e),
            }
        }
        None
    }

    fn fetch_frequency_class(&self, word: &str, corpus: &str) -> std::result::Result<u32, LookupError> {
        let url = word_frequency_url(&self.config.word_frequency_base, corpus, word)?;
        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }
        let json: Value = response.json()?;
        parse_frequency_class(&json)
    }

    fn fetch_result_count(&self, phrase: &str, endpoint: Endpoint) -> std::result::Result<u64, LookupError> {
        let api_key = self.config.search_api_key.as_deref().ok_or(LookupError::MissingApiKey)?;
        let Endpoint::Search { google_domain, location, gl, hl } = endpoint else {
            return Err(LookupError::MissingField("search endpoint"));
        };
        let response = self
            .client
            .get(&self.config.search_base)
            .query(&[
                ("api_key", api_key),
                ("q", phrase),
                ("google_domain", google_domain),
                ("location", location),
                ("gl", gl),
                ("hl", hl),
                ("page", "1"),
                ("output", "json"),
            ])
            .send()?;
        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }
        let json: Value = response.json()?;
        parse_result_count(&json)
    }
}

impl NoveltyLookup for HttpLookup {
    fn word_frequency_class(&self, word: &str, language: Language) -> Option<u32> {
        let Some(Endpoint::Corpus { corpus }) = self.endpoint(language, LookupKind::WordFrequency) else {
            return None;
        };
        let class = self.with_retries(word, || self.fetch_frequency_class(word, corpus));
        debug!("frequency class of '{}': {:?}", word, class);
        class
    }

    fn phrase_result_count(&self, phrase: &str, language: Language) -> Option<u64> {
        let endpoint = self.endpoint(language, LookupKind::PhraseResultCount)?;
        let count = self.with_retries(phrase, || self.fetch_result_count(phrase, endpoint));
        debug!("result count of {}: {:?}", phrase, count);
        count
    }
}

/// `<base>/<corpus>/word/<word>`, with the word escaped as one path segment.
pub fn word_frequency_url(base: &str, corpus: &str, word: &str) -> std::result::Result<Url, LookupError> {
    let mut url = Url::parse(base).map_err(|e| LookupError::InvalidUrl(format!("{}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| LookupError::InvalidUrl(format!("{} cannot take path segments", base)))?
        .pop_if_empty()
        .push(corpus)
        .push("word")
        .push(word);
    Ok(url)
}

/// Reads `frequencyClass` from a corpus API response.
pub fn parse_frequency_class(json: &Value) -> std::result::Result<u32, LookupError> {
    json.get("frequencyClass")
        .and_then(Value::as_u64)
        .map(|class| class.min(u32::MAX as u64) as u32)
        .ok_or(LookupError::MissingField("frequencyClass"))
}

/// Reads `search_information.total_results`, which may be a number or a
/// numeric string, once `request_info.success` is true.
pub fn parse_result_count(json: &Value) -> std::result::Result<u64, LookupError> {
    let success = json
        .pointer("/request_info/success")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !success {
        return Err(LookupError::Unsuccessful);
    }
    match json.pointer("/search_information/total_results") {
        Some(Value::Number(n)) => n.as_u64().ok_or(LookupError::MissingField("total_results")),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| LookupError::MissingField("total_results")),
        _ => Err(LookupError::MissingField("total_results")),
    }
}
