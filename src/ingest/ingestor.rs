use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

use crate::config::IngestConfig;
use crate::constants::{
    FACT_MAX_CHARS, FACT_MAX_WORDS, FACT_MIN_CHARS, FACT_MIN_WORDS, MIN_KEYWORD_CHARS,
    QUESTION_KEYWORD_COUNT, SIGNAL_KEYWORDS,
};
use crate::knowledge::key::normalize_key;
use crate::knowledge::store::KnowledgeStore;
use crate::knowledge::types::{IngestResult, SourceRecord};
use crate::storage;

/// Turns a flat text blob into sentence-level knowledge entries.
///
/// Each learnable sentence becomes a question/answer pair: the key is the
/// sentence's first few long words, the answer is the sentence itself.
pub struct Ingestor {
    config: IngestConfig,
}

impl Ingestor {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Ingest a document into the store, deduplicated on content fingerprint.
    /// A byte-identical document that was already ingested is a cached no-op.
    pub fn ingest(
        &self,
        store: &mut KnowledgeStore,
        path: &Path,
        text: &str,
    ) -> Result<IngestResult> {
        let fingerprint = storage::content_fingerprint(text);

        if store.is_ingested(&fingerprint) {
            debug!(path = %path.display(), "document already ingested");
            return Ok(IngestResult {
                path: path.display().to_string(),
                facts_learned: 0,
                was_cached: true,
            });
        }

        let facts_learned = self.learn_from_text(store, text)?;
        store.record_source(SourceRecord::new(path, &fingerprint, facts_learned))?;
        info!(path = %path.display(), facts_learned, "document ingested");

        Ok(IngestResult {
            path: path.display().to_string(),
            facts_learned,
            was_cached: false,
        })
    }

    /// Learn question/answer facts from free text. Returns the number of
    /// facts learned, capped at `max_facts_per_document`.
    pub fn learn_from_text(&self, store: &mut KnowledgeStore, text: &str) -> Result<usize> {
        let mut learned = 0;

        for sentence in split_sentences(text) {
            let chars = sentence.chars().count();
            if chars <= self.config.min_sentence_chars || chars >= self.config.max_sentence_chars {
                continue;
            }

            let keywords: Vec<&str> = sentence
                .split_whitespace()
                .filter(|w| w.chars().count() > MIN_KEYWORD_CHARS)
                .collect();
            if keywords.len() < QUESTION_KEYWORD_COUNT {
                continue;
            }

            // Symbol runs (separator lines, ASCII art) can pass the length
            // filter while carrying no alphanumeric content. Such a key would
            // normalize to nothing, so the sentence is not learnable.
            let key = keywords[..QUESTION_KEYWORD_COUNT].join(" ");
            if normalize_key(&key).is_empty() {
                continue;
            }

            store.learn(&key, &sentence)?;
            learned += 1;

            if learned >= self.config.max_facts_per_document {
                break;
            }
        }

        Ok(learned)
    }

    /// Pick out the sentences most likely to carry a definition or
    /// conclusion: either they contain a signal phrase, or they are of
    /// medium length. First `max_key_facts` hits win.
    pub fn extract_key_facts(&self, text: &str) -> Vec<String> {
        text.split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| {
                let chars = s.chars().count();
                chars > FACT_MIN_CHARS && chars < FACT_MAX_CHARS
            })
            .filter(|s| {
                let lower = s.to_lowercase();
                let has_signal = SIGNAL_KEYWORDS.iter().any(|k| lower.contains(k));
                let words = s.split_whitespace().count();
                has_signal || (FACT_MIN_WORDS..=FACT_MAX_WORDS).contains(&words)
            })
            .take(self.config.max_key_facts)
            .map(str::to_string)
            .collect()
    }
}

/// Split raw text into trimmed, non-empty sentences
pub fn split_sentences(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(['.', '!', '?', '\n'])
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
