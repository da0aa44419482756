use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{MAX_CONFIDENCE, MIN_CONFIDENCE};

/// A stored question/answer pair with usage-weighted confidence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeEntry {
    /// Original phrasing of the question
    pub question: String,
    /// Answer text
    pub answer: String,
    /// Confidence score, always within [MIN_CONFIDENCE, MAX_CONFIDENCE]
    pub confidence: u32,
    /// Last time this entry was learned, served, or rated
    pub last_used: DateTime<Utc>,
    /// How many times this entry has been learned or served; never decreases
    pub usage_count: u32,
}

impl KnowledgeEntry {
    pub fn new(question: &str, answer: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            confidence: MIN_CONFIDENCE,
            last_used: Utc::now(),
            usage_count: 1,
        }
    }

    /// Ranking score; the best answer under a key maximizes this
    pub fn score(&self) -> u64 {
        self.confidence as u64 * self.usage_count as u64
    }

    /// Record that this exact pair was learned or served again
    pub fn reinforce(&mut self) {
        self.confidence = (self.confidence + 1).min(MAX_CONFIDENCE);
        self.usage_count += 1;
        self.last_used = Utc::now();
    }

    /// Apply user feedback to the confidence score, staying within bounds
    pub fn rate(&mut self, positive: bool) {
        self.confidence = if positive {
            (self.confidence + 1).min(MAX_CONFIDENCE)
        } else {
            self.confidence.saturating_sub(1).max(MIN_CONFIDENCE)
        };
        self.last_used = Utc::now();
    }
}

/// What a learn call did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnOutcome {
    /// First answer stored under a previously unknown question
    NewQuestion,
    /// Another answer added under an already known question
    NewAnswer,
    /// An existing question/answer pair was reinforced
    Reinforced,
}

/// Ledger record of an ingested document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRecord {
    pub id: String,
    pub path: String,
    pub fingerprint: String,
    pub facts_learned: usize,
    pub ingested_at: DateTime<Utc>,
}

impl SourceRecord {
    pub fn new(path: &Path, fingerprint: &str, facts_learned: usize) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            path: path.display().to_string(),
            fingerprint: fingerprint.to_string(),
            facts_learned,
            ingested_at: Utc::now(),
        }
    }
}

/// Result of an ingestion run
#[derive(Debug, Clone)]
pub struct IngestResult {
    pub path: String,
    pub facts_learned: usize,
    pub was_cached: bool,
}

/// Statistics about the knowledge base
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeStats {
    pub total_questions: usize,
    pub total_answers: usize,
    pub total_usage: u64,
    pub total_sources: usize,
    /// Percentage of the configured learning target reached, capped at 100
    pub learning_level: u32,
}
