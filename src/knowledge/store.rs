// Copyright 2026 Pocketmind Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::key::normalize_key;
use super::types::{KnowledgeEntry, KnowledgeStats, LearnOutcome, SourceRecord};
use crate::config::KnowledgeConfig;

/// On-disk shape of the knowledge base
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    /// Normalized question key -> answers under that key
    entries: HashMap<String, Vec<KnowledgeEntry>>,
    /// Ingested document ledger, keyed by content fingerprint
    #[serde(default)]
    sources: HashMap<String, SourceRecord>,
}

/// Persistent normalized-key -> ranked-answers store.
///
/// The whole base lives in memory and is flushed to a single JSON file
/// after every mutation. Lookup is exact on the normalized key; the best
/// answer under a key maximizes `confidence * usage_count`.
pub struct KnowledgeStore {
    path: PathBuf,
    config: KnowledgeConfig,
    data: StoreData,
}

impl KnowledgeStore {
    /// Open the store at `path`, loading existing data if present
    pub fn open(path: &Path, config: KnowledgeConfig) -> Result<Self> {
        let data = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read knowledge base at {}", path.display()))?;
            serde_json::from_str(&content).with_context(|| {
                format!("Knowledge base at {} is not valid JSON", path.display())
            })?
        } else {
            StoreData::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            config,
            data,
        })
    }

    /// Store a question/answer pair.
    ///
    /// The same pair learned again reinforces the existing entry; a new
    /// answer under a known question becomes an alternative; an unknown
    /// question starts a fresh list.
    pub fn learn(&mut self, question: &str, answer: &str) -> Result<LearnOutcome> {
        let key = normalize_key(question);
        if key.is_empty() {
            anyhow::bail!("Cannot learn a question with no alphanumeric content");
        }

        let entries = self.data.entries.entry(key.clone()).or_default();

        let outcome = if let Some(existing) = entries.iter_mut().find(|e| e.answer == answer) {
            existing.reinforce();
            LearnOutcome::Reinforced
        } else if entries.is_empty() {
            entries.push(KnowledgeEntry::new(question, answer));
            LearnOutcome::NewQuestion
        } else {
            entries.push(KnowledgeEntry::new(question, answer));
            LearnOutcome::NewAnswer
        };

        debug!(key = %key, ?outcome, "learned answer");
        self.save()?;
        Ok(outcome)
    }

    /// Look up the best stored answer for a question.
    ///
    /// Exact normalized-key lookup, no fuzzy matching. Ties resolve to
    /// the earliest stored entry.
    pub fn find_answer(&self, question: &str) -> Option<&KnowledgeEntry> {
        let key = normalize_key(question);
        self.data
            .entries
            .get(&key)
            .and_then(|entries| best_entry(entries))
    }

    /// Apply user feedback to the best answer under a question.
    /// Returns false if the question is unknown.
    pub fn record_feedback(&mut self, question: &str, positive: bool) -> Result<bool> {
        let key = normalize_key(question);
        let Some(entries) = self.data.entries.get_mut(&key) else {
            return Ok(false);
        };
        let Some(index) = best_entry_index(entries) else {
            return Ok(false);
        };

        entries[index].rate(positive);
        debug!(key = %key, positive, "recorded feedback");
        self.save()?;
        Ok(true)
    }

    /// Remove every answer stored under a question.
    /// Returns false if the question was unknown.
    pub fn forget(&mut self, question: &str) -> Result<bool> {
        let key = normalize_key(question);
        let removed = self.data.entries.remove(&key).is_some();
        if removed {
            info!(key = %key, "forgot question");
            self.save()?;
        }
        Ok(removed)
    }

    /// Wipe all entries and the source ledger
    pub fn clear_all(&mut self) -> Result<()> {
        self.data = StoreData::default();
        info!("cleared all knowledge");
        self.save()
    }

    /// Iterate all stored entries, flattened, with their normalized keys
    pub fn entries(&self) -> impl Iterator<Item = (&str, &KnowledgeEntry)> + '_ {
        self.data
            .entries
            .iter()
            .flat_map(|(key, entries)| entries.iter().map(move |e| (key.as_str(), e)))
    }

    pub fn stats(&self) -> KnowledgeStats {
        let total_questions = self.data.entries.len();
        let total_answers: usize = self.data.entries.values().map(|v| v.len()).sum();
        let total_usage: u64 = self
            .data
            .entries
            .values()
            .flatten()
            .map(|e| e.usage_count as u64)
            .sum();

        let target = self.config.learning_level_target.max(1);
        let learning_level = ((total_answers * 100 / target).min(100)) as u32;

        KnowledgeStats {
            total_questions,
            total_answers,
            total_usage,
            total_sources: self.data.sources.len(),
            learning_level,
        }
    }

    /// Whether a document with this content fingerprint was already ingested
    pub fn is_ingested(&self, fingerprint: &str) -> bool {
        self.data.sources.contains_key(fingerprint)
    }

    /// Record an ingested document in the source ledger
    pub fn record_source(&mut self, record: SourceRecord) -> Result<()> {
        self.data
            .sources
            .insert(record.fingerprint.clone(), record);
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create storage directory {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write knowledge base to {}", self.path.display()))
    }
}

/// Best entry under a key: maximum score, earliest stored wins ties
fn best_entry(entries: &[KnowledgeEntry]) -> Option<&KnowledgeEntry> {
    entries
        .iter()
        .reduce(|best, e| if e.score() > best.score() { e } else { best })
}

fn best_entry_index(entries: &[KnowledgeEntry]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, entry) in entries.iter().enumerate() {
        match best {
            Some(b) if entries[b].score() >= entry.score() => {}
            _ => best = Some(i),
        }
    }
    best
}
