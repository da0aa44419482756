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

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Knowledge base configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Number of stored answers that counts as fully trained (drives the
    /// learning level percentage in stats)
    pub learning_level_target: usize,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            learning_level_target: 50,
        }
    }
}

/// Document ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Hard cap on facts learned from a single document
    pub max_facts_per_document: usize,
    /// Sentence char-length window for learnable facts (exclusive bounds)
    pub min_sentence_chars: usize,
    pub max_sentence_chars: usize,
    /// Maximum key facts surfaced per document
    pub max_key_facts: usize,
    /// Key point sentences kept per chapter in outlines
    pub max_key_points: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_facts_per_document: 50,
            min_sentence_chars: 20,
            max_sentence_chars: 500,
            max_key_facts: 10,
            max_key_points: 5,
        }
    }
}

/// Chat session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Name the assistant introduces itself with
    pub assistant_name: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            assistant_name: "Pocketmind".to_string(),
        }
    }
}

/// Main configuration for pocketmind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub knowledge: KnowledgeConfig,
    pub ingest: IngestConfig,
    pub chat: ChatConfig,
}

impl Config {
    /// Load configuration from config.toml file
    /// First tries to load from system config directory, falls back to embedded template
    pub fn load() -> Result<Self> {
        // Try to load from system config directory
        let config_path = crate::storage::get_system_config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            // Config doesn't exist, create from template
            let template_content = include_str!("../config-templates/default.toml");
            let config: Self = toml::from_str(template_content)?;

            // Save to system config directory
            if let Some(parent) = config_path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&config_path, template_content)?;

            Ok(config)
        }
    }
}
