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

/// Confidence bounds for knowledge entries
pub const MIN_CONFIDENCE: u32 = 1;
pub const MAX_CONFIDENCE: u32 = 10;

/// Words with this many chars or fewer never become question keywords
pub const MIN_KEYWORD_CHARS: usize = 3;

/// Number of leading keywords that form a generated question key
pub const QUESTION_KEYWORD_COUNT: usize = 3;

/// Char window for key-fact candidate sentences (exclusive bounds)
pub const FACT_MIN_CHARS: usize = 30;
pub const FACT_MAX_CHARS: usize = 200;

/// Word-count window that marks a medium-length sentence as a likely fact
pub const FACT_MIN_WORDS: usize = 8;
pub const FACT_MAX_WORDS: usize = 20;

/// Phrases that mark a sentence as a definition or conclusion
pub const SIGNAL_KEYWORDS: &[&str] = &[
    "definition",
    "is called",
    "means",
    "therefore",
    "thus",
    "important",
    "key",
    "main",
    "primary",
];

/// Char window for key-point sentences in outlines (exclusive bounds)
pub const KEY_POINT_MIN_CHARS: usize = 30;
pub const KEY_POINT_MAX_CHARS: usize = 300;

/// Heading lines that start a new chapter in a flat text blob.
/// Matches "Chapter 3", "Part II", "Section 4", "2. Background" and
/// markdown-style "# Heading" lines.
pub const HEADING_PATTERN: &str =
    r"(?i)^\s*(?:(?:chapter|part|section)\s+(?:\d+|[ivxlc]+)\b.*|\d+\.\s+\S.*|#{1,6}\s+\S.*)$";

/// File name of the persisted knowledge base inside the storage directory
pub const KNOWLEDGE_DB_FILE: &str = "knowledge.json";

/// Words excluded from frequency counting when scoring key points.
/// Words of MIN_KEYWORD_CHARS or fewer are skipped before this list applies.
pub const STOPWORDS: &[&str] = &[
    "about", "after", "against", "also", "because", "been", "before", "being", "between", "both",
    "could", "does", "during", "each", "every", "from", "have", "into", "more", "most", "must",
    "only", "other", "over", "said", "shall", "should", "some", "such", "than", "that", "their",
    "them", "then", "there", "these", "they", "this", "those", "through", "under", "upon", "very",
    "were", "what", "when", "where", "which", "while", "will", "with", "would", "your",
];
