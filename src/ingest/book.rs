use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashMap;

use crate::config::IngestConfig;
use crate::constants::{
    HEADING_PATTERN, KEY_POINT_MAX_CHARS, KEY_POINT_MIN_CHARS, MIN_KEYWORD_CHARS, STOPWORDS,
};

/// A chapter carved out of a flat text blob
#[derive(Debug, Clone)]
pub struct Chapter {
    pub title: String,
    pub content: String,
    pub key_points: Vec<String>,
}

/// Structured view of a document: chapters with their key points
#[derive(Debug, Clone)]
pub struct BookContent {
    pub title: String,
    pub chapters: Vec<Chapter>,
}

/// Derives chapters, key points, and recurring concepts from raw text.
///
/// Chapters split on heading lines; key points are the chapter sentences
/// whose words recur most often across that chapter.
pub struct Outliner {
    config: IngestConfig,
}

impl Outliner {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Build the chapter outline for a document
    pub fn outline(&self, title: &str, text: &str) -> Result<BookContent> {
        let heading = Regex::new(HEADING_PATTERN).context("Invalid heading pattern")?;

        let mut chapters = Vec::new();
        let mut current_title: Option<String> = None;
        let mut current_body = String::new();

        for line in text.lines() {
            let trimmed = line.trim();
            if !trimmed.is_empty() && heading.is_match(trimmed) {
                self.flush_chapter(&mut chapters, current_title.take(), &current_body);
                current_title = Some(clean_heading(trimmed));
                current_body.clear();
            } else {
                current_body.push_str(line);
                current_body.push('\n');
            }
        }
        self.flush_chapter(&mut chapters, current_title.take(), &current_body);

        // Heading-free documents become a single overview chapter
        if chapters.is_empty() {
            chapters.push(self.build_chapter("Overview".to_string(), text));
        }

        Ok(BookContent {
            title: title.to_string(),
            chapters,
        })
    }

    /// Most frequent terms across the whole document
    pub fn concepts(&self, text: &str, limit: usize) -> Vec<(String, usize)> {
        let frequencies = word_frequencies(text);
        let mut ranked: Vec<(String, usize)> = frequencies.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    }

    fn flush_chapter(&self, chapters: &mut Vec<Chapter>, title: Option<String>, body: &str) {
        if body.trim().is_empty() {
            // Keep empty-bodied headings visible as chapters with no points
            if let Some(title) = title {
                chapters.push(Chapter {
                    title,
                    content: String::new(),
                    key_points: Vec::new(),
                });
            }
            return;
        }

        let title = title.unwrap_or_else(|| "Overview".to_string());
        chapters.push(self.build_chapter(title, body));
    }

    fn build_chapter(&self, title: String, body: &str) -> Chapter {
        Chapter {
            title,
            content: body.trim().to_string(),
            key_points: self.key_points(body),
        }
    }

    /// Score each sentence by how often its words recur in the chapter,
    /// keep the top scorers in document order
    fn key_points(&self, body: &str) -> Vec<String> {
        let frequencies = word_frequencies(body);

        let mut scored: Vec<(usize, String, usize)> = body
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| {
                let chars = s.chars().count();
                chars > KEY_POINT_MIN_CHARS && chars < KEY_POINT_MAX_CHARS
            })
            .enumerate()
            .map(|(index, sentence)| {
                let score = sentence
                    .split_whitespace()
                    .filter_map(normalize_word)
                    .filter_map(|w| frequencies.get(&w))
                    .sum();
                (index, sentence.to_string(), score)
            })
            .filter(|(_, _, score)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.2.cmp(&a.2));
        scored.truncate(self.config.max_key_points);
        scored.sort_by_key(|(index, _, _)| *index);

        scored.into_iter().map(|(_, sentence, _)| sentence).collect()
    }
}

fn clean_heading(line: &str) -> String {
    line.trim().trim_start_matches('#').trim().to_string()
}

/// Count recurring words, lowercased, with short words and stopwords removed
fn word_frequencies(text: &str) -> HashMap<String, usize> {
    let mut frequencies = HashMap::new();
    for word in text.split_whitespace().filter_map(normalize_word) {
        *frequencies.entry(word).or_insert(0) += 1;
    }
    frequencies
}

fn normalize_word(word: &str) -> Option<String> {
    let cleaned: String = word
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase();

    if cleaned.chars().count() <= MIN_KEYWORD_CHARS || STOPWORDS.contains(&cleaned.as_str()) {
        return None;
    }
    Some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outliner() -> Outliner {
        Outliner::new(IngestConfig::default())
    }

    const SAMPLE: &str = "\
Chapter 1 Memory Safety

Ownership rules prevent dangling pointers in compiled programs. \
Ownership rules also prevent double frees in compiled programs. \
Nothing noteworthy here.

Chapter 2 Concurrency

Threads share ownership through atomic reference counting in practice. \
Channels move ownership between threads without locks in practice.
";

    #[test]
    fn test_splits_on_chapter_headings() {
        let book = outliner().outline("Rust Book", SAMPLE).unwrap();
        assert_eq!(book.title, "Rust Book");
        assert_eq!(book.chapters.len(), 2);
        assert_eq!(book.chapters[0].title, "Chapter 1 Memory Safety");
        assert_eq!(book.chapters[1].title, "Chapter 2 Concurrency");

        // Chapter bodies hold their own text and nothing of the other chapter
        assert!(book.chapters[0].content.contains("dangling pointers"));
        assert!(!book.chapters[0].content.contains("atomic reference"));
    }

    #[test]
    fn test_markdown_headings_are_chapters() {
        let text = "# Intro\n\nSome introductory sentence with enough recurring words words words.\n";
        let book = outliner().outline("Doc", text).unwrap();
        assert_eq!(book.chapters.len(), 1);
        assert_eq!(book.chapters[0].title, "Intro");
    }

    #[test]
    fn test_heading_free_text_is_one_overview() {
        let text = "Just a plain paragraph with recurring ownership words about ownership.";
        let book = outliner().outline("Doc", text).unwrap();
        assert_eq!(book.chapters.len(), 1);
        assert_eq!(book.chapters[0].title, "Overview");
    }

    #[test]
    fn test_text_before_first_heading_becomes_overview() {
        let text = "A preamble paragraph standing before anything else entirely.\n\nChapter 1 Start\n\nChapter body sentence with repeated chapter words in the chapter.\n";
        let book = outliner().outline("Doc", text).unwrap();
        assert_eq!(book.chapters[0].title, "Overview");
        assert_eq!(book.chapters[1].title, "Chapter 1 Start");
    }

    #[test]
    fn test_key_points_prefer_recurring_words() {
        let book = outliner().outline("Rust Book", SAMPLE).unwrap();
        let points = &book.chapters[0].key_points;

        // Both ownership sentences recur heavily; the filler does not score
        assert!(points.iter().any(|p| p.contains("dangling pointers")));
        assert!(points.iter().any(|p| p.contains("double frees")));
        assert!(!points.iter().any(|p| p.contains("noteworthy")));
    }

    #[test]
    fn test_key_points_keep_document_order() {
        let book = outliner().outline("Rust Book", SAMPLE).unwrap();
        let points = &book.chapters[1].key_points;
        assert_eq!(points.len(), 2);
        assert!(points[0].contains("atomic reference counting"));
        assert!(points[1].contains("without locks"));
    }

    #[test]
    fn test_concepts_rank_by_frequency() {
        let concepts = outliner().concepts(SAMPLE, 3);
        assert!(!concepts.is_empty());
        // "ownership" appears four times in the sample
        assert_eq!(concepts[0].0, "ownership");
        // Counts are non-increasing
        assert!(concepts.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_normalize_word_strips_and_filters() {
        assert_eq!(normalize_word("Ownership,"), Some("ownership".to_string()));
        assert_eq!(normalize_word("the"), None);
        assert_eq!(normalize_word("their"), None);
        assert_eq!(normalize_word("x"), None);
    }
}
