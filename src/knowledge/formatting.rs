use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::knowledge::types::{KnowledgeEntry, KnowledgeStats};

pub fn format_answer(entry: &KnowledgeEntry, format: &str) -> String {
    match format {
        "json" => serde_json::to_string_pretty(entry)
            .unwrap_or_else(|_| "Failed to serialize entry".to_string()),
        "compact" => format!(
            "{} (confidence {}, used {}x)",
            entry.answer, entry.confidence, entry.usage_count
        ),
        _ => {
            let mut output = String::new();
            output.push_str(&entry.answer.bold().to_string());
            output.push('\n');
            output.push_str(
                &format!(
                    "confidence {}/10 · used {}x · last used {}",
                    entry.confidence,
                    entry.usage_count,
                    format_relative_time(entry.last_used)
                )
                .bright_black()
                .to_string(),
            );
            output
        }
    }
}

pub fn format_entry_list(entries: &[(&str, &KnowledgeEntry)], format: &str) -> String {
    if entries.is_empty() {
        return "No answers stored yet".to_string();
    }

    if format == "json" {
        let answers: Vec<&KnowledgeEntry> = entries.iter().map(|(_, e)| *e).collect();
        return serde_json::to_string_pretty(&answers)
            .unwrap_or_else(|_| "Failed to serialize entries".to_string());
    }

    // The text format spells each entry out in full; compact renders the
    // one-line-per-entry table below.
    if format == "text" {
        let mut output = String::new();
        for (i, (_, entry)) in entries.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&entry.question.bold().to_string());
            output.push('\n');
            output.push_str(&entry.answer);
            output.push('\n');
            output.push_str(
                &format!(
                    "confidence {}/10 · used {}x · last used {}",
                    entry.confidence,
                    entry.usage_count,
                    format_relative_time(entry.last_used)
                )
                .bright_black()
                .to_string(),
            );
            output.push('\n');
        }
        return output;
    }

    let mut output = String::new();

    // Header
    output.push_str(
        &format!(
            "{:<32} {:<42} {:<6} {:<6} {}\n",
            "Question", "Answer", "Conf", "Uses", "Last Used"
        )
        .bold()
        .to_string(),
    );
    output.push_str(&"─".repeat(110));
    output.push('\n');

    // Rows
    for (_, entry) in entries {
        output.push_str(&format!(
            "{:<32} {:<42} {:<6} {:<6} {}\n",
            truncate_with_ellipsis(&entry.question, 30),
            truncate_with_ellipsis(&entry.answer, 40),
            entry.confidence,
            entry.usage_count,
            format_relative_time(entry.last_used)
        ));
    }

    output
}

pub fn format_stats(stats: &KnowledgeStats) -> String {
    let mut output = String::new();

    output.push_str(&"Knowledge Base Statistics".bold().to_string());
    output.push('\n');
    output.push_str(&format!("Questions Learned: {}", stats.total_questions));
    output.push('\n');
    output.push_str(&format!("Answers Stored: {}", stats.total_answers));
    output.push('\n');
    output.push_str(&format!("Total Usage: {}x", stats.total_usage));
    output.push('\n');
    output.push_str(&format!("Documents Ingested: {}", stats.total_sources));
    output.push('\n');

    let level = format!("Learning Level: {}%", stats.learning_level);
    if stats.learning_level >= 100 {
        output.push_str(&level.green().to_string());
    } else {
        output.push_str(&level);
    }
    output.push('\n');

    output
}

fn format_relative_time(dt: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(dt);

    if duration.num_days() > 0 {
        format!("{} days ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{} hours ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{} minutes ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

fn truncate_with_ellipsis(input: &str, max_chars: usize) -> String {
    if input.chars().count() > max_chars {
        let kept: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        input.to_string()
    }
}
