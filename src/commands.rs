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
use colored::Colorize;
use std::io::Write;
use std::path::Path;
use tokio::io::AsyncBufReadExt;

use crate::chat::session::ChatSession;
use crate::cli::{Commands, KnowledgeCommand};
use crate::config::Config;
use crate::ingest::book::Outliner;
use crate::ingest::ingestor::Ingestor;
use crate::ingest::reader;
use crate::knowledge::formatting;
use crate::knowledge::store::KnowledgeStore;
use crate::knowledge::types::LearnOutcome;
use crate::storage;

pub async fn execute(config: &Config, command: Commands) -> Result<()> {
    match command {
        Commands::Chat => run_chat(config).await,
        Commands::Ask { question } => run_ask(config, &question.join(" ")),
        Commands::Knowledge { command } => run_knowledge(config, command),
        Commands::Ingest { path, dry_run } => run_ingest(config, &path, dry_run).await,
        Commands::Outline { path, concepts } => run_outline(config, &path, concepts).await,
    }
}

fn open_store(config: &Config) -> Result<KnowledgeStore> {
    let db_path = storage::get_knowledge_db_path()?;
    KnowledgeStore::open(&db_path, config.knowledge.clone())
}

async fn run_chat(config: &Config) -> Result<()> {
    let mut session = ChatSession::new(config.chat.clone(), open_store(config)?);

    println!(
        "{}",
        format!(
            "{} is listening. Type /quit to exit.",
            config.chat.assistant_name
        )
        .bold()
    );

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    print_prompt()?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            print_prompt()?;
            continue;
        }
        if matches!(input, "/quit" | "/exit") {
            break;
        }

        let reply = session.handle(input)?;
        println!(
            "{} {}",
            format!("{}:", config.chat.assistant_name).blue().bold(),
            reply
        );
        print_prompt()?;
    }

    Ok(())
}

fn print_prompt() -> Result<()> {
    print!("{} ", "you>".green().bold());
    std::io::stdout().flush()?;
    Ok(())
}

fn run_ask(config: &Config, question: &str) -> Result<()> {
    if question.trim().is_empty() {
        anyhow::bail!("Nothing to ask: the question is empty");
    }

    let mut session = ChatSession::new(config.chat.clone(), open_store(config)?);
    println!("{}", session.handle(question)?);
    Ok(())
}

fn run_knowledge(config: &Config, command: KnowledgeCommand) -> Result<()> {
    let mut store = open_store(config)?;

    match command {
        KnowledgeCommand::Learn { question, answer } => {
            let outcome = store.learn(&question, &answer)?;
            let message = match outcome {
                LearnOutcome::NewQuestion => "Stored a new question",
                LearnOutcome::NewAnswer => "Added another answer to a known question",
                LearnOutcome::Reinforced => "Reinforced an existing answer",
            };
            println!("{}", message.green());
        }

        KnowledgeCommand::Answer { question, format } => {
            match store.find_answer(&question) {
                Some(entry) => println!("{}", formatting::format_answer(entry, &format)),
                None => println!("No stored answer for \"{}\"", question),
            }
        }

        KnowledgeCommand::Feedback { question, vote } => {
            let positive = match vote.as_str() {
                "up" | "good" | "+" => true,
                "down" | "bad" | "-" => false,
                other => anyhow::bail!("Invalid vote '{}', expected 'up' or 'down'", other),
            };
            if store.record_feedback(&question, positive)? {
                println!("Feedback recorded");
            } else {
                println!("No stored answer for \"{}\"", question);
            }
        }

        KnowledgeCommand::Forget { question, yes } => {
            if !yes && !confirm(&format!("Forget everything about \"{}\"?", question))? {
                println!("Aborted");
                return Ok(());
            }
            if store.forget(&question)? {
                println!("Forgotten");
            } else {
                println!("No stored answer for \"{}\"", question);
            }
        }

        KnowledgeCommand::List { limit, format } => {
            let mut entries: Vec<_> = store.entries().collect();
            entries.sort_by(|a, b| b.1.last_used.cmp(&a.1.last_used));
            entries.truncate(limit);
            println!("{}", formatting::format_entry_list(&entries, &format));
        }

        KnowledgeCommand::Stats => {
            println!("{}", formatting::format_stats(&store.stats()));
        }

        KnowledgeCommand::ClearAll { yes } => {
            if !yes && !confirm("Delete ALL stored knowledge? This cannot be undone.")? {
                println!("Aborted");
                return Ok(());
            }
            store.clear_all()?;
            println!("All knowledge cleared");
        }
    }

    Ok(())
}

async fn run_ingest(config: &Config, path: &Path, dry_run: bool) -> Result<()> {
    let text = reader::read_document(path).await?;
    if text.trim().is_empty() {
        anyhow::bail!("No text could be extracted from {}", path.display());
    }

    let ingestor = Ingestor::new(config.ingest.clone());

    if dry_run {
        let facts = ingestor.extract_key_facts(&text);
        if facts.is_empty() {
            println!("No key facts found in {}", path.display());
        } else {
            println!("{}", format!("Key facts from {}:", path.display()).bold());
            for fact in facts {
                println!("  • {}", fact);
            }
        }
        return Ok(());
    }

    let mut store = open_store(config)?;
    let result = ingestor.ingest(&mut store, path, &text)?;

    if result.was_cached {
        println!("{} was already ingested, nothing new to learn", result.path);
    } else {
        println!(
            "Learned {} facts from {} ({} chars processed)",
            result.facts_learned.to_string().green(),
            result.path,
            text.chars().count()
        );
    }

    Ok(())
}

async fn run_outline(config: &Config, path: &Path, concepts: usize) -> Result<()> {
    let text = reader::read_document(path).await?;
    if text.trim().is_empty() {
        anyhow::bail!("No text could be extracted from {}", path.display());
    }

    let title = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("Untitled");

    let outliner = Outliner::new(config.ingest.clone());
    let book = outliner.outline(title, &text)?;

    println!("{}", book.title.bold());
    for chapter in &book.chapters {
        println!("{}", "━".repeat(60));
        println!("{}", chapter.title.blue().bold());
        if chapter.key_points.is_empty() {
            println!("{}", "(no key points)".bright_black());
        }
        for point in &chapter.key_points {
            println!("  • {}", point);
        }
    }

    let ranked = outliner.concepts(&text, concepts);
    if !ranked.is_empty() {
        println!("{}", "━".repeat(60));
        let terms: Vec<String> = ranked
            .into_iter()
            .map(|(term, count)| format!("{} ({})", term, count))
            .collect();
        println!("{} {}", "Recurring concepts:".cyan(), terms.join(", "));
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
