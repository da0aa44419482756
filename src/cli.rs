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

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pocketmind")]
#[command(version, author = "Pocketmind Contributors")]
#[command(about = "Offline chat assistant with a self-learning knowledge base", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session
    Chat,

    /// Ask a single question and print the reply
    Ask {
        /// Question text (joined with spaces)
        question: Vec<String>,
    },

    /// Knowledge base management for stored question/answer pairs
    Knowledge {
        #[command(subcommand)]
        command: KnowledgeCommand,
    },

    /// Learn facts from a document (PDF or plain text)
    Ingest {
        /// Path to the document
        path: PathBuf,

        /// Only print the extracted key facts, do not store anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Derive a chapter outline with key points from a document
    Outline {
        /// Path to the document
        path: PathBuf,

        /// Number of recurring concepts to list
        #[arg(short, long, default_value = "10")]
        concepts: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum KnowledgeCommand {
    /// Store a question/answer pair
    Learn {
        /// Question the answer responds to
        #[arg(short, long)]
        question: String,

        /// Answer text to store
        #[arg(short, long)]
        answer: String,
    },

    /// Look up the best stored answer for a question
    Answer {
        /// Question to look up
        question: String,

        /// Output format: text, json, or compact
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Adjust confidence of the best stored answer for a question
    Feedback {
        /// Question the feedback applies to
        question: String,

        /// Vote: up or down
        #[arg(short, long, default_value = "up")]
        vote: String,
    },

    /// Remove everything stored under a question
    Forget {
        /// Question to forget
        question: String,

        /// Confirm removal without prompting
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List stored answers, most recently used first
    List {
        /// Maximum number of answers to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Output format: text, json, or compact
        #[arg(short, long, default_value = "compact")]
        format: String,
    },

    /// Show knowledge base statistics
    Stats,

    /// Clear ALL knowledge data (DANGEROUS: deletes everything)
    ClearAll {
        /// Confirm deletion without prompting
        #[arg(short = 'y', long)]
        yes: bool,
    },
}
