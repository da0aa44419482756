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
use chrono::Local;

use crate::config::ChatConfig;
use crate::knowledge::store::KnowledgeStore;
use crate::knowledge::types::LearnOutcome;

/// What the responder wants the session to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Say this
    Text(String),
    /// Wipe the transcript
    ClearChat,
}

/// Classifies a message against built-in rules and the knowledge base.
///
/// Routing order: built-in commands, then the teach syntax, then an exact
/// knowledge lookup, then the canned fallback rules.
pub struct Responder {
    config: ChatConfig,
}

impl Responder {
    pub fn new(config: ChatConfig) -> Self {
        Self { config }
    }

    pub fn respond(&self, message: &str, store: &mut KnowledgeStore) -> Result<Reply> {
        if let Some(reply) = self.builtin_command(message) {
            return Ok(reply);
        }

        if let Some((question, answer)) = parse_teach(message) {
            let outcome = store.learn(&question, &answer)?;
            let ack = match outcome {
                LearnOutcome::NewQuestion => format!("Got it. I will answer \"{question}\" with that from now on."),
                LearnOutcome::NewAnswer => format!("Noted another answer for \"{question}\"."),
                LearnOutcome::Reinforced => format!("I already knew that about \"{question}\", now I am more sure of it."),
            };
            return Ok(Reply::Text(ack));
        }

        if let Some(entry) = store.find_answer(message).cloned() {
            // Serving an answer counts as using it
            store.learn(&entry.question, &entry.answer)?;
            return Ok(Reply::Text(entry.answer));
        }

        Ok(Reply::Text(self.fallback(message)))
    }

    fn builtin_command(&self, message: &str) -> Option<Reply> {
        let lower = message.to_lowercase();

        if lower.contains("hello") || lower.contains("hi there") || lower == "hi" {
            return Some(Reply::Text(format!(
                "Hello! I am {}, your assistant. How can I help?",
                self.config.assistant_name
            )));
        }

        if lower.contains("what time") || lower.contains("current time") || lower == "time" {
            let time = Local::now().format("%H:%M");
            return Some(Reply::Text(format!("It is {time}")));
        }

        if lower.contains("what date")
            || lower.contains("today's date")
            || lower.contains("what day is")
            || lower == "date"
        {
            let date = Local::now().format("%d.%m.%Y");
            return Some(Reply::Text(format!("Today is {date}")));
        }

        if lower.contains("help") || lower == "commands" {
            return Some(Reply::Text(self.help_text()));
        }

        if lower == "clear" || lower.contains("clear chat") {
            return Some(Reply::ClearChat);
        }

        None
    }

    fn fallback(&self, message: &str) -> String {
        let lower = message.to_lowercase();

        if lower.contains("how are you") {
            return "Doing great! Ready to help with any question.".to_string();
        }

        if lower.contains("thank") {
            return "You're welcome! Ask me whenever you need help.".to_string();
        }

        if lower.contains("weather") {
            return "For the weather I recommend a dedicated forecast service.".to_string();
        }

        format!(
            "I understood your request: \"{message}\". I don't have an answer stored for it yet. \
             Teach me with `remember: question = answer` or ingest a document so I can do better."
        )
    }

    fn help_text(&self) -> String {
        format!(
            "Things {} can do:\n\
             • Time and date: \"what time is it?\", \"what date is it?\"\n\
             • Answer questions it has learned: just ask\n\
             • Learn: `remember: question = answer`\n\
             • Clear the conversation: \"clear chat\"\n\
             Documents can be ingested from the command line with `pocketmind ingest`.",
            self.config.assistant_name
        )
    }
}

/// Parse the `remember: question = answer` teach syntax
fn parse_teach(message: &str) -> Option<(String, String)> {
    let rest = message.trim().strip_prefix("remember:").or_else(|| {
        message.trim().strip_prefix("Remember:")
    })?;

    let (question, answer) = rest.split_once('=')?;
    let question = question.trim();
    let answer = answer.trim();

    if question.is_empty() || answer.is_empty() {
        return None;
    }
    Some((question.to_string(), answer.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KnowledgeConfig;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> KnowledgeStore {
        let path = dir.path().join("knowledge.json");
        KnowledgeStore::open(&path, KnowledgeConfig::default()).unwrap()
    }

    fn responder() -> Responder {
        Responder::new(ChatConfig::default())
    }

    #[test]
    fn test_greeting_names_the_assistant() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        let reply = responder().respond("hello!", &mut s).unwrap();
        match reply {
            Reply::Text(text) => assert!(text.contains("Pocketmind")),
            other => panic!("unexpected reply {other:?}"),
        }
    }

    #[test]
    fn test_time_and_date_commands() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        let r = responder();

        assert!(matches!(
            r.respond("what time is it?", &mut s).unwrap(),
            Reply::Text(t) if t.starts_with("It is ")
        ));
        assert!(matches!(
            r.respond("what date is it?", &mut s).unwrap(),
            Reply::Text(t) if t.starts_with("Today is ")
        ));
    }

    #[test]
    fn test_clear_chat_signal() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        let reply = responder().respond("please clear chat", &mut s).unwrap();
        assert_eq!(reply, Reply::ClearChat);
    }

    #[test]
    fn test_teach_then_answer() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        let r = responder();

        let reply = r
            .respond("remember: favorite color = It is teal.", &mut s)
            .unwrap();
        assert!(matches!(reply, Reply::Text(t) if t.contains("favorite color")));

        let reply = r.respond("Favorite color?", &mut s).unwrap();
        assert_eq!(reply, Reply::Text("It is teal.".to_string()));
    }

    #[test]
    fn test_served_answers_are_reinforced() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        let r = responder();

        s.learn("favorite color", "It is teal.").unwrap();
        r.respond("favorite color", &mut s).unwrap();

        let entry = s.find_answer("favorite color").unwrap();
        assert_eq!(entry.usage_count, 2);
        assert_eq!(entry.confidence, 2);
    }

    #[test]
    fn test_fallback_echoes_the_request() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        let reply = responder()
            .respond("explain quantum gravity", &mut s)
            .unwrap();
        match reply {
            Reply::Text(text) => assert!(text.contains("\"explain quantum gravity\"")),
            other => panic!("unexpected reply {other:?}"),
        }
    }

    #[test]
    fn test_fallback_canned_rules() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        let r = responder();

        assert!(matches!(
            r.respond("how are you?", &mut s).unwrap(),
            Reply::Text(t) if t.contains("Doing great")
        ));
        assert!(matches!(
            r.respond("thanks a lot", &mut s).unwrap(),
            Reply::Text(t) if t.contains("welcome")
        ));
        assert!(matches!(
            r.respond("is the weather nice?", &mut s).unwrap(),
            Reply::Text(t) if t.contains("forecast")
        ));
    }

    #[test]
    fn test_learned_answer_beats_fallback() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        let r = responder();

        s.learn("is the moon близко", "No, it is far away.").unwrap();
        let reply = r.respond("Is the moon близко?", &mut s).unwrap();
        assert_eq!(reply, Reply::Text("No, it is far away.".to_string()));
    }

    #[test]
    fn test_parse_teach_shapes() {
        assert_eq!(
            parse_teach("remember: a question = an answer"),
            Some(("a question".to_string(), "an answer".to_string()))
        );
        assert_eq!(parse_teach("remember: no equals sign"), None);
        assert_eq!(parse_teach("remember: = empty question"), None);
        assert_eq!(parse_teach("unrelated message"), None);
    }
}
