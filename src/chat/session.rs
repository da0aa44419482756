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

use super::responder::{Reply, Responder};
use super::types::ChatMessage;
use crate::config::ChatConfig;
use crate::knowledge::store::KnowledgeStore;

/// An in-memory conversation: the transcript plus the routing through the
/// responder and knowledge store. The transcript never touches disk.
pub struct ChatSession {
    responder: Responder,
    store: KnowledgeStore,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(config: ChatConfig, store: KnowledgeStore) -> Self {
        Self {
            responder: Responder::new(config),
            store,
            messages: Vec::new(),
        }
    }

    /// Route one user input and return the assistant's reply text
    pub fn handle(&mut self, input: &str) -> Result<String> {
        self.messages.push(ChatMessage::user(input));

        match self.responder.respond(input, &mut self.store)? {
            Reply::Text(text) => {
                self.messages.push(ChatMessage::assistant(&text));
                Ok(text)
            }
            Reply::ClearChat => {
                self.messages.clear();
                Ok("Chat history cleared.".to_string())
            }
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KnowledgeConfig;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> ChatSession {
        let path = dir.path().join("knowledge.json");
        let store = KnowledgeStore::open(&path, KnowledgeConfig::default()).unwrap();
        ChatSession::new(ChatConfig::default(), store)
    }

    #[test]
    fn test_transcript_alternates_speakers() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);

        session.handle("hello").unwrap();
        session.handle("how are you?").unwrap();

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 4);
        assert!(!transcript[0].from_assistant);
        assert!(transcript[1].from_assistant);
        assert!(!transcript[2].from_assistant);
        assert!(transcript[3].from_assistant);

        // Timestamps never go backwards within a session
        assert!(transcript
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_clear_wipes_transcript() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);

        session.handle("hello").unwrap();
        let reply = session.handle("clear chat").unwrap();

        assert!(reply.contains("cleared"));
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_knowledge_survives_clear() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);

        session
            .handle("remember: favorite color = It is teal.")
            .unwrap();
        session.handle("clear chat").unwrap();

        let reply = session.handle("favorite color").unwrap();
        assert_eq!(reply, "It is teal.");
    }
}
