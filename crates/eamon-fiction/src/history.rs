//! The session transcript and command recall.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FictionResult;

/// One submitted command and what came of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The input as typed.
    pub command: String,
    /// The text shown in response.
    pub result: String,
    /// When the command was submitted.
    pub timestamp: DateTime<Utc>,
}

/// Append-only record of the session, with a cursor for stepping back and
/// forth through earlier commands.
///
/// The cursor sits one past the newest entry after every push. `older`
/// walks toward the first entry and stops there; `newer` walks back and
/// yields an empty string once it passes the newest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
    #[serde(skip)]
    cursor: usize,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command and its result, and reset the recall cursor.
    pub fn push(&mut self, command: impl Into<String>, result: impl Into<String>) {
        self.entries.push(HistoryEntry {
            command: command.into(),
            result: result.into(),
            timestamp: Utc::now(),
        });
        self.cursor = self.entries.len();
    }

    /// The most recent command, or `""`.
    pub fn last_command(&self) -> &str {
        self.entries.last().map_or("", |e| e.command.as_str())
    }

    /// Step to the next-older command.
    pub fn older(&mut self) -> &str {
        self.cursor = self.cursor.saturating_sub(1);
        self.command_at_cursor()
    }

    /// Step to the next-newer command. Past the newest this is `""`.
    pub fn newer(&mut self) -> &str {
        if self.cursor < self.entries.len() {
            self.cursor += 1;
        }
        self.command_at_cursor()
    }

    fn command_at_cursor(&self) -> &str {
        self.entries
            .get(self.cursor)
            .map_or("", |e| e.command.as_str())
    }

    /// Get all entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the transcript as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&format!(
                "[{}] > {}\n",
                entry.timestamp.format("%H:%M:%S"),
                entry.command
            ));
            if !entry.result.is_empty() {
                out.push_str(&entry.result);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    /// Export the entries as pretty-printed JSON.
    pub fn to_json(&self) -> FictionResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> History {
        let mut history = History::new();
        history.push("n", "Entering the cave.");
        history.push("e", "You can't go that way!");
        history.push("get all", "sword taken.");
        history
    }

    #[test]
    fn empty_history() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.last_command(), "");
        assert_eq!(history.older(), "");
        assert_eq!(history.newer(), "");
    }

    #[test]
    fn recall_walks_back_and_saturates() {
        let mut history = sample();
        assert_eq!(history.last_command(), "get all");
        assert_eq!(history.older(), "get all");
        assert_eq!(history.older(), "e");
        assert_eq!(history.older(), "n");
        assert_eq!(history.older(), "n");
        assert_eq!(history.newer(), "e");
    }

    #[test]
    fn newer_clears_past_the_end() {
        let mut history = sample();
        history.older();
        assert_eq!(history.newer(), "");
        assert_eq!(history.newer(), "");
        assert_eq!(history.older(), "get all");
    }

    #[test]
    fn push_resets_cursor() {
        let mut history = sample();
        history.older();
        history.older();
        history.push("look", "A cave.");
        assert_eq!(history.older(), "look");
    }

    #[test]
    fn export_text_lists_commands_and_results() {
        let history = sample();
        let text = history.export_text();
        assert!(text.contains("> get all\nsword taken.\n"));
        assert_eq!(text.matches("] > ").count(), 3);
    }

    #[test]
    fn entries_keep_order() {
        let history = sample();
        let commands: Vec<&str> = history.entries().iter().map(|e| e.command.as_str()).collect();
        assert_eq!(commands, ["n", "e", "get all"]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn json_export_keeps_timestamps() {
        let history = sample();
        let json = history.to_json().unwrap();
        let entries: Vec<HistoryEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(entries, history.entries());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn recall_stays_in_bounds(
            commands in prop::collection::vec("[a-z]{1,6}", 0..12),
            steps in prop::collection::vec(any::<bool>(), 0..40),
        ) {
            let mut history = History::new();
            for command in &commands {
                history.push(command.as_str(), "");
            }
            for older in steps {
                let recalled = if older { history.older() } else { history.newer() };
                prop_assert!(recalled.is_empty() || commands.iter().any(|c| c == recalled));
            }
        }

        #[test]
        fn older_saturates_at_first(
            commands in prop::collection::vec("[a-z]{1,6}", 1..12),
            extra in 0usize..5,
        ) {
            let mut history = History::new();
            for command in &commands {
                history.push(command.as_str(), "");
            }
            let mut last = String::new();
            for _ in 0..commands.len() + extra {
                last = history.older().to_string();
            }
            prop_assert_eq!(last, commands[0].clone());
        }
    }
}
