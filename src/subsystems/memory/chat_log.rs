//! Shared plaintext chat log. Opened, appended and closed on every write.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::error;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `You: {user}\nBot: {bot}\n\n`, creating the file if needed.
    ///
    /// The entry goes out in a single `write_all` on an `O_APPEND` handle, so
    /// concurrent appenders never interleave inside an entry.
    pub fn append(&self, user: &str, bot: &str) -> Result<(), AppError> {
        let entry = format!("You: {user}\nBot: {bot}\n\n");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| AppError::Memory(format!("cannot open {}: {e}", self.path.display())))?;
        file.write_all(entry.as_bytes())
            .map_err(|e| AppError::Memory(format!("cannot write {}: {e}", self.path.display())))
    }

    /// Best-effort [`append`](Self::append): failures are logged, never returned.
    pub fn record(&self, user: &str, bot: &str) {
        if let Err(e) = self.append(user, bot) {
            error!(path = %self.path.display(), error = %e, "chat log write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn appends_in_transcript_format() {
        let tmp = TempDir::new().unwrap();
        let log = ChatLog::new(tmp.path().join("chat_history.txt"));
        log.append("hello", "Hey there!").unwrap();
        log.append("bye", "Goodbye!").unwrap();
        assert_eq!(
            std::fs::read_to_string(log.path()).unwrap(),
            "You: hello\nBot: Hey there!\n\nYou: bye\nBot: Goodbye!\n\n"
        );
    }

    #[test]
    fn concurrent_appends_keep_entries_whole() {
        let tmp = TempDir::new().unwrap();
        let log = ChatLog::new(tmp.path().join("chat_history.txt"));

        std::thread::scope(|scope| {
            for t in 0..8 {
                let log = &log;
                scope.spawn(move || {
                    for i in 0..100 {
                        log.append(&format!("u{t}-{i}"), &format!("b{t}-{i}")).unwrap();
                    }
                });
            }
        });

        let text = std::fs::read_to_string(log.path()).unwrap();
        let blocks: Vec<&str> = text.split_terminator("\n\n").collect();
        assert_eq!(blocks.len(), 800);
        for block in blocks {
            let (user, bot) = block
                .strip_prefix("You: ")
                .and_then(|rest| rest.split_once("\nBot: "))
                .unwrap_or_else(|| panic!("malformed entry: {block:?}"));
            assert_eq!(user.replacen('u', "b", 1), bot, "mismatched pair: {block:?}");
        }
    }

    #[test]
    fn record_swallows_errors() {
        let tmp = TempDir::new().unwrap();
        let log = ChatLog::new(tmp.path().join("missing").join("chat_history.txt"));
        assert!(log.append("a", "b").is_err());
        log.record("a", "b");
        assert!(!log.path().exists());
    }
}
