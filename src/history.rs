//! The session's question/answer log.

use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::to_writer_pretty;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::types::QaEntry;

/// Ordered, append-only log of [`QaEntry`] values for the current session.
///
/// Entries are kept oldest first.  The log can only grow or be reset to empty
/// as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    entries: Vec<QaEntry>,
}

impl ConversationHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry at the end.
    pub fn push(&mut self, entry: QaEntry) {
        self.entries.push(entry);
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries oldest first.
    pub fn entries(&self) -> &[QaEntry] {
        &self.entries
    }

    /// Iterates over the entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &QaEntry> {
        self.entries.iter()
    }

    /// Returns the most recently appended entry.
    pub fn last(&self) -> Option<&QaEntry> {
        self.entries.last()
    }

    /// Writes the history as a JSON transcript.
    ///
    /// The transcript is written to a temporary file next to `path` and
    /// renamed over it, so a failed save leaves any previous transcript intact.
    pub fn save_transcript_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let transcript = TranscriptFile::new(&self.entries);
        let mut file = NamedTempFile::new_in(dir)
            .map_err(|err| Error::io("failed to create transcript file", err))?;
        {
            let mut writer = BufWriter::new(file.as_file_mut());
            to_writer_pretty(&mut writer, &transcript).map_err(|err| {
                Error::serialization("failed to serialize transcript", Some(Box::new(err)))
            })?;
            writer
                .flush()
                .map_err(|err| Error::io("failed to write transcript file", err))?;
        }
        file.persist(path)
            .map_err(|err| Error::io("failed to replace transcript file", err.error))?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ConversationHistory {
    type Item = &'a QaEntry;
    type IntoIter = std::slice::Iter<'a, QaEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(Serialize, Deserialize)]
struct TranscriptFile {
    version: u8,
    entries: Vec<QaEntry>,
}

impl TranscriptFile {
    fn new(entries: &[QaEntry]) -> Self {
        Self {
            version: 1,
            entries: entries.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_history_empty() {
        let history = ConversationHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.last().is_none());
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut history = ConversationHistory::new();
        history.push(QaEntry::new("A", "ansA"));
        history.push(QaEntry::new("B", "ansB"));
        let questions: Vec<_> = history.iter().map(QaEntry::question).collect();
        assert_eq!(questions, vec!["A", "B"]);
        assert_eq!(history.last().map(QaEntry::answer), Some("ansB"));
    }

    #[test]
    fn clear_resets_everything() {
        let mut history = ConversationHistory::new();
        history.push(QaEntry::new("A", "ansA"));
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn transcript_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.json");
        let mut history = ConversationHistory::new();
        history.push(QaEntry::new("What is a bond?", "A loan."));
        history.save_transcript_to(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["entries"][0]["question"], "What is a bond?");
        assert_eq!(value["entries"][0]["answer"], "A loan.");
    }

    #[test]
    fn transcript_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("transcript.json");
        let err = ConversationHistory::new()
            .save_transcript_to(&path)
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn save_replaces_previous_transcript_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.json");
        let mut history = ConversationHistory::new();
        history.push(QaEntry::new("A", "ansA"));
        history.push(QaEntry::new("B", "ansB"));
        history.save_transcript_to(&path).unwrap();

        history.clear();
        history.save_transcript_to(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["entries"], serde_json::json!([]));
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("transcript.json")]);
    }

    #[test]
    fn failed_replace_keeps_target_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("transcript.json");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep.txt"), "old").unwrap();

        let mut history = ConversationHistory::new();
        history.push(QaEntry::new("A", "ansA"));
        let err = history.save_transcript_to(&target).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));

        assert_eq!(std::fs::read_to_string(target.join("keep.txt")).unwrap(), "old");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
