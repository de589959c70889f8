use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An immutable point-in-time copy of a pad's content
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct PadSnapshot {
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Everything guarded by the pad's mutex, so content, timestamp and
/// history are always observed as one consistent triple
struct PadState {
    content: String,
    last_modified: DateTime<Utc>,
    snapshots: Vec<PadSnapshot>,
}

/// A named collaborative text pad
pub struct Pad {
    name: String,
    state: Mutex<PadState>,
}

impl Pad {
    pub fn new(name: String) -> Self {
        Self {
            name,
            state: Mutex::new(PadState {
                content: String::new(),
                last_modified: Utc::now(),
                snapshots: Vec::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> String {
        self.state.lock().unwrap().content.clone()
    }

    /// Read content and last-modified together, so callers never see a
    /// pair mixed from two different writes
    pub fn read(&self) -> (String, DateTime<Utc>) {
        let state = self.state.lock().unwrap();
        (state.content.clone(), state.last_modified)
    }

    /// Replace the content and refresh the last-modified timestamp as one
    /// atomic step
    pub fn set_content(&self, content: String) {
        let mut state = self.state.lock().unwrap();
        state.content = content;
        state.last_modified = Utc::now();
    }

    /// Append a snapshot of the current content to the history.
    /// Not deduplicated: unchanged content still appends a new entry.
    pub fn take_snapshot(&self) {
        let mut state = self.state.lock().unwrap();
        let snapshot = PadSnapshot {
            content: state.content.clone(),
            timestamp: Utc::now(),
        };
        state.snapshots.push(snapshot);
    }

    pub fn snapshots(&self) -> Vec<PadSnapshot> {
        self.state.lock().unwrap().snapshots.clone()
    }

    pub fn snapshot_count(&self) -> usize {
        self.state.lock().unwrap().snapshots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pad_starts_empty() {
        let pad = Pad::new("notes".to_string());
        assert_eq!(pad.name(), "notes");
        assert_eq!(pad.content(), "");
        assert_eq!(pad.snapshot_count(), 0);
    }

    #[test]
    fn set_content_replaces_and_touches_timestamp() {
        let pad = Pad::new("notes".to_string());
        let (_, before) = pad.read();
        pad.set_content("hello".to_string());
        let (content, after) = pad.read();
        assert_eq!(content, "hello");
        assert!(after >= before);
    }

    #[test]
    fn snapshot_captures_content_at_call_time() {
        let pad = Pad::new("notes".to_string());
        pad.set_content("first".to_string());
        pad.take_snapshot();
        pad.set_content("second".to_string());
        let snapshots = pad.snapshots();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].content, "first");
    }

    #[test]
    fn snapshots_are_not_deduplicated() {
        let pad = Pad::new("notes".to_string());
        pad.set_content("same".to_string());
        pad.take_snapshot();
        pad.take_snapshot();
        let snapshots = pad.snapshots();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].content, "same");
        assert_eq!(snapshots[1].content, "same");
        assert!(snapshots[1].timestamp >= snapshots[0].timestamp);
    }
}
