use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::models::Pad;

/// Concurrency-safe store of every pad known to the process.
///
/// The mutex here only guards the name-to-pad map; each pad carries its
/// own lock, so unrelated pads never serialize behind each other's
/// writes. Pads live for the process lifetime, there is no delete.
pub struct PadStore {
    pads: Mutex<HashMap<String, Arc<Pad>>>,
}

impl PadStore {
    pub fn new() -> Self {
        Self {
            pads: Mutex::new(HashMap::new()),
        }
    }

    /// Return the pad for `name`, creating an empty one if absent.
    /// Concurrent callers racing on the same unseen name all observe the
    /// same instance.
    pub fn get_or_create(&self, name: &str) -> Arc<Pad> {
        let mut pads = self.pads.lock().unwrap();
        if let Some(pad) = pads.get(name) {
            return pad.clone();
        }
        debug!("Creating pad '{}'", name);
        let pad = Arc::new(Pad::new(name.to_string()));
        pads.insert(name.to_string(), pad.clone());
        pad
    }

    /// Non-creating lookup
    pub fn get(&self, name: &str) -> Option<Arc<Pad>> {
        self.pads.lock().unwrap().get(name).cloned()
    }

    /// Replace a pad's content, creating the pad if absent
    pub fn update_content(&self, name: &str, content: String) {
        self.get_or_create(name).set_content(content);
    }

    /// Append a snapshot of the pad's current content to its history.
    /// No-op when the pad does not exist; snapshotting never creates pads.
    pub fn snapshot(&self, name: &str) {
        if let Some(pad) = self.get(name) {
            pad.take_snapshot();
            debug!("Snapshot taken for pad '{}'", name);
        }
    }

    /// Tracked pad count, for reporting
    pub fn len(&self) -> usize {
        self.pads.lock().unwrap().len()
    }

    /// Total snapshot entries across all pads, for reporting
    pub fn snapshot_total(&self) -> usize {
        let pads: Vec<Arc<Pad>> = self.pads.lock().unwrap().values().cloned().collect();
        pads.iter().map(|pad| pad.snapshot_count()).sum()
    }
}
