use std::collections::HashMap;
use std::time::Duration;

use axum::extract::ws::Message;
use tokio::sync::Mutex;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::ws::connection::ConnectionHandle;
use crate::ws::scheduler::{SnapshotFn, SnapshotScheduler};

struct MemberTable {
    connections: HashMap<Uuid, ConnectionHandle>,
    closed: bool,
}

/// Live state for one pad: the set of connected clients plus the pad's
/// snapshot scheduler.
///
/// The member lock is held across the whole empty-transition finalization
/// (mark closed, final snapshot, scheduler stop). A join racing that
/// teardown blocks on the lock, then observes `closed` and retries with a
/// fresh session, so it can never land in a half-torn-down one.
pub struct PadSession {
    pad_name: String,
    snapshot_fn: SnapshotFn,
    scheduler: SnapshotScheduler,
    members: Mutex<MemberTable>,
}

impl PadSession {
    pub fn new(pad_name: String, snapshot_interval: Duration, snapshot_fn: SnapshotFn) -> Self {
        let scheduler =
            SnapshotScheduler::new(pad_name.clone(), snapshot_interval, snapshot_fn.clone());
        Self {
            pad_name,
            snapshot_fn,
            scheduler,
            members: Mutex::new(MemberTable {
                connections: HashMap::new(),
                closed: false,
            }),
        }
    }

    pub fn start_scheduler(&self) {
        self.scheduler.start();
    }

    /// Register a connection. Returns false when the session has already
    /// been torn down; the caller must fetch a fresh session and retry.
    pub async fn join(&self, handle: ConnectionHandle) -> bool {
        let mut members = self.members.lock().await;
        if members.closed {
            return false;
        }
        debug!("Connection {} joined pad '{}'", handle.id(), self.pad_name);
        members.connections.insert(handle.id(), handle);
        true
    }

    /// Queue `raw` for every member except `exclude`. A dead outbox is
    /// logged and skipped; membership only changes on explicit disconnect.
    pub async fn broadcast(&self, raw: &str, exclude: Uuid) {
        let members = self.members.lock().await;
        for (conn_id, handle) in members.connections.iter() {
            if *conn_id == exclude {
                continue;
            }
            if !handle.send(Message::Text(raw.to_string())) {
                error!(
                    "Failed to queue broadcast for connection {} on pad '{}'",
                    conn_id, self.pad_name
                );
            }
        }
    }

    /// Remove a connection. When the removal empties the session, the
    /// final snapshot is taken and the scheduler fully stopped before this
    /// returns, all under the member lock. Exactly one caller observes
    /// `true` per session lifetime.
    pub async fn leave(&self, conn_id: Uuid) -> bool {
        let mut members = self.members.lock().await;
        if members.connections.remove(&conn_id).is_none() {
            return false;
        }
        debug!("Connection {} left pad '{}'", conn_id, self.pad_name);
        if !members.connections.is_empty() {
            return false;
        }
        members.closed = true;
        info!(
            "Last connection left pad '{}', taking final snapshot",
            self.pad_name
        );
        (self.snapshot_fn)(&self.pad_name);
        self.scheduler.stop().await;
        true
    }

    pub async fn member_count(&self) -> usize {
        self.members.lock().await.connections.len()
    }
}
