use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, error, info};
use uuid::Uuid;

use crate::models::{MessageType, PadMessage};
use crate::store::PadStore;
use crate::ws::connection::ConnectionHandle;
use crate::ws::scheduler::SnapshotFn;
use crate::ws::session::PadSession;

/// Directory of live sessions, keyed by pad name.
///
/// The map lock is only ever held for O(1) lookups and inserts; all
/// per-pad work happens under the session's own lock, so unrelated pads
/// never serialize behind each other.
pub struct SessionHub {
    store: Arc<PadStore>,
    snapshot_interval: Duration,
    sessions: Mutex<HashMap<String, Arc<PadSession>>>,
}

impl SessionHub {
    pub fn new(store: Arc<PadStore>, snapshot_interval: Duration) -> Self {
        Self {
            store,
            snapshot_interval,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Register a connection with the pad's session, spinning one up if
    /// this is the first connection. Returns the pad's current content
    /// for the INIT frame.
    pub async fn on_connect(&self, pad_name: &str, handle: ConnectionHandle) -> String {
        loop {
            let session = self.get_or_spawn(pad_name);
            if session.join(handle.clone()).await {
                break;
            }
            // Lost the race against teardown: the fetched session is
            // closed. Drop its map entry unless a newer one replaced it,
            // then retry against a fresh session.
            self.remove_if_same(pad_name, &session);
        }
        self.store.get_or_create(pad_name).content()
    }

    /// Dispatch one decoded inbound frame
    pub async fn on_message(&self, pad_name: &str, conn_id: Uuid, raw: &str) {
        let message: PadMessage = match serde_json::from_str(raw) {
            Ok(message) => message,
            Err(e) => {
                error!(
                    "Dropping malformed frame from {} on pad '{}': {}",
                    conn_id, pad_name, e
                );
                return;
            }
        };

        match message.message_type {
            MessageType::ContentUpdate => {
                self.store
                    .update_content(pad_name, message.content.unwrap_or_default());
                // Relay the raw payload untouched so client-defined extra
                // fields survive
                if let Some(session) = self.get(pad_name) {
                    session.broadcast(raw, conn_id).await;
                }
            }
            MessageType::Heartbeat => {
                debug!("Heartbeat from {} on pad '{}'", conn_id, pad_name);
            }
            MessageType::Init => {
                // INIT is server-originated only
                debug!("Ignoring client INIT from {} on pad '{}'", conn_id, pad_name);
            }
        }
    }

    /// Drop a connection from the pad's session; tears the session down
    /// when this was its last connection.
    pub async fn on_disconnect(&self, pad_name: &str, conn_id: Uuid) {
        let session = match self.get(pad_name) {
            Some(session) => session,
            None => return,
        };
        if session.leave(conn_id).await {
            self.remove_if_same(pad_name, &session);
            info!("Session for pad '{}' torn down", pad_name);
        }
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Total connected clients across all sessions, for reporting
    pub async fn connection_count(&self) -> usize {
        let sessions: Vec<Arc<PadSession>> =
            self.sessions.lock().unwrap().values().cloned().collect();
        let mut count = 0;
        for session in sessions {
            count += session.member_count().await;
        }
        count
    }

    fn get(&self, pad_name: &str) -> Option<Arc<PadSession>> {
        self.sessions.lock().unwrap().get(pad_name).cloned()
    }

    fn get_or_spawn(&self, pad_name: &str) -> Arc<PadSession> {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(session) = sessions.get(pad_name) {
            return session.clone();
        }
        info!("Spinning up session for pad '{}'", pad_name);
        let store = self.store.clone();
        let snapshot_fn: SnapshotFn = Arc::new(move |name: &str| store.snapshot(name));
        let session = Arc::new(PadSession::new(
            pad_name.to_string(),
            self.snapshot_interval,
            snapshot_fn,
        ));
        session.start_scheduler();
        sessions.insert(pad_name.to_string(), session.clone());
        session
    }

    /// Remove the map entry for `pad_name` only while it still points at
    /// `session`; an entry already replaced by a reconnect stays put.
    fn remove_if_same(&self, pad_name: &str, session: &Arc<PadSession>) {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(current) = sessions.get(pad_name) {
            if Arc::ptr_eq(current, session) {
                sessions.remove(pad_name);
            }
        }
    }
}
