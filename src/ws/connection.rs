use axum::extract::ws::Message;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// Server-side handle for one connected client.
///
/// Frames queued here are drained into the socket by the connection's
/// writer task, so queueing never blocks the session doing the broadcast.
#[derive(Clone, Debug)]
pub struct ConnectionHandle {
    id: Uuid,
    outbox: UnboundedSender<Message>,
}

impl ConnectionHandle {
    pub fn new(id: Uuid, outbox: UnboundedSender<Message>) -> Self {
        Self { id, outbox }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Queue a frame for delivery. Returns false when the connection's
    /// writer task is already gone.
    pub fn send(&self, msg: Message) -> bool {
        self.outbox.send(msg).is_ok()
    }
}
