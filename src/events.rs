use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Domain events emitted by the services after a successful mutation.
///
/// The consumer only logs them today; the enum is the seam where projections
/// or outbound notifications would attach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    MaterialCreated(Uuid),
    MaterialUpdated(Uuid),
    MaterialDeleted(Uuid),

    WarehouseCreated(Uuid),
    WarehouseDeleted(Uuid),

    InventoryEntryCreated {
        entry_id: Uuid,
        material_id: Uuid,
        warehouse_id: Uuid,
        quantity: i32,
    },
    InventoryAdjusted {
        entry_id: Uuid,
        delta: i32,
        quantity_after: i32,
        adjusted_by: String,
    },

    ProjectCreated(Uuid),
    ProjectDeleted(Uuid),

    InventoryAssigned {
        assignment_id: Uuid,
        project_id: Uuid,
        line_count: usize,
    },
    AssignmentLineReturned {
        assignment_id: Uuid,
        entry_id: Uuid,
        quantity: i32,
    },

    CrewAssigned {
        assignment_id: Uuid,
        project_id: Uuid,
    },

    AttendanceCheckedIn {
        rut: String,
    },
    AttendanceCheckedOut {
        rut: String,
    },

    ForumPostCreated(Uuid),
    ForumPostDeleted(Uuid),

    UserCreated(Uuid),
    UserDeleted(Uuid),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event; a full or closed channel surfaces as an error string
    /// the caller maps into `ServiceError::EventError`.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("failed to send event: {}", e))
    }
}

/// Background consumer that drains the event channel for the lifetime of
/// the process.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    info!("event processor started");
    while let Some(event) = receiver.recv().await {
        debug!(?event, "domain event");
    }
    warn!("event channel closed; processor exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_to_receiver() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);
        sender
            .send(Event::MaterialCreated(Uuid::new_v4()))
            .await
            .expect("send should succeed");
        assert!(matches!(rx.recv().await, Some(Event::MaterialCreated(_))));
    }

    #[tokio::test]
    async fn send_on_closed_channel_errors() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);
        assert!(sender
            .send(Event::MaterialDeleted(Uuid::new_v4()))
            .await
            .is_err());
    }
}
