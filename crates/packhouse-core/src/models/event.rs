use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::packer::Packer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "packer.created")]
    PackerCreated,
    #[serde(rename = "packer.updated")]
    PackerUpdated,
    #[serde(rename = "packer.deleted")]
    PackerDeleted,
}

impl EventKind {
    /// SSE event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PackerCreated => "packer.created",
            EventKind::PackerUpdated => "packer.updated",
            EventKind::PackerDeleted => "packer.deleted",
        }
    }
}

/// Change notification pushed to connected clients after a store write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeEvent {
    pub kind: EventKind,
    pub packer_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packer: Option<Packer>,
    pub occurred_at: DateTime<Utc>,
}

impl RealtimeEvent {
    pub fn packer_created(packer: Packer) -> Self {
        Self::with_packer(EventKind::PackerCreated, packer)
    }

    pub fn packer_updated(packer: Packer) -> Self {
        Self::with_packer(EventKind::PackerUpdated, packer)
    }

    pub fn packer_deleted(id: Uuid) -> Self {
        Self {
            kind: EventKind::PackerDeleted,
            packer_id: id,
            packer: None,
            occurred_at: Utc::now(),
        }
    }

    fn with_packer(kind: EventKind, packer: Packer) -> Self {
        Self {
            kind,
            packer_id: packer.id,
            packer: Some(packer),
            occurred_at: Utc::now(),
        }
    }
}
