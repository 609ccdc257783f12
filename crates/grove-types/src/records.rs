use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{IntentId, OrderId};
use crate::location::Coordinates;
use crate::temporal::to_iso8601;

/// Lifecycle of an intent. `Confirmed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentState {
    Created,
    Confirmed,
}

impl fmt::Display for IntentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "Created"),
            Self::Confirmed => write!(f, "Confirmed"),
        }
    }
}

/// A registered promise to plant, not yet finalized.
///
/// Only the ledger's confirm path mutates an intent, and it does so once:
/// `confirmed` flips to `true` and `order_id` is linked in the same step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub id: IntentId,
    pub created_at: DateTime<Utc>,
    pub confirmed: bool,
    pub order_id: Option<OrderId>,
    pub origin: Option<String>,
}

impl Intent {
    pub fn new(id: IntentId, created_at: DateTime<Utc>, origin: Option<String>) -> Self {
        Self {
            id,
            created_at,
            confirmed: false,
            order_id: None,
            origin,
        }
    }

    pub fn state(&self) -> IntentState {
        if self.confirmed {
            IntentState::Confirmed
        } else {
            IntentState::Created
        }
    }
}

/// A finalized planting. Immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub intent_id: IntentId,
    /// Copied from the originating intent.
    pub created_at: DateTime<Utc>,
    pub confirmed_at: DateTime<Utc>,
    pub location: Coordinates,
    pub origin: Option<String>,
}

/// Read-only proof document for a completed order, in its wire shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Proof {
    pub planting_id: OrderId,
    pub intent_id: IntentId,
    pub project: String,
    /// ISO-8601 rendering of the order's `confirmed_at`.
    pub planted_at: String,
    /// `[latitude, longitude]`
    pub coordinates: [f64; 2],
    pub message: String,
}

impl Proof {
    /// Derive the proof for `order`. Depends only on stored order fields and
    /// the two fixed labels, so repeated calls yield identical documents.
    pub fn for_order(order: &Order, project: &str, message: &str) -> Self {
        Self {
            planting_id: order.id.clone(),
            intent_id: order.intent_id.clone(),
            project: project.to_string(),
            planted_at: to_iso8601(&order.confirmed_at),
            coordinates: order.location.to_array(),
            message: message.to_string(),
        }
    }
}
