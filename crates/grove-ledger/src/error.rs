use grove_types::{IntentId, OrderId, TypeError};

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("intent not found: {0}")]
    IntentNotFound(IntentId),

    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// A confirmed intent whose order link is missing or dangling.
    #[error("broken intent/order link for {intent_id}: {reason}")]
    BrokenLink { intent_id: IntentId, reason: String },

    #[error("identifier collision: {0}")]
    IdCollision(String),

    #[error("ledger {0} lock poisoned")]
    LockPoisoned(&'static str),

    #[error("invalid ledger configuration: {0}")]
    InvalidConfig(String),
}

impl LedgerError {
    /// Returns `true` for the caller-facing "no such id" conditions.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::IntentNotFound(_) | Self::OrderNotFound(_))
    }
}

impl From<TypeError> for LedgerError {
    fn from(e: TypeError) -> Self {
        Self::InvalidConfig(e.to_string())
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
