use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Prefix carried by every generated intent identifier.
pub const INTENT_PREFIX: &str = "int_";

/// Prefix carried by every generated order identifier.
pub const ORDER_PREFIX: &str = "pln_";

/// Opaque identifier of an [`Intent`](crate::Intent).
///
/// Generated ids always start with [`INTENT_PREFIX`]. Ids arriving from
/// callers are accepted verbatim and simply fail lookup if unknown.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentId(String);

impl IntentId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntentId({})", self.0)
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for IntentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IntentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque identifier of an [`Order`](crate::Order), exposed as `planting_id`
/// over HTTP.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrderId({})", self.0)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Source of fresh identifiers.
///
/// Implementations must never hand out the same token twice, and intent and
/// order tokens must never collide with each other.
pub trait IdGenerator: Send + Sync {
    fn intent_id(&self) -> IntentId;
    fn order_id(&self) -> OrderId;
}

/// Default generator: UUID v7 (74 random bits) behind a per-space prefix.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn intent_id(&self) -> IntentId {
        IntentId(format!("{INTENT_PREFIX}{}", uuid::Uuid::now_v7().simple()))
    }

    fn order_id(&self) -> OrderId {
        OrderId(format!("{ORDER_PREFIX}{}", uuid::Uuid::now_v7().simple()))
    }
}

/// Deterministic generator for tests and demos: `int_1`, `pln_2`, ...
///
/// Both spaces share one counter so a token is never reused across them.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn intent_id(&self) -> IntentId {
        IntentId(format!("{INTENT_PREFIX}{}", self.bump()))
    }

    fn order_id(&self) -> OrderId {
        OrderId(format!("{ORDER_PREFIX}{}", self.bump()))
    }
}
