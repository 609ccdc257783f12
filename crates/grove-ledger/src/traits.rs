use grove_types::{Intent, IntentId, Order, OrderId, Proof};

use crate::error::LedgerResult;

/// Outcome of a confirm call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confirmation {
    pub order_id: OrderId,
    /// `false` when the intent was already confirmed and the existing order
    /// was returned unchanged.
    pub newly_created: bool,
}

/// Write boundary for the planting ledger.
pub trait LedgerWriter: Send + Sync {
    /// Register a new intent and return its id. `origin` is an opaque
    /// provenance marker recorded verbatim.
    fn create_intent(&self, origin: Option<String>) -> LedgerResult<IntentId>;

    /// Confirm an intent, creating its order on the first call.
    ///
    /// Calls for an already confirmed intent return the existing order id
    /// without touching any state. Concurrent calls for the same intent are
    /// serialized, so at most one order is ever created per intent.
    fn confirm_intent(
        &self,
        intent_id: &IntentId,
        origin: Option<String>,
    ) -> LedgerResult<Confirmation>;
}

/// Read boundary for the planting ledger.
pub trait LedgerReader: Send + Sync {
    /// Proof document for a confirmed order.
    fn proof(&self, order_id: &OrderId) -> LedgerResult<Proof>;

    fn intent(&self, intent_id: &IntentId) -> LedgerResult<Option<Intent>>;

    fn order(&self, order_id: &OrderId) -> LedgerResult<Option<Order>>;

    fn intents(&self) -> LedgerResult<Vec<Intent>>;

    fn orders(&self) -> LedgerResult<Vec<Order>>;

    fn intent_count(&self) -> LedgerResult<usize>;

    fn order_count(&self) -> LedgerResult<usize>;
}

/// Full read/write access, as held by the HTTP adapter.
pub trait Ledger: LedgerReader + LedgerWriter {}

impl<T: LedgerReader + LedgerWriter> Ledger for T {}
