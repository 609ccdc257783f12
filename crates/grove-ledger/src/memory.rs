use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use grove_types::{
    Clock, IdGenerator, Intent, IntentId, JitterSource, Order, OrderId, Proof, RandomJitter,
    SystemClock, UuidIdGenerator,
};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::traits::{Confirmation, LedgerReader, LedgerWriter};
use crate::validation::{LinkReport, LinkValidator};

/// Process-local planting ledger.
///
/// Both tables sit behind a single `RwLock`. Writers hold the write lock for
/// their whole check-then-act sequence, which is what makes confirmation
/// safe under concurrent retries.
pub struct InMemoryLedger {
    config: LedgerConfig,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    jitter: Box<dyn JitterSource>,
    inner: RwLock<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    intents: HashMap<IntentId, Intent>,
    orders: HashMap<OrderId, Order>,
}

impl LedgerState {
    fn token_taken(&self, token: &str) -> bool {
        self.intents.contains_key(&IntentId::from(token))
            || self.orders.contains_key(&OrderId::from(token))
    }
}

impl InMemoryLedger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            ids: Box::new(UuidIdGenerator),
            clock: Box::new(SystemClock),
            jitter: Box::new(RandomJitter),
            inner: RwLock::new(LedgerState::default()),
        }
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_jitter(mut self, jitter: impl JitterSource + 'static) -> Self {
        self.jitter = Box::new(jitter);
        self
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Check the intent/order 1:1 invariant across both tables.
    pub fn validate_links(&self) -> LedgerResult<LinkReport> {
        LinkValidator::validate(self)
    }

    fn read_state(&self) -> LedgerResult<RwLockReadGuard<'_, LedgerState>> {
        self.inner
            .read()
            .map_err(|_| LedgerError::LockPoisoned("read"))
    }

    fn write_state(&self) -> LedgerResult<RwLockWriteGuard<'_, LedgerState>> {
        self.inner
            .write()
            .map_err(|_| LedgerError::LockPoisoned("write"))
    }

    fn replay_confirmation(state: &LedgerState, intent: &Intent) -> LedgerResult<Confirmation> {
        let order_id = intent
            .order_id
            .clone()
            .ok_or_else(|| LedgerError::BrokenLink {
                intent_id: intent.id.clone(),
                reason: "confirmed intent has no order id".into(),
            })?;

        if !state.orders.contains_key(&order_id) {
            return Err(LedgerError::BrokenLink {
                intent_id: intent.id.clone(),
                reason: format!("linked order {order_id} does not exist"),
            });
        }

        Ok(Confirmation {
            order_id,
            newly_created: false,
        })
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl LedgerWriter for InMemoryLedger {
    fn create_intent(&self, origin: Option<String>) -> LedgerResult<IntentId> {
        let mut state = self.write_state()?;

        let id = self.ids.intent_id();
        if state.token_taken(id.as_str()) {
            return Err(LedgerError::IdCollision(id.into_inner()));
        }

        let intent = Intent::new(id.clone(), self.clock.now(), origin);
        state.intents.insert(id.clone(), intent);

        tracing::info!(intent_id = %id, "intent created");
        Ok(id)
    }

    fn confirm_intent(
        &self,
        intent_id: &IntentId,
        origin: Option<String>,
    ) -> LedgerResult<Confirmation> {
        let mut state = self.write_state()?;

        let intent = state
            .intents
            .get(intent_id)
            .ok_or_else(|| LedgerError::IntentNotFound(intent_id.clone()))?;

        if intent.confirmed {
            let confirmation = Self::replay_confirmation(&state, intent).inspect_err(|e| {
                tracing::error!(intent_id = %intent_id, error = %e, "ledger invariant violated");
            })?;
            tracing::debug!(
                intent_id = %intent_id,
                order_id = %confirmation.order_id,
                "intent already confirmed; returning existing order"
            );
            return Ok(confirmation);
        }
        let created_at = intent.created_at;

        let order_id = self.ids.order_id();
        if state.token_taken(order_id.as_str()) {
            return Err(LedgerError::IdCollision(order_id.into_inner()));
        }

        let order = Order {
            id: order_id.clone(),
            intent_id: intent_id.clone(),
            created_at,
            confirmed_at: self.clock.now(),
            location: self
                .config
                .base_point
                .jittered(self.config.jitter, self.jitter.as_ref()),
            origin,
        };
        tracing::info!(
            intent_id = %intent_id,
            order_id = %order_id,
            location = %order.location,
            "intent confirmed"
        );
        state.orders.insert(order_id.clone(), order);

        if let Some(intent) = state.intents.get_mut(intent_id) {
            intent.confirmed = true;
            intent.order_id = Some(order_id.clone());
        }

        Ok(Confirmation {
            order_id,
            newly_created: true,
        })
    }
}

impl LedgerReader for InMemoryLedger {
    fn proof(&self, order_id: &OrderId) -> LedgerResult<Proof> {
        let state = self.read_state()?;
        let order = state
            .orders
            .get(order_id)
            .ok_or_else(|| LedgerError::OrderNotFound(order_id.clone()))?;
        Ok(Proof::for_order(
            order,
            &self.config.project,
            &self.config.message,
        ))
    }

    fn intent(&self, intent_id: &IntentId) -> LedgerResult<Option<Intent>> {
        Ok(self.read_state()?.intents.get(intent_id).cloned())
    }

    fn order(&self, order_id: &OrderId) -> LedgerResult<Option<Order>> {
        Ok(self.read_state()?.orders.get(order_id).cloned())
    }

    fn intents(&self) -> LedgerResult<Vec<Intent>> {
        let mut intents: Vec<_> = self.read_state()?.intents.values().cloned().collect();
        intents.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(intents)
    }

    fn orders(&self) -> LedgerResult<Vec<Order>> {
        let mut orders: Vec<_> = self.read_state()?.orders.values().cloned().collect();
        orders.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(orders)
    }

    fn intent_count(&self) -> LedgerResult<usize> {
        Ok(self.read_state()?.intents.len())
    }

    fn order_count(&self) -> LedgerResult<usize> {
        Ok(self.read_state()?.orders.len())
    }
}
