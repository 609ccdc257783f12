use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use grove_types::Order;

use crate::error::ServerResult;

/// Work that runs after an order is first created.
///
/// Hooks run on a detached task. They never influence the confirm
/// response and their failures are only logged.
#[async_trait]
pub trait ConfirmHook: Send + Sync {
    async fn after_confirm(&self, order: &Order) -> ServerResult<()>;
}

pub struct NoOpHook;

#[async_trait]
impl ConfirmHook for NoOpHook {
    async fn after_confirm(&self, _order: &Order) -> ServerResult<()> {
        Ok(())
    }
}

/// Stand-in for a planting partner integration: waits, then logs.
pub struct SimulatedPartnerHook {
    delay: Duration,
}

impl SimulatedPartnerHook {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ConfirmHook for SimulatedPartnerHook {
    async fn after_confirm(&self, order: &Order) -> ServerResult<()> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(
            order_id = %order.id,
            intent_id = %order.intent_id,
            "partner settlement simulated"
        );
        Ok(())
    }
}

/// Run `hook` for `order` on a detached task.
pub fn spawn_after_confirm(hook: Arc<dyn ConfirmHook>, order: Order) {
    tokio::spawn(async move {
        if let Err(e) = hook.after_confirm(&order).await {
            tracing::warn!(order_id = %order.id, error = %e, "post-confirmation hook failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_types::{Clock, Coordinates, FixedClock, IntentId, OrderId};
    use tokio::sync::mpsc;

    fn order() -> Order {
        let at = FixedClock::at_millis(0).now();
        Order {
            id: OrderId::from("pln_2"),
            intent_id: IntentId::from("int_1"),
            created_at: at,
            confirmed_at: at,
            location: Coordinates::new(0.0, 0.0),
            origin: None,
        }
    }

    struct ChannelHook(mpsc::UnboundedSender<OrderId>);

    #[async_trait]
    impl ConfirmHook for ChannelHook {
        async fn after_confirm(&self, order: &Order) -> ServerResult<()> {
            let _ = self.0.send(order.id.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn noop_hook_succeeds() {
        NoOpHook.after_confirm(&order()).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_hook_waits_for_its_delay() {
        let hook = SimulatedPartnerHook::new(Duration::from_secs(2));
        let started = tokio::time::Instant::now();
        hook.after_confirm(&order()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn spawned_hook_runs_detached() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_after_confirm(Arc::new(ChannelHook(tx)), order());
        assert_eq!(rx.recv().await, Some(OrderId::from("pln_2")));
    }
}
