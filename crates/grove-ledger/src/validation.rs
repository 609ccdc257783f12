use std::collections::HashMap;

use grove_types::{IntentId, OrderId};

use crate::error::LedgerError;
use crate::traits::LedgerReader;

/// Result of link validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkReport {
    pub intent_count: usize,
    pub order_count: usize,
    pub violations: Vec<Violation>,
}

impl LinkReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific integrity violation detected during validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Id of the intent or order the violation was found on.
    pub subject: String,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    ConfirmedWithoutOrder,
    UnconfirmedWithOrder,
    DanglingOrderLink,
    OrphanOrder,
    MismatchedBackReference,
}

/// Checks that every order pairs 1:1 with a confirmed intent.
pub struct LinkValidator;

impl LinkValidator {
    pub fn validate<R: LedgerReader + ?Sized>(reader: &R) -> Result<LinkReport, LedgerError> {
        let intents = reader.intents()?;
        let orders = reader.orders()?;
        let mut violations = Vec::new();

        let intent_links: HashMap<&IntentId, Option<&OrderId>> = intents
            .iter()
            .map(|i| (&i.id, i.order_id.as_ref()))
            .collect();
        let order_ids: HashMap<&OrderId, &IntentId> =
            orders.iter().map(|o| (&o.id, &o.intent_id)).collect();

        for intent in &intents {
            let subject = intent.id.to_string();
            match (intent.confirmed, intent.order_id.as_ref()) {
                (true, None) => violations.push(Violation {
                    subject,
                    kind: ViolationKind::ConfirmedWithoutOrder,
                    description: "intent is confirmed but has no order".into(),
                }),
                (false, Some(order_id)) => violations.push(Violation {
                    subject,
                    kind: ViolationKind::UnconfirmedWithOrder,
                    description: format!("unconfirmed intent links order {order_id}"),
                }),
                (true, Some(order_id)) if !order_ids.contains_key(order_id) => {
                    violations.push(Violation {
                        subject,
                        kind: ViolationKind::DanglingOrderLink,
                        description: format!("linked order {order_id} does not exist"),
                    })
                }
                _ => {}
            }
        }

        for order in &orders {
            let subject = order.id.to_string();
            match intent_links.get(&order.intent_id) {
                None => violations.push(Violation {
                    subject,
                    kind: ViolationKind::OrphanOrder,
                    description: format!(
                        "originating intent {} does not exist",
                        order.intent_id
                    ),
                }),
                Some(link) if *link != Some(&order.id) => violations.push(Violation {
                    subject,
                    kind: ViolationKind::MismatchedBackReference,
                    description: format!(
                        "intent {} does not link back to this order",
                        order.intent_id
                    ),
                }),
                Some(_) => {}
            }
        }

        Ok(LinkReport {
            intent_count: intents.len(),
            order_count: orders.len(),
            violations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_types::{Clock, Coordinates, FixedClock, Intent, Order, Proof};

    /// Reader over fixed tables, for states the real ledger cannot produce.
    struct StaticReader {
        intents: Vec<Intent>,
        orders: Vec<Order>,
    }

    impl LedgerReader for StaticReader {
        fn proof(&self, order_id: &OrderId) -> Result<Proof, LedgerError> {
            self.orders
                .iter()
                .find(|o| &o.id == order_id)
                .map(|o| Proof::for_order(o, "p", "m"))
                .ok_or_else(|| LedgerError::OrderNotFound(order_id.clone()))
        }

        fn intent(&self, id: &IntentId) -> Result<Option<Intent>, LedgerError> {
            Ok(self.intents.iter().find(|i| &i.id == id).cloned())
        }

        fn order(&self, id: &OrderId) -> Result<Option<Order>, LedgerError> {
            Ok(self.orders.iter().find(|o| &o.id == id).cloned())
        }

        fn intents(&self) -> Result<Vec<Intent>, LedgerError> {
            Ok(self.intents.clone())
        }

        fn orders(&self) -> Result<Vec<Order>, LedgerError> {
            Ok(self.orders.clone())
        }

        fn intent_count(&self) -> Result<usize, LedgerError> {
            Ok(self.intents.len())
        }

        fn order_count(&self) -> Result<usize, LedgerError> {
            Ok(self.orders.len())
        }
    }

    fn intent(id: &str, order: Option<&str>) -> Intent {
        let mut intent = Intent::new(IntentId::from(id), FixedClock::at_millis(0).now(), None);
        intent.confirmed = order.is_some();
        intent.order_id = order.map(OrderId::from);
        intent
    }

    fn order(id: &str, intent_id: &str) -> Order {
        let at = FixedClock::at_millis(0).now();
        Order {
            id: OrderId::from(id),
            intent_id: IntentId::from(intent_id),
            created_at: at,
            confirmed_at: at,
            location: Coordinates::new(0.0, 0.0),
            origin: None,
        }
    }

    fn kinds(report: &LinkReport) -> Vec<ViolationKind> {
        report.violations.iter().map(|v| v.kind).collect()
    }

    #[test]
    fn consistent_tables_pass() {
        let reader = StaticReader {
            intents: vec![intent("int_1", Some("pln_2")), intent("int_3", None)],
            orders: vec![order("pln_2", "int_1")],
        };
        let report = LinkValidator::validate(&reader).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.intent_count, 2);
        assert_eq!(report.order_count, 1);
    }

    #[test]
    fn detects_dangling_link() {
        let reader = StaticReader {
            intents: vec![intent("int_1", Some("pln_2"))],
            orders: vec![],
        };
        let report = LinkValidator::validate(&reader).unwrap();
        assert_eq!(kinds(&report), vec![ViolationKind::DanglingOrderLink]);
        assert_eq!(report.violations[0].subject, "int_1");
    }

    #[test]
    fn detects_confirmed_without_order() {
        let mut broken = intent("int_1", None);
        broken.confirmed = true;
        let reader = StaticReader {
            intents: vec![broken],
            orders: vec![],
        };
        let report = LinkValidator::validate(&reader).unwrap();
        assert_eq!(kinds(&report), vec![ViolationKind::ConfirmedWithoutOrder]);
    }

    #[test]
    fn detects_unconfirmed_with_order() {
        let mut broken = intent("int_1", Some("pln_2"));
        broken.confirmed = false;
        let reader = StaticReader {
            intents: vec![broken],
            orders: vec![order("pln_2", "int_1")],
        };
        let report = LinkValidator::validate(&reader).unwrap();
        assert_eq!(kinds(&report), vec![ViolationKind::UnconfirmedWithOrder]);
    }

    #[test]
    fn detects_orphan_and_duplicate_orders() {
        let reader = StaticReader {
            intents: vec![intent("int_1", Some("pln_2"))],
            orders: vec![
                order("pln_2", "int_1"),
                order("pln_3", "int_1"),
                order("pln_4", "int_9"),
            ],
        };
        let report = LinkValidator::validate(&reader).unwrap();
        assert_eq!(
            kinds(&report),
            vec![
                ViolationKind::MismatchedBackReference,
                ViolationKind::OrphanOrder
            ]
        );
        assert_eq!(report.violations[0].subject, "pln_3");
    }
}
