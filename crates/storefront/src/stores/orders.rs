//! Order store.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use minimart_core::{OrderId, OrderStatus, ProductId, UserId};

use crate::models::{Address, Order, OrderDraft, OrderItem};

#[derive(Debug, Default)]
struct OrderState {
    orders: Vec<Order>,
    next_id: u64,
}

/// In-memory, append-only order store.
///
/// Orders are immutable once appended; they hold their own product
/// snapshots, so later catalog edits never change past orders.
#[derive(Debug)]
pub struct OrderStore {
    state: RwLock<OrderState>,
}

impl OrderStore {
    /// Create an empty order store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(OrderState {
                orders: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Create an order store seeded with the demo order.
    #[must_use]
    pub fn with_demo_data() -> Self {
        let demo = Order {
            id: OrderId::new("o1"),
            user_id: UserId::new("u1"),
            items: vec![OrderItem {
                product_id: ProductId::new("p1"),
                name: "Mechanical Keyboard".to_string(),
                price: Decimal::new(12999, 2),
                quantity: 2,
            }],
            total_amount: Decimal::new(25998, 2),
            status: OrderStatus::Processing,
            created_at: Utc::now() - Duration::hours(24),
            shipping_addr: Address {
                street: "123 Main St".to_string(),
                city: "Anytown".to_string(),
                state: "CA".to_string(),
                zip_code: "12345".to_string(),
                country: "USA".to_string(),
            },
        };

        Self {
            state: RwLock::new(OrderState {
                orders: vec![demo],
                next_id: 2,
            }),
        }
    }

    /// Append a new order, stamping its ID and creation time.
    ///
    /// IDs come from a monotonic counter allocated under the write lock,
    /// so they never collide, even under interleaved appends.
    pub fn append(&self, draft: OrderDraft) -> Order {
        let mut state = self.write();
        let id = OrderId::new(format!("o{}", state.next_id));
        state.next_id += 1;

        let order = Order {
            id,
            user_id: draft.user_id,
            items: draft.items,
            total_amount: draft.total_amount,
            status: draft.status,
            created_at: Utc::now(),
            shipping_addr: draft.shipping_addr,
        };
        state.orders.push(order.clone());
        order
    }

    /// Look up an order by ID.
    #[must_use]
    pub fn find_by_id(&self, id: &OrderId) -> Option<Order> {
        self.read().orders.iter().find(|o| &o.id == id).cloned()
    }

    /// All orders for a user, in insertion order.
    #[must_use]
    pub fn find_by_user(&self, user_id: &UserId) -> Vec<Order> {
        self.read()
            .orders
            .iter()
            .filter(|o| &o.user_id == user_id)
            .cloned()
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, OrderState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, OrderState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn draft_for(user: &str) -> OrderDraft {
        OrderDraft {
            user_id: UserId::new(user),
            items: Vec::new(),
            total_amount: dec!(0),
            status: OrderStatus::Pending,
            shipping_addr: Address {
                street: "1 Test Way".to_string(),
                city: "Testville".to_string(),
                state: "TS".to_string(),
                zip_code: "00000".to_string(),
                country: "USA".to_string(),
            },
        }
    }

    #[test]
    fn test_append_assigns_distinct_monotonic_ids() {
        let store = OrderStore::with_demo_data();
        let first = store.append(draft_for("u1"));
        let second = store.append(draft_for("u2"));

        assert_eq!(first.id, OrderId::new("o2"));
        assert_eq!(second.id, OrderId::new("o3"));
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_find_by_user_insertion_order() {
        let store = OrderStore::new();
        store.append(draft_for("u1"));
        store.append(draft_for("u2"));
        store.append(draft_for("u1"));

        let orders = store.find_by_user(&UserId::new("u1"));
        let ids: Vec<_> = orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["o1", "o3"]);
    }

    #[test]
    fn test_find_by_id() {
        let store = OrderStore::with_demo_data();
        let order = store.find_by_id(&OrderId::new("o1")).unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.total_amount, dec!(259.98));

        assert!(store.find_by_id(&OrderId::new("o99")).is_none());
    }
}
