//! Shared cart store.
//!
//! The ledger lives inside a `watch` channel. Every operation runs as one
//! `send_modify` call, so it reads the latest ledger, applies the change and
//! publishes the result while holding the channel lock. Two increments issued
//! back to back are both reflected, regardless of when subscribers render.

use std::num::NonZeroU32;

use storefront_core::cart::{CartLedger, CartLine, CartSnapshot};
use storefront_core::product::{Product, ProductId};
use tokio::sync::watch;

/// Process-wide cart, shared by handle (`Arc<CartStore>`) with UI collaborators.
#[derive(Debug)]
pub struct CartStore {
    ledger: watch::Sender<CartLedger>,
}

impl CartStore {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::with_ledger(CartLedger::new())
    }

    /// Creates a cart starting from `ledger`.
    pub fn with_ledger(ledger: CartLedger) -> Self {
        let (ledger, _) = watch::channel(ledger);
        Self { ledger }
    }

    /// Applies `op` to the latest ledger and returns the new ledger.
    fn apply<F>(&self, op: F) -> CartLedger
    where
        F: FnOnce(CartLedger) -> CartLedger,
    {
        let mut updated = CartLedger::new();
        self.ledger.send_modify(|ledger| {
            *ledger = op(std::mem::take(ledger));
            updated = ledger.clone();
        });
        updated
    }

    /// Adds one unit of `product`; the line is created on first add.
    pub fn add_to_cart(&self, product: &Product) -> CartLedger {
        tracing::debug!(product_id = %product.id, "Add to cart");
        self.apply(|ledger| ledger.add(product))
    }

    /// Adds `quantity` units of `product` in one operation.
    pub fn add_quantity(&self, product: &Product, quantity: NonZeroU32) -> CartLedger {
        tracing::debug!(product_id = %product.id, quantity = quantity.get(), "Add to cart");
        self.apply(|ledger| ledger.add_quantity(product, quantity))
    }

    /// Deletes the line for `id` whatever its amount.
    pub fn remove_from_cart(&self, id: &ProductId) -> CartLedger {
        self.apply(|ledger| ledger.remove(id))
    }

    pub fn increase_amount(&self, id: &ProductId) -> CartLedger {
        self.apply(|ledger| ledger.increase(id))
    }

    /// Decrements the line for `id`, removing it when the amount reaches zero.
    pub fn decrease_amount(&self, id: &ProductId) -> CartLedger {
        self.apply(|ledger| ledger.decrease(id))
    }

    pub fn clear_cart(&self) -> CartLedger {
        tracing::debug!("Clear cart");
        self.apply(CartLedger::clear)
    }

    /// Current ledger.
    pub fn ledger(&self) -> CartLedger {
        self.ledger.borrow().clone()
    }

    /// Item count and total derived from the current ledger.
    pub fn snapshot(&self) -> CartSnapshot {
        self.ledger.borrow().snapshot()
    }

    /// Ledger and its snapshot read under one borrow.
    pub fn state(&self) -> (CartLedger, CartSnapshot) {
        let ledger = self.ledger.borrow();
        (ledger.clone(), ledger.snapshot())
    }

    pub fn line(&self, id: &ProductId) -> Option<CartLine> {
        self.ledger.borrow().line(id).cloned()
    }

    /// Receiver notified after every cart operation.
    pub fn subscribe(&self) -> watch::Receiver<CartLedger> {
        self.ledger.subscribe()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}
