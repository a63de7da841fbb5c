//! Cart ledger domain model.
//!
//! Every operation consumes the current ledger and returns the next one, so
//! callers holding a shared store can apply them as a single
//! read-modify-write step.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::product::{Product, ProductId};

/// A product in the cart together with its quantity.
///
/// `amount` is never zero: a line that would reach zero is removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl CartLine {
    fn new(product: &Product, amount: NonZeroU32) -> Self {
        Self {
            product: product.clone(),
            amount: amount.get(),
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// `price * amount` for this line.
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.amount)
    }
}

/// The ordered collection of cart lines.
///
/// A product id appears at most once; lines keep the order in which their
/// product was first added.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.line(id).is_some()
    }

    /// Adds one unit of `product`, appending a new line if it is not in the cart yet.
    pub fn add(self, product: &Product) -> Self {
        self.add_quantity(product, NonZeroU32::MIN)
    }

    /// Adds `quantity` units of `product` in one step.
    pub fn add_quantity(mut self, product: &Product, quantity: NonZeroU32) -> Self {
        match self.lines.iter_mut().find(|line| line.id() == &product.id) {
            Some(line) => line.amount = line.amount.saturating_add(quantity.get()),
            None => self.lines.push(CartLine::new(product, quantity)),
        }
        self
    }

    /// Deletes the line regardless of its amount. Absent ids are a no-op.
    pub fn remove(mut self, id: &ProductId) -> Self {
        self.lines.retain(|line| line.id() != id);
        self
    }

    /// Increments the amount of an existing line. Absent ids are a no-op.
    pub fn increase(mut self, id: &ProductId) -> Self {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id() == id) {
            line.amount = line.amount.saturating_add(1);
        }
        self
    }

    /// Decrements the amount of an existing line, removing it when it reaches zero.
    /// Absent ids are a no-op.
    pub fn decrease(mut self, id: &ProductId) -> Self {
        if let Some(index) = self.lines.iter().position(|line| line.id() == id) {
            if self.lines[index].amount <= 1 {
                self.lines.remove(index);
            } else {
                self.lines[index].amount -= 1;
            }
        }
        self
    }

    /// Empties the ledger.
    pub fn clear(self) -> Self {
        Self::new()
    }

    /// Derives the aggregates for this exact ledger.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from(self)
    }
}

/// Aggregates derived from a ledger. Never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Sum of all line amounts.
    pub item_count: u64,
    /// Sum of `price * amount` over all lines.
    pub total: f64,
}

impl From<&CartLedger> for CartSnapshot {
    fn from(ledger: &CartLedger) -> Self {
        ledger
            .lines
            .iter()
            .fold(CartSnapshot::default(), |acc, line| CartSnapshot {
                item_count: acc.item_count + u64::from(line.amount),
                total: acc.total + line.subtotal(),
            })
    }
}
