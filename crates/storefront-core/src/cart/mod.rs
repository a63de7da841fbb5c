//! Shopping cart ledger and its derived totals.

pub mod model;

pub use model::{CartLedger, CartLine, CartSnapshot};
