//! Display formatting for prices.

pub mod price;

pub use price::{display_euro, round_cents};
