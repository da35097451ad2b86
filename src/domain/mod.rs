//! Domain modules organized as vertical slices.
//!
//! - `price` — feed points and series, with wire types and conversions
//! - `curation` — extremum-preserving downsampling
//! - `tier` — price classification and the vibration decision
//! - `render` — fixed-width notification text

pub mod curation;
pub mod price;
pub mod render;
pub mod tier;
