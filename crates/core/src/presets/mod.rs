//! Pre-built naming conventions.
//!
//! Each preset returns a terminated [`PathTemplate`](crate::PathTemplate) ready to render.

pub mod bids;

pub use bids::bids;
