//! Report renderers for license scan results.
//!
//! - [`markdown`] — title, per-label overview table, and one section per
//!   discovered license file in discovery order.

pub mod markdown;
