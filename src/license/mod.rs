//! License text recognition.
//!
//! - [`catalog`] — the ordered label → pattern table, built-in plus any
//!   labels added from the config file.
//! - [`classifier`] — turns file contents into labels, version and copyright
//!   metadata.

pub mod catalog;
pub mod classifier;
