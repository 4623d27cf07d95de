//! Routed pages.

pub mod memory;
pub mod not_found;
