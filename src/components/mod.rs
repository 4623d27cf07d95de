//! Reusable view components.

pub mod memory_graph;
