//! Headless force-layout engine: graph model, simulation step, and the
//! frame driver. No rendering happens here; hosts paint from the graph
//! snapshot handed to the per-frame callback.

mod driver;
mod graph;
mod sim;

pub use driver::{Driver, FrameScheduler, HIT_RADIUS, LoopHandle, start};
pub use graph::{DuplicateIdError, Graph, Node, NodeKind, NodeSpec, Vec2};
pub use sim::{Bounds, SimParams, WALL_MARGIN, step};
