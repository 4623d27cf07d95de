mod component;
mod render;
mod types;

pub use component::MemoryGraphCanvas;
pub use types::HoverInfo;
