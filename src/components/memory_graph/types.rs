use crate::engine::{Graph, NodeKind};

/// What the hover info card shows for the node under the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverInfo {
	pub id: String,
	pub label: String,
	pub kind: NodeKind,
	pub connections: usize,
}

impl HoverInfo {
	pub fn for_node(graph: &Graph, id: &str) -> Option<Self> {
		graph.get(id).map(|node| Self {
			id: node.id.clone(),
			label: node.label.clone(),
			kind: node.kind,
			connections: node.neighbors.len(),
		})
	}
}
