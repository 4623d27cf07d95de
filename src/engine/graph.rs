use std::collections::HashMap;

use thiserror::Error;

/// Category a node belongs to. Drives colors and legend text only; the
/// simulation never reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// A prompt version in the agent's history.
	Prompt,
	/// A task the agent executed.
	Task,
	/// A learned memory pattern.
	Memory,
}

impl NodeKind {
	/// Lowercase name, as shown in the hover info card.
	pub fn as_str(self) -> &'static str {
		match self {
			NodeKind::Prompt => "prompt",
			NodeKind::Task => "task",
			NodeKind::Memory => "memory",
		}
	}
}

/// 2D point/vector in canvas units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
	pub x: f64,
	pub y: f64,
}

/// Construction-time description of a node.
#[derive(Clone, Debug)]
pub struct NodeSpec {
	pub id: String,
	pub kind: NodeKind,
	pub label: String,
	pub x: f64,
	pub y: f64,
	/// Ids of the nodes this one points to (outgoing edges, in order).
	pub neighbors: Vec<String>,
}

impl NodeSpec {
	pub fn new(id: &str, kind: NodeKind, label: &str, x: f64, y: f64, neighbors: &[&str]) -> Self {
		Self {
			id: id.into(),
			kind,
			label: label.into(),
			x,
			y,
			neighbors: neighbors.iter().map(|&n| n.into()).collect(),
		}
	}
}

/// A node with its kinematic state. Identity, kind, label and edges are
/// fixed for the node's lifetime; position and velocity change every tick.
#[derive(Clone, Debug)]
pub struct Node {
	pub id: String,
	pub kind: NodeKind,
	pub label: String,
	pub position: Vec2,
	pub velocity: Vec2,
	pub neighbors: Vec<String>,
}

/// Two node specs shared an id; the graph was not built.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("duplicate node id `{id}`")]
pub struct DuplicateIdError {
	pub id: String,
}

/// Id-keyed node storage with a stable iteration order (insertion order).
///
/// Topology is fixed after construction; only the simulation writes node
/// positions and velocities.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<Node>,
	index: HashMap<String, usize>,
}

impl Graph {
	pub fn new(specs: Vec<NodeSpec>) -> Result<Self, DuplicateIdError> {
		let mut nodes = Vec::with_capacity(specs.len());
		let mut index = HashMap::with_capacity(specs.len());
		for spec in specs {
			if index.contains_key(&spec.id) {
				return Err(DuplicateIdError { id: spec.id });
			}
			index.insert(spec.id.clone(), nodes.len());
			nodes.push(Node {
				id: spec.id,
				kind: spec.kind,
				label: spec.label,
				position: Vec2 {
					x: spec.x,
					y: spec.y,
				},
				velocity: Vec2::default(),
				neighbors: spec.neighbors,
			});
		}
		Ok(Self { nodes, index })
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn get(&self, id: &str) -> Option<&Node> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	/// Nodes in stable (insertion) order.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		self.nodes.iter()
	}

	/// Resolved neighbors of `id`, in edge order. Dangling references are
	/// omitted rather than reported; a partial dataset must still render.
	pub fn neighbors_of(&self, id: &str) -> impl Iterator<Item = &Node> {
		self.get(id)
			.map(|node| node.neighbors.as_slice())
			.unwrap_or_default()
			.iter()
			.filter_map(|n| self.get(n))
	}

	pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
		&mut self.nodes
	}

	/// Every resolved edge as an index pair (owner, target), in stable order.
	pub(crate) fn resolved_edges(&self) -> Vec<(usize, usize)> {
		let mut edges = Vec::new();
		for (i, node) in self.nodes.iter().enumerate() {
			for neighbor in &node.neighbors {
				if let Some(c) = self.index_of(neighbor) {
					edges.push((i, c));
				}
			}
		}
		edges
	}
}
