//! One discrete physics tick over the whole graph.
//!
//! Forces accumulate into velocities first (repulsion, edge springs,
//! center gravity), reading only start-of-tick positions, then every node
//! is integrated, damped and clamped. Everything is f64 over the graph's
//! stable iteration order, so identical inputs replay identically.

use super::graph::Graph;

/// Margin kept between node centers and the canvas edge.
pub const WALL_MARGIN: f64 = 50.0;

/// Rectangle the layout runs in, in canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

/// Tunable force constants.
#[derive(Clone, Copy, Debug)]
pub struct SimParams {
	/// Pairwise repulsion strength, falls off with distance squared.
	pub repel_k: f64,
	/// Edge length the spring force is at rest at.
	pub rest_length: f64,
	/// Spring stiffness.
	pub spring_k: f64,
	/// Pull toward the canvas center.
	pub gravity_k: f64,
	/// Velocity-to-position scale per tick.
	pub step_scale: f64,
	/// Geometric velocity decay per tick.
	pub damping: f64,
}

impl Default for SimParams {
	fn default() -> Self {
		Self {
			repel_k: 500.0,
			rest_length: 100.0,
			spring_k: 0.01,
			gravity_k: 0.001,
			step_scale: 0.1,
			damping: 0.9,
		}
	}
}

/// Advance every node's position and velocity by one tick.
pub fn step(graph: &mut Graph, params: &SimParams, bounds: Bounds) {
	let edges = graph.resolved_edges();
	let nodes = graph.nodes_mut();
	let n = nodes.len();

	// Repulsion between every unordered pair, applied symmetrically. The
	// distance floor keeps coincident nodes from dividing by zero.
	for i in 0..n {
		for j in (i + 1)..n {
			let dx = nodes[j].position.x - nodes[i].position.x;
			let dy = nodes[j].position.y - nodes[i].position.y;
			let dist = (dx * dx + dy * dy).sqrt().max(1.0);
			let force = params.repel_k / (dist * dist);
			nodes[i].velocity.x -= dx / dist * force;
			nodes[i].velocity.y -= dy / dist * force;
			nodes[j].velocity.x += dx / dist * force;
			nodes[j].velocity.y += dy / dist * force;
		}
	}

	// Springs pull each edge toward its rest length. Only the owning node
	// is updated; the target gets no counter-force.
	for &(i, c) in &edges {
		let dx = nodes[c].position.x - nodes[i].position.x;
		let dy = nodes[c].position.y - nodes[i].position.y;
		let dist = (dx * dx + dy * dy).sqrt();
		let force = (dist - params.rest_length) * params.spring_k;
		nodes[i].velocity.x += dx * force;
		nodes[i].velocity.y += dy * force;
	}

	// Gravity toward the canvas center, regardless of connectivity.
	let cx = bounds.width / 2.0;
	let cy = bounds.height / 2.0;
	for node in nodes.iter_mut() {
		node.velocity.x += (cx - node.position.x) * params.gravity_k;
		node.velocity.y += (cy - node.position.y) * params.gravity_k;
	}

	// Integrate, damp, then hard-clamp into the bounds. Clamping keeps the
	// velocity intact, so a wall-pressed node resumes as soon as the net
	// force turns inward.
	for node in nodes.iter_mut() {
		node.position.x += node.velocity.x * params.step_scale;
		node.position.y += node.velocity.y * params.step_scale;
		node.velocity.x *= params.damping;
		node.velocity.y *= params.damping;
		node.position.x = node.position.x.min(bounds.width - WALL_MARGIN).max(WALL_MARGIN);
		node.position.y = node.position.y.min(bounds.height - WALL_MARGIN).max(WALL_MARGIN);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::graph::{NodeKind, NodeSpec, Vec2};

	const BOUNDS: Bounds = Bounds {
		width: 400.0,
		height: 400.0,
	};

	fn spec(id: &str, x: f64, y: f64, neighbors: &[&str]) -> NodeSpec {
		NodeSpec::new(id, NodeKind::Memory, id, x, y, neighbors)
	}

	fn positions(graph: &Graph) -> Vec<Vec2> {
		graph.nodes().map(|n| n.position).collect()
	}

	fn distance(graph: &Graph, a: &str, b: &str) -> f64 {
		let (a, b) = (graph.get(a).unwrap().position, graph.get(b).unwrap().position);
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	#[test]
	fn empty_graph_tick_is_a_noop() {
		let mut graph = Graph::new(vec![]).unwrap();
		step(&mut graph, &SimParams::default(), BOUNDS);
		assert!(graph.is_empty());
	}

	#[test]
	fn replaying_identical_input_is_bit_identical() {
		let build = || {
			Graph::new(vec![
				spec("a", 120.0, 90.0, &["b"]),
				spec("b", 260.0, 150.0, &["c"]),
				spec("c", 180.0, 310.0, &["a"]),
			])
			.unwrap()
		};
		let params = SimParams::default();
		let (mut first, mut second) = (build(), build());
		for _ in 0..50 {
			step(&mut first, &params, BOUNDS);
			step(&mut second, &params, BOUNDS);
		}
		for (a, b) in first.nodes().zip(second.nodes()) {
			assert_eq!(a.position, b.position);
			assert_eq!(a.velocity, b.velocity);
		}
	}

	#[test]
	fn positions_stay_inside_the_walls() {
		let mut graph = Graph::new(vec![
			spec("a", 0.0, 0.0, &["b"]),
			spec("b", 10.0, 5.0, &["c"]),
			spec("c", 20.0, 10.0, &["d"]),
			spec("d", 30.0, 15.0, &["e"]),
			spec("e", 40.0, 20.0, &["f"]),
			spec("f", 50.0, 25.0, &[]),
		])
		.unwrap();
		let bounds = Bounds {
			width: 200.0,
			height: 200.0,
		};
		let params = SimParams::default();
		for _ in 0..300 {
			step(&mut graph, &params, bounds);
			for node in graph.nodes() {
				assert!(node.position.x >= WALL_MARGIN && node.position.x <= 150.0);
				assert!(node.position.y >= WALL_MARGIN && node.position.y <= 150.0);
			}
		}
	}

	#[test]
	fn lone_node_at_center_is_a_fixed_point() {
		let mut graph = Graph::new(vec![spec("a", 200.0, 200.0, &[])]).unwrap();
		let params = SimParams::default();
		for _ in 0..100 {
			step(&mut graph, &params, BOUNDS);
		}
		let node = graph.get("a").unwrap();
		assert_eq!(node.position, Vec2 { x: 200.0, y: 200.0 });
		assert_eq!(node.velocity, Vec2::default());
	}

	#[test]
	fn damping_bleeds_off_an_initial_kick() {
		let mut graph = Graph::new(vec![spec("a", 200.0, 200.0, &[])]).unwrap();
		graph.nodes_mut()[0].velocity = Vec2 { x: 12.0, y: -8.0 };
		let params = SimParams::default();
		let speed = |g: &Graph| {
			let v = g.get("a").unwrap().velocity;
			(v.x * v.x + v.y * v.y).sqrt()
		};
		let mut prev = speed(&graph);
		// Strict decay until gravity feedback from the small drift off
		// center becomes the same order of magnitude as the residual speed.
		for _ in 0..30 {
			step(&mut graph, &params, BOUNDS);
			let now = speed(&graph);
			assert!(now < prev, "speed rose from {prev} to {now}");
			prev = now;
		}
		assert!(prev < 1.0);
	}

	#[test]
	fn repulsion_is_equal_and_opposite() {
		let mut graph = Graph::new(vec![
			spec("a", 150.0, 200.0, &[]),
			spec("b", 230.0, 200.0, &[]),
		])
		.unwrap();
		let before = positions(&graph);
		// Gravity off so the only force acting is the pair repulsion.
		let params = SimParams {
			gravity_k: 0.0,
			..SimParams::default()
		};
		step(&mut graph, &params, BOUNDS);
		let after = positions(&graph);
		let (va, vb) = (
			graph.get("a").unwrap().velocity,
			graph.get("b").unwrap().velocity,
		);
		assert_eq!(va.x, -vb.x);
		assert_eq!(va.y, -vb.y);
		let (da, db) = (after[0].x - before[0].x, after[1].x - before[1].x);
		assert!((da + db).abs() < 1e-9);
		assert!(da < 0.0, "left node should be pushed further left");
	}

	#[test]
	fn coincident_nodes_do_not_blow_up() {
		// Zero displacement means zero force direction; the distance floor
		// just has to keep the math finite.
		let mut graph = Graph::new(vec![
			spec("a", 200.0, 200.0, &[]),
			spec("b", 200.0, 200.0, &[]),
		])
		.unwrap();
		let params = SimParams::default();
		step(&mut graph, &params, BOUNDS);
		for node in graph.nodes() {
			assert!(node.position.x.is_finite() && node.position.y.is_finite());
			assert!(node.velocity.x.is_finite() && node.velocity.y.is_finite());
		}
	}

	#[test]
	fn spring_update_is_one_sided() {
		// a -> b at twice the rest length: the spring pulls a toward b, while
		// b feels no spring at all. Repulsion and gravity are switched off to
		// observe the spring in isolation.
		let mut graph = Graph::new(vec![
			spec("a", 100.0, 200.0, &["b"]),
			spec("b", 300.0, 200.0, &[]),
		])
		.unwrap();
		let params = SimParams {
			repel_k: 0.0,
			gravity_k: 0.0,
			..SimParams::default()
		};
		step(&mut graph, &params, BOUNDS);
		let a = graph.get("a").unwrap();
		let b = graph.get("b").unwrap();
		assert!(a.position.x > 100.0);
		assert_eq!(b.position, Vec2 { x: 300.0, y: 200.0 });
		assert_eq!(b.velocity, Vec2::default());
	}

	#[test]
	fn chain_settles_near_rest_length() {
		let mut graph = Graph::new(vec![
			spec("a", 0.0, 0.0, &["b"]),
			spec("b", 50.0, 0.0, &["c"]),
			spec("c", 200.0, 0.0, &[]),
		])
		.unwrap();
		let params = SimParams::default();
		for _ in 0..2000 {
			step(&mut graph, &params, BOUNDS);
		}
		let d_ab = distance(&graph, "a", "b");
		let d_bc = distance(&graph, "b", "c");
		assert!((d_ab - 100.0).abs() <= 5.0, "a-b settled at {d_ab}");
		assert!((d_bc - 100.0).abs() <= 5.0, "b-c settled at {d_bc}");
		for node in graph.nodes() {
			assert!(node.position.x >= WALL_MARGIN && node.position.x <= 350.0);
			assert!(node.position.y >= WALL_MARGIN && node.position.y <= 350.0);
		}
	}
}
