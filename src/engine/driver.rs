//! Drives the simulation on a frame cadence and maps pointer coordinates
//! back to nodes.
//!
//! Scheduling is abstracted behind [`FrameScheduler`] so the loop runs the
//! same way under `requestAnimationFrame` in the browser and under a
//! manually pumped queue in tests. Everything is single-threaded and
//! cooperative: a tick fully completes (physics, then the frame callback)
//! before the next one is requested.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::graph::Graph;
use super::sim::{self, Bounds, SimParams};

/// Default pointer-to-node distance threshold, in graph units.
pub const HIT_RADIUS: f64 = 25.0;

/// Owns the graph, the layout bounds and the zoom factor, and advances the
/// simulation one tick at a time.
pub struct Driver {
	graph: Graph,
	bounds: Bounds,
	params: SimParams,
	zoom: f64,
}

impl Driver {
	pub fn new(graph: Graph, bounds: Bounds) -> Self {
		Self {
			graph,
			bounds,
			params: SimParams::default(),
			zoom: 1.0,
		}
	}

	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	/// Advance one simulation tick under the current bounds.
	pub fn tick(&mut self) {
		sim::step(&mut self.graph, &self.params, self.bounds);
	}

	/// New bounds take effect from the next tick on; existing node
	/// positions are left where they are.
	pub fn resize(&mut self, bounds: Bounds) {
		self.bounds = bounds;
	}

	/// Zoom is consumed as given for hit-testing; range-clamping is the
	/// caller's business.
	pub fn set_zoom(&mut self, zoom: f64) {
		self.zoom = zoom;
	}

	pub fn get_zoom(&self) -> f64 {
		self.zoom
	}

	/// Map a pointer position (in host-surface space) to the node under it.
	///
	/// The pointer is divided by the zoom factor to undo the render-time
	/// scale. The first node in stable iteration order whose center lies
	/// within `hit_radius` wins.
	pub fn hit_test(&self, x: f64, y: f64, hit_radius: f64) -> Option<&str> {
		let (gx, gy) = (x / self.zoom, y / self.zoom);
		self.graph
			.nodes()
			.find(|node| {
				let (dx, dy) = (node.position.x - gx, node.position.y - gy);
				(dx * dx + dy * dy).sqrt() < hit_radius
			})
			.map(|node| node.id.as_str())
	}
}

/// Requests a callback on the next display frame.
pub trait FrameScheduler {
	fn schedule(&self, f: Box<dyn FnOnce()>);
}

/// Stops the tick loop. Dropping the handle does not stop it; stopping an
/// already-stopped loop is a no-op.
pub struct LoopHandle {
	running: Rc<Cell<bool>>,
}

impl LoopHandle {
	pub fn stop(&self) {
		self.running.set(false);
	}

	pub fn is_running(&self) -> bool {
		self.running.get()
	}
}

struct LoopState<S, F> {
	driver: Rc<RefCell<Driver>>,
	scheduler: Rc<S>,
	on_frame: RefCell<F>,
	running: Rc<Cell<bool>>,
}

/// Begin the unbounded tick loop: each frame runs one tick, hands the
/// updated graph to `on_frame` for painting, then schedules the next
/// frame. The first tick runs on the first scheduled frame, not inside
/// `start` itself.
pub fn start<S, F>(driver: Rc<RefCell<Driver>>, scheduler: Rc<S>, on_frame: F) -> LoopHandle
where
	S: FrameScheduler + 'static,
	F: FnMut(&Graph) + 'static,
{
	let running = Rc::new(Cell::new(true));
	let state = Rc::new(LoopState {
		driver,
		scheduler,
		on_frame: RefCell::new(on_frame),
		running: running.clone(),
	});
	let first = state.clone();
	state.scheduler.schedule(Box::new(move || pump(first)));
	LoopHandle { running }
}

fn pump<S, F>(state: Rc<LoopState<S, F>>)
where
	S: FrameScheduler + 'static,
	F: FnMut(&Graph) + 'static,
{
	// A frame request that was already pending when the loop was stopped
	// still fires; it just must not tick.
	if !state.running.get() {
		return;
	}
	state.driver.borrow_mut().tick();
	{
		let driver = state.driver.borrow();
		let mut on_frame = state.on_frame.borrow_mut();
		(*on_frame)(driver.graph());
	}
	let next = state.clone();
	state.scheduler.schedule(Box::new(move || pump(next)));
}
