use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::types::HoverInfo;
use crate::engine::{
	self, Bounds, Driver, FrameScheduler, Graph, HIT_RADIUS, LoopHandle, NodeSpec,
};

/// One `requestAnimationFrame` per engine frame.
struct RafScheduler;

impl FrameScheduler for RafScheduler {
	fn schedule(&self, f: Box<dyn FnOnce()>) {
		let cb = Closure::once_into_js(f);
		if let Some(window) = web_sys::window() {
			let _ = window.request_animation_frame(cb.unchecked_ref::<js_sys::Function>());
		}
	}
}

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((800.0, 600.0))
}

#[component]
pub fn MemoryGraphCanvas(
	#[prop(into)] data: Signal<Vec<NodeSpec>>,
	#[prop(into)] zoom: Signal<f64>,
	#[prop(into)] on_hover: WriteSignal<Option<HoverInfo>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let driver: Rc<RefCell<Option<Rc<RefCell<Driver>>>>> = Rc::new(RefCell::new(None));
	let loop_handle: Rc<RefCell<Option<LoopHandle>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let hovered_id = RwSignal::new(None::<String>);
	let (driver_init, handle_init, resize_cb_init) =
		(driver.clone(), loop_handle.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let graph = match Graph::new(data.get()) {
			Ok(graph) => graph,
			Err(err) => {
				error!("memory graph not built: {err}");
				return;
			}
		};

		// Restart cleanly if the data signal re-fires: stop the old loop and
		// unregister its resize listener before it gets dropped.
		if let Some(handle) = handle_init.borrow_mut().take() {
			handle.stop();
		}
		if let Some(old) = resize_cb_init.borrow_mut().take() {
			let _ =
				window.remove_event_listener_with_callback("resize", old.as_ref().unchecked_ref());
		}

		let d = Rc::new(RefCell::new(Driver::new(
			graph,
			Bounds {
				width: w,
				height: h,
			},
		)));
		*driver_init.borrow_mut() = Some(d.clone());

		let (driver_resize, canvas_resize) = (d.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			driver_resize.borrow_mut().resize(Bounds {
				width: nw,
				height: nh,
			});
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let handle = engine::start(d, Rc::new(RafScheduler), move |graph: &Graph| {
			render::render(
				graph,
				&ctx,
				zoom.get_untracked(),
				hovered_id.get_untracked().as_deref(),
			);
		});
		*handle_init.borrow_mut() = Some(handle);
	});

	let driver_mm = driver.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		let Some(d) = driver_mm.borrow().clone() else {
			return;
		};
		let mut d = d.borrow_mut();
		d.set_zoom(zoom.get_untracked());
		let hit = d.hit_test(x, y, HIT_RADIUS).map(str::to_owned);
		// web-sys's inherent style(), not the one-argument trait method the
		// leptos prelude brings into scope for canvas elements.
		let html: &web_sys::HtmlElement = canvas.as_ref();
		let _ = html.style().set_property(
			"cursor",
			if hit.is_some() { "pointer" } else { "default" },
		);
		if hovered_id.get_untracked() != hit {
			on_hover.set(
				hit.as_deref()
					.and_then(|id| HoverInfo::for_node(d.graph(), id)),
			);
			hovered_id.set(hit);
		}
	};

	let on_mouseleave = move |_: MouseEvent| {
		hovered_id.set(None);
		on_hover.set(None);
	};

	// on_cleanup wants Send + Sync even on wasm; SendWrapper carries the
	// single-threaded state across that bound, as leptos does for JS values.
	let cleanup = SendWrapper::new((loop_handle.clone(), resize_cb.clone()));
	on_cleanup(move || {
		let (handle_slot, resize_slot) = cleanup.take();
		if let Some(handle) = handle_slot.borrow_mut().take() {
			handle.stop();
		}
		if let Some(cb) = resize_slot.borrow_mut().take() {
			if let Some(window) = web_sys::window() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="memory-graph-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block; width: 100%; height: 100%;"
		/>
	}
}
