use leptos::prelude::*;

use crate::components::memory_graph::{HoverInfo, MemoryGraphCanvas};
use crate::engine::{NodeKind, NodeSpec};

const ZOOM_STEP: f64 = 0.1;
const ZOOM_MIN: f64 = 0.5;
const ZOOM_MAX: f64 = 2.0;

/// The knowledge graph snapshot this view ships with: prompt versions,
/// the tasks they ran, and the memory patterns those produced.
fn seed_nodes() -> Vec<NodeSpec> {
	vec![
		NodeSpec::new("p1", NodeKind::Prompt, "v24", 400.0, 300.0, &["p2", "t1", "t2"]),
		NodeSpec::new("p2", NodeKind::Prompt, "v23", 300.0, 200.0, &["p3", "t3"]),
		NodeSpec::new("p3", NodeKind::Prompt, "v22", 200.0, 300.0, &["m1"]),
		NodeSpec::new("t1", NodeKind::Task, "Code Analysis", 500.0, 200.0, &["m2"]),
		NodeSpec::new("t2", NodeKind::Task, "Security Scan", 550.0, 350.0, &["m3"]),
		NodeSpec::new("t3", NodeKind::Task, "Optimization", 350.0, 400.0, &["m1", "m2"]),
		NodeSpec::new("m1", NodeKind::Memory, "Pattern A", 150.0, 400.0, &[]),
		NodeSpec::new("m2", NodeKind::Memory, "Pattern B", 600.0, 250.0, &[]),
		NodeSpec::new("m3", NodeKind::Memory, "Pattern C", 650.0, 400.0, &[]),
	]
}

/// Memory graph page: force-laid-out knowledge connections with zoom
/// controls, a kind legend, and a hover info card.
#[component]
pub fn Memory() -> impl IntoView {
	let data = Signal::derive(move || seed_nodes());
	let (zoom, set_zoom) = signal(1.0_f64);
	let (hovered, set_hovered) = signal(None::<HoverInfo>);

	// The driver takes whatever factor it is given; the range lives here.
	let zoom_out = move |_| set_zoom.update(|z| *z = (*z - ZOOM_STEP).max(ZOOM_MIN));
	let zoom_in = move |_| set_zoom.update(|z| *z = (*z + ZOOM_STEP).min(ZOOM_MAX));

	view! {
		<div class="memory-page">
			<header class="memory-header">
				<div>
					<h1>"Memory Graph"</h1>
					<p class="subtitle">"Visualize agent knowledge connections and learning patterns"</p>
				</div>
				<div class="zoom-controls">
					<button on:click=zoom_out>"−"</button>
					<span class="zoom-level">{move || format!("{}%", (zoom.get() * 100.0).round())}</span>
					<button on:click=zoom_in>"+"</button>
				</div>
			</header>

			<div class="legend">
				<span class="legend-item legend-prompt">"Prompt Version"</span>
				<span class="legend-item legend-task">"Task"</span>
				<span class="legend-item legend-memory">"Memory Pattern"</span>
			</div>

			<div class="graph-panel">
				<MemoryGraphCanvas data=data zoom=zoom on_hover=set_hovered />
				{move || {
					hovered
						.get()
						.map(|info| {
							let plural = if info.connections == 1 { "" } else { "s" };
							view! {
								<div class="hover-card">
									<h4>{info.label.clone()}</h4>
									<p class="kind">{info.kind.as_str()}</p>
									<p>{format!("{} connection{plural}", info.connections)}</p>
								</div>
							}
						})
				}}
			</div>
		</div>
	}
}
