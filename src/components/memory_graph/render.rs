use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::engine::{Graph, NodeKind};

pub const NODE_RADIUS: f64 = 20.0;
pub const HOVER_RADIUS: f64 = 25.0;

/// (fill, stroke, glow) colors per node kind.
fn kind_colors(kind: NodeKind) -> (&'static str, &'static str, &'static str) {
	match kind {
		NodeKind::Prompt => (
			"hsl(192, 91%, 56%)",
			"hsl(192, 91%, 66%)",
			"hsla(192, 91%, 56%, 0.3)",
		),
		NodeKind::Task => (
			"hsl(262, 83%, 58%)",
			"hsl(262, 83%, 68%)",
			"hsla(262, 83%, 58%, 0.3)",
		),
		NodeKind::Memory => (
			"hsl(142, 71%, 45%)",
			"hsl(142, 71%, 55%)",
			"hsla(142, 71%, 45%, 0.3)",
		),
	}
}

pub fn render(graph: &Graph, ctx: &CanvasRenderingContext2d, zoom: f64, hovered: Option<&str>) {
	let Some(canvas) = ctx.canvas() else {
		return;
	};
	ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
	ctx.save();
	let _ = ctx.scale(zoom, zoom);
	draw_edges(graph, ctx);
	draw_nodes(graph, ctx, hovered);
	ctx.restore();
}

fn draw_edges(graph: &Graph, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.1)");
	ctx.set_line_width(1.0);
	for node in graph.nodes() {
		for neighbor in graph.neighbors_of(&node.id) {
			ctx.begin_path();
			ctx.move_to(node.position.x, node.position.y);
			ctx.line_to(neighbor.position.x, neighbor.position.y);
			ctx.stroke();
		}
	}
}

fn draw_nodes(graph: &Graph, ctx: &CanvasRenderingContext2d, hovered: Option<&str>) {
	for node in graph.nodes() {
		let (fill, stroke, glow) = kind_colors(node.kind);
		let is_hovered = hovered == Some(node.id.as_str());
		let radius = if is_hovered { HOVER_RADIUS } else { NODE_RADIUS };
		let (x, y) = (node.position.x, node.position.y);

		// Glow halo
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + 10.0, 0.0, 2.0 * PI);
		let gradient = ctx
			.create_radial_gradient(x, y, radius, x, y, radius + 15.0)
			.unwrap();
		gradient.add_color_stop(0.0, glow).unwrap();
		gradient.add_color_stop(1.0, "transparent").unwrap();
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();

		// Node disc
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(fill);
		ctx.fill();
		ctx.set_stroke_style_str(stroke);
		ctx.set_line_width(2.0);
		ctx.stroke();

		// Label
		ctx.set_fill_style_str("white");
		ctx.set_font("11px Inter");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&node.label, x, y);
	}
}
