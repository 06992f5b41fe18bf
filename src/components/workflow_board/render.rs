//! Canvas rendering for the workflow board.
//!
//! Drawing happens in passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges, then node boxes (board space, under the view transform)
//! 3. Particles (screen space, already projected)
//! 4. Vignette

use std::collections::HashSet;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::graph::{BoardGraph, NodeGeometry};
use super::particle::Tick;
use super::path::{self, PathKind};
use super::projector::{AnimationClass, DrawItem, ViewTransform};
use super::theme::Theme;
use super::types::{GraphNode, Point};

/// Polyline resolution used for edge outlines.
const EDGE_SEGMENTS: usize = 32;

/// Everything one frame needs, borrowed from the board context.
pub struct Frame<'a> {
	pub width: f64,
	pub height: f64,
	pub graph: &'a BoardGraph,
	pub geometry: &'a NodeGeometry,
	pub view: &'a ViewTransform,
	pub path_kind: PathKind,
	/// Edges drawn solid; everything else is dashed.
	pub active_edges: &'a HashSet<String>,
	pub particles: &'a [DrawItem],
	/// Scheduler tick, the clock for looping animations.
	pub now: Tick,
}

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders a complete frame to the canvas.
pub fn render(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>, theme: &Theme) {
	draw_background(ctx, frame, theme);

	ctx.save();
	let _ = ctx.translate(frame.view.x, frame.view.y);
	let _ = ctx.scale(frame.view.k, frame.view.k);

	draw_edges(ctx, frame, theme);
	for node in frame.graph.nodes() {
		draw_node(ctx, node, frame.geometry, theme);
	}

	ctx.restore();

	for item in frame.particles {
		draw_particle(ctx, item, frame.now, theme);
	}

	if theme.background.vignette > 0.0 {
		draw_vignette(ctx, frame, theme);
	}
}

fn draw_background(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>, theme: &Theme) {
	let (w, h) = (frame.width, frame.height);
	let gradient = theme
		.background
		.use_gradient
		.then(|| ctx.create_radial_gradient(w / 2.0, h / 2.0, 0.0, w / 2.0, h / 2.0, w.max(h) * 0.8))
		.and_then(Result::ok);

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, w, h);
}

fn draw_vignette(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>, theme: &Theme) {
	let (w, h) = (frame.width, frame.height);
	let Ok(gradient) =
		ctx.create_radial_gradient(w / 2.0, h / 2.0, w.min(h) * 0.3, w / 2.0, h / 2.0, w.max(h) * 0.7)
	else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(1.0, &format!("rgba(0, 0, 0, {})", theme.background.vignette));

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, w, h);
}

fn draw_edges(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>, theme: &Theme) {
	let style = &theme.edge;

	for edge in frame.graph.edges() {
		let geometry = frame.graph.edge_geometry(&edge.id, frame.geometry);
		if geometry.source.distance(geometry.target) < 0.001 {
			continue;
		}
		let active = frame.active_edges.contains(&edge.id);
		let color = if active { style.active_color } else { style.color };

		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(if active {
			style.line_width * 1.25
		} else {
			style.line_width
		});
		if active {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		} else {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(style.dash_pattern.0),
				&JsValue::from_f64(style.dash_pattern.1),
			));
		}

		let points = path::sample(geometry.source, geometry.target, frame.path_kind, EDGE_SEGMENTS);
		let Some((first, rest)) = points.split_first() else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(first.x, first.y);
		for p in rest {
			ctx.line_to(p.x, p.y);
		}
		ctx.stroke();

		if let [.., before, tip] = points.as_slice() {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
			ctx.set_fill_style_str(&color.to_css());
			draw_arrowhead(ctx, *before, *tip, style.arrow_size);
		}
	}

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_arrowhead(ctx: &CanvasRenderingContext2d, from: Point, tip: Point, size: f64) {
	let dist = from.distance(tip);
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = ((tip.x - from.x) / dist, (tip.y - from.y) / dist);
	let (back_x, back_y) = (tip.x - ux * size, tip.y - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);

	ctx.begin_path();
	ctx.move_to(tip.x, tip.y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	ctx.line_to(x + w - r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + r, r);
	ctx.line_to(x + w, y + h - r);
	let _ = ctx.arc_to(x + w, y + h, x + w - r, y + h, r);
	ctx.line_to(x + r, y + h);
	let _ = ctx.arc_to(x, y + h, x, y + h - r, r);
	ctx.line_to(x, y + r);
	let _ = ctx.arc_to(x, y, x + r, y, r);
	ctx.close_path();
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &GraphNode, geometry: &NodeGeometry, theme: &Theme) {
	let style = &theme.node;
	let Point { x, y } = node.position;
	let (w, h) = (geometry.width, geometry.height);

	let gradient = style
		.use_gradient
		.then(|| ctx.create_linear_gradient(x, y, x, y + h))
		.filter(|_| h > 0.0);
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &style.fill.lighten(0.08).to_css());
			let _ = gradient.add_color_stop(1.0, &style.fill.darken(0.15).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&style.fill.to_css()),
	}
	rounded_rect(ctx, x, y, w, h, style.corner_radius);
	ctx.fill();

	if style.border_width > 0.0 {
		ctx.set_stroke_style_str(&style.border_color.to_css());
		ctx.set_line_width(style.border_width);
		ctx.stroke();
	}

	let label = if node.label.is_empty() {
		&node.id
	} else {
		&node.label
	};
	ctx.set_fill_style_str(&style.label_color.to_css());
	ctx.set_font(style.label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text_with_max_width(label, x + w / 2.0, y + h / 2.0, (w - 16.0).max(1.0));
}

fn draw_particle(ctx: &CanvasRenderingContext2d, item: &DrawItem, now: Tick, theme: &Theme) {
	let style = &theme.particle;
	let Point { x, y } = item.screen;
	let alpha = item.color.a;
	if alpha <= 0.0 {
		return;
	}

	let wave = (now as f64 * 0.4).sin() * 0.5 + 0.5;
	let radius = match item.animation {
		AnimationClass::Pop => style.radius * 1.3,
		AnimationClass::Pulse => style.radius * (1.0 + style.pulse_amplitude * smooth_step(wave)),
		_ => style.radius,
	};

	if style.glow > 0.0 {
		let glow_radius = radius * style.glow;
		if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.5, x, y, glow_radius) {
			let _ = gradient.add_color_stop(0.0, &item.color.with_alpha(0.45 * alpha).to_css());
			let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");
			ctx.begin_path();
			let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();
		}
	}

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&item.color.to_css());
	ctx.fill();

	if item.animation == AnimationClass::Spin {
		let start = now as f64 * 0.35;
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + 3.0, start, start + PI * 1.2);
		ctx.set_stroke_style_str(&item.color.lighten(0.4).to_css());
		ctx.set_line_width(2.0);
		ctx.stroke();
	}

	ctx.set_global_alpha(alpha);
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.95)");
	ctx.set_font(style.icon_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(item.icon.glyph(), x, y);
	ctx.set_global_alpha(1.0);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn smooth_step_is_anchored() {
		assert_eq!(smooth_step(0.0), 0.0);
		assert_eq!(smooth_step(1.0), 1.0);
		assert_eq!(smooth_step(0.5), 0.5);
	}
}
