//! Parametric edge paths.
//!
//! Maps a source anchor, a target anchor and a normalized progress `t` to a
//! point on the edge. Three path shapes are supported:
//!
//! - [`PathKind::Straight`]: linear interpolation.
//! - [`PathKind::Stepped`]: orthogonal route with three equal-duration segments
//!   (horizontal to the midpoint column, vertical to the target row,
//!   horizontal into the target).
//! - [`PathKind::Curved`]: horizontal-biased cubic Bézier.
//!
//! Everything here is pure: identical inputs give bit-identical outputs.

use serde::{Deserialize, Serialize};

use super::types::Point;

/// Lower bound for the horizontal distance of Bézier control points.
pub const MIN_CONTROL_OFFSET: f64 = 50.0;
/// Control point distance as a fraction of the horizontal span.
pub const CONTROL_OFFSET_RATIO: f64 = 0.3;

/// Shape of the path particles follow between two nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
	#[default]
	Straight,
	Stepped,
	Curved,
}

impl PathKind {
	pub const ALL: [PathKind; 3] = [PathKind::Straight, PathKind::Stepped, PathKind::Curved];

	pub fn label(self) -> &'static str {
		match self {
			PathKind::Straight => "Straight",
			PathKind::Stepped => "Stepped",
			PathKind::Curved => "Curved",
		}
	}
}

/// Point on the path from `source` to `target` at progress `t`.
///
/// `t` is clamped to `[0, 1]`; NaN is treated as 0.
pub fn position(source: Point, target: Point, kind: PathKind, t: f64) -> Point {
	let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
	match kind {
		PathKind::Straight => source.lerp(target, t),
		PathKind::Stepped => stepped(source, target, t),
		PathKind::Curved => curved(source, target, t),
	}
}

/// Samples the path into `segments + 1` points, endpoints included.
pub fn sample(source: Point, target: Point, kind: PathKind, segments: usize) -> Vec<Point> {
	let segments = segments.max(1);
	(0..=segments)
		.map(|i| position(source, target, kind, i as f64 / segments as f64))
		.collect()
}

/// Horizontal offset of the Bézier control points for a given span.
pub fn control_offset(source: Point, target: Point) -> f64 {
	(CONTROL_OFFSET_RATIO * (target.x - source.x).abs()).max(MIN_CONTROL_OFFSET)
}

fn stepped(source: Point, target: Point, t: f64) -> Point {
	let mid_x = (source.x + target.x) / 2.0;
	let turn_a = Point::new(mid_x, source.y);
	let turn_b = Point::new(mid_x, target.y);

	let leg = t * 3.0;
	if leg <= 1.0 {
		source.lerp(turn_a, leg)
	} else if leg <= 2.0 {
		turn_a.lerp(turn_b, leg - 1.0)
	} else {
		turn_b.lerp(target, leg - 2.0)
	}
}

fn curved(source: Point, target: Point, t: f64) -> Point {
	let offset = control_offset(source, target);
	let c1 = Point::new(source.x + offset, source.y);
	let c2 = Point::new(target.x - offset, target.y);

	// Bernstein basis
	let u = 1.0 - t;
	let b0 = u * u * u;
	let b1 = 3.0 * u * u * t;
	let b2 = 3.0 * u * t * t;
	let b3 = t * t * t;

	Point::new(
		b0 * source.x + b1 * c1.x + b2 * c2.x + b3 * target.x,
		b0 * source.y + b1 * c1.y + b2 * c2.y + b3 * target.y,
	)
}
