//! Board data structures supplied by the surrounding dashboard.

use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::path::PathKind;

/// A position in board coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Linear interpolation. Exact at both ends (`t = 0` yields `self`,
	/// `t >= 1` yields `other`), and a coordinate shared by both points stays
	/// constant along the way.
	pub fn lerp(self, other: Point, t: f64) -> Self {
		if t >= 1.0 {
			return other;
		}
		Self {
			x: self.x + (other.x - self.x) * t,
			y: self.y + (other.y - self.y) * t,
		}
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// A node on the board. Positions are fixed for the duration of a run.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier. Edges reference nodes by this id.
	pub id: String,
	/// Top-left corner of the node box.
	pub position: Point,
	/// Display label drawn inside the node box.
	#[serde(default)]
	pub label: String,
}

/// A directed connection between two nodes.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphEdge {
	pub id: String,
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
}

/// Everything the board needs from the host page.
///
/// Deserialized from the JSON embedded in the page; every field is optional
/// and falls back to its default.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardData {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
	/// Edges that carry particles, in queue order.
	pub active_edge_ids: Vec<String>,
	pub path_kind: PathKind,
	pub sequential: bool,
	/// Theme name, see [`Theme::by_name`](super::theme::Theme::by_name).
	pub theme: Option<String>,
	pub engine: EngineConfig,
}
