//! Indexed, read-only view of the board graph plus node geometry.

use std::collections::HashMap;

use super::error::GraphError;
use super::types::{GraphEdge, GraphNode, Point};

/// Size of the node boxes. Anchors sit at fixed offsets on the box edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeGeometry {
	pub width: f64,
	pub height: f64,
}

impl Default for NodeGeometry {
	fn default() -> Self {
		Self {
			width: 180.0,
			height: 64.0,
		}
	}
}

impl NodeGeometry {
	/// Middle of the node's right edge; where outgoing paths start.
	pub fn source_anchor(&self, node: &GraphNode) -> Point {
		Point::new(node.position.x + self.width, node.position.y + self.height / 2.0)
	}

	/// Middle of the node's left edge; where incoming paths end.
	pub fn target_anchor(&self, node: &GraphNode) -> Point {
		Point::new(node.position.x, node.position.y + self.height / 2.0)
	}

	pub fn center(&self, node: &GraphNode) -> Point {
		Point::new(
			node.position.x + self.width / 2.0,
			node.position.y + self.height / 2.0,
		)
	}
}

/// Resolved endpoints of one edge.
///
/// Missing nodes resolve to the origin: a dangling reference is a caller
/// error, caught by [`BoardGraph::problems`], not something to recover from
/// mid-animation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeGeometry {
	pub source: Point,
	pub target: Point,
	/// Visual center of the target node, end of the arrival approach.
	pub target_center: Point,
}

/// Node and edge collections with id lookups.
#[derive(Clone, Debug, Default)]
pub struct BoardGraph {
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
	node_index: HashMap<String, usize>,
	edge_index: HashMap<String, usize>,
}

impl BoardGraph {
	pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
		let mut node_index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			node_index.entry(node.id.clone()).or_insert(i);
		}
		let mut edge_index = HashMap::with_capacity(edges.len());
		for (i, edge) in edges.iter().enumerate() {
			edge_index.entry(edge.id.clone()).or_insert(i);
		}

		Self {
			nodes,
			edges,
			node_index,
			edge_index,
		}
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.node_index.get(id).map(|&i| &self.nodes[i])
	}

	pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
		self.edge_index.get(id).map(|&i| &self.edges[i])
	}

	/// Anchors and target center of an edge, with the origin standing in for
	/// anything that does not resolve.
	pub fn edge_geometry(&self, edge_id: &str, geometry: &NodeGeometry) -> EdgeGeometry {
		let Some(edge) = self.edge(edge_id) else {
			return EdgeGeometry::default();
		};
		let source = self.node(&edge.source);
		let target = self.node(&edge.target);

		EdgeGeometry {
			source: source.map(|n| geometry.source_anchor(n)).unwrap_or_default(),
			target: target.map(|n| geometry.target_anchor(n)).unwrap_or_default(),
			target_center: target.map(|n| geometry.center(n)).unwrap_or_default(),
		}
	}

	/// Every structural problem, in declaration order.
	pub fn problems(&self) -> Vec<GraphError> {
		let mut problems = Vec::new();

		for (i, node) in self.nodes.iter().enumerate() {
			if self.node_index.get(&node.id) != Some(&i) {
				problems.push(GraphError::DuplicateNode(node.id.clone()));
			}
		}

		for (i, edge) in self.edges.iter().enumerate() {
			if self.edge_index.get(&edge.id) != Some(&i) {
				problems.push(GraphError::DuplicateEdge(edge.id.clone()));
			}
			for endpoint in [&edge.source, &edge.target] {
				if !self.node_index.contains_key(endpoint) {
					problems.push(GraphError::UnknownNode {
						edge: edge.id.clone(),
						node: endpoint.clone(),
					});
				}
			}
		}

		problems
	}

	/// First structural problem, if any.
	pub fn validate(&self) -> Result<(), GraphError> {
		match self.problems().into_iter().next() {
			Some(problem) => Err(problem),
			None => Ok(()),
		}
	}

	/// Top-left and bottom-right corners enclosing every node box.
	pub fn bounds(&self, geometry: &NodeGeometry) -> Option<(Point, Point)> {
		let first = self.nodes.first()?;
		let mut min = first.position;
		let mut max = first.position;
		for node in &self.nodes {
			min.x = min.x.min(node.position.x);
			min.y = min.y.min(node.position.y);
			max.x = max.x.max(node.position.x + geometry.width);
			max.y = max.y.max(node.position.y + geometry.height);
		}
		Some((min, max))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, x: f64, y: f64) -> GraphNode {
		GraphNode {
			id: id.into(),
			position: Point::new(x, y),
			label: id.to_uppercase(),
		}
	}

	fn edge(id: &str, source: &str, target: &str) -> GraphEdge {
		GraphEdge {
			id: id.into(),
			source: source.into(),
			target: target.into(),
		}
	}

	#[test]
	fn anchors_sit_on_box_edges() {
		let geometry = NodeGeometry {
			width: 100.0,
			height: 40.0,
		};
		let graph = BoardGraph::new(
			vec![node("a", 0.0, 0.0), node("b", 300.0, 100.0)],
			vec![edge("e", "a", "b")],
		);
		let g = graph.edge_geometry("e", &geometry);
		assert_eq!(g.source, Point::new(100.0, 20.0));
		assert_eq!(g.target, Point::new(300.0, 120.0));
		assert_eq!(g.target_center, Point::new(350.0, 120.0));
	}

	#[test]
	fn dangling_references_resolve_to_origin() {
		let geometry = NodeGeometry::default();
		let graph = BoardGraph::new(vec![node("a", 10.0, 10.0)], vec![edge("e", "a", "ghost")]);
		let g = graph.edge_geometry("e", &geometry);
		assert_eq!(g.source, geometry.source_anchor(&graph.nodes()[0]));
		assert_eq!(g.target, Point::default());
		assert_eq!(g.target_center, Point::default());
		assert_eq!(graph.edge_geometry("nope", &geometry), EdgeGeometry::default());
	}

	#[test]
	fn problems_are_reported() {
		let graph = BoardGraph::new(
			vec![node("a", 0.0, 0.0), node("a", 5.0, 5.0)],
			vec![edge("e", "a", "x"), edge("e", "a", "a")],
		);
		assert_eq!(
			graph.problems(),
			vec![
				GraphError::DuplicateNode("a".into()),
				GraphError::UnknownNode {
					edge: "e".into(),
					node: "x".into(),
				},
				GraphError::DuplicateEdge("e".into()),
			]
		);
		assert_eq!(graph.validate(), Err(GraphError::DuplicateNode("a".into())));
	}

	#[test]
	fn first_duplicate_wins() {
		let graph = BoardGraph::new(vec![node("a", 0.0, 0.0), node("a", 5.0, 5.0)], vec![]);
		assert_eq!(graph.node("a").map(|n| n.position), Some(Point::new(0.0, 0.0)));
	}

	#[test]
	fn valid_graph_passes() {
		let graph = BoardGraph::new(
			vec![node("a", 0.0, 0.0), node("b", 1.0, 1.0)],
			vec![edge("e", "a", "b")],
		);
		assert!(graph.validate().is_ok());
	}

	#[test]
	fn bounds_cover_node_boxes() {
		let geometry = NodeGeometry {
			width: 10.0,
			height: 5.0,
		};
		let graph = BoardGraph::new(vec![node("a", -20.0, 3.0), node("b", 40.0, -7.0)], vec![]);
		assert_eq!(
			graph.bounds(&geometry),
			Some((Point::new(-20.0, -7.0), Point::new(50.0, 8.0)))
		);
		assert_eq!(BoardGraph::default().bounds(&geometry), None);
	}
}
