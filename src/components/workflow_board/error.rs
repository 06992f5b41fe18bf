//! Error types for board data loading, graph validation and the tick driver.

use thiserror::Error;

/// A structural problem in the supplied node/edge graph.
///
/// The engine never fails on these: invalid references degrade to the
/// origin when positions are evaluated. They exist so the caller can report
/// a malformed graph before animating it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
	/// An edge references a node id that is not present.
	#[error("edge `{edge}` references unknown node `{node}`")]
	UnknownNode { edge: String, node: String },
	/// Two nodes share the same id. The first one wins.
	#[error("duplicate node id `{0}`")]
	DuplicateNode(String),
	/// Two edges share the same id. The first one wins.
	#[error("duplicate edge id `{0}`")]
	DuplicateEdge(String),
}

/// Failure to load board data from the host page.
#[derive(Debug, Error)]
pub enum BoardError {
	#[error("no browser document available")]
	NoDocument,
	#[error("no element with id `{0}` in the document")]
	MissingDataElement(&'static str),
	#[error("board data element is not a script element")]
	NotAScript,
	#[error("failed to parse board data: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Failure to start the repeating tick timer.
#[derive(Debug, Error)]
pub enum DriverError {
	#[error("no browser window available")]
	NoWindow,
	#[error("failed to register interval: {0}")]
	Interval(String),
}
