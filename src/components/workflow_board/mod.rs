//! Workflow board visualization component.
//!
//! Animates particles along the edges of a fixed node graph:
//! - Particles travel straight, stepped or curved paths between node anchors
//! - Each one resolves to a weighted random outcome at its target node
//! - Batches run sequentially or in parallel and restart after a pause
//! - A fixed-period tick driver advances everything and redraws the canvas
//!
//! # Example
//!
//! ```ignore
//! use workflow_board::{BoardData, PathKind, WorkflowBoard};
//!
//! let data = Signal::derive(move || board_data.clone());
//! let (active, _) = signal(vec!["e1".to_string(), "e2".to_string()]);
//! let (path_kind, _) = signal(PathKind::Curved);
//! let (sequential, _) = signal(true);
//!
//! view! {
//!     <WorkflowBoard
//!         data=data
//!         active_edge_ids=active
//!         path_kind=path_kind
//!         sequential=sequential
//!         on_queue_status=Callback::new(|status| log::info!("{status:?}"))
//!     />
//! }
//! ```

mod component;
pub mod config;
mod driver;
pub mod error;
pub mod graph;
pub mod outcome;
pub mod particle;
pub mod path;
pub mod projector;
mod render;
pub mod scheduler;
pub mod theme;
mod types;

pub use component::WorkflowBoard;
pub use config::EngineConfig;
pub use driver::TickDriver;
pub use error::{BoardError, DriverError, GraphError};
pub use path::PathKind;
pub use projector::{QueueItem, QueueItemStatus, QueueStatus};
pub use scheduler::{Mode, Scheduler};
pub use theme::Theme;
pub use types::{BoardData, GraphEdge, GraphNode, Point};
