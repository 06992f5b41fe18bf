//! workflow-board: particle animation over agent workflow graphs.
//!
//! This crate provides a WASM-based board that animates particles along the
//! edges of a workflow graph, resolves each one to an outcome at its target
//! node, and reports the queue state to the surrounding page.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::workflow_board::{
	BoardData, BoardError, EngineConfig, GraphEdge, GraphNode, PathKind, QueueItemStatus, QueueStatus,
	WorkflowBoard,
};

/// Id of the script element holding the board JSON.
const BOARD_DATA_ID: &str = "board-data";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("workflow-board: logging initialized");
}

/// Load board data from the script element with id="board-data".
/// Expected format: JSON with { nodes: [...], edges: [...], activeEdgeIds: [...] }
pub fn load_board_data() -> Result<BoardData, BoardError> {
	let document = web_sys::window()
		.and_then(|w: Window| w.document())
		.ok_or(BoardError::NoDocument)?;
	let element = document
		.get_element_by_id(BOARD_DATA_ID)
		.ok_or(BoardError::MissingDataElement(BOARD_DATA_ID))?;
	let script: HtmlScriptElement = element.dyn_into().map_err(|_| BoardError::NotAScript)?;
	let json_text = script.text().map_err(|_| BoardError::NotAScript)?;

	let data: BoardData = serde_json::from_str(&json_text)?;
	info!(
		"workflow-board: loaded {} nodes, {} edges",
		data.nodes.len(),
		data.edges.len()
	);
	Ok(data)
}

/// Main application component.
/// Loads board data from the DOM and renders the board with its controls and
/// the queue panel.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let board_data = load_board_data().unwrap_or_else(|e| {
		warn!("workflow-board: {}", e);
		BoardData::default()
	});
	let all_edges: Vec<String> = board_data.edges.iter().map(|e| e.id.clone()).collect();

	let (active, set_active) = signal(board_data.active_edge_ids.clone());
	let (path_kind, set_path_kind) = signal(board_data.path_kind);
	let (sequential, set_sequential) = signal(board_data.sequential);
	let (status, set_status) = signal(QueueStatus::default());
	let board_signal = Signal::derive(move || board_data.clone());

	let path_buttons = PathKind::ALL
		.into_iter()
		.map(|kind| {
			view! {
				<button
					class:selected=move || path_kind.get() == kind
					on:click=move |_| set_path_kind.set(kind)
				>
					{kind.label()}
				</button>
			}
		})
		.collect_view();

	let queue_items = move || {
		let status = status.get();
		status
			.items
			.into_iter()
			.enumerate()
			.map(|(i, item)| {
				let current = if status.current_index == Some(i) { " current" } else { "" };
				view! {
					<li class=format!("queue-item {}{}", item.status.as_str(), current)>
						<span class="swatch" style=format!("background: {}", item.color)></span>
						<span class="icon">{item.icon}</span>
						<span class="edge">{item.edge_id}</span>
						<span class="status">{item.status.as_str()}</span>
					</li>
				}
			})
			.collect_view()
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Workflow Board" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="workflow-layout">
			<div class="board-area">
				<WorkflowBoard
					data=board_signal
					active_edge_ids=active
					path_kind=path_kind
					sequential=sequential
					on_queue_status=Callback::new(move |s: QueueStatus| set_status.set(s))
				/>
				<div class="board-controls">
					<div class="path-kinds">{path_buttons}</div>
					<label>
						<input
							type="checkbox"
							prop:checked=move || sequential.get()
							on:change=move |_| set_sequential.update(|s| *s = !*s)
						/>
						"Sequential"
					</label>
					<button on:click=move |_| set_active.set(all_edges.clone())>"Animate all"</button>
					<button on:click=move |_| set_active.set(Vec::new())>"Clear"</button>
				</div>
			</div>
			<aside class="queue-panel">
				<h2>"Queue"</h2>
				<p class="subtitle">
					{move || if status.get().sequential { "Sequential" } else { "Parallel" }}
				</p>
				<ul>{queue_items}</ul>
			</aside>
		</div>
	}
}
