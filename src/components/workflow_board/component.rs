//! Leptos component wrapping the workflow board canvas.
//!
//! The component sizes a canvas, builds a [`Scheduler`] batch from the
//! active edge ids, and runs it from a [`TickDriver`]. Every tick advances
//! the batch, redraws the canvas and publishes the queue status. Any change
//! to the board data, the active edge ids, the path kind or the mode tears
//! the batch down and builds a fresh one. The driver only runs while the
//! scheduler does: an empty batch never starts it, and a finished
//! non-looping batch stops it.

use std::cell::RefCell;
use std::collections::HashSet;
use std::ops::ControlFlow;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::driver::TickDriver;
use super::graph::{BoardGraph, NodeGeometry};
use super::path::PathKind;
use super::projector::{QueueStatus, QueueStatusEmitter, ViewTransform, project, queue_status};
use super::render::{self, Frame};
use super::scheduler::{BuildOptions, Mode, Scheduler};
use super::theme::Theme;
use super::types::BoardData;

/// Padding kept around the graph when fitting it into the canvas.
const FIT_PADDING: f64 = 40.0;

/// Everything the tick callback needs, rebuilt whenever the inputs change.
struct BoardContext {
	ctx: CanvasRenderingContext2d,
	width: f64,
	height: f64,
	graph: BoardGraph,
	geometry: NodeGeometry,
	view: ViewTransform,
	theme: Theme,
	active_edges: HashSet<String>,
	scheduler: Scheduler,
	emitter: QueueStatusEmitter,
}

impl BoardContext {
	/// One driver tick. Breaks once the scheduler has gone idle, after the
	/// final frame is drawn.
	fn tick(&mut self) -> ControlFlow<()> {
		self.scheduler.tick();
		self.draw();
		self.emitter.publish(queue_status(&self.scheduler));
		if self.scheduler.is_running() {
			ControlFlow::Continue(())
		} else {
			info!("workflow-board: scheduler idle, stopping ticks");
			ControlFlow::Break(())
		}
	}

	fn draw(&self) {
		let particles = project(&self.scheduler, &self.graph, &self.geometry, &self.view);
		let frame = Frame {
			width: self.width,
			height: self.height,
			graph: &self.graph,
			geometry: &self.geometry,
			view: &self.view,
			path_kind: self.scheduler.path_kind(),
			active_edges: &self.active_edges,
			particles: &particles,
			now: self.scheduler.now(),
		};
		render::render(&self.ctx, &frame, &self.theme);
	}
}

/// Renders the board and animates particles along its active edges.
///
/// Board data and the run parameters are reactive; the optional
/// `on_queue_status` callback fires whenever the queue summary changes.
/// The canvas sizes itself to its parent unless `width`/`height` are given.
#[component]
pub fn WorkflowBoard(
	#[prop(into)] data: Signal<BoardData>,
	#[prop(into)] active_edge_ids: Signal<Vec<String>>,
	#[prop(into)] path_kind: Signal<PathKind>,
	#[prop(into)] sequential: Signal<bool>,
	#[prop(optional, into)] on_queue_status: Option<Callback<QueueStatus>>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<BoardContext>>> = Rc::new(RefCell::new(None));
	let driver = StoredValue::new_local(TickDriver::new());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let data = data.get();
		let active_ids = active_edge_ids.get();
		let options = BuildOptions {
			path_kind: path_kind.get(),
			mode: Mode::from_sequential(sequential.get()),
		};

		let (w, h) = (
			width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.filter(|w| *w > 0.0)
					.unwrap_or(800.0)
			}),
			height.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.filter(|h| *h > 0.0)
					.unwrap_or(600.0)
			}),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("workflow-board: canvas has no 2d context");
			return;
		};

		let graph = BoardGraph::new(data.nodes, data.edges);
		for problem in graph.problems() {
			warn!("workflow-board: {}", problem);
		}

		let geometry = NodeGeometry::default();
		let view = graph
			.bounds(&geometry)
			.map(|bounds| ViewTransform::fit(bounds, w, h, FIT_PADDING))
			.unwrap_or_default();
		let theme = data.theme.as_deref().map(Theme::by_name).unwrap_or_default();
		let tick_interval_ms = data.engine.tick_interval_ms;

		let mut scheduler = Scheduler::new(data.engine, theme.palette.clone());
		let batch = scheduler.build(&graph, &active_ids, options);
		info!(
			"workflow-board: {} nodes, {} edges, {} particles",
			graph.nodes().len(),
			graph.edges().len(),
			batch
		);

		let emitter = match on_queue_status {
			Some(callback) => QueueStatusEmitter::new(move |status| callback.run(status.clone())),
			None => QueueStatusEmitter::disabled(),
		};

		let mut board = BoardContext {
			ctx,
			width: w,
			height: h,
			graph,
			geometry,
			view,
			theme,
			active_edges: active_ids.into_iter().collect(),
			scheduler,
			emitter,
		};
		board.draw();
		board.emitter.publish(queue_status(&board.scheduler));
		let running = board.scheduler.is_running();
		*context.borrow_mut() = Some(board);

		if !running {
			driver.update_value(|driver| driver.stop());
			return;
		}

		let context_tick = context.clone();
		driver.update_value(|driver| {
			let started = driver.start(tick_interval_ms, move || match context_tick.try_borrow_mut() {
				Ok(mut guard) => match guard.as_mut() {
					Some(board) => board.tick(),
					None => ControlFlow::Break(()),
				},
				Err(_) => ControlFlow::Continue(()),
			});
			if let Err(e) = started {
				error!("workflow-board: {}", e);
			}
		});
	});

	on_cleanup(move || {
		driver.try_update_value(|driver| driver.stop());
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="workflow-board-canvas"
			style="display: block;"
		/>
	}
}
