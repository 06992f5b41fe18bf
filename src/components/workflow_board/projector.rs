//! Projection of scheduler state into drawables and queue status.
//!
//! Nothing here mutates the scheduler. [`project`] gives the renderer one
//! [`DrawItem`] per visible particle; [`queue_status`] summarizes the batch
//! for the side panel, and [`QueueStatusEmitter`] forwards that summary only
//! when it changed.

use rand::Rng;
use serde::Serialize;

use super::graph::{BoardGraph, EdgeGeometry, NodeGeometry};
use super::outcome::Outcome;
use super::particle::{FULL_PROGRESS, Particle, ParticleId, Phase};
use super::path;
use super::scheduler::Scheduler;
use super::theme::{Color, Icon};
use super::types::Point;

/// Animation applied to a particle, named after the CSS class a DOM
/// renderer would attach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationClass {
	Travel,
	Arrive,
	/// Short pop when the outcome appears.
	Pop,
	/// Processing a successful outcome.
	Spin,
	/// Processing a warning or an error.
	Pulse,
	Fade,
}

impl AnimationClass {
	pub fn as_css_class(self) -> &'static str {
		match self {
			AnimationClass::Travel => "particle-travel",
			AnimationClass::Arrive => "particle-arrive",
			AnimationClass::Pop => "particle-pop",
			AnimationClass::Spin => "particle-spin",
			AnimationClass::Pulse => "particle-pulse",
			AnimationClass::Fade => "particle-fade",
		}
	}

	fn for_particle(particle: &Particle) -> Option<Self> {
		match particle.phase() {
			Phase::Idle | Phase::Done => None,
			Phase::Traveling => Some(AnimationClass::Travel),
			Phase::Arrived => Some(AnimationClass::Arrive),
			Phase::Resolving => Some(AnimationClass::Pop),
			Phase::Processing if particle.outcome() == Outcome::Success => Some(AnimationClass::Spin),
			Phase::Processing => Some(AnimationClass::Pulse),
			Phase::Fading => Some(AnimationClass::Fade),
		}
	}
}

/// Board-to-screen transform: `screen = board * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn to_screen(&self, p: Point) -> Point {
		Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
	}

	/// Centers `bounds` in a `width` x `height` viewport with `padding`
	/// pixels on every side. Never zooms in past 100%.
	pub fn fit(bounds: (Point, Point), width: f64, height: f64, padding: f64) -> Self {
		let (min, max) = bounds;
		let (content_w, content_h) = ((max.x - min.x).max(1.0), (max.y - min.y).max(1.0));
		let (avail_w, avail_h) = (
			(width - 2.0 * padding).max(1.0),
			(height - 2.0 * padding).max(1.0),
		);
		let k = (avail_w / content_w).min(avail_h / content_h).min(1.0);

		Self {
			x: (width - content_w * k) / 2.0 - min.x * k,
			y: (height - content_h * k) / 2.0 - min.y * k,
			k,
		}
	}
}

/// Everything needed to draw one particle.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawItem {
	pub particle_id: ParticleId,
	pub phase: Phase,
	pub screen: Point,
	/// Current color, alpha included.
	pub color: Color,
	pub icon: Icon,
	pub animation: AnimationClass,
}

/// Board position of a particle on its edge.
///
/// While traveling the edge path covers progress `0..on_edge_threshold`;
/// after arrival a straight approach from the target anchor to the node
/// center covers the rest. Resolved particles sit on the center.
pub fn particle_position(particle: &Particle, edge: &EdgeGeometry, on_edge_threshold: f64) -> Point {
	match particle.phase() {
		Phase::Idle => edge.source,
		Phase::Traveling => path::position(
			edge.source,
			edge.target,
			particle.path_kind(),
			particle.progress() / on_edge_threshold,
		),
		Phase::Arrived => {
			let span = FULL_PROGRESS - on_edge_threshold;
			let t = if span > 0.0 {
				((particle.progress() - on_edge_threshold) / span).clamp(0.0, 1.0)
			} else {
				1.0
			};
			edge.target.lerp(edge.target_center, t)
		}
		Phase::Resolving | Phase::Processing | Phase::Fading | Phase::Done => edge.target_center,
	}
}

/// Drawables for every visible particle, in queue order.
pub fn project<R: Rng>(
	scheduler: &Scheduler<R>,
	graph: &BoardGraph,
	geometry: &NodeGeometry,
	view: &ViewTransform,
) -> Vec<DrawItem> {
	let timings = scheduler.timings();
	let now = scheduler.now();

	scheduler
		.particles()
		.iter()
		.filter_map(|particle| {
			let animation = AnimationClass::for_particle(particle)?;
			let edge = graph.edge_geometry(particle.edge_id(), geometry);
			let board = particle_position(particle, &edge, timings.on_edge_threshold);
			let visual = particle.visual();

			let icon = match particle.phase() {
				Phase::Resolving | Phase::Processing => {
					Icon::for_outcome(particle.outcome()).unwrap_or(visual.icon)
				}
				Phase::Fading if particle.outcome() == Outcome::Error => Icon::Cross,
				_ => visual.icon,
			};

			Some(DrawItem {
				particle_id: particle.id(),
				phase: particle.phase(),
				screen: view.to_screen(board),
				color: visual
					.color
					.with_alpha(visual.color.a * particle.fade_alpha(now, timings)),
				icon,
				animation,
			})
		})
		.collect()
}

/// State of one queue slot as shown in the side panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueItemStatus {
	/// Waiting for its turn.
	Pending,
	Active,
	Completed,
}

impl QueueItemStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			QueueItemStatus::Pending => "pending",
			QueueItemStatus::Active => "active",
			QueueItemStatus::Completed => "completed",
		}
	}
}

/// One queue slot.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
	pub id: ParticleId,
	pub edge_id: String,
	/// CSS color.
	pub color: String,
	pub icon: &'static str,
	pub status: QueueItemStatus,
}

/// Compact queue summary for the parent view.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatus {
	pub items: Vec<QueueItem>,
	/// Slot in play in sequential mode; `None` in parallel mode or once the
	/// batch is exhausted.
	pub current_index: Option<usize>,
	pub sequential: bool,
}

/// Summarizes the current batch.
pub fn queue_status<R: Rng>(scheduler: &Scheduler<R>) -> QueueStatus {
	let items = scheduler
		.queue()
		.iter()
		.map(|entry| {
			let live = scheduler.particle(entry.particle_id);
			let (color, icon, status) = match (live, entry.final_color) {
				(Some(p), _) => (
					p.visual().color,
					p.visual().icon,
					if p.phase().is_active() {
						QueueItemStatus::Active
					} else {
						QueueItemStatus::Pending
					},
				),
				(None, Some(color)) => (
					color,
					// Retired before resolving: flag it rather than claim success.
					Icon::for_outcome(entry.final_outcome).unwrap_or(Icon::Alert),
					QueueItemStatus::Completed,
				),
				(None, None) => (Color::rgb(148, 163, 184), Icon::Zap, QueueItemStatus::Pending),
			};
			QueueItem {
				id: entry.particle_id,
				edge_id: entry.edge_id.clone(),
				color: color.to_css_rgb(),
				icon: icon.as_str(),
				status,
			}
		})
		.collect::<Vec<_>>();

	let sequential = scheduler.mode().is_sequential();
	let current_index = (sequential && scheduler.cursor() < items.len()).then_some(scheduler.cursor());

	QueueStatus {
		items,
		current_index,
		sequential,
	}
}

/// Forwards queue status to a callback, skipping repeats.
pub struct QueueStatusEmitter {
	last: Option<QueueStatus>,
	callback: Option<Box<dyn FnMut(&QueueStatus)>>,
}

impl QueueStatusEmitter {
	pub fn new(callback: impl FnMut(&QueueStatus) + 'static) -> Self {
		Self {
			last: None,
			callback: Some(Box::new(callback)),
		}
	}

	/// An emitter without a callback; publishing is a no-op.
	pub fn disabled() -> Self {
		Self {
			last: None,
			callback: None,
		}
	}

	/// Emits `status` if it differs from the last emitted snapshot. Returns
	/// whether the callback ran.
	pub fn publish(&mut self, status: QueueStatus) -> bool {
		let Some(callback) = self.callback.as_mut() else {
			return false;
		};
		if self.last.as_ref() == Some(&status) {
			return false;
		}
		callback(&status);
		self.last = Some(status);
		true
	}
}
