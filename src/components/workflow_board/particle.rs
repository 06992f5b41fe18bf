//! Particle lifecycle state machine.
//!
//! A particle walks one edge and then plays out its arrival:
//!
//! ```text
//! Idle -> Traveling -> Arrived -> Resolving -> Processing -> Fading -> Done
//! ```
//!
//! Travel and approach are driven by progress (percent, stepped once per
//! tick). The later phases are timed: each one stores the tick at which it
//! ends instead of owning a timer, so dropping a particle cancels everything
//! it had pending.

use std::fmt;

use serde::Serialize;

use super::outcome::Outcome;
use super::path::PathKind;
use super::theme::{Color, Visual};

/// Tick counter of the scheduler.
pub type Tick = u64;

/// Upper bound of [`Particle::progress`].
pub const FULL_PROGRESS: f64 = 100.0;

/// Unique per spawn; never reused, not even across batch restarts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ParticleId(pub u64);

impl fmt::Display for ParticleId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "p{}", self.0)
	}
}

/// Position of a particle in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
	/// Waiting for activation. Not drawn.
	#[default]
	Idle,
	/// Following the edge path.
	Traveling,
	/// Off the edge, closing in on the target's center.
	Arrived,
	/// Outcome drawn and shown.
	Resolving,
	/// Processing animation at the target.
	Processing,
	/// Fading out.
	Fading,
	/// Finished; removed from the active set.
	Done,
}

impl Phase {
	/// Whether the particle occupies its queue slot (neither waiting nor
	/// finished).
	pub fn is_active(self) -> bool {
		!matches!(self, Phase::Idle | Phase::Done)
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Phase::Idle => "idle",
			Phase::Traveling => "traveling",
			Phase::Arrived => "arrived",
			Phase::Resolving => "resolving",
			Phase::Processing => "processing",
			Phase::Fading => "fading",
			Phase::Done => "done",
		}
	}
}

/// Per-phase parameters, already converted to ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseTimings {
	pub progress_step: f64,
	pub on_edge_threshold: f64,
	pub resolve_delay: Tick,
	pub processing: Tick,
	pub fade: Tick,
}

/// A single animated entity traveling along one edge.
#[derive(Clone, Debug)]
pub struct Particle {
	id: ParticleId,
	edge_id: String,
	progress: f64,
	path_kind: PathKind,
	queue_position: usize,
	phase: Phase,
	outcome: Outcome,
	visual: Visual,
	palette_color: Color,
	activated_at: Option<Tick>,
	phase_started: Tick,
	phase_ends: Option<Tick>,
}

impl Particle {
	pub fn new(
		id: ParticleId,
		edge_id: impl Into<String>,
		path_kind: PathKind,
		queue_position: usize,
		visual: Visual,
	) -> Self {
		Self {
			id,
			edge_id: edge_id.into(),
			progress: 0.0,
			path_kind,
			queue_position,
			phase: Phase::Idle,
			outcome: Outcome::None,
			visual,
			palette_color: visual.color,
			activated_at: None,
			phase_started: 0,
			phase_ends: None,
		}
	}

	pub fn id(&self) -> ParticleId {
		self.id
	}

	pub fn edge_id(&self) -> &str {
		&self.edge_id
	}

	pub fn progress(&self) -> f64 {
		self.progress
	}

	pub fn path_kind(&self) -> PathKind {
		self.path_kind
	}

	pub fn queue_position(&self) -> usize {
		self.queue_position
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn outcome(&self) -> Outcome {
		self.outcome
	}

	pub fn visual(&self) -> Visual {
		self.visual
	}

	/// Spawn color, before any outcome override.
	pub fn palette_color(&self) -> Color {
		self.palette_color
	}

	pub fn activated_at(&self) -> Option<Tick> {
		self.activated_at
	}

	/// Ticks spent active so far.
	pub fn active_ticks(&self, now: Tick) -> Tick {
		self.activated_at.map_or(0, |at| now.saturating_sub(at))
	}

	/// Remaining opacity while fading, from 1.0 down to 0.0. Other phases
	/// are fully opaque.
	pub fn fade_alpha(&self, now: Tick, timings: &PhaseTimings) -> f64 {
		if self.phase != Phase::Fading {
			return 1.0;
		}
		if timings.fade == 0 {
			return 0.0;
		}
		let elapsed = now.saturating_sub(self.phase_started) as f64;
		(1.0 - elapsed / timings.fade as f64).clamp(0.0, 1.0)
	}

	/// `Idle -> Traveling`. Ignored in any other phase.
	pub fn activate(&mut self, now: Tick) -> bool {
		if self.phase != Phase::Idle {
			return false;
		}
		self.progress = 0.0;
		self.activated_at = Some(now);
		self.enter(Phase::Traveling, now, None);
		true
	}

	/// Advances the state machine by one tick. Returns the phase entered, if
	/// any. At most one transition happens per call.
	///
	/// `draw` is called exactly once in the particle's life, at the
	/// `Arrived -> Resolving` transition, and supplies the outcome together
	/// with the color shown for it.
	pub fn advance<F>(&mut self, now: Tick, timings: &PhaseTimings, draw: F) -> Option<Phase>
	where
		F: FnOnce() -> (Outcome, Color),
	{
		match self.phase {
			Phase::Idle | Phase::Done => None,
			Phase::Traveling => {
				self.step(timings.progress_step);
				(self.progress >= timings.on_edge_threshold).then(|| {
					self.enter(Phase::Arrived, now, None);
					Phase::Arrived
				})
			}
			Phase::Arrived => {
				self.step(timings.progress_step);
				(self.progress >= FULL_PROGRESS).then(|| {
					let (outcome, color) = draw();
					self.resolve(outcome, color);
					self.enter(Phase::Resolving, now, Some(now + timings.resolve_delay));
					Phase::Resolving
				})
			}
			Phase::Resolving => self.deadline_passed(now).then(|| {
				self.enter(Phase::Processing, now, Some(now + timings.processing));
				Phase::Processing
			}),
			Phase::Processing => self.deadline_passed(now).then(|| {
				if self.outcome != Outcome::Error {
					self.visual.color = self.palette_color;
				}
				self.enter(Phase::Fading, now, Some(now + timings.fade));
				Phase::Fading
			}),
			Phase::Fading => self.deadline_passed(now).then(|| {
				self.enter(Phase::Done, now, None);
				Phase::Done
			}),
		}
	}

	/// Forces the particle to `Done`, whatever its phase.
	pub fn retire(&mut self, now: Tick) {
		self.enter(Phase::Done, now, None);
	}

	fn step(&mut self, amount: f64) {
		self.progress = (self.progress + amount).clamp(self.progress, FULL_PROGRESS);
	}

	fn resolve(&mut self, outcome: Outcome, color: Color) {
		if self.outcome.is_resolved() {
			return;
		}
		self.outcome = outcome;
		self.visual.color = color;
	}

	fn deadline_passed(&self, now: Tick) -> bool {
		self.phase_ends.is_none_or(|end| now >= end)
	}

	fn enter(&mut self, phase: Phase, now: Tick, ends: Option<Tick>) {
		self.phase = phase;
		self.phase_started = now;
		self.phase_ends = ends;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::workflow_board::theme::{Icon, ParticlePalette};

	fn timings() -> PhaseTimings {
		PhaseTimings {
			progress_step: 2.0,
			on_edge_threshold: 95.0,
			resolve_delay: 2,
			processing: 3,
			fade: 4,
		}
	}

	fn particle() -> Particle {
		let visual = Visual {
			color: Color::rgb(10, 20, 30),
			icon: Icon::Cpu,
		};
		Particle::new(ParticleId(1), "e1", PathKind::Straight, 0, visual)
	}

	fn red() -> Color {
		ParticlePalette::vivid().error
	}

	/// Runs the particle to `Done`, returning every entered phase with its tick.
	fn run_to_done(p: &mut Particle, outcome: Outcome) -> Vec<(Tick, Phase)> {
		let timings = timings();
		let mut entered = Vec::new();
		p.activate(0);
		for now in 1..1_000 {
			if let Some(phase) = p.advance(now, &timings, || (outcome, red())) {
				entered.push((now, phase));
			}
			if p.phase() == Phase::Done {
				break;
			}
		}
		entered
	}

	#[test]
	fn idle_does_not_move() {
		let mut p = particle();
		assert_eq!(p.advance(1, &timings(), || unreachable!()), None);
		assert_eq!(p.progress(), 0.0);
		assert_eq!(p.phase(), Phase::Idle);
	}

	#[test]
	fn phases_follow_the_strict_order() {
		let mut p = particle();
		let entered: Vec<Phase> = run_to_done(&mut p, Outcome::Success)
			.into_iter()
			.map(|(_, phase)| phase)
			.collect();
		assert_eq!(
			entered,
			vec![
				Phase::Arrived,
				Phase::Resolving,
				Phase::Processing,
				Phase::Fading,
				Phase::Done,
			]
		);
	}

	#[test]
	fn arrival_happens_at_the_on_edge_threshold() {
		let mut p = particle();
		let entered = run_to_done(&mut p, Outcome::Success);
		// 48 steps of 2 cross 95, three more reach 100.
		assert_eq!(entered[0], (48, Phase::Arrived));
		assert_eq!(entered[1], (50, Phase::Resolving));
		assert_eq!(entered[2], (52, Phase::Processing));
		assert_eq!(entered[3], (55, Phase::Fading));
		assert_eq!(entered[4], (59, Phase::Done));
	}

	#[test]
	fn progress_stays_in_bounds_and_never_decreases() {
		let timings = PhaseTimings {
			progress_step: 7.5,
			..timings()
		};
		let mut p = particle();
		p.activate(0);
		let mut last = 0.0;
		for now in 1..200 {
			p.advance(now, &timings, || (Outcome::Warning, red()));
			assert!((0.0..=FULL_PROGRESS).contains(&p.progress()));
			assert!(p.progress() >= last);
			last = p.progress();
		}
		assert_eq!(p.progress(), FULL_PROGRESS);
	}

	#[test]
	fn outcome_is_drawn_once_and_kept() {
		let timings = timings();
		let mut p = particle();
		p.activate(0);
		let mut draws = 0;
		for now in 1..200 {
			p.advance(now, &timings, || {
				draws += 1;
				(Outcome::Warning, red())
			});
			if p.phase() >= Phase::Resolving {
				assert_eq!(p.outcome(), Outcome::Warning);
			}
		}
		assert_eq!(draws, 1);
		assert_eq!(p.phase(), Phase::Done);
	}

	#[test]
	fn palette_color_returns_at_fade_unless_error() {
		let mut ok = particle();
		run_to_done(&mut ok, Outcome::Success);
		assert_eq!(ok.visual().color, ok.palette_color());

		let mut failed = particle();
		run_to_done(&mut failed, Outcome::Error);
		assert_eq!(failed.visual().color, red());
	}

	#[test]
	fn activation_only_from_idle() {
		let mut p = particle();
		assert!(p.activate(3));
		assert_eq!(p.activated_at(), Some(3));
		assert!(!p.activate(4));
		assert_eq!(p.activated_at(), Some(3));
	}

	#[test]
	fn fade_alpha_ramps_down() {
		let timings = timings();
		let mut p = particle();
		let entered = run_to_done(&mut p, Outcome::Success);
		assert_eq!(p.fade_alpha(100, &timings), 1.0);

		let mut q = particle();
		q.activate(0);
		let fading_at = entered[3].0;
		for now in 1..=fading_at {
			q.advance(now, &timings, || (Outcome::Success, red()));
		}
		assert_eq!(q.phase(), Phase::Fading);
		assert_eq!(q.fade_alpha(fading_at, &timings), 1.0);
		assert_eq!(q.fade_alpha(fading_at + 2, &timings), 0.5);
	}

	#[test]
	fn retire_is_terminal() {
		let mut p = particle();
		p.activate(0);
		p.retire(5);
		assert_eq!(p.phase(), Phase::Done);
		assert_eq!(p.advance(6, &timings(), || unreachable!()), None);
	}
}
