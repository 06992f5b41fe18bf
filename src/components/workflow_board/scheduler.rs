//! Particle queue scheduling.
//!
//! The [`Scheduler`] owns one batch of particles built from the active edge
//! ids and drives it one tick at a time:
//!
//! - **Sequential** mode activates the particle at the cursor only. When it
//!   finishes, the cursor moves on (after an optional cooldown).
//! - **Parallel** mode activates the whole batch at build time.
//!
//! When a batch is exhausted it restarts after a pause, with fresh particle
//! ids. A watchdog bounds how long any particle may stay active, so a stuck
//! particle can never stall the sequential queue.
//!
//! All pending work lives in tick numbers on the scheduler and its
//! particles. [`Scheduler::stop`] and [`Scheduler::build`] therefore cancel
//! everything in one step.

use std::collections::HashSet;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::EngineConfig;
use super::graph::BoardGraph;
use super::outcome::Outcome;
use super::particle::{Particle, ParticleId, Phase, PhaseTimings, Tick};
use super::path::PathKind;
use super::theme::{Color, ParticlePalette};

/// How the batch is activated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
	/// One particle at a time, in queue order.
	#[default]
	Sequential,
	/// Every particle at once.
	Parallel,
}

impl Mode {
	pub fn from_sequential(sequential: bool) -> Self {
		if sequential {
			Mode::Sequential
		} else {
			Mode::Parallel
		}
	}

	pub fn is_sequential(self) -> bool {
		self == Mode::Sequential
	}
}

/// Per-build settings taken from the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
	pub path_kind: PathKind,
	pub mode: Mode,
}

/// One slot of the current batch, kept after its particle is gone so queue
/// status can still report it.
#[derive(Clone, Debug, PartialEq)]
pub struct QueueEntry {
	pub particle_id: ParticleId,
	pub edge_id: String,
	/// Color the particle finished with, once completed.
	pub final_color: Option<Color>,
	/// Outcome the particle finished with. `None` until completed, and for
	/// particles retired before resolving.
	pub final_outcome: Outcome,
}

/// Running totals across batches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
	pub batches_started: u64,
	pub particles_completed: u64,
	pub successes: u64,
	pub warnings: u64,
	pub errors: u64,
	/// Particles force-retired by the watchdog.
	pub watchdog_retirements: u64,
}

impl BatchStats {
	fn record(&mut self, outcome: Outcome) {
		match outcome {
			Outcome::Success => self.successes += 1,
			Outcome::Warning => self.warnings += 1,
			Outcome::Error => self.errors += 1,
			Outcome::None => {}
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
	/// Activate the particle at the cursor.
	Activate { at: Tick },
	/// Rebuild the batch from idle.
	Restart { at: Tick },
}

/// Owns the active particle batch and advances it.
///
/// The random source is injectable; by default it is a [`StdRng`] seeded
/// from [`EngineConfig::seed`], so runs are reproducible.
pub struct Scheduler<R = StdRng> {
	config: EngineConfig,
	timings: PhaseTimings,
	palette: ParticlePalette,
	rng: R,
	options: BuildOptions,
	queue: Vec<QueueEntry>,
	particles: Vec<Particle>,
	completed: Vec<ParticleId>,
	cursor: usize,
	pending: Option<Pending>,
	now: Tick,
	next_id: u64,
	running: bool,
	stats: BatchStats,
}

impl Scheduler<StdRng> {
	pub fn new(config: EngineConfig, palette: ParticlePalette) -> Self {
		let rng = StdRng::seed_from_u64(config.seed);
		Self::with_rng(config, palette, rng)
	}
}

impl<R: Rng> Scheduler<R> {
	pub fn with_rng(config: EngineConfig, palette: ParticlePalette, rng: R) -> Self {
		Self {
			timings: config.timings(),
			config,
			palette,
			rng,
			options: BuildOptions::default(),
			queue: Vec::new(),
			particles: Vec::new(),
			completed: Vec::new(),
			cursor: 0,
			pending: None,
			now: 0,
			next_id: 0,
			running: false,
			stats: BatchStats::default(),
		}
	}

	/// Discards the current batch and builds a new one from `active_edge_ids`.
	///
	/// Ids are taken in order; duplicates and ids unknown to `graph` are
	/// skipped, and at most [`EngineConfig::max_particles`] are kept.
	/// Returns the batch size. An empty batch leaves the scheduler stopped.
	pub fn build(
		&mut self,
		graph: &BoardGraph,
		active_edge_ids: &[String],
		options: BuildOptions,
	) -> usize {
		self.stop();
		self.options = options;

		let mut seen = HashSet::new();
		for edge_id in active_edge_ids {
			if self.queue.len() >= self.config.max_particles {
				break;
			}
			if !seen.insert(edge_id.as_str()) {
				continue;
			}
			if graph.edge(edge_id).is_none() {
				warn!("workflow-board: active edge `{}` is not in the graph", edge_id);
				continue;
			}
			self.queue.push(QueueEntry {
				particle_id: ParticleId(0),
				edge_id: edge_id.clone(),
				final_color: None,
				final_outcome: Outcome::None,
			});
		}

		if self.queue.is_empty() {
			return 0;
		}

		self.running = true;
		self.start_batch();
		info!(
			"workflow-board: built batch of {} particles ({:?}, {:?})",
			self.queue.len(),
			options.mode,
			options.path_kind
		);
		self.queue.len()
	}

	/// Advances the whole batch by one tick: progress and thresholds for each
	/// particle in queue order, then completions, then due activations and
	/// restarts.
	pub fn tick(&mut self) {
		if !self.running {
			return;
		}
		self.now += 1;
		self.advance_particles();
		self.collect_finished();
		self.run_pending();
	}

	/// Drops every particle and everything scheduled.
	pub fn stop(&mut self) {
		self.queue.clear();
		self.particles.clear();
		self.completed.clear();
		self.cursor = 0;
		self.pending = None;
		self.running = false;
	}

	pub fn set_looping(&mut self, looping: bool) {
		self.config.looping = looping;
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn now(&self) -> Tick {
		self.now
	}

	pub fn mode(&self) -> Mode {
		self.options.mode
	}

	pub fn path_kind(&self) -> PathKind {
		self.options.path_kind
	}

	/// Index of the sequential slot in play. Equals the batch size once the
	/// batch is exhausted.
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	pub fn timings(&self) -> &PhaseTimings {
		&self.timings
	}

	/// Particles of the current batch that have not finished, in queue order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
		self.particles.iter().find(|p| p.id() == id)
	}

	/// Every slot of the current batch, finished or not.
	pub fn queue(&self) -> &[QueueEntry] {
		&self.queue
	}

	/// Particles of the current batch that reached `Done`, in completion order.
	pub fn completed(&self) -> &[ParticleId] {
		&self.completed
	}

	pub fn stats(&self) -> &BatchStats {
		&self.stats
	}

	fn start_batch(&mut self) {
		self.particles.clear();
		self.completed.clear();
		self.cursor = 0;
		self.pending = None;

		for (position, entry) in self.queue.iter_mut().enumerate() {
			let id = ParticleId(self.next_id);
			self.next_id += 1;
			entry.particle_id = id;
			entry.final_color = None;
			entry.final_outcome = Outcome::None;
			self.particles.push(Particle::new(
				id,
				entry.edge_id.clone(),
				self.options.path_kind,
				position,
				self.palette.get(position),
			));
		}
		self.stats.batches_started += 1;

		match self.options.mode {
			Mode::Sequential => self.activate_cursor(),
			Mode::Parallel => {
				for particle in &mut self.particles {
					particle.activate(self.now);
				}
			}
		}
	}

	fn activate_cursor(&mut self) {
		let (cursor, now) = (self.cursor, self.now);
		if let Some(particle) = self
			.particles
			.iter_mut()
			.find(|p| p.queue_position() == cursor)
		{
			particle.activate(now);
			debug!("workflow-board: {} activated at tick {}", particle.id(), now);
		}
	}

	fn advance_particles(&mut self) {
		let now = self.now;
		let watchdog = self.config.watchdog_ticks();
		let Self {
			particles,
			rng,
			config,
			timings,
			palette,
			stats,
			..
		} = self;

		for particle in particles.iter_mut() {
			let entered = particle.advance(now, timings, || {
				let outcome = config.outcome_weights.sample(rng);
				let color = palette.outcome_color(outcome).unwrap_or(palette.success);
				(outcome, color)
			});
			if let Some(phase) = entered {
				debug!("workflow-board: {} -> {}", particle.id(), phase.as_str());
				if phase == Phase::Resolving {
					stats.record(particle.outcome());
				}
			}

			if particle.phase().is_active() && particle.active_ticks(now) > watchdog {
				warn!(
					"workflow-board: {} stuck in {} for {} ticks, retiring",
					particle.id(),
					particle.phase().as_str(),
					particle.active_ticks(now)
				);
				particle.retire(now);
				stats.watchdog_retirements += 1;
			}
		}
	}

	fn collect_finished(&mut self) {
		let mut finished = Vec::new();
		self.particles.retain(|p| {
			if p.phase() == Phase::Done {
				finished.push((p.id(), p.queue_position(), p.visual().color, p.outcome()));
				false
			} else {
				true
			}
		});
		if finished.is_empty() {
			return;
		}

		for &(id, position, color, outcome) in &finished {
			self.completed.push(id);
			if let Some(entry) = self.queue.get_mut(position) {
				entry.final_color = Some(color);
				entry.final_outcome = outcome;
			}
			self.stats.particles_completed += 1;
		}

		match self.options.mode {
			Mode::Sequential => {
				if !finished.iter().any(|&(_, position, ..)| position == self.cursor) {
					return;
				}
				self.cursor += 1;
				if self.cursor >= self.queue.len() {
					self.schedule_restart();
				} else {
					let cooldown = self.config.cooldown_ticks();
					if cooldown == 0 {
						self.activate_cursor();
					} else {
						self.pending = Some(Pending::Activate {
							at: self.now + cooldown,
						});
					}
				}
			}
			Mode::Parallel => {
				if self.particles.is_empty() {
					self.schedule_restart();
				}
			}
		}
	}

	fn schedule_restart(&mut self) {
		if self.config.looping {
			self.pending = Some(Pending::Restart {
				at: self.now + self.config.restart_pause_ticks(),
			});
		} else {
			info!("workflow-board: batch finished");
			self.running = false;
		}
	}

	fn run_pending(&mut self) {
		match self.pending {
			Some(Pending::Activate { at }) if self.now >= at => {
				self.pending = None;
				self.activate_cursor();
			}
			Some(Pending::Restart { at }) if self.now >= at => {
				debug!("workflow-board: restarting batch at tick {}", self.now);
				self.start_batch();
			}
			_ => {}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::workflow_board::outcome::OutcomeWeights;
	use crate::components::workflow_board::types::{GraphEdge, GraphNode, Point};

	fn graph(edges: usize) -> BoardGraph {
		let nodes = (0..=edges)
			.map(|i| GraphNode {
				id: format!("n{i}"),
				position: Point::new(i as f64 * 300.0, 0.0),
				label: format!("Node {i}"),
			})
			.collect();
		let edges = (0..edges)
			.map(|i| GraphEdge {
				id: format!("e{i}"),
				source: format!("n{i}"),
				target: format!("n{}", i + 1),
			})
			.collect();
		BoardGraph::new(nodes, edges)
	}

	fn ids(n: usize) -> Vec<String> {
		(0..n).map(|i| format!("e{i}")).collect()
	}

	fn scheduler(config: EngineConfig) -> Scheduler {
		Scheduler::new(config, ParticlePalette::default())
	}

	fn sequential() -> BuildOptions {
		BuildOptions {
			path_kind: PathKind::Straight,
			mode: Mode::Sequential,
		}
	}

	fn parallel() -> BuildOptions {
		BuildOptions {
			path_kind: PathKind::Curved,
			mode: Mode::Parallel,
		}
	}

	fn phase_of(s: &Scheduler, position: usize) -> Option<Phase> {
		s.particles()
			.iter()
			.find(|p| p.queue_position() == position)
			.map(|p| p.phase())
	}

	#[test]
	fn build_respects_order_duplicates_unknowns_and_cap() {
		let mut s = scheduler(EngineConfig {
			max_particles: 3,
			..EngineConfig::default()
		});
		let active: Vec<String> = ["e2", "e2", "ghost", "e0", "e1", "e3"]
			.iter()
			.map(|s| s.to_string())
			.collect();
		assert_eq!(s.build(&graph(4), &active, sequential()), 3);

		let edges: Vec<&str> = s.particles().iter().map(|p| p.edge_id()).collect();
		assert_eq!(edges, vec!["e2", "e0", "e1"]);
		let positions: Vec<usize> = s.particles().iter().map(|p| p.queue_position()).collect();
		assert_eq!(positions, vec![0, 1, 2]);
	}

	#[test]
	fn particle_ids_are_unique_across_builds_and_restarts() {
		let mut s = scheduler(EngineConfig {
			restart_pause_ms: 0,
			..EngineConfig::default()
		});
		let mut seen = HashSet::new();
		s.build(&graph(2), &ids(2), parallel());
		for entry in s.queue() {
			assert!(seen.insert(entry.particle_id));
		}
		for _ in 0..500 {
			s.tick();
			for entry in s.queue() {
				seen.insert(entry.particle_id);
			}
		}
		assert!(s.stats().batches_started > 1);
		assert_eq!(seen.len() as u64, s.stats().batches_started * 2);

		s.build(&graph(2), &ids(2), parallel());
		for entry in s.queue() {
			assert!(seen.insert(entry.particle_id));
		}
	}

	#[test]
	fn sequential_hands_over_in_the_same_tick() {
		let mut s = scheduler(EngineConfig::default());
		s.build(&graph(3), &ids(3), sequential());

		assert_eq!(phase_of(&s, 0), Some(Phase::Traveling));
		assert_eq!(phase_of(&s, 1), Some(Phase::Idle));
		assert_eq!(phase_of(&s, 2), Some(Phase::Idle));

		let first = s.particles()[0].id();
		let mut reached_full = false;
		while !s.completed().contains(&first) {
			s.tick();
			if let Some(p) = s.particle(first) {
				reached_full |= p.progress() >= 100.0;
				if p.phase() != Phase::Done {
					assert_eq!(phase_of(&s, 1), Some(Phase::Idle));
				}
			}
		}
		assert!(reached_full);

		let second = s.particles().iter().find(|p| p.queue_position() == 1).unwrap();
		assert_eq!(second.phase(), Phase::Traveling);
		assert_eq!(second.progress(), 0.0);
		assert_eq!(phase_of(&s, 2), Some(Phase::Idle));
		assert_eq!(s.cursor(), 1);
	}

	#[test]
	fn sequential_keeps_one_active_and_completes_in_order() {
		let mut s = scheduler(EngineConfig {
			looping: false,
			..EngineConfig::default()
		});
		s.build(&graph(4), &ids(4), sequential());
		let order: Vec<ParticleId> = s.queue().iter().map(|e| e.particle_id).collect();

		while s.is_running() {
			s.tick();
			let active = s.particles().iter().filter(|p| p.phase().is_active()).count();
			assert!(active <= 1, "{active} active at tick {}", s.now());
		}
		assert_eq!(s.completed(), order.as_slice());
		assert_eq!(s.cursor(), 4);
	}

	#[test]
	fn sequential_cooldown_delays_the_next_particle() {
		let mut s = scheduler(EngineConfig {
			cooldown_ms: 150,
			..EngineConfig::default()
		});
		s.build(&graph(2), &ids(2), sequential());
		let first = s.particles()[0].id();
		while !s.completed().contains(&first) {
			s.tick();
		}
		let done_at = s.now();
		assert_eq!(phase_of(&s, 1), Some(Phase::Idle));
		s.tick();
		s.tick();
		assert_eq!(phase_of(&s, 1), Some(Phase::Idle));
		s.tick();
		assert_eq!(s.now(), done_at + 3);
		assert_eq!(phase_of(&s, 1), Some(Phase::Traveling));
	}

	#[test]
	fn parallel_activates_everything_on_build() {
		let mut s = scheduler(EngineConfig::default());
		s.build(&graph(5), &ids(5), parallel());
		assert_eq!(s.particles().len(), 5);
		assert!(s.particles().iter().all(|p| p.phase() == Phase::Traveling));
		assert!(s.particles().iter().all(|p| p.path_kind() == PathKind::Curved));

		s.tick();
		assert!(s.particles().iter().all(|p| p.progress() == 2.0));
	}

	#[test]
	fn progress_bounds_hold_every_tick() {
		let mut s = scheduler(EngineConfig {
			progress_step: 3.7,
			restart_pause_ms: 100,
			..EngineConfig::default()
		});
		s.build(&graph(5), &ids(5), parallel());
		for _ in 0..2_000 {
			s.tick();
			for p in s.particles() {
				assert!((0.0..=100.0).contains(&p.progress()));
			}
		}
	}

	#[test]
	fn outcome_never_changes_once_set() {
		let mut s = scheduler(EngineConfig::default());
		s.build(&graph(5), &ids(5), parallel());
		let mut seen: Vec<(ParticleId, Outcome)> = Vec::new();
		for _ in 0..300 {
			s.tick();
			for p in s.particles() {
				if !p.outcome().is_resolved() {
					continue;
				}
				match seen.iter().find(|(id, _)| *id == p.id()) {
					Some(&(_, outcome)) => assert_eq!(outcome, p.outcome()),
					None => seen.push((p.id(), p.outcome())),
				}
			}
		}
		assert!(!seen.is_empty());
	}

	#[test]
	fn batch_restarts_fresh_after_pause() {
		let mut s = scheduler(EngineConfig {
			restart_pause_ms: 500,
			..EngineConfig::default()
		});
		s.build(&graph(3), &ids(3), parallel());
		let first_batch: Vec<ParticleId> = s.queue().iter().map(|e| e.particle_id).collect();

		while !s.particles().is_empty() {
			s.tick();
		}
		assert_eq!(s.completed().len(), 3);
		let finished_at = s.now();

		while s.stats().batches_started < 2 {
			s.tick();
		}
		assert_eq!(s.now(), finished_at + 10);
		assert!(s.completed().is_empty());
		assert_eq!(s.particles().len(), 3);
		assert!(s.particles().iter().all(|p| p.progress() == 0.0));
		assert!(s.particles().iter().all(|p| p.outcome() == Outcome::None));
		assert!(s.particles().iter().all(|p| !first_batch.contains(&p.id())));
	}

	#[test]
	fn sequential_restart_resets_cursor() {
		let mut s = scheduler(EngineConfig {
			restart_pause_ms: 0,
			..EngineConfig::default()
		});
		s.build(&graph(2), &ids(2), sequential());
		while s.stats().batches_started < 2 {
			s.tick();
		}
		assert_eq!(s.cursor(), 0);
		assert!(s.completed().is_empty());
		assert_eq!(phase_of(&s, 0), Some(Phase::Traveling));
		assert_eq!(phase_of(&s, 1), Some(Phase::Idle));
	}

	#[test]
	fn without_looping_the_scheduler_goes_idle() {
		let mut s = scheduler(EngineConfig {
			looping: false,
			..EngineConfig::default()
		});
		s.build(&graph(1), &ids(1), parallel());
		while s.is_running() {
			s.tick();
		}
		let stopped_at = s.now();
		s.tick();
		assert_eq!(s.now(), stopped_at);
		assert_eq!(s.stats().batches_started, 1);
	}

	#[test]
	fn looping_can_be_switched_off_mid_batch() {
		let mut s = scheduler(EngineConfig::default());
		s.build(&graph(1), &ids(1), parallel());
		s.tick();
		s.set_looping(false);
		while s.is_running() {
			s.tick();
		}
		assert_eq!(s.stats().batches_started, 1);
		assert_eq!(s.stats().particles_completed, 1);
	}

	#[test]
	fn watchdog_retires_stuck_particles() {
		let config = EngineConfig {
			looping: false,
			..EngineConfig::default()
		};
		let watchdog = config.watchdog_ticks();
		let mut s = scheduler(config);
		s.build(&graph(2), &ids(2), sequential());
		// Processing that never ends, far beyond anything the config allows for.
		s.timings.processing = Tick::MAX / 2;

		for _ in 0..watchdog {
			s.tick();
		}
		assert_eq!(phase_of(&s, 0), Some(Phase::Processing));
		assert_eq!(s.stats().watchdog_retirements, 0);

		s.tick();
		assert_eq!(s.stats().watchdog_retirements, 1);
		assert_eq!(s.completed().len(), 1);
		assert_eq!(phase_of(&s, 1), Some(Phase::Traveling));
	}

	#[test]
	fn slow_particles_live_out_their_whole_lifecycle() {
		for step in [0.5, 0.3, 0.1] {
			let mut s = scheduler(EngineConfig {
				progress_step: step,
				looping: false,
				..EngineConfig::default()
			});
			s.build(&graph(1), &ids(1), sequential());
			let mut last_phase = Phase::Idle;
			while s.is_running() {
				s.tick();
				if let Some(p) = s.particles().first() {
					last_phase = p.phase();
				}
			}
			assert_eq!(last_phase, Phase::Fading, "step {step}");
			assert_eq!(s.stats().watchdog_retirements, 0, "step {step}");
			assert_eq!(s.stats().particles_completed, 1, "step {step}");
		}
	}

	#[test]
	fn completed_entries_keep_their_outcome() {
		let mut s = scheduler(EngineConfig {
			outcome_weights: OutcomeWeights {
				success: 0,
				warning: 1,
				error: 0,
			},
			looping: false,
			..EngineConfig::default()
		});
		s.build(&graph(2), &ids(2), parallel());
		assert!(s.queue().iter().all(|e| e.final_outcome == Outcome::None));
		while s.is_running() {
			s.tick();
		}
		assert!(s.queue().iter().all(|e| e.final_outcome == Outcome::Warning));
	}

	#[test]
	fn outcome_weights_drive_stats() {
		let mut s = scheduler(EngineConfig {
			outcome_weights: OutcomeWeights {
				success: 0,
				warning: 0,
				error: 1,
			},
			looping: false,
			..EngineConfig::default()
		});
		s.build(&graph(3), &ids(3), parallel());
		while s.is_running() {
			s.tick();
		}
		assert_eq!(s.stats().errors, 3);
		assert_eq!(s.stats().successes, 0);
		assert_eq!(s.stats().particles_completed, 3);
		let red = ParticlePalette::default().error;
		assert!(s.queue().iter().all(|e| e.final_color == Some(red)));
	}

	#[test]
	fn same_seed_same_outcomes() {
		let run = || {
			let mut s = scheduler(EngineConfig {
				seed: 99,
				looping: false,
				..EngineConfig::default()
			});
			s.build(&graph(5), &ids(5), parallel());
			let mut outcomes = Vec::new();
			while s.is_running() {
				s.tick();
				for p in s.particles() {
					if p.phase() == Phase::Resolving && !outcomes.contains(&(p.id(), p.outcome())) {
						outcomes.push((p.id(), p.outcome()));
					}
				}
			}
			outcomes
		};
		assert_eq!(run(), run());
	}

	#[test]
	fn teardown_clears_everything() {
		let mut s = scheduler(EngineConfig::default());
		s.build(&graph(3), &ids(3), parallel());
		for _ in 0..10 {
			s.tick();
		}
		assert_eq!(s.build(&graph(3), &[], parallel()), 0);
		assert!(s.particles().is_empty());
		assert!(s.queue().is_empty());
		assert!(!s.is_running());

		let now = s.now();
		s.tick();
		assert_eq!(s.now(), now);
		assert!(s.particles().is_empty());
	}

	#[test]
	fn rebuild_discards_the_previous_batch() {
		let mut s = scheduler(EngineConfig::default());
		s.build(&graph(3), &ids(3), parallel());
		for _ in 0..30 {
			s.tick();
		}
		let old: Vec<ParticleId> = s.particles().iter().map(|p| p.id()).collect();
		s.build(&graph(3), &ids(2), sequential());
		assert_eq!(s.particles().len(), 2);
		assert!(s.particles().iter().all(|p| !old.contains(&p.id())));
		assert!(s.particles().iter().all(|p| p.progress() == 0.0));
		assert!(s.completed().is_empty());
	}
}
