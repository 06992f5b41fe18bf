//! Engine timing and queue configuration.
//!
//! All durations are given in milliseconds and converted to whole ticks of
//! the tick driver, rounding up, so the engine itself only counts ticks.

use serde::Deserialize;

use super::outcome::OutcomeWeights;
use super::particle::{FULL_PROGRESS, PhaseTimings, Tick};

/// Tunable engine parameters. Deserializes from camelCase JSON; missing
/// fields take their default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
	/// Tick driver period.
	pub tick_interval_ms: u32,
	/// Progress added per tick while traveling, in percent.
	pub progress_step: f64,
	/// Progress at which a particle leaves the edge path and starts its
	/// approach to the node center.
	pub on_edge_threshold: f64,
	/// Upper bound on particles per batch.
	pub max_particles: usize,
	/// Delay between the outcome draw and the processing animation.
	pub resolve_delay_ms: u32,
	/// Length of the processing animation.
	pub processing_ms: u32,
	/// Length of the fade-out.
	pub fade_ms: u32,
	/// Sequential mode pause between one particle finishing and the next
	/// starting.
	pub cooldown_ms: u32,
	/// Pause between a finished batch and its restart.
	pub restart_pause_ms: u32,
	/// Longest a particle may stay active before it is force-retired.
	pub watchdog_ms: u32,
	/// Restart finished batches.
	pub looping: bool,
	pub outcome_weights: OutcomeWeights,
	/// Seed for the outcome draw.
	pub seed: u64,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			tick_interval_ms: 50,
			progress_step: 2.0,
			on_edge_threshold: 95.0,
			max_particles: 5,
			resolve_delay_ms: 400,
			processing_ms: 1200,
			fade_ms: 600,
			cooldown_ms: 0,
			restart_pause_ms: 2000,
			watchdog_ms: 10_000,
			looping: true,
			outcome_weights: OutcomeWeights::default(),
			seed: 0x5eed,
		}
	}
}

impl EngineConfig {
	/// Number of whole ticks covering `ms`.
	pub fn ticks(&self, ms: u32) -> Tick {
		let period = self.tick_interval_ms.max(1) as Tick;
		(ms as Tick).div_ceil(period)
	}

	/// Per-phase timings in ticks, with out-of-range values sanitized.
	pub fn timings(&self) -> PhaseTimings {
		let step = if self.progress_step.is_finite() && self.progress_step > 0.0 {
			self.progress_step
		} else {
			Self::default().progress_step
		};
		let threshold = if self.on_edge_threshold.is_finite() {
			self.on_edge_threshold.clamp(1.0, 100.0)
		} else {
			Self::default().on_edge_threshold
		};

		PhaseTimings {
			progress_step: step,
			on_edge_threshold: threshold,
			resolve_delay: self.ticks(self.resolve_delay_ms),
			processing: self.ticks(self.processing_ms),
			fade: self.ticks(self.fade_ms),
		}
	}

	pub fn cooldown_ticks(&self) -> Tick {
		self.ticks(self.cooldown_ms)
	}

	pub fn restart_pause_ticks(&self) -> Tick {
		self.ticks(self.restart_pause_ms)
	}

	/// Ticks from activation to `Done` for a particle that never stalls.
	pub fn lifecycle_ticks(&self) -> Tick {
		let timings = self.timings();
		let steps = (FULL_PROGRESS / timings.progress_step).ceil() as Tick;
		steps + timings.resolve_delay + timings.processing + timings.fade
	}

	/// Active lifetime after which a particle counts as stalled. Never shorter
	/// than a full lifecycle plus a quarter, whatever `watchdog_ms` says.
	pub fn watchdog_ticks(&self) -> Tick {
		let lifecycle = self.lifecycle_ticks();
		self.ticks(self.watchdog_ms).max(lifecycle + lifecycle / 4 + 1)
	}
}
