//! Arrival outcomes and their weighted random draw.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Classification a particle receives when it reaches its target node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
	/// Not resolved yet.
	#[default]
	None,
	Success,
	Warning,
	Error,
}

impl Outcome {
	pub fn is_resolved(self) -> bool {
		self != Outcome::None
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Outcome::None => "none",
			Outcome::Success => "success",
			Outcome::Warning => "warning",
			Outcome::Error => "error",
		}
	}
}

/// Relative weights for the outcome draw. Only ratios matter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeWeights {
	pub success: u32,
	pub warning: u32,
	pub error: u32,
}

impl Default for OutcomeWeights {
	fn default() -> Self {
		Self {
			success: 70,
			warning: 20,
			error: 10,
		}
	}
}

impl OutcomeWeights {
	/// Draws an outcome. All-zero weights always yield [`Outcome::Success`].
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Outcome {
		let total = self.success as u64 + self.warning as u64 + self.error as u64;
		if total == 0 {
			return Outcome::Success;
		}
		let roll = rng.gen_range(0..total);
		if roll < self.success as u64 {
			Outcome::Success
		} else if roll < self.success as u64 + self.warning as u64 {
			Outcome::Warning
		} else {
			Outcome::Error
		}
	}
}
