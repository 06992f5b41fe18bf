//! Visual theming for the workflow board.
//!
//! Provides colors, the particle spawn palette, outcome colors and the
//! canvas style configuration.

use super::outcome::Outcome;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// Category token drawn inside a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
	Database,
	Cpu,
	Zap,
	Globe,
	File,
	Message,
	Check,
	Alert,
	Cross,
}

impl Icon {
	pub fn as_str(self) -> &'static str {
		match self {
			Icon::Database => "database",
			Icon::Cpu => "cpu",
			Icon::Zap => "zap",
			Icon::Globe => "globe",
			Icon::File => "file",
			Icon::Message => "message",
			Icon::Check => "check",
			Icon::Alert => "alert",
			Icon::Cross => "cross",
		}
	}

	/// Single glyph used when drawing the icon on the canvas.
	pub fn glyph(self) -> &'static str {
		match self {
			Icon::Database => "⛁",
			Icon::Cpu => "▣",
			Icon::Zap => "ϟ",
			Icon::Globe => "◍",
			Icon::File => "▤",
			Icon::Message => "✉",
			Icon::Check => "✓",
			Icon::Alert => "!",
			Icon::Cross => "✕",
		}
	}

	/// Icon shown while an outcome is displayed.
	pub fn for_outcome(outcome: Outcome) -> Option<Icon> {
		match outcome {
			Outcome::None => None,
			Outcome::Success => Some(Icon::Check),
			Outcome::Warning => Some(Icon::Alert),
			Outcome::Error => Some(Icon::Cross),
		}
	}
}

/// Color and icon of a particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visual {
	pub color: Color,
	pub icon: Icon,
}

/// Spawn palette plus the colors particles switch to once resolved.
#[derive(Clone, Debug)]
pub struct ParticlePalette {
	pub spawn: Vec<Visual>,
	pub success: Color,
	pub warning: Color,
	pub error: Color,
}

impl ParticlePalette {
	/// Bright category colors, one icon each (default)
	pub fn vivid() -> Self {
		Self {
			spawn: vec![
				Visual {
					color: Color::rgb(59, 130, 246), // Blue
					icon: Icon::Database,
				},
				Visual {
					color: Color::rgb(168, 85, 247), // Purple
					icon: Icon::Cpu,
				},
				Visual {
					color: Color::rgb(234, 179, 8), // Amber
					icon: Icon::Zap,
				},
				Visual {
					color: Color::rgb(6, 182, 212), // Cyan
					icon: Icon::Globe,
				},
				Visual {
					color: Color::rgb(236, 72, 153), // Pink
					icon: Icon::File,
				},
				Visual {
					color: Color::rgb(99, 102, 241), // Indigo
					icon: Icon::Message,
				},
			],
			success: Color::rgb(34, 197, 94),
			warning: Color::rgb(249, 115, 22),
			error: Color::rgb(239, 68, 68),
		}
	}

	/// Muted slate tones for the darker theme
	pub fn muted() -> Self {
		Self {
			spawn: vec![
				Visual {
					color: Color::rgb(94, 129, 172), // Steel blue
					icon: Icon::Database,
				},
				Visual {
					color: Color::rgb(130, 120, 150), // Wisteria
					icon: Icon::Cpu,
				},
				Visual {
					color: Color::rgb(185, 145, 110), // Amber
					icon: Icon::Zap,
				},
				Visual {
					color: Color::rgb(100, 145, 135), // Eucalyptus
					icon: Icon::Globe,
				},
				Visual {
					color: Color::rgb(200, 180, 190), // Dusty rose
					icon: Icon::File,
				},
			],
			success: Color::rgb(110, 180, 120),
			warning: Color::rgb(210, 150, 90),
			error: Color::rgb(200, 90, 90),
		}
	}

	/// Visual for the particle at `index` in the queue.
	pub fn get(&self, index: usize) -> Visual {
		if self.spawn.is_empty() {
			return Visual {
				color: Color::rgb(148, 163, 184),
				icon: Icon::Zap,
			};
		}
		self.spawn[index % self.spawn.len()]
	}

	pub fn outcome_color(&self, outcome: Outcome) -> Option<Color> {
		match outcome {
			Outcome::None => None,
			Outcome::Success => Some(self.success),
			Outcome::Warning => Some(self.warning),
			Outcome::Error => Some(self.error),
		}
	}
}

impl Default for ParticlePalette {
	fn default() -> Self {
		Self::vivid()
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Idle edge color
	pub color: Color,
	/// Color of edges carrying particles
	pub active_color: Color,
	pub line_width: f64,
	/// Dash pattern (dash, gap) for idle edges
	pub dash_pattern: (f64, f64),
	pub arrow_size: f64,
}

/// Node box style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub fill: Color,
	pub border_color: Color,
	pub border_width: f64,
	pub corner_radius: f64,
	pub label_color: Color,
	pub label_font: &'static str,
	/// Whether node boxes get a vertical gradient
	pub use_gradient: bool,
}

/// Particle drawing configuration.
#[derive(Clone, Debug)]
pub struct ParticleStyle {
	pub radius: f64,
	/// Glow radius as a multiple of `radius` (0 = no glow)
	pub glow: f64,
	pub icon_font: &'static str,
	/// Radius growth at the peak of the pulse animation
	pub pulse_amplitude: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub particle: ParticleStyle,
	pub palette: ParticlePalette,
}

impl Theme {
	/// Clean dark dashboard theme (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(15, 23, 42),
				color_secondary: Color::rgb(30, 41, 59),
				use_gradient: true,
				vignette: 0.15,
			},
			edge: EdgeStyle {
				color: Color::rgba(148, 163, 184, 0.35),
				active_color: Color::rgba(148, 163, 184, 0.85),
				line_width: 2.0,
				dash_pattern: (6.0, 4.0),
				arrow_size: 8.0,
			},
			node: NodeStyle {
				fill: Color::rgb(30, 41, 59),
				border_color: Color::rgba(148, 163, 184, 0.6),
				border_width: 1.5,
				corner_radius: 10.0,
				label_color: Color::rgba(241, 245, 249, 0.95),
				label_font: "13px sans-serif",
				use_gradient: true,
			},
			particle: ParticleStyle {
				radius: 9.0,
				glow: 2.2,
				icon_font: "10px sans-serif",
				pulse_amplitude: 0.25,
			},
			palette: ParticlePalette::vivid(),
		}
	}

	/// Low-contrast theme with muted particles
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: BackgroundStyle {
				color: Color::rgb(18, 20, 28),
				color_secondary: Color::rgb(25, 28, 38),
				use_gradient: true,
				vignette: 0.2,
			},
			edge: EdgeStyle {
				color: Color::rgba(100, 120, 150, 0.3),
				active_color: Color::rgba(100, 120, 150, 0.75),
				line_width: 1.5,
				dash_pattern: (4.0, 4.0),
				arrow_size: 7.0,
			},
			node: NodeStyle {
				fill: Color::rgb(25, 28, 38),
				border_color: Color::rgba(100, 120, 150, 0.5),
				border_width: 1.0,
				corner_radius: 6.0,
				label_color: Color::rgba(220, 225, 235, 0.9),
				label_font: "12px sans-serif",
				use_gradient: false,
			},
			particle: ParticleStyle {
				radius: 8.0,
				glow: 0.0,
				icon_font: "9px sans-serif",
				pulse_amplitude: 0.15,
			},
			palette: ParticlePalette::muted(),
		}
	}

	/// Looks a theme up by name, falling back to the default.
	pub fn by_name(name: &str) -> Self {
		match name {
			"midnight" => Self::midnight(),
			_ => Self::default_theme(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
