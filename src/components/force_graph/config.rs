//! Tunable constants for every stage of the engine.
//!
//! All structs deserialize with `#[serde(default)]`, so a host may override
//! any subset of fields from JSON and keep the defaults for the rest.

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	pub model: ModelConfig,
	pub physics: PhysicsConfig,
	pub camera: CameraConfig,
	pub interaction: InteractionConfig,
	pub render: RenderConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
	pub base_mass: f64,
	/// Added to both endpoints each time an edge forms.
	pub mass_increment: f64,
	/// Edge strength per overlapping tag.
	pub strength_scale: f64,
	pub pinned_strength: f64,
	/// Initial positions are drawn from `[-extent, extent]` on each axis.
	pub initial_extent: f64,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self {
			base_mass: 1.0,
			mass_increment: 0.1,
			strength_scale: 0.5,
			pinned_strength: 1.0,
			initial_extent: 200.0,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
	pub repulsion: f64,
	pub repulsion_scale: f64,
	pub attraction: f64,
	pub centering: f64,
	/// Velocity multiplier applied after integration. Must stay below 1.
	pub friction: f64,
	pub min_distance_sq: f64,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			repulsion: 500.0,
			repulsion_scale: 0.05,
			attraction: 0.001,
			centering: 0.001,
			friction: 0.9,
			min_distance_sq: 1.0,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
	pub base_distance: f64,
	pub focal_length: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
	/// Depth span over which opacity fades from 1 to 0 around the origin.
	pub fog_range: f64,
	pub min_opacity: f64,
	/// Nodes whose `focal_length + z` falls below this are culled.
	pub near_plane: f64,
}

impl Default for CameraConfig {
	fn default() -> Self {
		Self {
			base_distance: 400.0,
			focal_length: 400.0,
			min_zoom: 0.5,
			max_zoom: 3.0,
			fog_range: 300.0,
			min_opacity: 0.1,
			near_plane: 1.0,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
	/// Radians per pixel of drag.
	pub rotation_sensitivity: f64,
	pub zoom_step: f64,
	pub idle_yaw: f64,
	pub idle_pitch: f64,
	pub hit_radius: f64,
	/// Max pointer travel (px) for a press/release pair to count as a click.
	pub click_slop: f64,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			rotation_sensitivity: 0.005,
			zoom_step: 0.1,
			idle_yaw: 0.003,
			idle_pitch: 0.001,
			hit_radius: 12.0,
			click_slop: 4.0,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
	pub base_radius: f64,
	pub selected_scale: f64,
	pub label_threshold: f64,
	pub edge_width: f64,
	pub highlight_edge_width: f64,
	pub highlight_opacity_boost: f64,
	pub glow: f64,
	pub font_size: f64,
}

impl Default for RenderConfig {
	fn default() -> Self {
		Self {
			base_radius: 6.0,
			selected_scale: 1.5,
			label_threshold: 0.4,
			edge_width: 1.0,
			highlight_edge_width: 2.5,
			highlight_opacity_boost: 0.4,
			glow: 12.0,
			font_size: 11.0,
		}
	}
}
