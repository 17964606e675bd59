//! Orbit camera and the 3D to 2D projection pass.

use glam::{DVec2, DVec3};

use super::config::CameraConfig;
use super::types::{Edge, Node};

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
	/// Rotation about X, radians.
	pub pitch: f64,
	/// Rotation about Y, radians.
	pub yaw: f64,
	pub zoom: f64,
	/// Set while the user drags; suspends idle rotation.
	pub dragging: bool,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			pitch: 0.0,
			yaw: 0.0,
			zoom: 1.0,
			dragging: false,
		}
	}
}

impl Camera {
	pub fn reset(&mut self) {
		*self = Self::default();
	}

	pub fn zoom_by(&mut self, delta: f64, config: &CameraConfig) {
		self.zoom = (self.zoom + delta).clamp(config.min_zoom, config.max_zoom);
	}

	/// Camera-space position: yaw, then pitch, then pushed back along Z.
	pub fn to_view(&self, p: DVec3, config: &CameraConfig) -> DVec3 {
		let (sin_y, cos_y) = self.yaw.sin_cos();
		let x = p.x * cos_y - p.z * sin_y;
		let z = p.x * sin_y + p.z * cos_y;

		let (sin_p, cos_p) = self.pitch.sin_cos();
		let y = p.y * cos_p - z * sin_p;
		let z = p.y * sin_p + z * cos_p;

		DVec3::new(x, y, z + config.base_distance / self.zoom)
	}

	/// Depth of the world origin in camera space.
	pub fn origin_depth(&self, config: &CameraConfig) -> f64 {
		config.base_distance / self.zoom
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedNode {
	/// Index into the model's node list.
	pub index: usize,
	pub screen: DVec2,
	pub depth: f64,
	pub scale: f64,
	pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedEdge {
	pub a: usize,
	pub b: usize,
	pub from: DVec2,
	pub to: DVec2,
	pub depth: f64,
	pub opacity: f64,
}

/// One frame's worth of projected geometry, farthest first.
#[derive(Clone, Debug, Default)]
pub struct Frame {
	pub nodes: Vec<ProjectedNode>,
	pub edges: Vec<ProjectedEdge>,
}

impl Frame {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}
}

/// Fog: full opacity `fog_range / 2` in front of the origin, fading to the
/// floor `fog_range / 2` behind it.
pub fn depth_opacity(depth: f64, origin_depth: f64, config: &CameraConfig) -> f64 {
	let t = (origin_depth + config.fog_range * 0.5 - depth) / config.fog_range;
	t.clamp(config.min_opacity, 1.0)
}

pub fn project(
	nodes: &[Node],
	edges: &[Edge],
	camera: &Camera,
	viewport: DVec2,
	config: &CameraConfig,
) -> Frame {
	let center = viewport * 0.5;
	let origin_depth = camera.origin_depth(config);

	let mut projected: Vec<ProjectedNode> = nodes
		.iter()
		.enumerate()
		.filter_map(|(index, node)| {
			let view = camera.to_view(node.position, config);
			let denom = config.focal_length + view.z;
			if denom < config.near_plane || !view.is_finite() {
				return None;
			}
			let scale = config.focal_length / denom;
			Some(ProjectedNode {
				index,
				screen: center + DVec2::new(view.x, view.y) * scale,
				depth: view.z,
				scale,
				opacity: depth_opacity(view.z, origin_depth, config),
			})
		})
		.collect();
	projected.sort_by(|a, b| b.depth.total_cmp(&a.depth));

	let mut slot = vec![None; nodes.len()];
	for (i, p) in projected.iter().enumerate() {
		slot[p.index] = Some(i);
	}
	let lookup = |idx: usize| slot.get(idx).copied().flatten().map(|i| &projected[i]);

	let mut projected_edges: Vec<ProjectedEdge> = edges
		.iter()
		.filter_map(|edge| {
			let (a, b) = (lookup(edge.a)?, lookup(edge.b)?);
			let depth = (a.depth + b.depth) * 0.5;
			Some(ProjectedEdge {
				a: edge.a,
				b: edge.b,
				from: a.screen,
				to: b.screen,
				depth,
				opacity: depth_opacity(depth, origin_depth, config),
			})
		})
		.collect();
	projected_edges.sort_by(|a, b| b.depth.total_cmp(&a.depth));

	Frame {
		nodes: projected,
		edges: projected_edges,
	}
}
