//! One relaxation step over the node set, plus the clock that decides how
//! many steps a display frame gets.

use glam::DVec3;

use super::config::PhysicsConfig;
use super::types::{Edge, Node};

/// Inverse-square push magnitude for a pair at `distance_sq`.
pub fn repulsion_force(distance_sq: f64, params: &PhysicsConfig) -> f64 {
	params.repulsion / distance_sq.max(params.min_distance_sq) * params.repulsion_scale
}

/// Spring pull magnitude along an edge.
pub fn spring_force(distance: f64, strength: f64, params: &PhysicsConfig) -> f64 {
	distance * params.attraction * strength
}

/// Fallback push direction for two nodes sitting on the same point.
fn split_direction(a: usize, b: usize) -> DVec3 {
	let angle = ((a as f64) * 0.618_034 + (b as f64) * 0.414_214) * std::f64::consts::TAU;
	DVec3::new(angle.cos(), angle.sin(), 0.0)
}

/// Advance every node by exactly one unit step.
///
/// Mass is deliberately absent from the force terms; it only sizes the
/// drawn circle.
pub fn step(nodes: &mut [Node], edges: &[Edge], params: &PhysicsConfig) {
	let count = nodes.len();

	for i in 0..count {
		for j in (i + 1)..count {
			let delta = nodes[i].position - nodes[j].position;
			let distance_sq = delta.length_squared();
			let direction = if distance_sq > f64::EPSILON {
				delta / distance_sq.sqrt()
			} else {
				split_direction(i, j)
			};
			let push = direction * repulsion_force(distance_sq, params);
			nodes[i].velocity += push;
			nodes[j].velocity -= push;
		}
	}

	for node in nodes.iter_mut() {
		node.velocity -= node.position * params.centering;
	}

	for edge in edges {
		if edge.a >= count || edge.b >= count || edge.a == edge.b {
			continue;
		}
		let delta = nodes[edge.b].position - nodes[edge.a].position;
		let pull = delta.normalize_or_zero() * spring_force(delta.length(), edge.strength, params);
		nodes[edge.a].velocity += pull;
		nodes[edge.b].velocity -= pull;
	}

	for node in nodes.iter_mut() {
		node.position += node.velocity;
		node.velocity *= params.friction;
	}
}

/// Turns animation-frame timestamps into a whole number of fixed steps.
#[derive(Clone, Debug)]
pub struct FrameClock {
	last: Option<f64>,
	accumulator: f64,
}

impl FrameClock {
	/// 60 steps per second.
	pub const STEP_MS: f64 = 1000.0 / 60.0;
	/// Upper bound so a long-hidden tab does not fast-forward the layout.
	pub const MAX_STEPS: u32 = 4;

	pub fn new() -> Self {
		Self {
			last: None,
			accumulator: 0.0,
		}
	}

	/// Steps to run for a frame stamped `now_ms`.
	pub fn advance(&mut self, now_ms: f64) -> u32 {
		let Some(last) = self.last.replace(now_ms) else {
			return 1;
		};
		self.accumulator += (now_ms - last).max(0.0);
		let steps = (self.accumulator / Self::STEP_MS).floor();
		if steps >= Self::MAX_STEPS as f64 {
			self.accumulator = 0.0;
			return Self::MAX_STEPS;
		}
		self.accumulator -= steps * Self::STEP_MS;
		steps as u32
	}
}

impl Default for FrameClock {
	fn default() -> Self {
		Self::new()
	}
}
