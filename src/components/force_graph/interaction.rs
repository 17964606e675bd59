//! Pointer and wheel handling: camera rotation, zoom, hover and selection.

use glam::DVec2;
use log::debug;

use super::camera::{Camera, Frame};
use super::config::GraphConfig;
use super::render::node_radius;
use super::types::Node;

/// Nearest projected node to `point` within the hit radius, or within the
/// node's drawn radius when that is larger. `selected` is the id drawn
/// enlarged. Ties go to the node nearer the camera.
pub fn pick(
	frame: &Frame,
	nodes: &[Node],
	point: DVec2,
	selected: Option<&str>,
	config: &GraphConfig,
) -> Option<usize> {
	let mut best: Option<(usize, f64)> = None;
	for p in &frame.nodes {
		let Some(node) = nodes.get(p.index) else {
			continue;
		};
		let is_selected = selected == Some(node.id.as_str());
		let reach = node_radius(node.mass, p.scale, is_selected, &config.render)
			.max(config.interaction.hit_radius);
		let distance = p.screen.distance(point);
		if distance > reach {
			continue;
		}
		// frame is far-to-near, so `<=` lets the nearer node win a tie
		if best.is_none_or(|(_, d)| distance <= d) {
			best = Some((p.index, distance));
		}
	}
	best.map(|(idx, _)| idx)
}

/// Owns hover and selection; everyone else reads them.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
	last_pointer: Option<DVec2>,
	press_origin: Option<DVec2>,
	travel: f64,
	hovered: Option<String>,
	selected: Option<String>,
}

impl Interaction {
	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	pub fn pointer_down(&mut self, at: DVec2, camera: &mut Camera) {
		camera.dragging = true;
		self.last_pointer = Some(at);
		self.press_origin = Some(at);
		self.travel = 0.0;
	}

	pub fn pointer_move(
		&mut self,
		at: DVec2,
		camera: &mut Camera,
		frame: &Frame,
		nodes: &[Node],
		config: &GraphConfig,
	) {
		if !camera.dragging {
			self.hovered = pick(frame, nodes, at, self.selected(), config)
				.map(|idx| nodes[idx].id.clone());
			return;
		}
		let last = self.last_pointer.unwrap_or(at);
		let delta = at - last;
		let sensitivity = config.interaction.rotation_sensitivity;
		camera.pitch += delta.y * sensitivity;
		camera.yaw += delta.x * sensitivity;
		self.travel += delta.length();
		self.last_pointer = Some(at);
	}

	/// Ends a drag. A press/release pair that barely moved is a click and
	/// selects whatever is under the pointer. Returns whether the
	/// selection changed.
	pub fn pointer_up(
		&mut self,
		at: DVec2,
		camera: &mut Camera,
		frame: &Frame,
		nodes: &[Node],
		config: &GraphConfig,
	) -> bool {
		let was_press = camera.dragging && self.press_origin.is_some();
		camera.dragging = false;
		self.last_pointer = None;
		self.press_origin = None;

		if !was_press || self.travel > config.interaction.click_slop {
			return false;
		}
		let picked =
			pick(frame, nodes, at, self.selected(), config).map(|idx| nodes[idx].id.clone());
		self.set_selected(picked)
	}

	pub fn pointer_leave(&mut self, camera: &mut Camera) {
		camera.dragging = false;
		self.last_pointer = None;
		self.press_origin = None;
		self.hovered = None;
	}

	/// Positive `delta_y` scrolls away from the graph.
	pub fn wheel(&mut self, delta_y: f64, camera: &mut Camera, config: &GraphConfig) {
		let step = config.interaction.zoom_step;
		if delta_y > 0.0 {
			camera.zoom_by(-step, &config.camera);
		} else if delta_y < 0.0 {
			camera.zoom_by(step, &config.camera);
		}
	}

	/// Slow orbit while nobody is dragging; called once per simulation step.
	pub fn idle_rotate(&self, camera: &mut Camera, config: &GraphConfig) {
		if camera.dragging {
			return;
		}
		camera.yaw += config.interaction.idle_yaw;
		camera.pitch += config.interaction.idle_pitch;
	}

	pub fn set_selected(&mut self, id: Option<String>) -> bool {
		if self.selected == id {
			return false;
		}
		debug!("selection: {:?} -> {:?}", self.selected, id);
		self.selected = id;
		true
	}

	/// Drop hover/selection ids that `exists` no longer knows. Returns
	/// whether the selection was cleared.
	pub fn retain_known(&mut self, exists: impl Fn(&str) -> bool) -> bool {
		if self.hovered.as_deref().is_some_and(|id| !exists(id)) {
			self.hovered = None;
		}
		if self.selected.as_deref().is_some_and(|id| !exists(id)) {
			return self.set_selected(None);
		}
		false
	}
}

#[cfg(test)]
mod tests {
	use glam::DVec3;

	use super::super::camera::project;
	use super::super::types::NodeKind;
	use super::*;

	fn node(id: &str, x: f64, y: f64, z: f64) -> Node {
		Node {
			id: id.into(),
			label: id.into(),
			kind: NodeKind::Document,
			tags: Vec::new(),
			color: "#fff".into(),
			position: DVec3::new(x, y, z),
			velocity: DVec3::ZERO,
			mass: 1.0,
			payload: None,
		}
	}

	struct Fixture {
		nodes: Vec<Node>,
		frame: Frame,
		camera: Camera,
		config: GraphConfig,
	}

	impl Fixture {
		fn new(nodes: Vec<Node>) -> Self {
			let config = GraphConfig::default();
			let camera = Camera::default();
			let frame = project(&nodes, &[], &camera, DVec2::new(800.0, 600.0), &config.camera);
			Self {
				nodes,
				frame,
				camera,
				config,
			}
		}
	}

	#[test]
	fn horizontal_drag_only_turns_yaw() {
		let mut f = Fixture::new(Vec::new());
		let mut input = Interaction::default();
		input.pointer_down(DVec2::new(100.0, 100.0), &mut f.camera);
		input.pointer_move(DVec2::new(200.0, 100.0), &mut f.camera, &f.frame, &f.nodes, &f.config);
		assert!((f.camera.yaw - 100.0 * f.config.interaction.rotation_sensitivity).abs() < 1e-12);
		assert_eq!(f.camera.pitch, 0.0);
	}

	#[test]
	fn drag_accumulates_from_last_position() {
		let mut f = Fixture::new(Vec::new());
		let mut input = Interaction::default();
		input.pointer_down(DVec2::ZERO, &mut f.camera);
		input.pointer_move(DVec2::new(10.0, 20.0), &mut f.camera, &f.frame, &f.nodes, &f.config);
		input.pointer_move(DVec2::new(30.0, 20.0), &mut f.camera, &f.frame, &f.nodes, &f.config);
		let s = f.config.interaction.rotation_sensitivity;
		assert!((f.camera.yaw - 30.0 * s).abs() < 1e-12);
		assert!((f.camera.pitch - 20.0 * s).abs() < 1e-12);
	}

	#[test]
	fn idle_rotation_pauses_while_dragging() {
		let mut f = Fixture::new(Vec::new());
		let mut input = Interaction::default();
		input.idle_rotate(&mut f.camera, &f.config);
		let yaw = f.camera.yaw;
		assert!(yaw > 0.0 && f.camera.pitch > 0.0 && f.camera.pitch < yaw);

		input.pointer_down(DVec2::ZERO, &mut f.camera);
		input.idle_rotate(&mut f.camera, &f.config);
		assert_eq!(f.camera.yaw, yaw);

		input.pointer_up(DVec2::new(50.0, 0.0), &mut f.camera, &f.frame, &f.nodes, &f.config);
		input.idle_rotate(&mut f.camera, &f.config);
		assert!(f.camera.yaw > yaw);
	}

	#[test]
	fn wheel_zoom_stays_in_range() {
		let mut f = Fixture::new(Vec::new());
		let mut input = Interaction::default();
		for _ in 0..50 {
			input.wheel(-120.0, &mut f.camera, &f.config);
		}
		assert_eq!(f.camera.zoom, 3.0);
		for _ in 0..50 {
			input.wheel(120.0, &mut f.camera, &f.config);
		}
		assert_eq!(f.camera.zoom, 0.5);
		input.wheel(0.0, &mut f.camera, &f.config);
		assert_eq!(f.camera.zoom, 0.5);
	}

	#[test]
	fn pick_finds_nearest_within_radius() {
		let f = Fixture::new(vec![node("left", -100.0, 0.0, 0.0), node("right", 100.0, 0.0, 0.0)]);
		// x = ±100 at scale 0.5 lands at 350 and 450
		assert_eq!(pick(&f.frame, &f.nodes, DVec2::new(352.0, 301.0), None, &f.config), Some(0));
		assert_eq!(pick(&f.frame, &f.nodes, DVec2::new(445.0, 296.0), None, &f.config), Some(1));
		assert_eq!(pick(&f.frame, &f.nodes, DVec2::new(400.0, 300.0), None, &f.config), None);
	}

	#[test]
	fn pick_prefers_nearer_node_on_tie() {
		let f = Fixture::new(vec![node("back", 0.0, 0.0, 100.0), node("front", 0.0, 0.0, -100.0)]);
		assert_eq!(pick(&f.frame, &f.nodes, DVec2::new(400.0, 300.0), None, &f.config), Some(1));
	}

	#[test]
	fn selected_node_hit_area_matches_drawn_size() {
		let mut heavy = node("heavy", 0.0, 0.0, 0.0);
		heavy.mass = 10.0;
		let f = Fixture::new(vec![heavy]);
		// radius 30 px plain, 45 px once selected
		let edge_of_halo = DVec2::new(440.0, 300.0);
		assert_eq!(pick(&f.frame, &f.nodes, edge_of_halo, None, &f.config), None);
		assert_eq!(pick(&f.frame, &f.nodes, edge_of_halo, Some("heavy"), &f.config), Some(0));

		let mut input = Interaction::default();
		let mut camera = f.camera.clone();
		input.set_selected(Some("heavy".into()));
		input.pointer_move(edge_of_halo, &mut camera, &f.frame, &f.nodes, &f.config);
		assert_eq!(input.hovered(), Some("heavy"));
	}

	#[test]
	fn hover_tracks_pointer_when_idle() {
		let mut f = Fixture::new(vec![node("solo", 0.0, 0.0, 0.0)]);
		let mut input = Interaction::default();
		input.pointer_move(DVec2::new(403.0, 300.0), &mut f.camera, &f.frame, &f.nodes, &f.config);
		assert_eq!(input.hovered(), Some("solo"));
		input.pointer_move(DVec2::new(10.0, 10.0), &mut f.camera, &f.frame, &f.nodes, &f.config);
		assert_eq!(input.hovered(), None);
	}

	#[test]
	fn click_selects_and_clears() {
		let mut f = Fixture::new(vec![node("solo", 0.0, 0.0, 0.0)]);
		let mut input = Interaction::default();
		let center = DVec2::new(400.0, 300.0);

		input.pointer_down(center, &mut f.camera);
		assert!(input.pointer_up(center, &mut f.camera, &f.frame, &f.nodes, &f.config));
		assert_eq!(input.selected(), Some("solo"));

		let away = DVec2::new(20.0, 20.0);
		input.pointer_down(away, &mut f.camera);
		assert!(input.pointer_up(away, &mut f.camera, &f.frame, &f.nodes, &f.config));
		assert_eq!(input.selected(), None);
	}

	#[test]
	fn drag_release_does_not_select() {
		let mut f = Fixture::new(vec![node("solo", 0.0, 0.0, 0.0)]);
		let mut input = Interaction::default();
		input.pointer_down(DVec2::new(300.0, 300.0), &mut f.camera);
		input.pointer_move(DVec2::new(400.0, 300.0), &mut f.camera, &f.frame, &f.nodes, &f.config);
		assert!(!input.pointer_up(DVec2::new(400.0, 300.0), &mut f.camera, &f.frame, &f.nodes, &f.config));
		assert_eq!(input.selected(), None);
		assert!(!f.camera.dragging);
	}

	#[test]
	fn leave_ends_drag_and_hover() {
		let mut f = Fixture::new(vec![node("solo", 0.0, 0.0, 0.0)]);
		let mut input = Interaction::default();
		input.pointer_move(DVec2::new(400.0, 300.0), &mut f.camera, &f.frame, &f.nodes, &f.config);
		input.pointer_down(DVec2::new(400.0, 300.0), &mut f.camera);
		input.pointer_leave(&mut f.camera);
		assert!(!f.camera.dragging);
		assert_eq!(input.hovered(), None);
	}

	#[test]
	fn unknown_ids_are_dropped() {
		let mut input = Interaction::default();
		input.set_selected(Some("gone".into()));
		assert!(!input.retain_known(|id| id == "gone"));
		assert_eq!(input.selected(), Some("gone"));
		assert!(input.retain_known(|_| false));
		assert_eq!(input.selected(), None);
	}
}
