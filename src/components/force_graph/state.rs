use glam::DVec2;
use log::info;
use rand::Rng;

use super::camera::{Camera, Frame, project};
use super::config::GraphConfig;
use super::interaction::Interaction;
use super::model::{BuildReport, GraphModel};
use super::render::{self, Highlight};
use super::simulation::{self, FrameClock};
use super::surface::DrawSurface;
use super::types::{CatalogRecord, PinnedLink, SelectedNode};

/// Everything the frame loop and the input handlers share.
pub struct ForceGraphState {
	pub model: GraphModel,
	pub camera: Camera,
	pub input: Interaction,
	pub config: GraphConfig,
	pub width: f64,
	pub height: f64,
	pinned: &'static [PinnedLink],
	clock: FrameClock,
	frame: Frame,
}

impl ForceGraphState {
	pub fn new(config: GraphConfig, pinned: &'static [PinnedLink], width: f64, height: f64) -> Self {
		Self {
			model: GraphModel::default(),
			camera: Camera::default(),
			input: Interaction::default(),
			config,
			width,
			height,
			pinned,
			clock: FrameClock::new(),
			frame: Frame::default(),
		}
	}

	/// Replace the whole model. Camera state survives; hover and selection
	/// survive only if their ids are still present. The returned flag is
	/// set when the selection had to be cleared.
	pub fn rebuild<R: Rng>(
		&mut self,
		records: &[CatalogRecord],
		rng: &mut R,
	) -> (BuildReport, bool) {
		let (model, report) = GraphModel::build(records, self.pinned, &self.config.model, rng);
		info!(
			"graph rebuilt: {} nodes, {} edges ({} records, {} pinned links dropped)",
			model.nodes.len(),
			model.edges.len(),
			report.dropped.len(),
			report.dropped_links
		);
		self.model = model;
		let cleared = self.input.retain_known(|id| self.model.contains(id));
		self.project();
		(report, cleared)
	}

	/// One unit simulation step plus one idle-rotation increment.
	pub fn step(&mut self) {
		simulation::step(&mut self.model.nodes, &self.model.edges, &self.config.physics);
		self.input.idle_rotate(&mut self.camera, &self.config);
	}

	/// Advance by however many fixed steps `now_ms` calls for, then
	/// re-project.
	pub fn tick(&mut self, now_ms: f64) -> u32 {
		let steps = self.clock.advance(now_ms);
		for _ in 0..steps {
			self.step();
		}
		self.project();
		steps
	}

	pub fn project(&mut self) {
		self.frame = project(
			&self.model.nodes,
			&self.model.edges,
			&self.camera,
			DVec2::new(self.width, self.height),
			&self.config.camera,
		);
	}

	pub fn frame(&self) -> &Frame {
		&self.frame
	}

	pub fn highlight(&self) -> Highlight {
		Highlight {
			selected: self.input.selected().and_then(|id| self.model.index_of(id)),
			hovered: self.input.hovered().and_then(|id| self.model.index_of(id)),
		}
	}

	pub fn selected_node(&self) -> Option<SelectedNode> {
		let idx = self.model.index_of(self.input.selected()?)?;
		Some(SelectedNode::from(&self.model.nodes[idx]))
	}

	pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
		if self.frame.is_empty() {
			return;
		}
		render::render(
			&self.model.nodes,
			&self.frame,
			self.highlight(),
			&self.config.render,
			surface,
		);
	}

	/// Adopt a new viewport size. Returns whether it differed from the
	/// current one.
	pub fn fit(&mut self, width: f64, height: f64) -> bool {
		if self.width == width && self.height == height {
			return false;
		}
		self.width = width;
		self.height = height;
		true
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		self.input.pointer_down(DVec2::new(x, y), &mut self.camera);
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		self.input.pointer_move(
			DVec2::new(x, y),
			&mut self.camera,
			&self.frame,
			&self.model.nodes,
			&self.config,
		);
	}

	/// Returns whether the selection changed.
	pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
		self.input.pointer_up(
			DVec2::new(x, y),
			&mut self.camera,
			&self.frame,
			&self.model.nodes,
			&self.config,
		)
	}

	pub fn pointer_leave(&mut self) {
		self.input.pointer_leave(&mut self.camera);
	}

	pub fn wheel(&mut self, delta_y: f64) {
		self.input.wheel(delta_y, &mut self.camera, &self.config);
	}

	pub fn reset_camera(&mut self) {
		self.camera.reset();
		info!("camera reset");
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::surface::RecordingSurface;
	use super::*;

	fn record(id: &str, tags: &[&str]) -> CatalogRecord {
		CatalogRecord {
			id: Some(id.into()),
			label: Some(id.into()),
			kind: Some("topic".into()),
			tags: Some(tags.iter().map(|t| t.to_string()).collect()),
			description: Some(format!("about {id}")),
			..Default::default()
		}
	}

	fn state() -> ForceGraphState {
		ForceGraphState::new(GraphConfig::default(), &[], 800.0, 600.0)
	}

	#[test]
	fn empty_catalog_renders_nothing() {
		let mut s = state();
		let mut rng = SmallRng::seed_from_u64(1);
		let (report, cleared) = s.rebuild(&[], &mut rng);
		assert!(report.dropped.is_empty() && !cleared);
		s.tick(0.0);
		s.tick(16.0);
		let mut surface = RecordingSurface::default();
		s.render(&mut surface);
		assert!(s.frame().is_empty());
		assert!(surface.calls.is_empty());
	}

	#[test]
	fn same_seed_same_initial_layout() {
		let records = [record("a", &["x"]), record("b", &["x"]), record("c", &["y"])];
		let mut first = state();
		let mut second = state();
		first.rebuild(&records, &mut SmallRng::seed_from_u64(42));
		second.rebuild(&records, &mut SmallRng::seed_from_u64(42));
		for (a, b) in first.model.nodes.iter().zip(&second.model.nodes) {
			assert_eq!(a.position, b.position);
		}
	}

	#[test]
	fn layout_stays_finite_over_many_frames() {
		let records: Vec<_> = (0..12)
			.map(|i| record(&format!("n{i}"), &[if i % 2 == 0 { "even" } else { "odd" }]))
			.collect();
		let mut s = state();
		s.rebuild(&records, &mut SmallRng::seed_from_u64(3));
		for f in 0..600 {
			s.tick(f as f64 * 16.7);
		}
		for n in &s.model.nodes {
			assert!(n.position.is_finite() && n.velocity.is_finite());
			assert!(n.mass > 0.0);
		}
		assert_eq!(s.frame().nodes.len(), 12);
	}

	#[test]
	fn rebuild_keeps_camera_and_live_selection() {
		let mut s = state();
		let mut rng = SmallRng::seed_from_u64(9);
		s.rebuild(&[record("a", &["x"]), record("b", &["x"])], &mut rng);
		s.camera.zoom = 2.0;
		s.input.set_selected(Some("a".into()));

		let (_, cleared) = s.rebuild(&[record("a", &["x"]), record("c", &["z"])], &mut rng);
		assert!(!cleared);
		assert_eq!(s.camera.zoom, 2.0);
		assert_eq!(s.selected_node().map(|n| n.id), Some("a".to_string()));

		let (_, cleared) = s.rebuild(&[record("c", &["z"])], &mut rng);
		assert!(cleared);
		assert_eq!(s.input.selected(), None);
		assert_eq!(s.selected_node(), None);
	}

	#[test]
	fn click_on_projected_node_exposes_payload() {
		let mut s = state();
		s.rebuild(&[record("only", &["x"])], &mut SmallRng::seed_from_u64(5));
		s.model.nodes[0].position = glam::DVec3::ZERO;
		s.project();

		s.pointer_down(400.0, 300.0);
		assert!(s.pointer_up(400.0, 300.0));
		let picked = s.selected_node().unwrap();
		assert_eq!(picked.id, "only");
		assert_eq!(
			picked.payload.and_then(|p| p.description),
			Some("about only".to_string())
		);
		assert_eq!(s.highlight().selected, Some(0));
	}

	#[test]
	fn viewport_change_recenters_next_frame() {
		let mut s = state();
		s.rebuild(&[record("only", &["x"])], &mut SmallRng::seed_from_u64(13));
		s.model.nodes[0].position = glam::DVec3::ZERO;
		s.project();
		assert_eq!(s.frame().nodes[0].screen, glam::DVec2::new(400.0, 300.0));

		assert!(!s.fit(800.0, 600.0));
		assert!(s.fit(1024.0, 300.0));
		s.project();
		assert_eq!(s.frame().nodes[0].screen, glam::DVec2::new(512.0, 150.0));
	}
}
