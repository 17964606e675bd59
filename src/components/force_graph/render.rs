use glam::DVec2;

use super::camera::Frame;
use super::config::RenderConfig;
use super::surface::{DrawSurface, Fill, Stroke, TextStyle};
use super::types::Node;

/// Nodes that get emphasis this frame, as model indices.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Highlight {
	pub selected: Option<usize>,
	pub hovered: Option<usize>,
}

impl Highlight {
	fn is_selected(&self, idx: usize) -> bool {
		self.selected == Some(idx)
	}

	fn is_hovered(&self, idx: usize) -> bool {
		self.hovered == Some(idx)
	}
}

/// Drawn radius of a projected node.
pub fn node_radius(mass: f64, scale: f64, selected: bool, config: &RenderConfig) -> f64 {
	let r = config.base_radius * mass * scale;
	if selected { r * config.selected_scale } else { r }
}

pub fn render<S: DrawSurface + ?Sized>(
	nodes: &[Node],
	frame: &Frame,
	highlight: Highlight,
	config: &RenderConfig,
	surface: &mut S,
) {
	draw_edges(frame, highlight, config, surface);
	draw_nodes(nodes, frame, highlight, config, surface);
}

fn draw_edges<S: DrawSurface + ?Sized>(
	frame: &Frame,
	highlight: Highlight,
	config: &RenderConfig,
	surface: &mut S,
) {
	for edge in &frame.edges {
		let boosted = highlight.is_selected(edge.a) || highlight.is_selected(edge.b);
		let (alpha, width) = if boosted {
			(
				(edge.opacity + config.highlight_opacity_boost).min(1.0),
				config.highlight_edge_width,
			)
		} else {
			(edge.opacity * 0.6, config.edge_width)
		};
		let stroke = Stroke {
			color: format!("rgba(100, 180, 255, {:.3})", alpha),
			width,
		};
		surface.draw_line(edge.from, edge.to, &stroke);
	}
}

fn draw_nodes<S: DrawSurface + ?Sized>(
	nodes: &[Node],
	frame: &Frame,
	highlight: Highlight,
	config: &RenderConfig,
	surface: &mut S,
) {
	for p in &frame.nodes {
		let Some(node) = nodes.get(p.index) else {
			continue;
		};
		let selected = highlight.is_selected(p.index);
		let radius = node_radius(node.mass, p.scale, selected, config);
		let alpha = if selected { 1.0 } else { p.opacity };
		let glow = if selected {
			config.glow * 2.0
		} else {
			config.glow * p.scale
		};

		surface.draw_circle(
			p.screen,
			radius,
			&Fill {
				color: node.color.clone(),
				alpha,
				glow,
			},
		);

		if selected || highlight.is_hovered(p.index) || p.opacity > config.label_threshold {
			let size = (config.font_size * p.scale * 2.0).max(8.0);
			surface.draw_text(
				p.screen + DVec2::new(0.0, radius + size),
				&node.label,
				&TextStyle {
					color: format!("rgba(255, 255, 255, {:.3})", alpha),
					size,
				},
			);
		}
	}
}
