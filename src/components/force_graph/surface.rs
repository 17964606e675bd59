use glam::DVec2;
use web_sys::CanvasRenderingContext2d;

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
	/// CSS color, alpha included.
	pub color: String,
	pub width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
	pub color: String,
	pub alpha: f64,
	/// Blur radius of the halo drawn in the fill color; 0 disables it.
	pub glow: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
	pub color: String,
	pub size: f64,
}

/// The immediate-mode target the render pass draws onto.
pub trait DrawSurface {
	fn draw_line(&mut self, from: DVec2, to: DVec2, stroke: &Stroke);
	fn draw_circle(&mut self, center: DVec2, radius: f64, fill: &Fill);
	fn draw_text(&mut self, at: DVec2, text: &str, style: &TextStyle);
}

pub struct CanvasSurface<'a> {
	ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
	pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
		Self { ctx }
	}

	/// Paint the background. Not part of the draw trait; the host owns it.
	pub fn clear(&self, width: f64, height: f64) {
		self.ctx.set_fill_style_str("#0f1021");
		self.ctx.fill_rect(0.0, 0.0, width, height);
	}
}

impl DrawSurface for CanvasSurface<'_> {
	fn draw_line(&mut self, from: DVec2, to: DVec2, stroke: &Stroke) {
		let ctx = self.ctx;
		ctx.set_stroke_style_str(&stroke.color);
		ctx.set_line_width(stroke.width);
		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();
	}

	fn draw_circle(&mut self, center: DVec2, radius: f64, fill: &Fill) {
		let ctx = self.ctx;
		ctx.save();
		ctx.set_global_alpha(fill.alpha);
		if fill.glow > 0.0 {
			ctx.set_shadow_color(&fill.color);
			ctx.set_shadow_blur(fill.glow);
		}
		ctx.begin_path();
		let _ = ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU);
		ctx.set_fill_style_str(&fill.color);
		ctx.fill();
		ctx.restore();
	}

	fn draw_text(&mut self, at: DVec2, text: &str, style: &TextStyle) {
		let ctx = self.ctx;
		ctx.set_fill_style_str(&style.color);
		ctx.set_font(&format!("{}px sans-serif", style.size));
		ctx.set_text_align("center");
		let _ = ctx.fill_text(text, at.x, at.y);
	}
}

#[cfg(test)]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
	Line { from: DVec2, to: DVec2, stroke: Stroke },
	Circle { center: DVec2, radius: f64, fill: Fill },
	Text { at: DVec2, text: String, style: TextStyle },
}

/// Headless surface that keeps every call for inspection.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
	pub calls: Vec<DrawCall>,
}

#[cfg(test)]
impl DrawSurface for RecordingSurface {
	fn draw_line(&mut self, from: DVec2, to: DVec2, stroke: &Stroke) {
		self.calls.push(DrawCall::Line {
			from,
			to,
			stroke: stroke.clone(),
		});
	}

	fn draw_circle(&mut self, center: DVec2, radius: f64, fill: &Fill) {
		self.calls.push(DrawCall::Circle {
			center,
			radius,
			fill: fill.clone(),
		});
	}

	fn draw_text(&mut self, at: DVec2, text: &str, style: &TextStyle) {
		self.calls.push(DrawCall::Text {
			at,
			text: text.to_string(),
			style: style.clone(),
		});
	}
}
