use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, WheelEvent, Window,
};

use super::config::GraphConfig;
use super::state::ForceGraphState;
use super::surface::CanvasSurface;
use super::types::{CatalogRecord, PinnedLink, SelectedNode};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn entropy_seed() -> u64 {
	let now = js_sys::Date::now() as u64;
	let noise = (js_sys::Math::random() * u64::MAX as f64) as u64;
	now ^ noise.rotate_left(17)
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Size the canvas should have right now: the window when fullscreen,
/// otherwise the fixed props, falling back to the parent's box.
fn measure(
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		return web_sys::window()
			.as_ref()
			.and_then(window_size)
			.unwrap_or((800.0, 600.0));
	}
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| parent.as_ref().map_or(800.0, |p| p.client_width() as f64)),
		height.unwrap_or_else(|| parent.as_ref().map_or(600.0, |p| p.client_height() as f64)),
	)
}

fn canvas_point(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	client_x: f64,
	client_y: f64,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((client_x - rect.left(), client_y - rect.top()))
}

fn set_cursor(canvas_ref: NodeRef<leptos::html::Canvas>, s: &ForceGraphState) {
	let Some(canvas) = canvas_ref.get() else {
		return;
	};
	let canvas: HtmlCanvasElement = canvas.into();
	let cursor = if s.camera.dragging {
		"grabbing"
	} else if s.input.hovered().is_some() {
		"pointer"
	} else {
		"grab"
	};
	// leptos' ElementExt::style shadows the DOM getter
	let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
}

/// Interactive 3D force-directed view over a catalog feed.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<Vec<CatalogRecord>>,
	/// Hard-coded links injected regardless of tag overlap.
	#[prop(default = &[])]
	pinned: &'static [PinnedLink],
	#[prop(optional)] config: GraphConfig,
	/// Called with the new selection whenever it changes.
	#[prop(optional, into)]
	on_select: Option<Callback<Option<SelectedNode>>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = Rc::new(RefCell::new(ForceGraphState::new(
		config,
		pinned,
		width.unwrap_or(800.0),
		height.unwrap_or(600.0),
	)));
	let rng = Rc::new(RefCell::new(SmallRng::seed_from_u64(entropy_seed())));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let stopped = Rc::new(Cell::new(false));
	let pending_frame = Rc::new(Cell::new(None::<i32>));

	// The frame closure holds a handle to its own slot; emptying the slot
	// here breaks that cycle and frees the state and the 2d context.
	let teardown = SendWrapper::new((animate.clone(), stopped.clone(), pending_frame.clone()));
	on_cleanup(move || {
		let (animate, stopped, pending_frame) = teardown.take();
		stopped.set(true);
		if let (Some(win), Some(id)) = (web_sys::window(), pending_frame.take()) {
			let _ = win.cancel_animation_frame(id);
		}
		animate.borrow_mut().take();
		debug!("force graph torn down");
	});

	let notify = move |selected: Option<SelectedNode>| {
		if let Some(cb) = on_select {
			cb.run(selected);
		}
	};

	// Full rebuild whenever the catalog changes.
	let state_data = state.clone();
	Effect::new(move |_| {
		let records = data.get();
		let (_, cleared) = state_data
			.borrow_mut()
			.rebuild(&records, &mut *rng.borrow_mut());
		if cleared {
			notify(None);
		}
	});

	let (state_init, animate_init) = (state.clone(), animate.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = measure(&canvas, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		state_init.borrow_mut().fit(w, h);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("2d canvas context unavailable");
			return;
		};

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		let (stopped_anim, pending_anim) = (stopped.clone(), pending_frame.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move |now: f64| {
			pending_anim.set(None);
			if stopped_anim.get() || !canvas.is_connected() {
				return;
			}
			{
				let mut s = state_anim.borrow_mut();
				let (w, h) = measure(&canvas, fullscreen, width, height);
				if s.fit(w, h) {
					canvas.set_width(w as u32);
					canvas.set_height(h as u32);
				}
				s.tick(now);
				let mut surface = CanvasSurface::new(&ctx);
				surface.clear(s.width, s.height);
				s.render(&mut surface);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				pending_anim.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			pending_frame.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, ev.client_x() as f64, ev.client_y() as f64)
		else {
			return;
		};
		let mut s = state_md.borrow_mut();
		s.pointer_down(x, y);
		set_cursor(canvas_ref, &s);
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, ev.client_x() as f64, ev.client_y() as f64)
		else {
			return;
		};
		let mut s = state_mm.borrow_mut();
		s.pointer_move(x, y);
		set_cursor(canvas_ref, &s);
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, ev.client_x() as f64, ev.client_y() as f64)
		else {
			return;
		};
		let selected = {
			let mut s = state_mu.borrow_mut();
			let changed = s.pointer_up(x, y);
			set_cursor(canvas_ref, &s);
			changed.then(|| s.selected_node())
		};
		if let Some(selected) = selected {
			notify(selected);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let mut s = state_ml.borrow_mut();
		s.pointer_leave();
		set_cursor(canvas_ref, &s);
	};

	let state_dc = state.clone();
	let on_dblclick = move |_: MouseEvent| {
		state_dc.borrow_mut().reset_camera();
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		state_wh.borrow_mut().wheel(ev.delta_y());
	};

	let state_ts = state.clone();
	let on_touchstart = move |ev: TouchEvent| {
		// no synthesized mouse events after a tap
		ev.prevent_default();
		let Some(touch) = ev.touches().get(0) else {
			return;
		};
		if let Some((x, y)) =
			canvas_point(canvas_ref, touch.client_x() as f64, touch.client_y() as f64)
		{
			state_ts.borrow_mut().pointer_down(x, y);
		}
	};

	let state_tm = state.clone();
	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		let Some(touch) = ev.touches().get(0) else {
			return;
		};
		if let Some((x, y)) =
			canvas_point(canvas_ref, touch.client_x() as f64, touch.client_y() as f64)
		{
			state_tm.borrow_mut().pointer_move(x, y);
		}
	};

	let state_te = state.clone();
	let on_touchend = move |ev: TouchEvent| {
		ev.prevent_default();
		let Some(touch) = ev.changed_touches().get(0) else {
			return;
		};
		let Some((x, y)) =
			canvas_point(canvas_ref, touch.client_x() as f64, touch.client_y() as f64)
		else {
			return;
		};
		let selected = {
			let mut s = state_te.borrow_mut();
			s.pointer_up(x, y).then(|| s.selected_node())
		};
		if let Some(selected) = selected {
			notify(selected);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			on:touchstart=on_touchstart
			on:touchmove=on_touchmove
			on:touchend=on_touchend
			style="display: block; cursor: grab; touch-action: none;"
		/>
	}
}
