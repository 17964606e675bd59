use leptos::prelude::*;
use leptos_router::components::A;
use log::error;

use crate::components::force_graph::{CatalogRecord, ForceGraphCanvas, PinnedLink, SelectedNode};

const CATALOG_JSON: &str = include_str!("../../assets/catalog.json");

/// Known relations the tags don't express.
const PINNED_LINKS: &[PinnedLink] = &[
	PinnedLink {
		source: "graph-engine",
		target: "catalog",
	},
	PinnedLink {
		source: "wasm",
		target: "canvas",
	},
	PinnedLink {
		source: "camera-guide",
		target: "fog",
	},
];

/// Parse the bundled catalog. A broken file yields an empty graph.
pub fn load_catalog() -> Vec<CatalogRecord> {
	serde_json::from_str(CATALOG_JSON).unwrap_or_else(|err| {
		error!("catalog feed unreadable: {}", err);
		Vec::new()
	})
}

/// Description and navigation for the selected node.
#[component]
fn DetailPanel(selected: ReadSignal<Option<SelectedNode>>) -> impl IntoView {
	move || {
		selected.get().map(|node| {
			let (description, route) = node
				.payload
				.map(|p| (p.description, p.route))
				.unwrap_or_default();
			view! {
				<aside class="detail-panel">
					<h2>{node.label}</h2>
					<p class="kind">{node.kind.as_str()}</p>
					<div class="tags">
						{node.tags.into_iter().map(|t| view! { <span>{t}</span> }).collect_view()}
					</div>
					{description.map(|d| view! { <p>{d}</p> })}
					{route.map(|r| view! { <A href=r>"Open"</A> })}
				</aside>
			}
		})
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let catalog = load_catalog();
	let graph_data = Signal::derive(move || catalog.clone());
	let (selected, set_selected) = signal(None::<SelectedNode>);
	let on_select = Callback::new(move |node: Option<SelectedNode>| set_selected.set(node));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<ForceGraphCanvas
					data=graph_data
					pinned=PINNED_LINKS
					on_select=on_select
					fullscreen=true
				/>
				<div class="graph-overlay">
					<h1>"Catalog Graph"</h1>
					<p class="subtitle">
						"Drag to rotate. Scroll to zoom. Click a node for details. Double-click to reset."
					</p>
				</div>
				<DetailPanel selected=selected />
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bundled_catalog_parses() {
		let records = load_catalog();
		assert!(records.len() > 10);
		assert!(records.iter().any(|r| r.id.is_none()));
	}

	#[test]
	fn pinned_links_name_catalog_ids() {
		let records = load_catalog();
		for link in PINNED_LINKS {
			for id in [link.source, link.target] {
				assert!(records.iter().any(|r| r.id.as_deref() == Some(id)), "{id}");
			}
		}
	}
}
