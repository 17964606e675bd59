use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use super::home::load_catalog;

/// Landing page for a catalog record's route, reached from the detail panel.
#[component]
pub fn DocPage() -> impl IntoView {
	let params = use_params_map();
	let catalog = load_catalog();

	let entry = move || {
		let route = format!("/docs/{}", params.read().get("slug").unwrap_or_default());
		catalog
			.iter()
			.find(|r| r.route.as_deref() == Some(route.as_str()))
			.map(|r| {
				(
					r.label.clone().or_else(|| r.id.clone()).unwrap_or_default(),
					r.description.clone().unwrap_or_default(),
				)
			})
	};

	view! {
		<div class="doc-page">
			{move || match entry() {
				Some((label, description)) => {
					view! {
						<h1>{label}</h1>
						<p>{description}</p>
					}
						.into_any()
				}
				None => view! { <h1>"Unknown entry"</h1> }.into_any(),
			}}
			<A href="/">"Back to the graph"</A>
		</div>
	}
}
