//! Catalog graph: a 3D force-directed view of tagged catalog records,
//! rendered onto a 2D canvas as a Leptos client-side app.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod components;
mod pages;

use crate::pages::doc::DocPage;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Install the console logger and panic hook. Call once, before mounting.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Root component: the graph at `/`, catalog detail pages under `/docs`.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Catalog Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/docs/:slug") view=DocPage />
			</Routes>
		</Router>
	}
}
