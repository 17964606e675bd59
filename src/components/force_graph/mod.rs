mod camera;
mod component;
mod config;
mod interaction;
mod model;
mod render;
mod simulation;
mod state;
mod surface;
mod types;

pub use component::ForceGraphCanvas;
pub use types::{CatalogRecord, PinnedLink, SelectedNode};
