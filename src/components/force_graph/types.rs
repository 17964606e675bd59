use glam::DVec3;
use serde::Deserialize;

/// One record of the external catalog feed.
///
/// Fields are optional on the wire so a malformed record can be rejected
/// on its own instead of failing the whole feed.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CatalogRecord {
	#[serde(default)]
	pub id: Option<String>,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
	#[serde(default)]
	pub tags: Option<Vec<String>>,
	#[serde(default)]
	pub color: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub route: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Entity,
	Document,
	Topic,
	Component,
	LinkLayer,
}

impl NodeKind {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"entity" => Some(Self::Entity),
			"document" => Some(Self::Document),
			"topic" => Some(Self::Topic),
			"component" => Some(Self::Component),
			"link-layer" | "link_layer" | "linklayer" => Some(Self::LinkLayer),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Entity => "entity",
			Self::Document => "document",
			Self::Topic => "topic",
			Self::Component => "component",
			Self::LinkLayer => "link-layer",
		}
	}

	/// Fallback fill when a record carries no color of its own.
	pub fn default_color(self) -> &'static str {
		match self {
			Self::Entity => "#4a90d9",
			Self::Document => "#5cb85c",
			Self::Topic => "#f0ad4e",
			Self::Component => "#9467bd",
			Self::LinkLayer => "#17becf",
		}
	}
}

/// Free-form data for the detail panel. The simulation never reads it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodePayload {
	pub description: Option<String>,
	pub route: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Node {
	pub id: String,
	pub label: String,
	pub kind: NodeKind,
	pub tags: Vec<String>,
	pub color: String,
	pub position: DVec3,
	pub velocity: DVec3,
	/// Grows with every attached edge; drives drawn radius only.
	pub mass: f64,
	pub payload: Option<NodePayload>,
}

/// Undirected link between two nodes of the same model snapshot,
/// stored as indices into the snapshot's node list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
	pub a: usize,
	pub b: usize,
	pub strength: f64,
}

/// A hard-coded link between two named catalog ids, added regardless of
/// tag overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinnedLink {
	pub source: &'static str,
	pub target: &'static str,
}

/// What the host sees of the current selection.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedNode {
	pub id: String,
	pub label: String,
	pub kind: NodeKind,
	pub tags: Vec<String>,
	pub payload: Option<NodePayload>,
}

impl From<&Node> for SelectedNode {
	fn from(node: &Node) -> Self {
		Self {
			id: node.id.clone(),
			label: node.label.clone(),
			kind: node.kind,
			tags: node.tags.clone(),
			payload: node.payload.clone(),
		}
	}
}
