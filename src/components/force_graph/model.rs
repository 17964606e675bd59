//! Catalog records to a node/edge snapshot.

use std::collections::{HashMap, HashSet};

use glam::DVec3;
use log::warn;
use rand::Rng;
use thiserror::Error;

use super::config::ModelConfig;
use super::types::{CatalogRecord, Edge, Node, NodeKind, NodePayload, PinnedLink};

/// Why a single catalog record was left out of the model.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RecordError {
	#[error("record has no id")]
	MissingId,
	#[error("duplicate id `{0}`")]
	DuplicateId(String),
	#[error("record `{0}` has no tag list")]
	MissingTags(String),
	#[error("record `{id}` has unknown type `{kind}`")]
	UnknownKind { id: String, kind: String },
}

#[derive(Debug, Default)]
pub struct BuildReport {
	/// `(record index, reason)` for every rejected record.
	pub dropped: Vec<(usize, RecordError)>,
	/// Pinned links naming an id that is not in the model.
	pub dropped_links: usize,
}

#[derive(Debug, Default)]
pub struct GraphModel {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
	ids: HashMap<String, usize>,
}

impl GraphModel {
	/// Build a fresh snapshot. Positions are drawn from `rng`; velocities
	/// start at zero.
	pub fn build<R: Rng>(
		records: &[CatalogRecord],
		pinned: &[PinnedLink],
		config: &ModelConfig,
		rng: &mut R,
	) -> (Self, BuildReport) {
		let mut model = Self::default();
		let mut report = BuildReport::default();
		let extent = config.initial_extent.abs();

		for (i, record) in records.iter().enumerate() {
			match model.node_from_record(record, config) {
				Ok(mut node) => {
					node.position = DVec3::new(
						rng.gen_range(-extent..=extent),
						rng.gen_range(-extent..=extent),
						rng.gen_range(-extent..=extent),
					);
					model.ids.insert(node.id.clone(), model.nodes.len());
					model.nodes.push(node);
				}
				Err(err) => {
					warn!("dropping catalog record {}: {}", i, err);
					report.dropped.push((i, err));
				}
			}
		}

		let mut linked = HashSet::new();
		for a in 0..model.nodes.len() {
			for b in (a + 1)..model.nodes.len() {
				let overlap = tags_overlap(&model.nodes[a].tags, &model.nodes[b].tags);
				if overlap > 0 {
					model.link(a, b, overlap as f64 * config.strength_scale, config);
					linked.insert((a, b));
				}
			}
		}

		for link in pinned {
			let (Some(a), Some(b)) = (model.index_of(link.source), model.index_of(link.target))
			else {
				report.dropped_links += 1;
				continue;
			};
			if a == b {
				report.dropped_links += 1;
				continue;
			}
			let key = (a.min(b), a.max(b));
			if linked.insert(key) {
				model.link(key.0, key.1, config.pinned_strength, config);
			}
		}

		(model, report)
	}

	fn node_from_record(
		&self,
		record: &CatalogRecord,
		config: &ModelConfig,
	) -> Result<Node, RecordError> {
		let id = record
			.id
			.as_deref()
			.map(str::trim)
			.filter(|id| !id.is_empty())
			.ok_or(RecordError::MissingId)?
			.to_string();
		if self.ids.contains_key(&id) {
			return Err(RecordError::DuplicateId(id));
		}
		let Some(raw_tags) = &record.tags else {
			return Err(RecordError::MissingTags(id));
		};
		let kind = match record.kind.as_deref() {
			None => NodeKind::Entity,
			Some(raw) => NodeKind::parse(raw).ok_or_else(|| RecordError::UnknownKind {
				id: id.clone(),
				kind: raw.to_string(),
			})?,
		};

		let tags = raw_tags
			.iter()
			.map(|t| t.trim().to_lowercase())
			.filter(|t| !t.is_empty())
			.collect();
		let label = record
			.label
			.clone()
			.filter(|l| !l.trim().is_empty())
			.unwrap_or_else(|| id.clone());
		let color = record
			.color
			.clone()
			.unwrap_or_else(|| kind.default_color().to_string());
		let payload = (record.description.is_some() || record.route.is_some()).then(|| NodePayload {
			description: record.description.clone(),
			route: record.route.clone(),
		});

		Ok(Node {
			id,
			label,
			kind,
			tags,
			color,
			position: DVec3::ZERO,
			velocity: DVec3::ZERO,
			mass: config.base_mass,
			payload,
		})
	}

	fn link(&mut self, a: usize, b: usize, strength: f64, config: &ModelConfig) {
		self.edges.push(Edge { a, b, strength });
		self.nodes[a].mass += config.mass_increment;
		self.nodes[b].mass += config.mass_increment;
	}

	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.ids.get(id).copied()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.ids.contains_key(id)
	}
}

fn tags_match(a: &str, b: &str) -> bool {
	a == b || a.contains(b) || b.contains(a)
}

/// Loose tag overlap between two nodes: equal, or one contains the other.
///
/// Counted from whichever side has more matching tags, so the result does
/// not depend on argument order.
pub fn tags_overlap(a: &[String], b: &[String]) -> usize {
	let matched = |from: &[String], to: &[String]| {
		from.iter()
			.filter(|f| to.iter().any(|t| tags_match(f, t)))
			.count()
	};
	matched(a, b).max(matched(b, a))
}
