use zettel_client::NoteService;
use zettel_domain::{RelationshipType, label_for};

use crate::Result;

/// Relationship-type catalog, fetched at most once per owner.
///
/// There is no invalidation; the catalog is reference data.
#[derive(Clone, Debug, Default)]
pub struct RelationshipCatalog {
	types: Option<Vec<RelationshipType>>,
}
impl RelationshipCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_loaded(&self) -> bool {
		self.types.is_some()
	}

	pub fn types(&self) -> &[RelationshipType] {
		self.types.as_deref().unwrap_or_default()
	}

	/// Fetches the catalog unless it is already populated. A failed fetch leaves it unloaded.
	pub async fn ensure_loaded(&mut self, service: &dyn NoteService) -> Result<&[RelationshipType]> {
		if self.types.is_none() {
			let types = service.relationship_types().await.inspect_err(|err| {
				tracing::error!(error = %err, "Failed to fetch relationship types.");
			})?;

			tracing::debug!(count = types.len(), "Loaded relationship types.");

			self.types = Some(types);
		}

		Ok(self.types())
	}

	pub fn get(&self, id: &str) -> Option<&RelationshipType> {
		self.types().iter().find(|rt| rt.id == id)
	}

	/// Resolves either an id or a label (case-insensitive).
	pub fn resolve(&self, key: &str) -> Option<&RelationshipType> {
		let key = key.trim();

		self.get(key).or_else(|| self.types().iter().find(|rt| rt.label.eq_ignore_ascii_case(key)))
	}

	pub fn label(&self, id: &str) -> &str {
		label_for(id, self.types())
	}
}
