use zettel_domain::{Note, NoteStatus, RelationshipType, SuggestedLink};

use crate::{
	DebouncedSearch, Error, RelationshipCatalog, Result, SearchOptions, SearchPhase,
	SearchSnapshot, Settings, SharedService, SuggestedLinks, ValidationError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorState {
	/// Search box below the minimum length, or nothing found.
	Idle,
	Searching,
	ResultsShown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
	Added,
	/// The target was already linked; the list is unchanged.
	Duplicate,
}

/// Drafts typed links from a staged note to committed notes.
pub struct LinkEditor {
	service: SharedService,
	catalog: RelationshipCatalog,
	selected_type: Option<String>,
	search: DebouncedSearch,
}
impl LinkEditor {
	pub fn new(service: SharedService, settings: &Settings) -> Self {
		let search = DebouncedSearch::spawn(
			service.clone(),
			SearchOptions {
				status: NoteStatus::Committed,
				debounce: settings.debounce,
				min_chars: settings.min_link_search_chars,
			},
			None,
		);

		Self { service, catalog: RelationshipCatalog::new(), selected_type: None, search }
	}

	/// Loads the catalog on first use and defaults the relationship type to its first entry.
	pub async fn mount(&mut self) -> Result<()> {
		let types = self.catalog.ensure_loaded(self.service.as_ref()).await?;

		if self.selected_type.is_none() {
			self.selected_type = types.first().map(|rt| rt.id.clone());
		}

		Ok(())
	}

	pub fn catalog(&self) -> &RelationshipCatalog {
		&self.catalog
	}

	pub fn selected_relationship_type(&self) -> Option<&RelationshipType> {
		self.selected_type.as_deref().and_then(|id| self.catalog.get(id))
	}

	/// Accepts a relationship type id or label.
	pub fn select_relationship_type(&mut self, key: &str) -> Result<&RelationshipType> {
		let id = self
			.catalog
			.resolve(key)
			.map(|rt| rt.id.clone())
			.ok_or_else(|| ValidationError::UnknownRelationshipType(key.to_string()))?;

		self.selected_type = Some(id);

		self.selected_relationship_type()
			.ok_or_else(|| Error::Validation(ValidationError::NoRelationshipType))
	}

	pub fn set_search_term(&self, term: impl Into<String>) {
		self.search.set_query(term);
	}

	pub fn search_term(&self) -> String {
		self.search.query()
	}

	pub fn clear_search(&self) {
		self.search.clear();
	}

	pub fn state(&self) -> EditorState {
		let snapshot = self.search.snapshot();

		match snapshot.phase {
			SearchPhase::Idle => EditorState::Idle,
			SearchPhase::Debouncing | SearchPhase::Searching => EditorState::Searching,
			SearchPhase::Ready | SearchPhase::Failed if snapshot.results.is_empty() =>
				EditorState::Idle,
			SearchPhase::Ready | SearchPhase::Failed => EditorState::ResultsShown,
		}
	}

	pub fn results(&self) -> Vec<Note> {
		self.search.snapshot().results
	}

	pub async fn settle(&mut self) -> SearchSnapshot {
		self.search.settled().await
	}

	/// Adds a link to `target` with the selected relationship type and clears the search box.
	pub fn add_link(&self, links: &mut SuggestedLinks, target: &Note) -> Result<AddOutcome> {
		let relationship = self.selected_relationship_type().ok_or_else(|| {
			tracing::warn!("Link add blocked; no relationship type selected.");

			ValidationError::NoRelationshipType
		})?;

		if target.status != NoteStatus::Committed {
			return Err(ValidationError::TargetNotCommitted(target.id.clone()).into());
		}

		let link = SuggestedLink {
			target_note_id: target.id.clone(),
			relationship_type_id: relationship.id.clone(),
			target_note_title: target.title.clone(),
			relationship_type_label: relationship.label.clone(),
		};
		let outcome = if links.insert(link) {
			tracing::debug!(target_note_id = %target.id, relationship = %relationship.label, "Link suggested.");

			AddOutcome::Added
		} else {
			AddOutcome::Duplicate
		};

		self.clear_search();

		Ok(outcome)
	}

	pub fn remove_link(&self, links: &mut SuggestedLinks, target_note_id: &str) -> bool {
		links.remove(target_note_id)
	}
}
