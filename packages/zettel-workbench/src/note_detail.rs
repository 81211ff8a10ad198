use zettel_domain::{Note, NotePatch};

use crate::{RelationshipCatalog, Result, SharedService, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DetailView<'a> {
	Empty,
	Error(&'a str),
	Note(&'a Note),
}

/// One side of a link as shown on a note's detail view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLink {
	pub note_id: String,
	/// Known for backlinks only; outgoing links carry just the target id.
	pub note_title: Option<String>,
	pub relationship_label: String,
}

pub struct NoteDetail {
	service: SharedService,
	catalog: RelationshipCatalog,
	note: Option<Note>,
	error: Option<String>,
}
impl NoteDetail {
	pub fn new(service: SharedService) -> Self {
		Self { service, catalog: RelationshipCatalog::new(), note: None, error: None }
	}

	pub fn note(&self) -> Option<&Note> {
		self.note.as_ref()
	}

	pub fn catalog(&self) -> &RelationshipCatalog {
		&self.catalog
	}

	pub fn view(&self) -> DetailView<'_> {
		match (&self.error, &self.note) {
			(Some(message), _) => DetailView::Error(message),
			(None, Some(note)) => DetailView::Note(note),
			(None, None) => DetailView::Empty,
		}
	}

	/// Fetches the note. The catalog is loaded alongside it the first time only; without it,
	/// link labels fall back to "unknown".
	pub async fn show(&mut self, note_id: &str) -> Result<&Note> {
		self.error = None;

		let note = match self.service.get_note(note_id).await {
			Ok(note) => note,
			Err(err) => {
				tracing::error!(note_id, error = %err, "Failed to fetch note details.");

				self.note = None;
				self.error = Some("Failed to fetch note details.".to_string());

				return Err(err.into());
			},
		};

		if let Some(err) = self.catalog.ensure_loaded(self.service.as_ref()).await.err() {
			tracing::warn!(error = %err, "Relationship labels are unavailable.");
		}

		Ok(self.note.insert(note))
	}

	pub fn clear(&mut self) {
		self.note = None;
		self.error = None;
	}

	/// Flips the permanence flag. The local copy changes only after the service accepts it.
	pub async fn toggle_permanence(&mut self) -> Result<bool> {
		let note = self.note.as_ref().ok_or(ValidationError::NoSelection)?;
		let next = !note.is_permanent;

		if let Err(err) = self.service.update_note(&note.id, &NotePatch::permanence(next)).await {
			tracing::error!(note_id = %note.id, error = %err, "Failed to update permanence.");

			return Err(err.into());
		}
		if let Some(note) = self.note.as_mut() {
			note.is_permanent = next;
		}

		Ok(next)
	}

	pub fn outgoing(&self) -> Vec<ResolvedLink> {
		let Some(note) = &self.note else {
			return Vec::new();
		};

		note.links
			.iter()
			.map(|link| ResolvedLink {
				note_id: link.target_note_id.clone(),
				note_title: None,
				relationship_label: self.catalog.label(&link.relationship_type_id).to_string(),
			})
			.collect()
	}

	pub fn incoming(&self) -> Vec<ResolvedLink> {
		let Some(note) = &self.note else {
			return Vec::new();
		};

		note.backlinks()
			.iter()
			.map(|backlink| ResolvedLink {
				note_id: backlink.source_note_id.clone(),
				note_title: Some(backlink.source_note_title.clone()),
				relationship_label: self.catalog.label(&backlink.relationship_type_id).to_string(),
			})
			.collect()
	}
}
