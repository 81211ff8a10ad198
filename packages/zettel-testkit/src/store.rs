use std::sync::Mutex;

use time::OffsetDateTime;
use uuid::Uuid;

use zettel_domain::{
	Backlink, CommitRequest, CommitResult, Note, NoteDraft, NotePatch, NoteStatus,
	RelationshipType,
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
	#[error("Note not found: {0}")]
	NotFound(String),
	#[error("Invalid request: {0}")]
	InvalidRequest(String),
}

/// In-memory note collection with the query and commit semantics of the remote service.
pub struct NoteStore {
	inner: Mutex<StoreInner>,
}

struct StoreInner {
	notes: Vec<StoredNote>,
	relationship_types: Vec<RelationshipType>,
	clock: u64,
}

struct StoredNote {
	note: Note,
	revision: u64,
}

impl NoteStore {
	pub fn new(relationship_types: Vec<RelationshipType>) -> Self {
		Self { inner: Mutex::new(StoreInner { notes: Vec::new(), relationship_types, clock: 0 }) }
	}

	pub fn with_default_relationship_types() -> Self {
		Self::new(default_relationship_types())
	}

	/// Matches `query` case-insensitively against title or body, most recently updated first.
	pub fn list(&self, status: NoteStatus, query: &str) -> Vec<Note> {
		let inner = self.lock();
		let needle = query.to_lowercase();
		let mut matches = inner
			.notes
			.iter()
			.filter(|stored| stored.note.status == status)
			.filter(|stored| {
				needle.is_empty()
					|| stored.note.title.to_lowercase().contains(&needle)
					|| stored.note.body.to_lowercase().contains(&needle)
			})
			.collect::<Vec<_>>();

		matches.sort_by(|a, b| b.revision.cmp(&a.revision));

		matches.into_iter().map(|stored| stored.note.clone()).collect()
	}

	pub fn get(&self, id: &str) -> Result<Note, StoreError> {
		let inner = self.lock();
		let mut note = inner.find(id)?.note.clone();
		let backlinks = inner
			.notes
			.iter()
			.flat_map(|source| {
				source.note.links.iter().filter(|link| link.target_note_id == id).map(|link| Backlink {
					source_note_id: source.note.id.clone(),
					source_note_title: source.note.title.clone(),
					relationship_type_id: link.relationship_type_id.clone(),
				})
			})
			.collect();

		note.backlinks = Some(backlinks);

		Ok(note)
	}

	pub fn create(&self, draft: &NoteDraft) -> Note {
		let mut inner = self.lock();
		let now = OffsetDateTime::now_utc();
		let note = Note {
			id: Uuid::new_v4().simple().to_string(),
			title: draft.title.clone(),
			body: draft.body.clone(),
			category: draft.category,
			is_permanent: false,
			status: NoteStatus::Staged,
			reference: draft.reference.clone(),
			links: Vec::new(),
			backlinks: None,
			created_at: now,
			updated_at: now,
		};
		let revision = inner.tick();

		inner.notes.push(StoredNote { note: note.clone(), revision });

		note
	}

	pub fn update(&self, id: &str, patch: &NotePatch) -> Result<(), StoreError> {
		let mut inner = self.lock();
		let revision = inner.tick();
		let stored = inner.find_mut(id)?;
		let note = &mut stored.note;

		if let Some(title) = &patch.title {
			note.title = title.clone();
		}
		if let Some(body) = &patch.body {
			note.body = body.clone();
		}
		if let Some(category) = patch.category {
			note.category = category;
		}
		if let Some(is_permanent) = patch.is_permanent {
			note.is_permanent = is_permanent;
		}
		if let Some(reference) = &patch.reference {
			note.reference = Some(reference.clone());
		}

		note.updated_at = OffsetDateTime::now_utc();
		stored.revision = revision;

		Ok(())
	}

	pub fn commit(&self, id: &str, request: &CommitRequest) -> Result<CommitResult, StoreError> {
		let mut inner = self.lock();

		for link in &request.links {
			if inner.find(&link.target_note_id).is_err() {
				return Err(StoreError::InvalidRequest(format!(
					"Link target {} does not exist.",
					link.target_note_id
				)));
			}
			if !inner.relationship_types.iter().any(|rt| rt.id == link.relationship_type_id) {
				return Err(StoreError::InvalidRequest(format!(
					"Relationship type {} does not exist.",
					link.relationship_type_id
				)));
			}
		}

		let status = inner.find(id)?.note.status.transition_to(NoteStatus::Committed).map_err(|err| {
			StoreError::InvalidRequest(format!("Note {id} cannot be committed: {err}"))
		})?;
		let revision = inner.tick();
		let stored = inner.find_mut(id)?;

		stored.note.status = status;
		stored.note.links = request.links.clone();
		stored.note.updated_at = OffsetDateTime::now_utc();
		stored.revision = revision;

		Ok(CommitResult { message: Some("Note committed successfully".to_string()) })
	}

	pub fn relationship_types(&self) -> Vec<RelationshipType> {
		self.lock().relationship_types.clone()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
		self.inner.lock().unwrap_or_else(|err| err.into_inner())
	}
}

impl StoreInner {
	fn tick(&mut self) -> u64 {
		self.clock += 1;

		self.clock
	}

	fn find(&self, id: &str) -> Result<&StoredNote, StoreError> {
		self.notes
			.iter()
			.find(|stored| stored.note.id == id)
			.ok_or_else(|| StoreError::NotFound(id.to_string()))
	}

	fn find_mut(&mut self, id: &str) -> Result<&mut StoredNote, StoreError> {
		self.notes
			.iter_mut()
			.find(|stored| stored.note.id == id)
			.ok_or_else(|| StoreError::NotFound(id.to_string()))
	}
}

/// The catalog the service seeds on first start.
pub fn default_relationship_types() -> Vec<RelationshipType> {
	[
		("rt-supports", "supports", "#4CAF50"),
		("rt-contradicts", "contradicts", "#F44336"),
		("rt-example-of", "is an example of", "#2196F3"),
	]
	.into_iter()
	.map(|(id, label, color)| RelationshipType {
		id: id.to_string(),
		label: label.to_string(),
		color: Some(color.to_string()),
		is_default: true,
	})
	.collect()
}
