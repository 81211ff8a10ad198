//! The staging area: drafting notes, choosing one to link, and committing it.
//!
//! Commit is two sequential requests from the user's point of view (create, later commit) with
//! no client-side transaction between them. Local state is only changed after the service has
//! answered, so a failed request never needs rolling back.

mod phase;

pub use phase::StagingPhase;

use zettel_domain::{Category, Link, Note, NoteDraft, NoteStatus};

use crate::{
	AddOutcome, LinkEditor, RefreshSignal, Result, Settings, SharedService, SuggestedLinks,
	ValidationError,
};

/// The note-creation form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteForm {
	pub title: String,
	pub body: String,
	pub category: Category,
	/// Only sent for literature notes.
	pub reference: String,
}
impl NoteForm {
	pub fn to_draft(&self) -> Result<NoteDraft, ValidationError> {
		if self.title.trim().is_empty() {
			return Err(ValidationError::EmptyTitle);
		}

		let reference = (self.category.takes_reference() && !self.reference.trim().is_empty())
			.then(|| self.reference.clone());

		Ok(NoteDraft {
			title: self.title.clone(),
			body: self.body.clone(),
			category: self.category,
			reference,
		})
	}

	pub fn reset(&mut self) {
		*self = Self::default();
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitReceipt {
	pub note_id: String,
	pub links: Vec<Link>,
	pub message: Option<String>,
	/// Refresh-signal version raised for this commit.
	pub refresh_version: u64,
}

pub struct StagingArea {
	service: SharedService,
	refresh: RefreshSignal,
	staged: Vec<Note>,
	form: NoteForm,
	phase: StagingPhase,
	links: SuggestedLinks,
	editor: LinkEditor,
}
impl StagingArea {
	pub fn new(service: SharedService, refresh: RefreshSignal, settings: &Settings) -> Self {
		let editor = LinkEditor::new(service.clone(), settings);

		Self {
			service,
			refresh,
			staged: Vec::new(),
			form: NoteForm::default(),
			phase: StagingPhase::Empty,
			links: SuggestedLinks::new(),
			editor,
		}
	}

	pub async fn mount(&mut self) -> Result<()> {
		self.refresh_staged().await.map(|_| ())
	}

	pub fn staged(&self) -> &[Note] {
		&self.staged
	}

	pub fn phase(&self) -> &StagingPhase {
		&self.phase
	}

	pub fn selected(&self) -> Option<&Note> {
		self.phase.selected_note()
	}

	pub fn suggested_links(&self) -> &SuggestedLinks {
		&self.links
	}

	pub fn form(&self) -> &NoteForm {
		&self.form
	}

	pub fn form_mut(&mut self) -> &mut NoteForm {
		&mut self.form
	}

	pub fn editor(&self) -> &LinkEditor {
		&self.editor
	}

	pub fn editor_mut(&mut self) -> &mut LinkEditor {
		&mut self.editor
	}

	/// Re-fetches the whole staged list; there is no incremental merge.
	pub async fn refresh_staged(&mut self) -> Result<&[Note]> {
		let staged = self.service.list_notes(NoteStatus::Staged, "").await.inspect_err(|err| {
			tracing::error!(error = %err, "Failed to fetch staged notes.");
		})?;

		self.phase = self.phase.after_refresh(&staged);
		self.staged = staged;

		Ok(&self.staged)
	}

	/// Submits the form. An empty title is rejected before any request is made.
	pub async fn create_note(&mut self) -> Result<Note> {
		let draft = self.form.to_draft().inspect_err(|err| {
			tracing::warn!(error = %err, "Note creation blocked.");
		})?;
		let created = self.service.create_note(&draft).await.inspect_err(|err| {
			tracing::error!(error = %err, "Failed to create note.");
		})?;

		tracing::info!(note_id = %created.id, category = %created.category, "Staged note created.");

		self.form.reset();

		if let Err(err) = self.refresh_staged().await {
			tracing::warn!(error = %err, "Staged list is stale after creating a note.");
		}

		Ok(created)
	}

	/// Selects a staged note. Drafted links are always discarded, even when re-selecting the
	/// note that is already selected.
	pub async fn select(&mut self, note_id: &str) -> Result<&Note> {
		let note = self
			.staged
			.iter()
			.find(|note| note.id == note_id)
			.cloned()
			.ok_or_else(|| ValidationError::UnknownNote(note_id.to_string()))?;

		self.phase = self.phase.select(note)?;
		self.links.clear();
		self.editor.clear_search();

		if let Err(err) = self.editor.mount().await {
			tracing::warn!(error = %err, "Link editor has no relationship types.");
		}

		self.selected().ok_or_else(|| ValidationError::NoSelection.into())
	}

	/// Abandons the current selection along with its drafted links.
	pub fn deselect(&mut self) -> Result<()> {
		self.phase = self.phase.deselect()?;
		self.links.clear();
		self.editor.clear_search();

		Ok(())
	}

	pub fn add_link(&mut self, target: &Note) -> Result<AddOutcome> {
		let next = self.phase.edited()?;
		let outcome = self.editor.add_link(&mut self.links, target)?;

		self.phase = next;

		Ok(outcome)
	}

	pub fn remove_link(&mut self, target_note_id: &str) -> Result<bool> {
		let next = self.phase.edited()?;
		let removed = self.editor.remove_link(&mut self.links, target_note_id);

		self.phase = next;

		Ok(removed)
	}

	/// Commits the selected note with its drafted links in one request.
	///
	/// On success the selection and links are cleared, the staged list is re-fetched, and the
	/// refresh signal is raised. On failure nothing but the phase changes.
	pub async fn commit(&mut self) -> Result<CommitReceipt> {
		let committing = self.phase.begin_commit()?;
		let Some(note_id) = committing.selected_note().map(|note| note.id.clone()) else {
			return Err(ValidationError::NoSelection.into());
		};
		let request = self.links.to_commit_request();

		self.phase = committing;

		match self.service.commit_note(&note_id, &request).await {
			Ok(result) => {
				self.phase = self.phase.commit_succeeded()?;
				self.links.clear();
				self.editor.clear_search();

				let refresh_version = self.refresh.raise();

				tracing::info!(note_id = %note_id, links = request.links.len(), "Note committed.");

				if let Err(err) = self.refresh_staged().await {
					tracing::warn!(error = %err, "Staged list is stale after commit.");
				}

				Ok(CommitReceipt {
					note_id,
					links: request.links,
					message: result.message,
					refresh_version,
				})
			},
			Err(err) => {
				tracing::error!(note_id = %note_id, error = %err, "Failed to commit note.");

				self.phase = self.phase.commit_failed(err.to_string())?;

				Err(err.into())
			},
		}
	}
}
