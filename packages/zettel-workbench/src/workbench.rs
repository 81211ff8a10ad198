use zettel_domain::Note;

use crate::{
	CommitReceipt, NoteDetail, NoteList, RefreshSignal, RefreshSubscriber, Result, Settings,
	SharedService, StagingArea,
};

/// Root of the client: the staging area, the committed-note views, and the refresh signal
/// that ties them together.
pub struct Workbench {
	service: SharedService,
	refresh: RefreshSignal,
	refresh_seen: RefreshSubscriber,
	staging: StagingArea,
	notes: NoteList,
	detail: NoteDetail,
	selected: Option<String>,
}
impl Workbench {
	pub fn new(service: SharedService, settings: Settings) -> Self {
		let refresh = RefreshSignal::new();
		let refresh_seen = refresh.subscribe();
		let staging = StagingArea::new(service.clone(), refresh.clone(), &settings);
		let notes = NoteList::new(service.clone(), refresh.subscribe(), &settings);
		let detail = NoteDetail::new(service.clone());

		Self { service, refresh, refresh_seen, staging, notes, detail, selected: None }
	}

	/// Loads the staged list. The link editor's catalog is fetched on the first selection.
	pub async fn mount(&mut self) -> Result<()> {
		self.staging.mount().await
	}

	pub fn service(&self) -> &SharedService {
		&self.service
	}

	pub fn refresh(&self) -> &RefreshSignal {
		&self.refresh
	}

	pub fn staging(&self) -> &StagingArea {
		&self.staging
	}

	pub fn staging_mut(&mut self) -> &mut StagingArea {
		&mut self.staging
	}

	pub fn notes(&self) -> &NoteList {
		&self.notes
	}

	pub fn notes_mut(&mut self) -> &mut NoteList {
		&mut self.notes
	}

	pub fn detail(&self) -> &NoteDetail {
		&self.detail
	}

	pub fn selected_committed(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	pub async fn select_committed(&mut self, note_id: &str) -> Result<&Note> {
		self.selected = Some(note_id.to_string());

		self.detail.show(note_id).await
	}

	pub fn clear_selection(&mut self) {
		self.selected = None;

		self.detail.clear();
	}

	pub async fn commit_staged(&mut self) -> Result<CommitReceipt> {
		let receipt = self.staging.commit().await?;

		self.sync();

		Ok(receipt)
	}

	/// Applies any refresh raised since the last call. Returns whether one was seen.
	pub fn sync(&mut self) -> bool {
		if !self.refresh_seen.observe() {
			return false;
		}

		tracing::debug!(version = self.refresh.version(), "Refresh observed; clearing selection.");

		self.clear_selection();

		true
	}

	pub async fn toggle_permanence(&mut self) -> Result<bool> {
		self.detail.toggle_permanence().await
	}
}
