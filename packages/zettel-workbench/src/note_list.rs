use zettel_domain::{Note, NoteStatus};

use crate::{
	DebouncedSearch, RefreshSubscriber, SearchOptions, SearchSnapshot, Settings, SharedService,
};

/// Committed notes, filtered server-side by a debounced query.
///
/// Every settled query re-fetches the full result set; the empty query lists everything.
/// A raised refresh signal re-runs the current query at once.
pub struct NoteList {
	search: DebouncedSearch,
}
impl NoteList {
	pub fn new(service: SharedService, refresh: RefreshSubscriber, settings: &Settings) -> Self {
		let search = DebouncedSearch::spawn(
			service,
			SearchOptions { status: NoteStatus::Committed, debounce: settings.debounce, min_chars: 0 },
			Some(refresh),
		);

		Self { search }
	}

	pub fn set_search_term(&self, term: impl Into<String>) {
		self.search.set_query(term);
	}

	pub fn search_term(&self) -> String {
		self.search.query()
	}

	pub fn snapshot(&self) -> SearchSnapshot {
		self.search.snapshot()
	}

	pub fn notes(&self) -> Vec<Note> {
		self.search.snapshot().results
	}

	pub fn find(&self, note_id: &str) -> Option<Note> {
		self.search.snapshot().results.into_iter().find(|note| note.id == note_id)
	}

	pub async fn settle(&mut self) -> SearchSnapshot {
		self.search.settled().await
	}

	/// Waits for a settled snapshot newer than `seq`, e.g. the re-fetch after a refresh.
	pub async fn settle_after(&mut self, seq: u64) -> SearchSnapshot {
		self.search.wait_for(|snapshot| snapshot.seq > seq && snapshot.phase.is_settled()).await
	}
}
