use std::{
	collections::{HashMap, HashSet},
	sync::Mutex,
	time::Duration,
};

use zettel_client::{BoxFuture, Error as ClientError, NoteService, Result as ClientResult};
use zettel_domain::{
	Category, CommitRequest, CommitResult, Note, NoteDraft, NotePatch, NoteStatus,
	RelationshipType,
};

use crate::store::{NoteStore, StoreError};

pub const FAKE_URL: &str = "fake://notes";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	ListNotes,
	GetNote,
	CreateNote,
	UpdateNote,
	CommitNote,
	RelationshipTypes,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
	ListNotes { status: NoteStatus, query: String },
	GetNote { id: String },
	CreateNote { draft: NoteDraft },
	UpdateNote { id: String, patch: NotePatch },
	CommitNote { id: String, request: CommitRequest },
	RelationshipTypes,
}
impl Call {
	pub fn operation(&self) -> Operation {
		match self {
			Self::ListNotes { .. } => Operation::ListNotes,
			Self::GetNote { .. } => Operation::GetNote,
			Self::CreateNote { .. } => Operation::CreateNote,
			Self::UpdateNote { .. } => Operation::UpdateNote,
			Self::CommitNote { .. } => Operation::CommitNote,
			Self::RelationshipTypes => Operation::RelationshipTypes,
		}
	}
}

/// [`NoteService`] backed by a [`NoteStore`], recording every call and failing on demand.
pub struct FakeNoteService {
	store: NoteStore,
	calls: Mutex<Vec<Call>>,
	failing: Mutex<HashSet<Operation>>,
	list_delays: Mutex<HashMap<String, Duration>>,
}
impl FakeNoteService {
	pub fn new() -> Self {
		Self::with_store(NoteStore::with_default_relationship_types())
	}

	pub fn with_store(store: NoteStore) -> Self {
		Self {
			store,
			calls: Mutex::new(Vec::new()),
			failing: Mutex::new(HashSet::new()),
			list_delays: Mutex::new(HashMap::new()),
		}
	}

	pub fn store(&self) -> &NoteStore {
		&self.store
	}

	/// Seeds a committed note without recording a call.
	pub fn seed_committed(&self, title: &str, body: &str) -> Note {
		let note = self.seed_staged(title, body);

		self.store
			.commit(&note.id, &CommitRequest::default())
			.unwrap_or_else(|err| panic!("Failed to seed committed note: {err}"));

		self.store.get(&note.id).unwrap_or_else(|err| panic!("Failed to reload seeded note: {err}"))
	}

	/// Seeds a staged note without recording a call.
	pub fn seed_staged(&self, title: &str, body: &str) -> Note {
		self.store.create(&NoteDraft {
			title: title.to_string(),
			body: body.to_string(),
			category: Category::Fleeting,
			reference: None,
		})
	}

	pub fn fail(&self, operation: Operation) {
		lock(&self.failing).insert(operation);
	}

	pub fn recover(&self, operation: Operation) {
		lock(&self.failing).remove(&operation);
	}

	/// Holds back the response to a list request for `query` by `delay`.
	pub fn delay_list(&self, query: &str, delay: Duration) {
		lock(&self.list_delays).insert(query.to_string(), delay);
	}

	pub fn calls(&self) -> Vec<Call> {
		lock(&self.calls).clone()
	}

	pub fn count(&self, operation: Operation) -> usize {
		lock(&self.calls).iter().filter(|call| call.operation() == operation).count()
	}

	pub fn list_queries(&self) -> Vec<(NoteStatus, String)> {
		lock(&self.calls)
			.iter()
			.filter_map(|call| match call {
				Call::ListNotes { status, query } => Some((*status, query.clone())),
				_ => None,
			})
			.collect()
	}

	fn begin(&self, call: Call) -> ClientResult<()> {
		let operation = call.operation();

		lock(&self.calls).push(call);

		if lock(&self.failing).contains(&operation) {
			return Err(ClientError::Status {
				url: FAKE_URL.to_string(),
				status: 503,
				body: format!("Injected failure for {operation:?}."),
			});
		}

		Ok(())
	}

	async fn list(&self, status: NoteStatus, query: &str) -> ClientResult<Vec<Note>> {
		let delay = lock(&self.list_delays).get(query).copied();

		self.begin(Call::ListNotes { status, query: query.to_string() })?;

		if let Some(delay) = delay {
			tokio::time::sleep(delay).await;
		}

		Ok(self.store.list(status, query))
	}
}
impl Default for FakeNoteService {
	fn default() -> Self {
		Self::new()
	}
}

impl NoteService for FakeNoteService {
	fn list_notes<'a>(
		&'a self,
		status: NoteStatus,
		query: &'a str,
	) -> BoxFuture<'a, ClientResult<Vec<Note>>> {
		Box::pin(self.list(status, query))
	}

	fn get_note<'a>(&'a self, id: &'a str) -> BoxFuture<'a, ClientResult<Note>> {
		Box::pin(async move {
			self.begin(Call::GetNote { id: id.to_string() })?;

			self.store.get(id).map_err(into_client_error)
		})
	}

	fn create_note<'a>(&'a self, draft: &'a NoteDraft) -> BoxFuture<'a, ClientResult<Note>> {
		Box::pin(async move {
			self.begin(Call::CreateNote { draft: draft.clone() })?;

			Ok(self.store.create(draft))
		})
	}

	fn update_note<'a>(
		&'a self,
		id: &'a str,
		patch: &'a NotePatch,
	) -> BoxFuture<'a, ClientResult<()>> {
		Box::pin(async move {
			self.begin(Call::UpdateNote { id: id.to_string(), patch: patch.clone() })?;

			self.store.update(id, patch).map_err(into_client_error)
		})
	}

	fn commit_note<'a>(
		&'a self,
		id: &'a str,
		request: &'a CommitRequest,
	) -> BoxFuture<'a, ClientResult<CommitResult>> {
		Box::pin(async move {
			self.begin(Call::CommitNote { id: id.to_string(), request: request.clone() })?;

			self.store.commit(id, request).map_err(into_client_error)
		})
	}

	fn relationship_types(&self) -> BoxFuture<'_, ClientResult<Vec<RelationshipType>>> {
		Box::pin(async move {
			self.begin(Call::RelationshipTypes)?;

			Ok(self.store.relationship_types())
		})
	}
}

fn into_client_error(err: StoreError) -> ClientError {
	let status = match err {
		StoreError::NotFound(_) => 404,
		StoreError::InvalidRequest(_) => 400,
	};

	ClientError::Status { url: FAKE_URL.to_string(), status, body: err.to_string() }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|err| err.into_inner())
}
