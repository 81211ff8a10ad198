//! Transport client for the remote note service.
//!
//! One method per remote operation, each a plain request/response exchange: no retries, no
//! caching, and no per-request timeout override. Callers receive every failure as an [`Error`].

mod error;
mod http;

pub use error::{Error, Result};
pub use http::HttpNoteService;

use std::{future::Future, pin::Pin};

use zettel_domain::{
	CommitRequest, CommitResult, Note, NoteDraft, NotePatch, NoteStatus, RelationshipType,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait NoteService
where
	Self: Send + Sync,
{
	/// `GET /notes?status=..&q=..`. An empty query lists every note with that status.
	fn list_notes<'a>(
		&'a self,
		status: NoteStatus,
		query: &'a str,
	) -> BoxFuture<'a, Result<Vec<Note>>>;

	/// `GET /notes/{id}`, including backlinks.
	fn get_note<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Note>>;

	/// `POST /notes`. The created note is always staged.
	fn create_note<'a>(&'a self, draft: &'a NoteDraft) -> BoxFuture<'a, Result<Note>>;

	/// `PUT /notes/{id}`.
	fn update_note<'a>(&'a self, id: &'a str, patch: &'a NotePatch) -> BoxFuture<'a, Result<()>>;

	/// `POST /notes/{id}/commit`. Promotes the note and materializes its links in one call.
	fn commit_note<'a>(
		&'a self,
		id: &'a str,
		request: &'a CommitRequest,
	) -> BoxFuture<'a, Result<CommitResult>>;

	/// `GET /relationship_types`.
	fn relationship_types(&self) -> BoxFuture<'_, Result<Vec<RelationshipType>>>;
}
