use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::{BoxFuture, Error, NoteService, Result};
use zettel_domain::{
	CommitRequest, CommitResult, Note, NoteDraft, NotePatch, NoteStatus, RelationshipType,
};

#[derive(Clone, Debug)]
pub struct HttpNoteService {
	api_base: Url,
	client: Client,
}
impl HttpNoteService {
	pub fn new(cfg: &zettel_config::Service) -> Result<Self> {
		let api_base = Url::parse(&cfg.api_base).map_err(|err| Error::InvalidConfig {
			message: format!("service.api_base is not a valid URL: {err}."),
		})?;

		if api_base.cannot_be_a_base() {
			return Err(Error::InvalidConfig {
				message: "service.api_base must be a hierarchical URL.".to_string(),
			});
		}

		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.build()
			.map_err(|err| Error::Transport { url: cfg.api_base.clone(), source: err })?;

		Ok(Self { api_base, client })
	}

	pub fn api_base(&self) -> &Url {
		&self.api_base
	}

	fn url(&self, segments: &[&str]) -> Url {
		let mut url = self.api_base.clone();

		// Checked in `new`.
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty().extend(segments);
		}

		url
	}

	async fn send(&self, builder: RequestBuilder, url: &Url) -> Result<Vec<u8>> {
		let response = builder
			.send()
			.await
			.map_err(|err| Error::Transport { url: url.to_string(), source: err })?;
		let status = response.status();
		let bytes = response
			.bytes()
			.await
			.map_err(|err| Error::Transport { url: url.to_string(), source: err })?;

		if !status.is_success() {
			return Err(Error::Status {
				url: url.to_string(),
				status: status.as_u16(),
				body: String::from_utf8_lossy(&bytes).into_owned(),
			});
		}

		Ok(bytes.to_vec())
	}

	async fn send_json<T>(&self, builder: RequestBuilder, url: &Url) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let bytes = self.send(builder, url).await?;

		serde_json::from_slice(&bytes).map_err(|err| Error::Decode { url: url.to_string(), source: err })
	}

	pub async fn list_notes(&self, status: NoteStatus, query: &str) -> Result<Vec<Note>> {
		let url = self.url(&["notes"]);
		let builder = self.client.get(url.clone()).query(&[("status", status.as_str()), ("q", query)]);

		tracing::debug!(%status, query, "Listing notes.");

		self.send_json(builder, &url).await
	}

	pub async fn get_note(&self, id: &str) -> Result<Note> {
		let url = self.url(&["notes", id]);

		tracing::debug!(note_id = id, "Fetching note.");

		self.send_json(self.client.get(url.clone()), &url).await
	}

	pub async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
		let url = self.url(&["notes"]);

		tracing::debug!(category = %draft.category, "Creating staged note.");

		self.send_json(self.client.post(url.clone()).json(draft), &url).await
	}

	pub async fn update_note(&self, id: &str, patch: &NotePatch) -> Result<()> {
		let url = self.url(&["notes", id]);

		tracing::debug!(note_id = id, "Updating note.");

		self.send(self.client.put(url.clone()).json(patch), &url).await?;

		Ok(())
	}

	pub async fn commit_note(&self, id: &str, request: &CommitRequest) -> Result<CommitResult> {
		let url = self.url(&["notes", id, "commit"]);

		tracing::debug!(note_id = id, links = request.links.len(), "Committing note.");

		let bytes = self.send(self.client.post(url.clone()).json(request), &url).await?;

		// The service answers with a message object; an empty body is still a success.
		if bytes.iter().all(u8::is_ascii_whitespace) {
			return Ok(CommitResult::default());
		}

		serde_json::from_slice(&bytes).map_err(|err| Error::Decode { url: url.to_string(), source: err })
	}

	pub async fn relationship_types(&self) -> Result<Vec<RelationshipType>> {
		let url = self.url(&["relationship_types"]);

		tracing::debug!("Fetching relationship types.");

		self.send_json(self.client.get(url.clone()), &url).await
	}
}

impl NoteService for HttpNoteService {
	fn list_notes<'a>(
		&'a self,
		status: NoteStatus,
		query: &'a str,
	) -> BoxFuture<'a, Result<Vec<Note>>> {
		Box::pin(HttpNoteService::list_notes(self, status, query))
	}

	fn get_note<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Note>> {
		Box::pin(HttpNoteService::get_note(self, id))
	}

	fn create_note<'a>(&'a self, draft: &'a NoteDraft) -> BoxFuture<'a, Result<Note>> {
		Box::pin(HttpNoteService::create_note(self, draft))
	}

	fn update_note<'a>(&'a self, id: &'a str, patch: &'a NotePatch) -> BoxFuture<'a, Result<()>> {
		Box::pin(HttpNoteService::update_note(self, id, patch))
	}

	fn commit_note<'a>(
		&'a self,
		id: &'a str,
		request: &'a CommitRequest,
	) -> BoxFuture<'a, Result<CommitResult>> {
		Box::pin(HttpNoteService::commit_note(self, id, request))
	}

	fn relationship_types(&self) -> BoxFuture<'_, Result<Vec<RelationshipType>>> {
		Box::pin(HttpNoteService::relationship_types(self))
	}
}

#[cfg(test)]
mod tests {
	use super::HttpNoteService;

	fn service(api_base: &str) -> HttpNoteService {
		HttpNoteService::new(&zettel_config::Service::new(api_base)).expect("service")
	}

	#[test]
	fn joins_segments_under_the_base_path() {
		let service = service("http://127.0.0.1:5000/api");

		assert_eq!(
			service.url(&["notes", "abc", "commit"]).as_str(),
			"http://127.0.0.1:5000/api/notes/abc/commit"
		);
	}

	#[test]
	fn trailing_slash_does_not_double_up() {
		let service = service("http://127.0.0.1:5000/api/");

		assert_eq!(service.url(&["relationship_types"]).as_str(), "http://127.0.0.1:5000/api/relationship_types");
	}

	#[test]
	fn ids_are_percent_encoded() {
		let service = service("http://127.0.0.1:5000");

		assert_eq!(service.url(&["notes", "a/b"]).as_str(), "http://127.0.0.1:5000/notes/a%2Fb");
	}

	#[test]
	fn rejects_non_hierarchical_base() {
		let err = HttpNoteService::new(&zettel_config::Service::new("mailto:notes@example.com"))
			.expect_err("expected invalid config");

		assert!(err.to_string().contains("hierarchical"), "unexpected error: {err}");
	}
}
