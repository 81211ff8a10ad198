use std::{future::IntoFuture, net::SocketAddr, sync::Arc};

use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing,
};
use serde::Deserialize;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

use crate::{Error, FakeNoteService, Result};
use zettel_client::{Error as ClientError, NoteService};
use zettel_domain::{CommitRequest, NoteDraft, NotePatch, NoteStatus};

/// Path prefix the stub serves under, matching the deployed service.
pub const API_PREFIX: &str = "/api";

#[derive(Debug, Deserialize)]
struct ListParams {
	status: Option<NoteStatus>,
	q: Option<String>,
}

/// HTTP stand-in for the remote note service, serving a shared [`FakeNoteService`].
pub struct StubServer {
	addr: SocketAddr,
	shutdown: oneshot::Sender<()>,
	handle: JoinHandle<()>,
}
impl StubServer {
	pub async fn start(service: Arc<FakeNoteService>) -> Result<Self> {
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let (tx, rx) = oneshot::channel();
		let server = axum::serve(listener, router(service)).with_graceful_shutdown(async move {
			let _ = rx.await;
		});
		let handle = tokio::spawn(async move {
			if let Err(err) = server.into_future().await {
				tracing::warn!(error = %err, "Stub note service stopped with an error.");
			}
		});

		Ok(Self { addr, shutdown: tx, handle })
	}

	pub fn api_base(&self) -> String {
		format!("http://{}{API_PREFIX}", self.addr)
	}

	pub async fn shutdown(self) -> Result<()> {
		let _ = self.shutdown.send(());

		self.handle
			.await
			.map_err(|err| Error::Message(format!("Stub note service task failed: {err}.")))
	}
}

pub fn router(service: Arc<FakeNoteService>) -> Router {
	let routes = Router::new()
		.route("/notes", routing::get(list_notes).post(create_note))
		.route("/notes/{id}", routing::get(get_note).put(update_note))
		.route("/notes/{id}/commit", routing::post(commit_note))
		.route("/relationship_types", routing::get(relationship_types))
		.with_state(service);

	Router::new().nest(API_PREFIX, routes)
}

async fn list_notes(
	State(service): State<Arc<FakeNoteService>>,
	Query(params): Query<ListParams>,
) -> Response {
	let status = params.status.unwrap_or(NoteStatus::Committed);
	let query = params.q.unwrap_or_default();

	match service.list_notes(status, &query).await {
		Ok(notes) => Json(notes).into_response(),
		Err(err) => error_response(err),
	}
}

async fn get_note(State(service): State<Arc<FakeNoteService>>, Path(id): Path<String>) -> Response {
	match service.get_note(&id).await {
		Ok(note) => Json(note).into_response(),
		Err(err) => error_response(err),
	}
}

async fn create_note(
	State(service): State<Arc<FakeNoteService>>,
	Json(draft): Json<NoteDraft>,
) -> Response {
	match service.create_note(&draft).await {
		Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
		Err(err) => error_response(err),
	}
}

async fn update_note(
	State(service): State<Arc<FakeNoteService>>,
	Path(id): Path<String>,
	Json(patch): Json<NotePatch>,
) -> Response {
	match service.update_note(&id, &patch).await {
		Ok(()) => Json(serde_json::json!({ "message": "Note updated successfully" })).into_response(),
		Err(err) => error_response(err),
	}
}

async fn commit_note(
	State(service): State<Arc<FakeNoteService>>,
	Path(id): Path<String>,
	Json(request): Json<CommitRequest>,
) -> Response {
	match service.commit_note(&id, &request).await {
		Ok(result) => Json(result).into_response(),
		Err(err) => error_response(err),
	}
}

async fn relationship_types(State(service): State<Arc<FakeNoteService>>) -> Response {
	match service.relationship_types().await {
		Ok(types) => Json(types).into_response(),
		Err(err) => error_response(err),
	}
}

fn error_response(err: ClientError) -> Response {
	let status = err
		.status()
		.and_then(|code| StatusCode::from_u16(code).ok())
		.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
	let message = match &err {
		ClientError::Status { body, .. } => body.clone(),
		other => other.to_string(),
	};

	(status, Json(serde_json::json!({ "error": message }))).into_response()
}
