//! Test doubles for the remote note service: an in-memory [`FakeNoteService`] and a
//! [`StubServer`] exposing it over HTTP.

mod error;
mod fake;
mod server;
mod store;

pub use error::{Error, Result};
pub use fake::{Call, FAKE_URL, FakeNoteService, Operation};
pub use server::{API_PREFIX, StubServer, router};
pub use store::{NoteStore, StoreError, default_relationship_types};
