//! Data model shared by the Zettelkasten client: notes, typed links, and the
//! relationship-type catalog, plus the wire payloads exchanged with the note service.

mod error;
mod link;
mod note;
mod relationship;

pub mod time_serde;

pub use error::{Error, Result};
pub use link::{Backlink, CommitRequest, CommitResult, Link, SuggestedLink};
pub use note::{Category, Note, NoteDraft, NotePatch, NoteStatus};
pub use relationship::{RelationshipType, UNKNOWN_LABEL, label_for};
