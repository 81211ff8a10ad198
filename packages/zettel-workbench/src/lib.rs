//! Client-side state for the staging-and-commit note workflow.
//!
//! Components hold their own state and talk to the note service through a shared
//! [`NoteService`]. The [`Workbench`] composes them and carries the refresh signal that tells
//! committed-note views to re-fetch after a commit.

pub mod catalog;
pub mod link_editor;
pub mod links;
pub mod note_detail;
pub mod note_list;
pub mod refresh;
pub mod search;
pub mod staging;
pub mod workbench;

mod error;

pub use catalog::RelationshipCatalog;
pub use error::{Error, Result, ValidationError};
pub use link_editor::{AddOutcome, EditorState, LinkEditor};
pub use links::SuggestedLinks;
pub use note_detail::{DetailView, NoteDetail, ResolvedLink};
pub use note_list::NoteList;
pub use refresh::{RefreshSignal, RefreshSubscriber};
pub use search::{DebouncedSearch, SearchOptions, SearchPhase, SearchSnapshot};
pub use staging::{CommitReceipt, NoteForm, StagingArea, StagingPhase};
pub use workbench::Workbench;

use std::{sync::Arc, time::Duration};

use zettel_client::NoteService;

pub type SharedService = Arc<dyn NoteService>;

#[derive(Clone, Debug)]
pub struct Settings {
	pub debounce: Duration,
	pub min_link_search_chars: usize,
}
impl Default for Settings {
	fn default() -> Self {
		Self::from(&zettel_config::Workbench::default())
	}
}
impl From<&zettel_config::Workbench> for Settings {
	fn from(cfg: &zettel_config::Workbench) -> Self {
		Self {
			debounce: Duration::from_millis(cfg.debounce_ms),
			min_link_search_chars: cfg.min_link_search_chars,
		}
	}
}
