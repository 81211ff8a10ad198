pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Problems caught locally, before any request is sent.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
	#[error("Title is required.")]
	EmptyTitle,
	#[error("Please select a relationship type.")]
	NoRelationshipType,
	#[error("Unknown relationship type {0}.")]
	UnknownRelationshipType(String),
	#[error("Select a note first.")]
	NoSelection,
	#[error("Note {0} is not in the current list.")]
	UnknownNote(String),
	#[error("Only committed notes can be linked; {0} is still staged.")]
	TargetNotCommitted(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Validation(#[from] ValidationError),
	#[error("Cannot {action} while {phase}.")]
	Transition { phase: &'static str, action: &'static str },
	#[error(transparent)]
	Service(#[from] zettel_client::Error),
}
impl Error {
	pub fn validation(&self) -> Option<&ValidationError> {
		match self {
			Self::Validation(err) => Some(err),
			_ => None,
		}
	}
}
