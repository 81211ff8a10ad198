use zettel_domain::Note;

use crate::{Error, Result, ValidationError};

/// Where the staging area stands in the create → select → commit workflow.
///
/// Transitions are pure: each returns the next phase or an error, leaving `self` untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum StagingPhase {
	/// No staged notes.
	Empty,
	StagedUnselected,
	StagedSelected { note: Note },
	Committing { note: Note },
	Committed { note_id: String },
	/// Selection and drafted links are kept so the user can re-submit.
	CommitFailed { note: Note, reason: String },
}
impl StagingPhase {
	pub fn name(&self) -> &'static str {
		match self {
			Self::Empty => "empty",
			Self::StagedUnselected => "staged-unselected",
			Self::StagedSelected { .. } => "staged-selected",
			Self::Committing { .. } => "committing",
			Self::Committed { .. } => "committed",
			Self::CommitFailed { .. } => "commit-failed",
		}
	}

	pub fn selected_note(&self) -> Option<&Note> {
		match self {
			Self::StagedSelected { note }
			| Self::Committing { note }
			| Self::CommitFailed { note, .. } => Some(note),
			_ => None,
		}
	}

	/// Folds a fresh staged list into the phase. A selection survives only while its note is
	/// still staged.
	pub fn after_refresh(&self, staged: &[Note]) -> Self {
		let resting = if staged.is_empty() { Self::Empty } else { Self::StagedUnselected };

		match self {
			Self::Committing { .. } => self.clone(),
			Self::StagedSelected { note } => match staged.iter().find(|n| n.id == note.id) {
				Some(fresh) => Self::StagedSelected { note: fresh.clone() },
				None => resting,
			},
			Self::CommitFailed { note, reason } => match staged.iter().find(|n| n.id == note.id) {
				Some(fresh) => Self::CommitFailed { note: fresh.clone(), reason: reason.clone() },
				None => resting,
			},
			_ => resting,
		}
	}

	pub fn select(&self, note: Note) -> Result<Self> {
		match self {
			Self::Empty | Self::Committing { .. } => Err(self.illegal("select a note")),
			_ => Ok(Self::StagedSelected { note }),
		}
	}

	pub fn deselect(&self) -> Result<Self> {
		match self {
			Self::StagedSelected { .. } | Self::CommitFailed { .. } => Ok(Self::StagedUnselected),
			Self::Committing { .. } => Err(self.illegal("abandon the selection")),
			_ => Ok(self.clone()),
		}
	}

	/// Drafting links after a failed commit returns to the ordinary selected phase.
	pub fn edited(&self) -> Result<Self> {
		match self {
			Self::StagedSelected { .. } => Ok(self.clone()),
			Self::CommitFailed { note, .. } => Ok(Self::StagedSelected { note: note.clone() }),
			Self::Committing { .. } => Err(self.illegal("edit links")),
			_ => Err(ValidationError::NoSelection.into()),
		}
	}

	pub fn begin_commit(&self) -> Result<Self> {
		match self {
			Self::StagedSelected { note } | Self::CommitFailed { note, .. } =>
				Ok(Self::Committing { note: note.clone() }),
			Self::Committing { .. } => Err(self.illegal("start another commit")),
			_ => Err(ValidationError::NoSelection.into()),
		}
	}

	pub fn commit_succeeded(&self) -> Result<Self> {
		match self {
			Self::Committing { note } => Ok(Self::Committed { note_id: note.id.clone() }),
			_ => Err(self.illegal("finish a commit")),
		}
	}

	pub fn commit_failed(&self, reason: impl Into<String>) -> Result<Self> {
		match self {
			Self::Committing { note } =>
				Ok(Self::CommitFailed { note: note.clone(), reason: reason.into() }),
			_ => Err(self.illegal("fail a commit")),
		}
	}

	fn illegal(&self, action: &'static str) -> Error {
		Error::Transition { phase: self.name(), action }
	}
}
