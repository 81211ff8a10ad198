pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Unknown category {0:?}; expected Fleeting, Literature, or Deduction.")]
	UnknownCategory(String),
	#[error("Unknown note status {0:?}; expected staged or committed.")]
	UnknownStatus(String),
	#[error("A note cannot move from {from} to {to}.")]
	IllegalStatusTransition { from: crate::NoteStatus, to: crate::NoteStatus },
}
