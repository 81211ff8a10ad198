use zettel_domain::{CommitRequest, SuggestedLink};

/// Links drafted for the selected staged note.
///
/// At most one link per target note: the first one added wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuggestedLinks(Vec<SuggestedLink>);
impl SuggestedLinks {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns false, leaving the list unchanged, when the target is already linked.
	pub fn insert(&mut self, link: SuggestedLink) -> bool {
		if self.contains(&link.target_note_id) {
			return false;
		}

		self.0.push(link);

		true
	}

	pub fn remove(&mut self, target_note_id: &str) -> bool {
		let before = self.0.len();

		self.0.retain(|link| link.target_note_id != target_note_id);

		self.0.len() != before
	}

	pub fn contains(&self, target_note_id: &str) -> bool {
		self.0.iter().any(|link| link.target_note_id == target_note_id)
	}

	pub fn clear(&mut self) {
		self.0.clear();
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &SuggestedLink> {
		self.0.iter()
	}

	pub fn as_slice(&self) -> &[SuggestedLink] {
		&self.0
	}

	pub fn to_commit_request(&self) -> CommitRequest {
		CommitRequest::from_suggested(&self.0)
	}
}
