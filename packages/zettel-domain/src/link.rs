use serde::{Deserialize, Serialize};

/// Directed edge from the owning note to `target_note_id`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
	pub target_note_id: String,
	pub relationship_type_id: String,
}

/// Reverse view of a [`Link`], computed by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backlink {
	pub source_note_id: String,
	pub source_note_title: String,
	pub relationship_type_id: String,
}

/// A link drafted against a staged note, carrying the titles needed to display it.
/// Never sent over the wire as is; see [`SuggestedLink::to_link`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestedLink {
	pub target_note_id: String,
	pub relationship_type_id: String,
	pub target_note_title: String,
	pub relationship_type_label: String,
}
impl SuggestedLink {
	pub fn to_link(&self) -> Link {
		Link {
			target_note_id: self.target_note_id.clone(),
			relationship_type_id: self.relationship_type_id.clone(),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRequest {
	pub links: Vec<Link>,
}
impl CommitRequest {
	pub fn from_suggested<'a>(links: impl IntoIterator<Item = &'a SuggestedLink>) -> Self {
		Self { links: links.into_iter().map(SuggestedLink::to_link).collect() }
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitResult {
	#[serde(default)]
	pub message: Option<String>,
}
