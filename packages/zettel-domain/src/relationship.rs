use serde::{Deserialize, Serialize};

/// Label shown when a link refers to a relationship type missing from the catalog.
pub const UNKNOWN_LABEL: &str = "unknown";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipType {
	#[serde(rename = "_id")]
	pub id: String,
	pub label: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	#[serde(default)]
	pub is_default: bool,
}

pub fn label_for<'a>(id: &str, catalog: &'a [RelationshipType]) -> &'a str {
	catalog.iter().find(|rt| rt.id == id).map(|rt| rt.label.as_str()).unwrap_or(UNKNOWN_LABEL)
}
