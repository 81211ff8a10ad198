use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Backlink, Error, Link, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
	#[default]
	Fleeting,
	Literature,
	Deduction,
}
impl Category {
	pub const ALL: [Self; 3] = [Self::Fleeting, Self::Literature, Self::Deduction];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Fleeting => "Fleeting",
			Self::Literature => "Literature",
			Self::Deduction => "Deduction",
		}
	}

	/// Only literature notes carry a reference.
	pub fn takes_reference(self) -> bool {
		matches!(self, Self::Literature)
	}
}
impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for Category {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self> {
		Self::ALL
			.into_iter()
			.find(|category| category.as_str().eq_ignore_ascii_case(raw.trim()))
			.ok_or_else(|| Error::UnknownCategory(raw.to_string()))
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteStatus {
	Staged,
	Committed,
}
impl NoteStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Staged => "staged",
			Self::Committed => "committed",
		}
	}

	pub fn can_transition_to(self, next: Self) -> bool {
		matches!((self, next), (Self::Staged, Self::Committed))
	}

	pub fn transition_to(self, next: Self) -> Result<Self> {
		if self.can_transition_to(next) {
			Ok(next)
		} else {
			Err(Error::IllegalStatusTransition { from: self, to: next })
		}
	}
}
impl fmt::Display for NoteStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for NoteStatus {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self> {
		match raw.trim() {
			"staged" => Ok(Self::Staged),
			"committed" => Ok(Self::Committed),
			other => Err(Error::UnknownStatus(other.to_string())),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
	#[serde(rename = "_id")]
	pub id: String,
	pub title: String,
	#[serde(default)]
	pub body: String,
	#[serde(default)]
	pub category: Category,
	#[serde(default)]
	pub is_permanent: bool,
	pub status: NoteStatus,
	/// Free-text citation. The service stores it under `source`.
	#[serde(default, alias = "source", skip_serializing_if = "Option::is_none")]
	pub reference: Option<String>,
	/// Always empty while the note is staged.
	#[serde(default)]
	pub links: Vec<Link>,
	/// Only populated when a single note is fetched by id.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub backlinks: Option<Vec<Backlink>>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}
impl Note {
	pub fn is_staged(&self) -> bool {
		self.status == NoteStatus::Staged
	}

	pub fn backlinks(&self) -> &[Backlink] {
		self.backlinks.as_deref().unwrap_or_default()
	}
}

/// Payload for creating a note. The service assigns id, timestamps, and the staged status.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
	pub title: String,
	pub body: String,
	pub category: Category,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reference: Option<String>,
}

/// Partial update; unset fields are left untouched by the service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub body: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<Category>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_permanent: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reference: Option<String>,
}
impl NotePatch {
	pub fn permanence(is_permanent: bool) -> Self {
		Self { is_permanent: Some(is_permanent), ..Self::default() }
	}
}
