use serde::{Deserialize, Deserializer, Serializer};
use time::{
	OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339,
	macros::format_description,
};

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let formatted = value.format(&Rfc3339).map_err(serde::ser::Error::custom)?;

	serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	parse(&raw).map_err(serde::de::Error::custom)
}

/// Parses RFC 3339, falling back to an offset-less ISO-8601 timestamp read as UTC.
pub fn parse(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
	if let Ok(value) = OffsetDateTime::parse(raw, &Rfc3339) {
		return Ok(value);
	}

	let naive = if raw.contains('.') {
		PrimitiveDateTime::parse(
			raw,
			format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
		)?
	} else {
		PrimitiveDateTime::parse(raw, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))?
	};

	Ok(naive.assume_utc())
}
