//! Shared command-line plumbing for the zettel binaries.

use std::str::FromStr;

use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects},
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Yellow.on_default() | Effects::BOLD)
		.usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
		.literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Expected TARGET=TYPE, got {0:?}.")]
pub struct LinkSpecError(String);

/// A `TARGET=TYPE` link argument. `TYPE` is a relationship type id or label and may contain
/// spaces or further `=` signs; only the first `=` separates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkSpec {
	pub target: String,
	pub relationship: String,
}
impl FromStr for LinkSpec {
	type Err = LinkSpecError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let Some((target, relationship)) = s.split_once('=') else {
			return Err(LinkSpecError(s.to_string()));
		};
		let (target, relationship) = (target.trim(), relationship.trim());

		if target.is_empty() || relationship.is_empty() {
			return Err(LinkSpecError(s.to_string()));
		}

		Ok(Self { target: target.to_string(), relationship: relationship.to_string() })
	}
}

#[cfg(test)]
mod tests {
	use super::{LinkSpec, LinkSpecError};

	#[test]
	fn label_may_contain_spaces() {
		let spec = "abc123=is an example of".parse::<LinkSpec>().expect("parse failed");

		assert_eq!(spec, LinkSpec {
			target: "abc123".to_string(),
			relationship: "is an example of".to_string(),
		});
	}

	#[test]
	fn both_sides_are_required() {
		assert_eq!("abc123".parse::<LinkSpec>(), Err(LinkSpecError("abc123".to_string())));
		assert_eq!("=supports".parse::<LinkSpec>(), Err(LinkSpecError("=supports".to_string())));
		assert_eq!("abc123= ".parse::<LinkSpec>(), Err(LinkSpecError("abc123= ".to_string())));
	}
}
