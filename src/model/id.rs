//! Strongly typed identifiers exchanged with the MoMo API.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal, $alphabet:expr) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, $alphabet, view)?;

				Ok(Self(view.to_owned()))
			}

			/// Generates a fresh random (UUIDv4) identifier.
			pub fn generate() -> Self {
				Self(uuid::Uuid::new_v4().to_string())
			}

			/// Returns the identifier as a string slice.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, $alphabet, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;

/// Characters an identifier may contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Alphabet {
	/// `[A-Za-z0-9._-]`, for values placed in URL paths and `X-Reference-Id` headers.
	PathSafe,
	/// Any visible ASCII character, for values that only travel in JSON bodies.
	VisibleAscii,
}
impl Alphabet {
	fn allows(self, c: char) -> bool {
		match self {
			Alphabet::PathSafe => c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'),
			Alphabet::VisibleAscii => c.is_ascii_graphic(),
		}
	}
}

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (reference, external, API user).
		kind: &'static str,
	},
	/// The identifier contains a character outside its alphabet.
	#[error("{kind} identifier contains the disallowed character {character:?}.")]
	InvalidCharacter {
		/// Kind of identifier (reference, external, API user).
		kind: &'static str,
		/// First offending character.
		character: char,
	},
	/// The identifier consists of dots only.
	#[error("{kind} identifier cannot consist of dots only.")]
	DotSegment {
		/// Kind of identifier (reference, external, API user).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (reference, external, API user).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

def_id! {
	ReferenceId,
	"Transaction reference sent as `X-Reference-Id` and used in status poll paths.",
	"Reference",
	Alphabet::PathSafe
}
def_id! {
	ExternalId,
	"Caller-side identifier passed through to the remote system in request bodies.",
	"External",
	Alphabet::VisibleAscii
}
def_id! {
	ApiUserId,
	"API user (a UUID in practice), used in provisioning paths and Basic credentials.",
	"ApiUser",
	Alphabet::PathSafe
}

fn validate_view(
	kind: &'static str,
	alphabet: Alphabet,
	view: &str,
) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}
	if let Some(character) = view.chars().find(|c| !alphabet.allows(*c)) {
		return Err(IdentifierError::InvalidCharacter { kind, character });
	}
	if view.chars().all(|c| c == '.') {
		return Err(IdentifierError::DotSegment { kind });
	}

	Ok(())
}
