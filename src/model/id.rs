//! Strongly typed identifiers for API records.
//!
//! Identifiers are interpolated into request paths, so validation rejects anything that could
//! change the shape of the URL.

// self
use crate::_prelude::*;

/// Declares a validated string identifier that serializes as a bare string.
macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				Self::try_from(value.into())
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value).map(|()| Self(value))
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
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
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (user, workspace, project).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (user, workspace, project).
		kind: &'static str,
	},
	/// The identifier contains a URL path, query, or fragment delimiter.
	#[error("{kind} identifier contains the reserved character `{found}`.")]
	ReservedCharacter {
		/// Kind of identifier (user, workspace, project).
		kind: &'static str,
		/// First offending character.
		found: char,
	},
	/// The identifier is a relative path segment.
	#[error("{kind} identifier cannot be a dot segment.")]
	DotSegment {
		/// Kind of identifier (user, workspace, project).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed length.
	#[error("{kind} identifier exceeds {max} bytes.")]
	TooLong {
		/// Kind of identifier (user, workspace, project).
		kind: &'static str,
		/// Maximum permitted byte count.
		max: usize,
	},
}

def_id! { UserId, "Identifier of a platform user.", "User" }
def_id! { WorkspaceId, "Identifier of a workspace.", "Workspace" }
def_id! { ProjectId, "Identifier of a project within a workspace.", "Project" }

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if let Some(found) = view.chars().find(|c| matches!(c, '/' | '\\' | '?' | '#' | '%')) {
		return Err(IdentifierError::ReservedCharacter { kind, found });
	}
	if view == "." || view == ".." {
		return Err(IdentifierError::DotSegment { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}
