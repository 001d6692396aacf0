//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that
//! identifiers, text lengths, URLs and categories are enforced at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string was shorter than its lower bound.
    #[error("{field} must be at least {min} characters long")]
    TooShort { field: &'static str, min: usize },
    /// A string exceeded its upper bound.
    #[error("{field} must be at most {max} characters long")]
    TooLong { field: &'static str, max: usize },
    /// URL validation failed.
    #[error("{0} must be a valid http(s) URL with a host")]
    InvalidUrl(&'static str),
    /// A category outside the fixed enumeration.
    #[error(
        "category '{0}' must be one of: {allowed}",
        allowed = BookmarkCategory::ALL.map(BookmarkCategory::as_str).join(", ")
    )]
    UnknownCategory(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Identifier strings kept exactly as supplied.
///
/// Lookups compare `(id, user_id)` byte for byte, so no trimming or other
/// normalisation happens here. An empty value is allowed and simply matches
/// nothing stored under another key.
macro_rules! verbatim_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new<S: Into<String>>(value: S) -> Self {
                Self(value.into())
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

/// Strings whose character count must fall within `[$min, $max]`.
///
/// Unlike the non-empty newtypes the value is kept verbatim: titles and
/// descriptions are user prose and are echoed back exactly as supplied.
macro_rules! bounded_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $min:expr, $max:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub const MIN_CHARS: usize = $min;
            pub const MAX_CHARS: usize = $max;

            /// Constructs a value after checking its length in characters.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let value = value.into();
                let chars = value.chars().count();
                if chars < Self::MIN_CHARS {
                    return Err(TypeConstraintError::TooShort {
                        field: $field,
                        min: Self::MIN_CHARS,
                    });
                }
                if chars > Self::MAX_CHARS {
                    return Err(TypeConstraintError::TooLong {
                        field: $field,
                        max: Self::MAX_CHARS,
                    });
                }
                Ok(Self(value))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

verbatim_string_newtype!(
    BookmarkId,
    "Opaque bookmark identifier, unique within a user's partition."
);
verbatim_string_newtype!(
    UserId,
    "Owner identifier; doubles as the storage partition key."
);

bounded_string_newtype!(BookmarkTitle, "Bookmark title, 1 to 200 characters.", "title", 1, 200);
bounded_string_newtype!(
    BookmarkDescription,
    "Free-form bookmark description, at most 500 characters.",
    "description",
    0,
    500
);

impl BookmarkId {
    /// Generates a fresh random (UUID v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl UserId {
    /// Owner used when callers do not name one.
    pub const DEFAULT: &'static str = "default_user";
}

impl Default for UserId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

/// Absolute http(s) URL stored in its canonical serialized form.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct BookmarkUrl(String);

impl BookmarkUrl {
    /// Parses the input and keeps the canonical form (`https://ex.com` becomes
    /// `https://ex.com/`). Only `http` and `https` URLs with a host are accepted.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "url")?;
        let parsed =
            url::Url::parse(&trimmed).map_err(|_| TypeConstraintError::InvalidUrl("url"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TypeConstraintError::InvalidUrl("url"));
        }
        match parsed.host_str() {
            Some(host) if !host.is_empty() => Ok(Self(parsed.to_string())),
            _ => Err(TypeConstraintError::InvalidUrl("url")),
        }
    }

    /// Borrow the URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned URL.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for BookmarkUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for BookmarkUrl {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BookmarkUrl> for String {
    fn from(value: BookmarkUrl) -> Self {
        value.0
    }
}

impl PartialEq<&str> for BookmarkUrl {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Fixed set of bookmark categories.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum BookmarkCategory {
    Work,
    Personal,
    Education,
    Entertainment,
    News,
    Shopping,
    Social,
    Technology,
    #[default]
    Other,
}

impl BookmarkCategory {
    /// Every category, in declaration order.
    pub const ALL: [BookmarkCategory; 9] = [
        Self::Work,
        Self::Personal,
        Self::Education,
        Self::Entertainment,
        Self::News,
        Self::Shopping,
        Self::Social,
        Self::Technology,
        Self::Other,
    ];

    /// String representation used in persistence and on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Education => "education",
            Self::Entertainment => "entertainment",
            Self::News => "news",
            Self::Shopping => "shopping",
            Self::Social => "social",
            Self::Technology => "technology",
            Self::Other => "other",
        }
    }
}

impl Display for BookmarkCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for BookmarkCategory {
    type Error = TypeConstraintError;

    /// Case-sensitive: `"Work"` is rejected.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| TypeConstraintError::UnknownCategory(value.to_string()))
    }
}

impl TryFrom<String> for BookmarkCategory {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<BookmarkCategory> for String {
    fn from(value: BookmarkCategory) -> Self {
        value.as_str().to_string()
    }
}
