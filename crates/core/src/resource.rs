//! Resource identifiers for tracked documents

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// URI scheme of documents that were never saved to a durable location
pub const UNTITLED_SCHEME: &str = "untitled";

/// Errors produced while parsing a resource identifier
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("invalid resource '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

/// A unique URI-like key naming a document
///
/// Examples: `file:///home/me/notes.md`, `untitled:Untitled-1`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resource(Url);

impl Resource {
    /// Parse a resource from its string form
    pub fn parse(input: &str) -> Result<Self, ResourceError> {
        Url::parse(input)
            .map(Self)
            .map_err(|source| ResourceError::Invalid {
                input: input.to_string(),
                source,
            })
    }

    /// Build an untitled resource, e.g. `untitled:Untitled-3`
    pub fn untitled(name: &str) -> Result<Self, ResourceError> {
        Self::parse(&format!("{UNTITLED_SCHEME}:{name}"))
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// True for never-saved documents
    pub fn is_untitled(&self) -> bool {
        self.scheme() == UNTITLED_SCHEME
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for Resource {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Resource {
    type Error = ResourceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Resource> for String {
    fn from(value: Resource) -> Self {
        value.0.into()
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource({})", self.0)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
