//! URIs addressing catalog entities and the virtual browse tree.
//!
//! Every URI has the shape `scheme:kind[:identifier]`. Entity URIs
//! (`spotify:track:<id>`, `spotify:album:<id>`, ...) are handed to the native
//! session for link resolution; the `toplist` kind and the root directory are
//! virtual nodes that only exist in the browse tree.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SCHEME: &str = "spotify";

/// Root of the browse tree.
pub const ROOT_URI: &str = "spotify:directory";

/// Identity of search results that are not tied to a single query string.
pub const SEARCH_URI: &str = "spotify:search";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UriKind {
    Track,
    Album,
    Artist,
    Playlist,
    User,
    Toplist,
    Search,
    Directory,
    Other(String),
}

impl UriKind {
    fn parse(kind: &str) -> Self {
        match kind {
            "track" => Self::Track,
            "album" => Self::Album,
            "artist" => Self::Artist,
            "playlist" => Self::Playlist,
            "user" => Self::User,
            "toplist" => Self::Toplist,
            "search" => Self::Search,
            "directory" => Self::Directory,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Track => "track",
            Self::Album => "album",
            Self::Artist => "artist",
            Self::Playlist => "playlist",
            Self::User => "user",
            Self::Toplist => "toplist",
            Self::Search => "search",
            Self::Directory => "directory",
            Self::Other(kind) => kind,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UriError {
    #[error("uri has no scheme: {0}")]
    MissingScheme(String),
    #[error("unsupported uri scheme '{scheme}' in {uri}")]
    UnsupportedScheme { scheme: String, uri: String },
    #[error("uri has no kind: {0}")]
    MissingKind(String),
}

/// A parsed, immutable catalog URI.
///
/// The original string is kept verbatim; `kind` is matched case-insensitively
/// so `spotify:Album:...` and `spotify:album:...` classify the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogUri {
    raw: String,
    kind: UriKind,
    identifier: Option<String>,
}

impl CatalogUri {
    pub fn parse(uri: &str) -> Result<Self, UriError> {
        let mut parts = uri.splitn(3, ':');
        let scheme = parts.next().unwrap_or_default();
        let kind = parts
            .next()
            .ok_or_else(|| UriError::MissingScheme(uri.to_owned()))?;
        if !scheme.eq_ignore_ascii_case(SCHEME) {
            return Err(UriError::UnsupportedScheme {
                scheme: scheme.to_owned(),
                uri: uri.to_owned(),
            });
        }
        if kind.is_empty() {
            return Err(UriError::MissingKind(uri.to_owned()));
        }
        let identifier = parts.next().filter(|id| !id.is_empty()).map(str::to_owned);
        Ok(Self {
            raw: uri.to_owned(),
            kind: UriKind::parse(&kind.to_ascii_lowercase()),
            identifier,
        })
    }

    pub fn root() -> Self {
        Self {
            raw: ROOT_URI.to_owned(),
            kind: UriKind::Directory,
            identifier: None,
        }
    }

    /// `spotify:toplist:<region>`, with the region lowercased.
    pub fn toplist(region: &str) -> Self {
        let region = region.to_ascii_lowercase();
        Self {
            raw: format!("{SCHEME}:toplist:{region}"),
            kind: UriKind::Toplist,
            identifier: Some(region),
        }
    }

    /// `spotify:search:<percent-encoded query>`.
    pub fn search(query: &str) -> Self {
        let encoded = urlencoding::encode(query).into_owned();
        Self {
            raw: format!("{SCHEME}:search:{encoded}"),
            kind: UriKind::Search,
            identifier: Some(encoded),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &UriKind {
        &self.kind
    }

    /// Everything after `scheme:kind:`, e.g. `current` for `spotify:toplist:current`.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.raw == ROOT_URI
    }

    pub fn into_string(self) -> String {
        self.raw
    }
}

impl fmt::Display for CatalogUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for CatalogUri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CatalogUri {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl Serialize for CatalogUri {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for CatalogUri {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
