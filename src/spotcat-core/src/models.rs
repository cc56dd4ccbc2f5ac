use crate::lazy_track::LazyTrack;
use crate::uri::SEARCH_URI;
use serde::{Deserialize, Serialize};

/// Name shown for tracks whose metadata has not arrived yet.
pub const LOADING_NAME: &str = "[loading...]";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artist {
    pub uri: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Album {
    pub uri: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    /// Release date, `YYYY` or `YYYY-MM-DD` depending on the source.
    #[serde(default)]
    pub date: Option<String>,
}

/// Fully materialized track metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub album: Option<Album>,
    /// Duration in milliseconds when known.
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub track_no: Option<u32>,
    #[serde(default)]
    pub disc_no: Option<u32>,
    #[serde(default)]
    pub date: Option<String>,
    /// Stream bitrate in kbit/s.
    #[serde(default)]
    pub bitrate: Option<u32>,
}

impl Track {
    /// Stand-in for a track that has not loaded; only the URI is known.
    pub fn placeholder(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: LOADING_NAME.into(),
            artists: Vec::new(),
            album: None,
            length: None,
            track_no: None,
            disc_no: None,
            date: None,
            bitrate: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub uri: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    Track,
}

/// One entry of a `browse` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseNode {
    pub uri: String,
    pub name: String,
    pub kind: NodeKind,
}

impl BrowseNode {
    pub fn directory(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            kind: NodeKind::Directory,
        }
    }

    pub fn track(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            kind: NodeKind::Track,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Track
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub uri: String,
    pub albums: Vec<Album>,
    pub artists: Vec<Artist>,
    pub tracks: Vec<LazyTrack>,
}

impl SearchResult {
    pub fn empty(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            albums: Vec::new(),
            artists: Vec::new(),
            tracks: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty() && self.artists.is_empty() && self.tracks.is_empty()
    }
}

impl Default for SearchResult {
    fn default() -> Self {
        Self::empty(SEARCH_URI)
    }
}
