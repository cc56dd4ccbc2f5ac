//! Contract of the native session this crate drives.
//!
//! The native layer loads objects lazily on its own thread. Objects expose
//! `is_loaded()`; accessors on an unloaded object return whatever partial
//! state is available (usually nothing). Nothing here mutates native objects.

use crate::uri::CatalogUri;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid link: {uri}")]
    InvalidLink { uri: String },
    #[error("session unavailable: {message}")]
    Unavailable { message: String },
    #[error("native call failed: {message}")]
    Failed { message: String },
}

pub type SessionResult<T> = Result<T, SessionError>;

/// An object whose data arrives asynchronously.
pub trait Loadable {
    fn is_loaded(&self) -> bool;
}

/// Entity kind a link resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Track,
    Album,
    Artist,
    Playlist,
    Other,
}

/// A resolved native link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub uri: CatalogUri,
    pub kind: LinkKind,
}

/// Artist reference as the native layer reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeArtist {
    pub uri: String,
    pub name: Option<String>,
}

/// Album reference as the native layer reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeAlbum {
    pub uri: String,
    pub name: Option<String>,
    pub artist: Option<NativeArtist>,
    pub year: Option<u32>,
}

/// A native track. Metadata accessors return `None`/empty until loaded.
pub trait NativeTrack: Loadable + Send + Sync {
    fn uri(&self) -> String;
    fn name(&self) -> Option<String>;
    fn artists(&self) -> Vec<NativeArtist>;
    fn album(&self) -> Option<NativeAlbum>;
    fn duration_ms(&self) -> Option<u32>;
    fn index(&self) -> Option<u32>;
    fn disc(&self) -> Option<u32>;
}

pub type TrackHandle = Arc<dyn NativeTrack>;

/// Album/artist browser or playlist: an ordered, lazily loaded track list.
pub trait TrackContainer: Loadable + Send + Sync {
    /// Tracks in container order; may be partial while loading.
    fn tracks(&self) -> Vec<TrackHandle>;
}

pub type ContainerHandle = Arc<dyn TrackContainer>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToplistKind {
    Tracks,
}

impl ToplistKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToplistKind::Tracks => "tracks",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToplistRegion {
    /// The logged in user's personal toplist.
    Current,
    /// The global toplist.
    All,
    /// Uppercase ISO country code.
    Country(String),
}

impl ToplistRegion {
    pub fn as_str(&self) -> &str {
        match self {
            ToplistRegion::Current => "current",
            ToplistRegion::All => "all",
            ToplistRegion::Country(code) => code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToplistRequest {
    pub kind: ToplistKind,
    pub region: ToplistRegion,
}

/// Invoked once, from a native thread, when a toplist is ready.
pub type ToplistCallback = Box<dyn FnOnce(Vec<TrackHandle>) + Send + 'static>;

pub trait NativeSession: Send + Sync {
    /// Resolves a URI to a native link.
    fn link(&self, uri: &str) -> SessionResult<Link>;

    fn track(&self, link: &Link) -> SessionResult<TrackHandle>;

    fn browse_album(&self, link: &Link) -> SessionResult<ContainerHandle>;

    fn browse_artist(&self, link: &Link) -> SessionResult<ContainerHandle>;

    fn playlist(&self, link: &Link) -> SessionResult<ContainerHandle>;

    /// Starts a toplist request; `callback` fires exactly once when ready.
    fn toplist(&self, request: ToplistRequest, callback: ToplistCallback) -> SessionResult<()>;

    fn is_connected(&self) -> bool;

    /// Resolves a URI straight to a native track.
    fn track_from_uri(&self, uri: &str) -> SessionResult<TrackHandle> {
        let link = self.link(uri)?;
        if link.kind != LinkKind::Track {
            return Err(SessionError::InvalidLink { uri: uri.to_owned() });
        }
        self.track(&link)
    }
}
