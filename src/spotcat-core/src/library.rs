use crate::lazy_track::LazyTrack;
use crate::models::{BrowseNode, Image, SearchResult};
use crate::query::SearchQuery;
use std::collections::HashMap;
use thiserror::Error;

/// Failures a library operation surfaces to its caller.
///
/// Timeouts, unresolvable URIs, empty queries and a disconnected session are
/// not errors; they degrade to empty or partial results instead.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("network error: {message}")]
    Network { message: String },
    #[error("authentication error: {message}")]
    Authentication { message: String },
    #[error("remote service returned {status}")]
    Remote { status: u16 },
    #[error("malformed response: {message}")]
    Decode { message: String },
    #[error("a lazy track needs exactly one of a uri or a native track")]
    InvalidTrackSource,
    #[error("{message}")]
    Other { message: String },
}

pub type LibraryResult<T> = Result<T, LibraryError>;

/// Synchronous, URI-addressed view of a remote catalog.
pub trait Library: Send + Sync {
    /// Root of the browse tree.
    fn root_uri(&self) -> &str;

    /// Children of `uri`. Unknown or malformed URIs yield an empty list.
    fn browse(&self, uri: &str) -> Vec<BrowseNode>;

    /// Tracks behind `uri`, in container order. Best effort; never fails.
    fn lookup(&self, uri: &str) -> Vec<LazyTrack>;

    /// Field search, or batch lookup when `uris` (or the query's `uri`
    /// field) lists candidates.
    fn search(
        &self,
        query: &SearchQuery,
        uris: Option<&[String]>,
        exact: bool,
    ) -> LibraryResult<SearchResult>;

    fn get_images(&self, uris: &[String]) -> HashMap<String, Vec<Image>>;
}

/// Collaborator answering image lookups.
pub trait ImageSource: Send + Sync {
    fn get_images(&self, uris: &[String]) -> HashMap<String, Vec<Image>>;
}

/// Image source that knows no images.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageSource for NoImages {
    fn get_images(&self, _uris: &[String]) -> HashMap<String, Vec<Image>> {
        HashMap::new()
    }
}
