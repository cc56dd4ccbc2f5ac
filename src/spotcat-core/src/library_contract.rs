use crate::library::Library;
use crate::query::SearchQuery;
use crate::uri::SEARCH_URI;
use thiserror::Error;

/// Fixtures a library implementation supplies to run the shared contract suite.
#[derive(Debug, Clone)]
pub struct LibraryContractExpectations {
    /// URIs that must browse and look up to nothing, without failing.
    pub unresolvable_uris: Vec<String>,
    /// A track URI that resolves to exactly one track.
    pub track_uri: Option<String>,
}

impl Default for LibraryContractExpectations {
    fn default() -> Self {
        Self {
            unresolvable_uris: vec![
                String::new(),
                "nonsense".into(),
                "file:///music/song.mp3".into(),
                "spotify:".into(),
                "spotify:episode:123".into(),
                "spotify:toplist:xx".into(),
            ],
            track_uri: None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryContractError {
    #[error("root browse returned no entries")]
    EmptyRoot,
    #[error("root entry {uri} is not a directory")]
    RootLeaf { uri: String },
    #[error("browse of {uri} returned {count} nodes, expected none")]
    BrowseNotEmpty { uri: String, count: usize },
    #[error("lookup of {uri} returned {count} tracks, expected none")]
    LookupNotEmpty { uri: String, count: usize },
    #[error("empty search returned uri {actual}, expected spotify:search")]
    EmptySearchUri { actual: String },
    #[error("empty search returned results")]
    EmptySearchNotEmpty,
    #[error("lookup of {uri} returned {count} tracks, expected one")]
    TrackLookupCount { uri: String, count: usize },
    #[error("uri search echoed {actual}, expected {expected}")]
    UriSearchIdentity { expected: String, actual: String },
    #[error("uri search tracks differ from lookup of {uri}")]
    UriSearchTracks { uri: String },
    #[error("library error while running contract: {0}")]
    LibraryFailure(String),
}

/// Run the shared contract suite against a library implementation.
pub fn run_library_contract<L: Library + ?Sized>(
    library: &L,
    expectations: &LibraryContractExpectations,
) -> Result<(), LibraryContractError> {
    verify_root(library)?;
    verify_unresolvable(library, expectations)?;
    verify_empty_search(library)?;
    if let Some(uri) = &expectations.track_uri {
        verify_uri_search(library, uri)?;
    }
    Ok(())
}

fn verify_root<L: Library + ?Sized>(library: &L) -> Result<(), LibraryContractError> {
    let root = library.browse(library.root_uri());
    if root.is_empty() {
        return Err(LibraryContractError::EmptyRoot);
    }
    if let Some(leaf) = root.iter().find(|node| node.is_leaf()) {
        return Err(LibraryContractError::RootLeaf {
            uri: leaf.uri.clone(),
        });
    }
    Ok(())
}

fn verify_unresolvable<L: Library + ?Sized>(
    library: &L,
    expectations: &LibraryContractExpectations,
) -> Result<(), LibraryContractError> {
    for uri in &expectations.unresolvable_uris {
        let nodes = library.browse(uri);
        if !nodes.is_empty() {
            return Err(LibraryContractError::BrowseNotEmpty {
                uri: uri.clone(),
                count: nodes.len(),
            });
        }
        let tracks = library.lookup(uri);
        if !tracks.is_empty() {
            return Err(LibraryContractError::LookupNotEmpty {
                uri: uri.clone(),
                count: tracks.len(),
            });
        }
    }
    Ok(())
}

fn verify_empty_search<L: Library + ?Sized>(library: &L) -> Result<(), LibraryContractError> {
    let queries = [
        SearchQuery::new(),
        SearchQuery::new().with("track_no", ["5"]),
    ];
    for query in &queries {
        let result = library
            .search(query, None, false)
            .map_err(|e| LibraryContractError::LibraryFailure(e.to_string()))?;
        if result.uri != SEARCH_URI {
            return Err(LibraryContractError::EmptySearchUri { actual: result.uri });
        }
        if !result.is_empty() {
            return Err(LibraryContractError::EmptySearchNotEmpty);
        }
    }
    Ok(())
}

fn verify_uri_search<L: Library + ?Sized>(
    library: &L,
    uri: &str,
) -> Result<(), LibraryContractError> {
    let looked_up = library.lookup(uri);
    if looked_up.len() != 1 || looked_up[0].uri() != uri {
        return Err(LibraryContractError::TrackLookupCount {
            uri: uri.to_owned(),
            count: looked_up.len(),
        });
    }

    let uris = [uri.to_owned()];
    let result = library
        .search(&SearchQuery::new(), Some(&uris), false)
        .map_err(|e| LibraryContractError::LibraryFailure(e.to_string()))?;
    if result.uri != uri {
        return Err(LibraryContractError::UriSearchIdentity {
            expected: uri.to_owned(),
            actual: result.uri,
        });
    }
    if result.tracks != looked_up {
        return Err(LibraryContractError::UriSearchTracks {
            uri: uri.to_owned(),
        });
    }
    Ok(())
}
