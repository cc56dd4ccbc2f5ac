use crate::mapping::{web_to_album, web_to_artist, web_to_track};
use crate::models::SearchResponse;
use crate::web::{SearchApi, SearchRequest};
use crate::SpotifyLibrary;
use spotcat_core::config::{SearchCaps, MAX_SEARCH_RESULTS};
use spotcat_core::query::translate;
use spotcat_core::uri::{CatalogUri, SEARCH_URI};
use spotcat_core::{LazyTrack, LibraryResult, SearchQuery, SearchResult};

impl SpotifyLibrary {
    pub(crate) fn search_catalog(
        &self,
        query: &SearchQuery,
        uris: Option<&[String]>,
        exact: bool,
    ) -> LibraryResult<SearchResult> {
        if exact {
            tracing::debug!("exact search is not supported, running a regular search");
        }

        let candidates = match uris {
            Some(uris) if !uris.is_empty() => uris,
            _ => query.uris(),
        };
        if !candidates.is_empty() {
            return Ok(self.search_uris(candidates));
        }

        let spotify_query = translate(query);
        if spotify_query.is_empty() {
            tracing::debug!("Spotify search aborted due to empty query");
            return Ok(SearchResult::default());
        }

        if !self.session.is_connected() {
            tracing::debug!("Not connected: Spotify search cancelled");
            return Ok(SearchResult::default());
        }

        search_web(self.web.as_ref(), &spotify_query, self.config.search_caps())
    }

    /// Batch lookup of pre-resolved candidates.
    fn search_uris(&self, uris: &[String]) -> SearchResult {
        let tracks = uris.iter().flat_map(|uri| self.lookup_uri(uri)).collect();
        let uri = match uris {
            [single] => single.clone(),
            _ => SEARCH_URI.to_owned(),
        };
        SearchResult {
            tracks,
            ..SearchResult::empty(uri)
        }
    }
}

/// Runs an already translated query against the web API.
pub fn search_web(
    api: &dyn SearchApi,
    spotify_query: &str,
    caps: SearchCaps,
) -> LibraryResult<SearchResult> {
    tracing::debug!(query = spotify_query, "Spotify search query");
    let limit = caps.request_limit();
    if limit.clamped {
        tracing::warn!(
            "Spotify currently allows maximum {MAX_SEARCH_RESULTS} search results of each type. \
             Please set the config values spotify/search_album_count, \
             spotify/search_artist_count and spotify/search_track_count to at most \
             {MAX_SEARCH_RESULTS}."
        );
    }

    let response = api.search(&SearchRequest::new(spotify_query, limit.limit))?;
    Ok(to_search_result(
        CatalogUri::search(spotify_query).into_string(),
        response,
        caps,
    ))
}

fn to_search_result(uri: String, response: SearchResponse, caps: SearchCaps) -> SearchResult {
    let albums = response
        .albums
        .map(|page| {
            page.items
                .iter()
                .take(caps.albums as usize)
                .map(web_to_album)
                .collect()
        })
        .unwrap_or_default();
    let artists = response
        .artists
        .map(|page| {
            page.items
                .iter()
                .take(caps.artists as usize)
                .map(web_to_artist)
                .collect()
        })
        .unwrap_or_default();
    let tracks = response
        .tracks
        .map(|page| {
            page.items
                .iter()
                .take(caps.tracks as usize)
                .map(|track| LazyTrack::resolved(web_to_track(track)))
                .collect()
        })
        .unwrap_or_default();

    SearchResult {
        uri,
        albums,
        artists,
        tracks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> SearchResponse {
        serde_json::from_str(json).expect("valid fixture")
    }

    const CAPS: SearchCaps = SearchCaps {
        albums: 1,
        artists: 2,
        tracks: 2,
    };

    #[test]
    fn absent_categories_are_empty() {
        let result = to_search_result("spotify:search:x".into(), response("{}"), CAPS);
        assert!(result.is_empty());
        assert_eq!(result.uri, "spotify:search:x");
    }

    #[test]
    fn categories_are_truncated_independently() {
        let body = r#"{
            "albums": {"items": [
                {"uri": "spotify:album:1", "name": "One"},
                {"uri": "spotify:album:2", "name": "Two"}
            ]},
            "artists": {"items": [
                {"uri": "spotify:artist:1", "name": "A"}
            ]}
        }"#;
        let result = to_search_result("spotify:search:x".into(), response(body), CAPS);
        assert_eq!(result.albums.len(), 1);
        assert_eq!(result.albums[0].name, "One");
        assert_eq!(result.artists.len(), 1);
        assert!(result.tracks.is_empty());
    }

    #[test]
    fn web_tracks_arrive_resolved() {
        let body = r#"{"tracks": {"items": [
            {"uri": "spotify:track:1", "name": "First", "duration_ms": 1000}
        ]}}"#;
        let result = to_search_result("spotify:search:x".into(), response(body), CAPS);
        assert!(result.tracks[0].is_resolved());
        assert_eq!(result.tracks[0].length(), Some(1000));
    }
}
