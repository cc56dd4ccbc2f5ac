use crate::SpotifyLibrary;
use spotcat_core::countries;
use spotcat_core::session::{ToplistKind, ToplistRegion, ToplistRequest, TrackHandle};
use spotcat_core::translate::to_track_node;
use spotcat_core::uri::{CatalogUri, UriKind, ROOT_URI};
use spotcat_core::wait::{wait_for_callback, WaitError};
use spotcat_core::BrowseNode;

impl SpotifyLibrary {
    pub(crate) fn browse_uri(&self, uri: &str) -> Vec<BrowseNode> {
        if uri == ROOT_URI {
            return self.root.clone();
        }

        let parsed = match CatalogUri::parse(uri) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!("not browsable: {err}");
                return Vec::new();
            }
        };

        let tracks = match parsed.kind() {
            UriKind::Album => self.album_tracks(uri),
            UriKind::User | UriKind::Playlist => self.playlist_tracks(uri),
            UriKind::Toplist => return self.browse_toplist(parsed.identifier().unwrap_or_default()),
            _ => return Vec::new(),
        };

        match tracks {
            Ok(tracks) => tracks
                .iter()
                .map(|track| to_track_node(track.as_ref()))
                .collect(),
            Err(err) => {
                tracing::debug!(uri, "failed to browse: {err}");
                Vec::new()
            }
        }
    }

    /// Country toplists are only served for codes that are both in the
    /// country table and listed in `toplist_countries`, so browsing never
    /// reaches beyond the folders offered under `spotify:toplist:countries`.
    fn browse_toplist(&self, identifier: &str) -> Vec<BrowseNode> {
        let region = match identifier.to_ascii_lowercase().as_str() {
            "countries" => return self.country_folders.clone(),
            "current" => ToplistRegion::Current,
            "all" => ToplistRegion::All,
            other => {
                let code = other.to_ascii_uppercase();
                if !countries::is_known(&code) || !self.toplist_countries.contains(&code) {
                    tracing::debug!(code = %code, "no toplist for unknown or unconfigured country");
                    return Vec::new();
                }
                ToplistRegion::Country(code)
            }
        };
        self.toplist(region)
    }

    fn toplist(&self, region: ToplistRegion) -> Vec<BrowseNode> {
        tracing::debug!(region = region.as_str(), "performing toplist browse");
        let request = ToplistRequest {
            kind: ToplistKind::Tracks,
            region: region.clone(),
        };
        let tracks = wait_for_callback(
            |completion| {
                let callback = Box::new(move |tracks: Vec<TrackHandle>| completion.complete(tracks));
                self.session.toplist(request, callback)
            },
            self.timeout,
        );

        match tracks {
            Ok(tracks) => tracks
                .iter()
                .map(|track| to_track_node(track.as_ref()))
                .collect(),
            Err(WaitError::TimedOut) => {
                tracing::warn!("{} toplist browse timed out", region.as_str());
                Vec::new()
            }
            Err(err) => {
                tracing::debug!(region = region.as_str(), "toplist browse failed: {err}");
                Vec::new()
            }
        }
    }
}
