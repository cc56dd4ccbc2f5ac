use crate::SpotifyLibrary;
use spotcat_core::session::{Link, LinkKind, SessionResult, TrackHandle};
use spotcat_core::wait::wait_until_loaded;
use spotcat_core::LazyTrack;
use std::sync::Arc;

impl SpotifyLibrary {
    pub(crate) fn lookup_uri(&self, uri: &str) -> Vec<LazyTrack> {
        match self.try_lookup(uri) {
            Ok(tracks) => tracks,
            Err(err) => {
                tracing::debug!("failed to lookup \"{uri}\": {err}");
                Vec::new()
            }
        }
    }

    fn try_lookup(&self, uri: &str) -> SessionResult<Vec<LazyTrack>> {
        let link = self.session.link(uri)?;
        let tracks = match link.kind {
            LinkKind::Track => return self.lookup_track(&link),
            LinkKind::Album => self.load_album(&link)?,
            LinkKind::Artist => {
                let browser = self.session.browse_artist(&link)?;
                wait_until_loaded(browser.as_ref(), self.timeout);
                browser.tracks()
            }
            LinkKind::Playlist => self.load_playlist(&link)?,
            LinkKind::Other => Vec::new(),
        };
        Ok(tracks.into_iter().map(LazyTrack::from_native).collect())
    }

    /// A track that is still loading at the deadline comes back as a URI-backed
    /// proxy that resolves on a later read.
    fn lookup_track(&self, link: &Link) -> SessionResult<Vec<LazyTrack>> {
        let track = self.session.track(link)?;
        if wait_until_loaded(track.as_ref(), self.timeout) {
            Ok(vec![LazyTrack::from_native(track)])
        } else {
            Ok(vec![LazyTrack::from_uri(
                link.uri.as_str(),
                Arc::clone(&self.session),
            )])
        }
    }

    pub(crate) fn album_tracks(&self, uri: &str) -> SessionResult<Vec<TrackHandle>> {
        let link = self.session.link(uri)?;
        self.load_album(&link)
    }

    pub(crate) fn playlist_tracks(&self, uri: &str) -> SessionResult<Vec<TrackHandle>> {
        let link = self.session.link(uri)?;
        self.load_playlist(&link)
    }

    fn load_album(&self, link: &Link) -> SessionResult<Vec<TrackHandle>> {
        let browser = self.session.browse_album(link)?;
        wait_until_loaded(browser.as_ref(), self.timeout);
        Ok(browser.tracks())
    }

    fn load_playlist(&self, link: &Link) -> SessionResult<Vec<TrackHandle>> {
        let playlist = self.session.playlist(link)?;
        wait_until_loaded(playlist.as_ref(), self.timeout);
        Ok(playlist.tracks())
    }
}
