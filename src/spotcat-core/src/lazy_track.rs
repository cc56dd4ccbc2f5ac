//! Tracks that may be handed out before their metadata has loaded.
//!
//! A [`LazyTrack`] is either pending (backed by a URI or a native track that
//! has not finished loading) or resolved to an immutable [`Track`]. Reads
//! never block: while pending they translate the current native state, and
//! the first read that observes a loaded native track memoizes the result.
//! Identity is the URI alone, so pending and resolved tracks compare equal.

use crate::library::{LibraryError, LibraryResult};
use crate::models::{Album, Artist, Track};
use crate::session::{NativeSession, TrackHandle};
use crate::translate;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

#[derive(Clone)]
enum Source {
    /// Resolved to a native track through the session on first read.
    Link {
        session: Arc<dyn NativeSession>,
        native: Arc<OnceLock<TrackHandle>>,
    },
    Native(TrackHandle),
    /// Already materialized, e.g. from a web search response.
    Value,
}

#[derive(Clone)]
enum State {
    Pending,
    Resolved(Arc<Track>),
}

pub struct LazyTrack {
    uri: String,
    source: Source,
    state: Mutex<State>,
}

impl LazyTrack {
    /// Builds from exactly one of a URI or a native track.
    pub fn new(
        uri: Option<String>,
        native: Option<TrackHandle>,
        session: Arc<dyn NativeSession>,
    ) -> LibraryResult<Self> {
        match (uri, native) {
            (Some(uri), None) => Ok(Self::from_uri(uri, session)),
            (None, Some(native)) => Ok(Self::from_native(native)),
            _ => Err(LibraryError::InvalidTrackSource),
        }
    }

    pub fn from_uri(uri: impl Into<String>, session: Arc<dyn NativeSession>) -> Self {
        Self {
            uri: uri.into(),
            source: Source::Link {
                session,
                native: Arc::new(OnceLock::new()),
            },
            state: Mutex::new(State::Pending),
        }
    }

    pub fn from_native(native: TrackHandle) -> Self {
        Self {
            uri: native.uri(),
            source: Source::Native(native),
            state: Mutex::new(State::Pending),
        }
    }

    pub fn resolved(track: Track) -> Self {
        Self {
            uri: track.uri.clone(),
            source: Source::Value,
            state: Mutex::new(State::Resolved(Arc::new(track))),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Whether the materialized value has been memoized.
    pub fn is_resolved(&self) -> bool {
        matches!(*self.state(), State::Resolved(_))
    }

    /// Current best view of the track.
    pub fn track(&self) -> Track {
        if let State::Resolved(track) = &*self.state() {
            return Track::clone(track);
        }
        // No lock is held while the session resolves the link.
        let Some(native) = self.native() else {
            return Track::placeholder(self.uri.clone());
        };
        // Loading is monotonic, so a loaded observation here holds for the translation.
        let loaded = native.is_loaded();
        let track = translate::to_track(native.as_ref());
        if loaded {
            let mut state = self.state();
            if let State::Resolved(existing) = &*state {
                return Track::clone(existing);
            }
            *state = State::Resolved(Arc::new(track.clone()));
        }
        track
    }

    pub fn name(&self) -> String {
        self.track().name
    }

    pub fn artists(&self) -> Vec<Artist> {
        self.track().artists
    }

    pub fn album(&self) -> Option<Album> {
        self.track().album
    }

    pub fn length(&self) -> Option<u32> {
        self.track().length
    }

    pub fn track_no(&self) -> Option<u32> {
        self.track().track_no
    }

    /// Plain copy of the materialized value with `edit` applied.
    pub fn replace(&self, edit: impl FnOnce(&mut Track)) -> Track {
        let mut track = self.track();
        edit(&mut track);
        track
    }

    fn native(&self) -> Option<TrackHandle> {
        match &self.source {
            Source::Native(native) => Some(Arc::clone(native)),
            Source::Value => None,
            Source::Link { session, native } => {
                if let Some(handle) = native.get() {
                    return Some(Arc::clone(handle));
                }
                match session.track_from_uri(&self.uri) {
                    Ok(handle) => Some(Arc::clone(native.get_or_init(|| handle))),
                    Err(err) => {
                        tracing::debug!(uri = %self.uri, "failed to resolve track link: {err}");
                        None
                    }
                }
            }
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Track> for LazyTrack {
    fn from(track: Track) -> Self {
        Self::resolved(track)
    }
}

impl Clone for LazyTrack {
    fn clone(&self) -> Self {
        Self {
            uri: self.uri.clone(),
            source: self.source.clone(),
            state: Mutex::new(self.state().clone()),
        }
    }
}

impl fmt::Debug for LazyTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyTrack")
            .field("uri", &self.uri)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl PartialEq for LazyTrack {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for LazyTrack {}

impl PartialEq<Track> for LazyTrack {
    fn eq(&self, other: &Track) -> bool {
        self.uri == other.uri
    }
}

impl Hash for LazyTrack {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
    }
}

impl PartialOrd for LazyTrack {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LazyTrack {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uri.cmp(&other.uri)
    }
}
