#![allow(dead_code)]

use spotcat_core::session::{
    ContainerHandle, Link, LinkKind, Loadable, NativeAlbum, NativeArtist, NativeSession,
    NativeTrack, SessionError, SessionResult, ToplistCallback, ToplistRequest, TrackContainer,
    TrackHandle,
};
use spotcat_core::uri::CatalogUri;
use spotcat_core::{LibraryError, LibraryResult, SpotifyConfig};
use spotify_provider::models::SearchResponse;
use spotify_provider::{SearchApi, SearchRequest, SpotifyLibrary};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

fn spawn_after(delay: Duration, f: impl FnOnce() + Send + 'static) {
    thread::spawn(move || {
        thread::sleep(delay);
        f();
    });
}

pub struct FakeTrack {
    pub uri: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub year: u32,
    pub duration_ms: u32,
    pub index: u32,
    loaded: AtomicBool,
}

impl FakeTrack {
    pub fn new(id: &str, name: &str, loaded: bool) -> Arc<Self> {
        Arc::new(Self {
            uri: format!("spotify:track:{id}"),
            name: name.into(),
            artist: "ABBA".into(),
            album: "Arrival".into(),
            year: 1976,
            duration_ms: 230_000,
            index: 2,
            loaded: AtomicBool::new(loaded),
        })
    }

    pub fn load_after(self: &Arc<Self>, delay: Duration) {
        let track = Arc::clone(self);
        spawn_after(delay, move || track.loaded.store(true, Ordering::SeqCst));
    }

    pub fn finish_loading(&self) {
        self.loaded.store(true, Ordering::SeqCst);
    }
}

impl Loadable for FakeTrack {
    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }
}

impl NativeTrack for FakeTrack {
    fn uri(&self) -> String {
        self.uri.clone()
    }

    fn name(&self) -> Option<String> {
        self.is_loaded().then(|| self.name.clone())
    }

    fn artists(&self) -> Vec<NativeArtist> {
        if !self.is_loaded() {
            return Vec::new();
        }
        vec![NativeArtist {
            uri: "spotify:artist:abba".into(),
            name: Some(self.artist.clone()),
        }]
    }

    fn album(&self) -> Option<NativeAlbum> {
        self.is_loaded().then(|| NativeAlbum {
            uri: "spotify:album:arrival".into(),
            name: Some(self.album.clone()),
            artist: Some(NativeArtist {
                uri: "spotify:artist:abba".into(),
                name: Some(self.artist.clone()),
            }),
            year: Some(self.year),
        })
    }

    fn duration_ms(&self) -> Option<u32> {
        self.is_loaded().then_some(self.duration_ms)
    }

    fn index(&self) -> Option<u32> {
        self.is_loaded().then_some(self.index)
    }

    fn disc(&self) -> Option<u32> {
        self.is_loaded().then_some(1)
    }
}

/// Album/artist browser or playlist.
pub struct FakeContainer {
    tracks: Vec<TrackHandle>,
    loaded: AtomicBool,
}

impl FakeContainer {
    pub fn new(tracks: Vec<Arc<FakeTrack>>, loaded: bool) -> Arc<Self> {
        Arc::new(Self {
            tracks: tracks.into_iter().map(|t| t as TrackHandle).collect(),
            loaded: AtomicBool::new(loaded),
        })
    }

    pub fn load_after(self: &Arc<Self>, delay: Duration) {
        let container = Arc::clone(self);
        spawn_after(delay, move || container.loaded.store(true, Ordering::SeqCst));
    }
}

impl Loadable for FakeContainer {
    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }
}

impl TrackContainer for FakeContainer {
    fn tracks(&self) -> Vec<TrackHandle> {
        if self.is_loaded() {
            self.tracks.clone()
        } else {
            Vec::new()
        }
    }
}

#[derive(Clone, Copy)]
pub enum ToplistDelivery {
    Immediate,
    After(Duration),
    /// Holds on to the callback and never fires it.
    Stall,
    /// Drops the callback without firing it.
    Drop,
    /// Rejects the request outright.
    Refuse,
}

enum Entity {
    Track(Arc<FakeTrack>),
    Album(Arc<FakeContainer>),
    Artist(Arc<FakeContainer>),
    Playlist(Arc<FakeContainer>),
    Other,
}

pub struct FakeSession {
    entities: HashMap<String, Entity>,
    toplists: HashMap<String, Vec<Arc<FakeTrack>>>,
    delivery: ToplistDelivery,
    connected: AtomicBool,
    pub toplist_requests: Mutex<Vec<ToplistRequest>>,
    stalled: Mutex<Vec<ToplistCallback>>,
}

impl Default for FakeSession {
    fn default() -> Self {
        Self {
            entities: HashMap::new(),
            toplists: HashMap::new(),
            delivery: ToplistDelivery::Immediate,
            connected: AtomicBool::new(true),
            toplist_requests: Mutex::new(Vec::new()),
            stalled: Mutex::new(Vec::new()),
        }
    }
}

impl FakeSession {
    pub fn with_track(mut self, track: &Arc<FakeTrack>) -> Self {
        self.entities
            .insert(track.uri.clone(), Entity::Track(Arc::clone(track)));
        self
    }

    pub fn with_album(mut self, uri: &str, album: &Arc<FakeContainer>) -> Self {
        self.entities
            .insert(uri.into(), Entity::Album(Arc::clone(album)));
        self
    }

    pub fn with_artist(mut self, uri: &str, artist: &Arc<FakeContainer>) -> Self {
        self.entities
            .insert(uri.into(), Entity::Artist(Arc::clone(artist)));
        self
    }

    pub fn with_playlist(mut self, uri: &str, playlist: &Arc<FakeContainer>) -> Self {
        self.entities
            .insert(uri.into(), Entity::Playlist(Arc::clone(playlist)));
        self
    }

    pub fn with_other(mut self, uri: &str) -> Self {
        self.entities.insert(uri.into(), Entity::Other);
        self
    }

    pub fn with_toplist(mut self, region: &str, tracks: Vec<Arc<FakeTrack>>) -> Self {
        self.toplists.insert(region.into(), tracks);
        self
    }

    pub fn with_delivery(mut self, delivery: ToplistDelivery) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn disconnected(self) -> Self {
        self.connected.store(false, Ordering::SeqCst);
        self
    }

    pub fn toplist_regions(&self) -> Vec<String> {
        self.toplist_requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.region.as_str().to_owned())
            .collect()
    }

    fn entity(&self, uri: &str) -> SessionResult<&Entity> {
        self.entities.get(uri).ok_or_else(|| SessionError::InvalidLink {
            uri: uri.to_owned(),
        })
    }

    fn container(&self, link: &Link, kind: LinkKind) -> SessionResult<ContainerHandle> {
        let container = match (self.entity(link.uri.as_str())?, kind) {
            (Entity::Album(c), LinkKind::Album)
            | (Entity::Artist(c), LinkKind::Artist)
            | (Entity::Playlist(c), LinkKind::Playlist) => Arc::clone(c),
            _ => {
                return Err(SessionError::Failed {
                    message: format!("{} is not a {kind:?}", link.uri),
                })
            }
        };
        Ok(container)
    }
}

impl NativeSession for FakeSession {
    fn link(&self, uri: &str) -> SessionResult<Link> {
        let kind = match self.entity(uri)? {
            Entity::Track(_) => LinkKind::Track,
            Entity::Album(_) => LinkKind::Album,
            Entity::Artist(_) => LinkKind::Artist,
            Entity::Playlist(_) => LinkKind::Playlist,
            Entity::Other => LinkKind::Other,
        };
        let uri = CatalogUri::parse(uri).map_err(|_| SessionError::InvalidLink {
            uri: uri.to_owned(),
        })?;
        Ok(Link { uri, kind })
    }

    fn track(&self, link: &Link) -> SessionResult<TrackHandle> {
        match self.entity(link.uri.as_str())? {
            Entity::Track(track) => Ok(Arc::clone(track) as TrackHandle),
            _ => Err(SessionError::InvalidLink {
                uri: link.uri.to_string(),
            }),
        }
    }

    fn browse_album(&self, link: &Link) -> SessionResult<ContainerHandle> {
        self.container(link, LinkKind::Album)
    }

    fn browse_artist(&self, link: &Link) -> SessionResult<ContainerHandle> {
        self.container(link, LinkKind::Artist)
    }

    fn playlist(&self, link: &Link) -> SessionResult<ContainerHandle> {
        self.container(link, LinkKind::Playlist)
    }

    fn toplist(&self, request: ToplistRequest, callback: ToplistCallback) -> SessionResult<()> {
        let tracks: Vec<TrackHandle> = self
            .toplists
            .get(request.region.as_str())
            .map(|tracks| tracks.iter().map(|t| Arc::clone(t) as TrackHandle).collect())
            .unwrap_or_default();
        self.toplist_requests.lock().unwrap().push(request);

        match self.delivery {
            ToplistDelivery::Immediate => spawn_after(Duration::ZERO, move || callback(tracks)),
            ToplistDelivery::After(delay) => spawn_after(delay, move || callback(tracks)),
            ToplistDelivery::Stall => self.stalled.lock().unwrap().push(callback),
            ToplistDelivery::Drop => drop(callback),
            ToplistDelivery::Refuse => {
                return Err(SessionError::Unavailable {
                    message: "toplists are offline".into(),
                })
            }
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

/// Search API answering every request with the same JSON body.
pub struct FakeSearchApi {
    body: Result<String, u16>,
    pub requests: Mutex<Vec<SearchRequest>>,
}

impl FakeSearchApi {
    pub fn with_json(body: &str) -> Arc<Self> {
        Arc::new(Self {
            body: Ok(body.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            body: Err(status),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl SearchApi for FakeSearchApi {
    fn search(&self, request: &SearchRequest) -> LibraryResult<SearchResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.body {
            Ok(body) => serde_json::from_str(body).map_err(|e| LibraryError::Decode {
                message: e.to_string(),
            }),
            Err(status) => Err(LibraryError::Remote { status: *status }),
        }
    }
}

pub fn fast_config() -> SpotifyConfig {
    SpotifyConfig {
        timeout: 1,
        ..SpotifyConfig::default()
    }
}

pub fn library(
    config: SpotifyConfig,
    session: FakeSession,
    web: &Arc<FakeSearchApi>,
) -> (SpotifyLibrary, Arc<FakeSession>) {
    let session = Arc::new(session);
    let library = SpotifyLibrary::new(
        config,
        Arc::clone(&session) as Arc<dyn NativeSession>,
        Arc::clone(web) as Arc<dyn SearchApi>,
    );
    (library, session)
}

/// Counts WARN events whose message contains `needle`.
#[derive(Clone, Default)]
pub struct WarningCounter {
    needle: &'static str,
    count: Arc<Mutex<usize>>,
}

impl WarningCounter {
    pub fn new(needle: &'static str) -> Self {
        Self {
            needle,
            count: Arc::default(),
        }
    }

    pub fn count(&self) -> usize {
        *self.count.lock().unwrap()
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for WarningCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::WARN {
            return;
        }
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        if visitor.0.contains(self.needle) {
            *self.count.lock().unwrap() += 1;
        }
    }
}
