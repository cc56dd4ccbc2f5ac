//! Spotify catalog exposed through the synchronous [`Library`] API.
//!
//! The native session loads everything lazily on its own thread; this crate
//! turns that into bounded blocking calls. Browsing and lookup go through the
//! native session, field search through the web API.

mod browse;
mod lookup;
mod mapping;
pub mod models;
mod search;
pub mod web;

pub use search::search_web;
pub use web::{SearchApi, SearchRequest, WebClient, WebClientConfig};

use spotcat_core::countries;
use spotcat_core::session::NativeSession;
use spotcat_core::uri::{CatalogUri, ROOT_URI};
use spotcat_core::{
    BrowseNode, Image, ImageSource, LazyTrack, Library, LibraryResult, NoImages, SearchQuery,
    SearchResult, SpotifyConfig,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub struct SpotifyLibrary {
    session: Arc<dyn NativeSession>,
    web: Arc<dyn SearchApi>,
    images: Arc<dyn ImageSource>,
    config: SpotifyConfig,
    timeout: Duration,
    root: Vec<BrowseNode>,
    /// Uppercase codes of the configured toplist countries.
    toplist_countries: Vec<String>,
    country_folders: Vec<BrowseNode>,
}

impl SpotifyLibrary {
    pub fn new(
        config: SpotifyConfig,
        session: Arc<dyn NativeSession>,
        web: Arc<dyn SearchApi>,
    ) -> Self {
        let mut root = vec![
            BrowseNode::directory(CatalogUri::toplist("current").as_str(), "Personal top tracks"),
            BrowseNode::directory(CatalogUri::toplist("all").as_str(), "Global top tracks"),
        ];

        let toplist_countries: Vec<String> = config
            .toplist_countries
            .iter()
            .map(|code| code.to_ascii_uppercase())
            .collect();
        if !toplist_countries.is_empty() {
            root.push(BrowseNode::directory(
                CatalogUri::toplist("countries").as_str(),
                "Country top tracks",
            ));
        }
        let country_folders = toplist_countries
            .iter()
            .map(|code| {
                let name = countries::country_name(code).unwrap_or(code.as_str());
                BrowseNode::directory(CatalogUri::toplist(code).as_str(), name)
            })
            .collect();

        Self {
            session,
            web,
            images: Arc::new(NoImages),
            timeout: config.load_timeout(),
            config,
            root,
            toplist_countries,
            country_folders,
        }
    }

    pub fn with_images(mut self, images: Arc<dyn ImageSource>) -> Self {
        self.images = images;
        self
    }

    pub fn config(&self) -> &SpotifyConfig {
        &self.config
    }
}

impl Library for SpotifyLibrary {
    fn root_uri(&self) -> &str {
        ROOT_URI
    }

    fn browse(&self, uri: &str) -> Vec<BrowseNode> {
        self.browse_uri(uri)
    }

    fn lookup(&self, uri: &str) -> Vec<LazyTrack> {
        self.lookup_uri(uri)
    }

    fn search(
        &self,
        query: &SearchQuery,
        uris: Option<&[String]>,
        exact: bool,
    ) -> LibraryResult<SearchResult> {
        self.search_catalog(query, uris, exact)
    }

    fn get_images(&self, uris: &[String]) -> HashMap<String, Vec<Image>> {
        self.images.get_images(uris)
    }
}
