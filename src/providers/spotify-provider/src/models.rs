//! Web API response records.

use serde::Deserialize;

/// Body of `GET /search`. Categories not requested or not matched are absent.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub albums: Option<Paging<WebAlbum>>,
    #[serde(default)]
    pub artists: Option<Paging<WebArtist>>,
    #[serde(default)]
    pub tracks: Option<Paging<WebTrack>>,
}

#[derive(Debug, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct WebArtist {
    #[serde(default)]
    pub uri: Option<String>,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct WebAlbum {
    #[serde(default)]
    pub uri: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<WebArtist>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WebTrack {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<WebArtist>,
    #[serde(default)]
    pub album: Option<WebAlbum>,
    #[serde(default)]
    pub duration_ms: Option<u32>,
    #[serde(default)]
    pub track_number: Option<u32>,
    #[serde(default)]
    pub disc_number: Option<u32>,
}
