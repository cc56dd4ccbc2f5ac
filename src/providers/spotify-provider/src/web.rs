//! Client for the remote web search endpoint.

use crate::models::SearchResponse;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use spotcat_core::{LibraryError, LibraryResult};
use std::time::Duration;
use url::Url;

/// Entity categories requested from the search endpoint.
pub const SEARCH_TYPES: [&str; 3] = ["album", "artist", "track"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub limit: u32,
    pub market: String,
    pub types: Vec<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, limit: u32) -> Self {
        Self {
            query: query.into(),
            limit,
            market: "from_token".into(),
            types: SEARCH_TYPES.iter().map(|t| (*t).to_owned()).collect(),
        }
    }
}

/// Remote search collaborator.
pub trait SearchApi: Send + Sync {
    fn search(&self, request: &SearchRequest) -> LibraryResult<SearchResponse>;
}

#[derive(Clone)]
pub struct WebClientConfig {
    pub base_url: String,
    pub access_token: Option<String>,
}

#[derive(Clone)]
pub struct WebClient {
    client: Client,
    base_url: Url,
    access_token: Option<String>,
}

impl WebClient {
    pub fn new(config: WebClientConfig) -> LibraryResult<Self> {
        let mut base = config.base_url;
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| LibraryError::Other {
            message: format!("invalid web api url: {e}"),
        })?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| LibraryError::Other {
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url,
            access_token: config.access_token,
        })
    }
}

impl SearchApi for WebClient {
    fn search(&self, request: &SearchRequest) -> LibraryResult<SearchResponse> {
        let url = self.base_url.join("search").map_err(|e| LibraryError::Other {
            message: e.to_string(),
        })?;
        let limit = request.limit.to_string();
        let types = request.types.join(",");
        let mut builder = self.client.get(url).query(&[
            ("q", request.query.as_str()),
            ("limit", limit.as_str()),
            ("market", request.market.as_str()),
            ("type", types.as_str()),
        ]);
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }

        let resp = builder.send().map_err(|e| LibraryError::Network {
            message: e.to_string(),
        })?;
        match resp.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(LibraryError::Authentication {
                    message: "unauthorized".into(),
                })
            }
            status => {
                return Err(LibraryError::Remote {
                    status: status.as_u16(),
                })
            }
        }

        let body = resp.text().map_err(|e| LibraryError::Network {
            message: e.to_string(),
        })?;
        serde_json::from_str(&body).map_err(|e| LibraryError::Decode {
            message: e.to_string(),
        })
    }
}
