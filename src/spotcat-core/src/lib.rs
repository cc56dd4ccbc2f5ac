pub mod config;
pub mod countries;
pub mod lazy_track;
pub mod library;
pub mod library_contract;
pub mod logging;
pub mod models;
pub mod paths;
pub mod query;
pub mod session;
pub mod translate;
pub mod uri;
pub mod wait;

pub use config::{Config, ConfigError, LogLevel, LoggingConfig, SpotifyConfig, ValidationError};
pub use lazy_track::LazyTrack;
pub use library::{ImageSource, Library, LibraryError, LibraryResult, NoImages};
pub use logging::{init_logging, LoggingError, LoggingGuard};
pub use models::{Album, Artist, BrowseNode, Image, NodeKind, SearchResult, Track};
pub use paths::{AppDirs, DirsError};
pub use query::SearchQuery;
pub use uri::{CatalogUri, UriError, UriKind};

pub const APP_NAME: &str = "spotcat";
pub const APP_AUTHOR: &str = "Spotcat";
pub const APP_QUALIFIER: &str = "io";
