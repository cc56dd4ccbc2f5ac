use anyhow::Result;
use clap::{Parser, Subcommand};
use spotcat_core::query::translate;
use spotcat_core::{countries, init_logging, AppDirs, Config, SearchQuery, SearchResult};
use spotify_provider::{search_web, WebClient, WebClientConfig};
use thiserror::Error;

/// Environment variable consulted when no token is configured.
const TOKEN_ENV: &str = "SPOTIFY_ACCESS_TOKEN";

#[derive(Debug, Parser)]
#[command(name = "spotcat", version, about = "Spotify catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the remote search string for a generic query
    Query(QueryArgs),
    /// Run a field search against the web API
    Search(SearchArgs),
    /// List the countries offered for toplists
    Countries,
}

#[derive(Debug, Parser, Clone)]
struct QueryArgs {
    /// Query field as `name=value`; repeat for several values
    #[arg(short, long = "field", value_name = "NAME=VALUE")]
    fields: Vec<String>,
}

#[derive(Debug, Parser, Clone)]
struct SearchArgs {
    #[command(flatten)]
    query: QueryArgs,
    /// Bearer token (takes precedence over config and environment)
    #[arg(long)]
    token: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
enum FieldError {
    #[error("field \"{arg}\" must look like name=value")]
    MissingSeparator { arg: String },
    #[error("field \"{arg}\" has an empty name")]
    EmptyName { arg: String },
}

impl QueryArgs {
    fn query(&self) -> Result<SearchQuery, FieldError> {
        let mut query = SearchQuery::new();
        for arg in &self.fields {
            let (name, value) = arg
                .split_once('=')
                .ok_or_else(|| FieldError::MissingSeparator { arg: arg.clone() })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(FieldError::EmptyName { arg: arg.clone() });
            }
            query.push(name, [value]);
        }
        Ok(query)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let dirs = AppDirs::discover()?;
    let config = Config::load_or_default(&dirs)?;
    let _logging = init_logging(&config.logging, &dirs)?;

    match cli.command {
        Command::Query(args) => {
            let translated = translate(&args.query()?);
            if translated.is_empty() {
                println!("(nothing to search)");
            } else {
                println!("{translated}");
            }
        }
        Command::Search(args) => {
            let translated = translate(&args.query.query()?);
            if translated.is_empty() {
                println!("(nothing to search)");
                return Ok(());
            }
            let access_token = args
                .token
                .or_else(|| config.spotify.access_token.clone())
                .or_else(|| std::env::var(TOKEN_ENV).ok());
            if access_token.is_none() {
                tracing::warn!("no access token configured; set spotify.access_token or {TOKEN_ENV}");
            }
            let client = WebClient::new(WebClientConfig {
                base_url: config.spotify.web_api_url.clone(),
                access_token,
            })?;
            let result = search_web(&client, &translated, config.spotify.search_caps())?;
            print_result(&result);
        }
        Command::Countries => print_countries(&config),
    }

    Ok(())
}

fn print_result(result: &SearchResult) {
    println!("{}", result.uri);
    for artist in &result.artists {
        println!("artist  {}  {}", artist.uri.as_deref().unwrap_or("-"), artist.name);
    }
    for album in &result.albums {
        let year = album.date.as_deref().unwrap_or("----");
        println!(
            "album   {}  {} ({year})",
            album.uri.as_deref().unwrap_or("-"),
            album.name
        );
    }
    for track in &result.tracks {
        let track = track.track();
        let artists: Vec<_> = track.artists.iter().map(|a| a.name.as_str()).collect();
        println!("track   {}  {} - {}", track.uri, artists.join(", "), track.name);
    }
}

fn print_countries(config: &Config) {
    if config.spotify.toplist_countries.is_empty() {
        println!("No toplist countries configured. Set spotify.toplist_countries in config.toml.");
        return;
    }

    for code in &config.spotify.toplist_countries {
        let code = code.to_ascii_uppercase();
        match countries::country_name(&code) {
            Some(name) => println!("{code}  {name}"),
            None => println!("{code}  (unknown, no toplist)"),
        }
    }
}
