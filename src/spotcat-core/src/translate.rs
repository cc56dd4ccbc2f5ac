//! Native session objects to value records.

use crate::models::{Album, Artist, BrowseNode, Track, LOADING_NAME};
use crate::session::{NativeAlbum, NativeArtist, NativeTrack};

pub fn to_artist(artist: &NativeArtist) -> Option<Artist> {
    Some(Artist {
        uri: Some(artist.uri.clone()),
        name: artist.name.clone()?,
    })
}

pub fn to_album(album: &NativeAlbum) -> Option<Album> {
    Some(Album {
        uri: Some(album.uri.clone()),
        name: album.name.clone()?,
        artists: album.artist.iter().filter_map(to_artist).collect(),
        date: album.year.filter(|year| *year > 0).map(|year| year.to_string()),
    })
}

/// Translates whatever `track` currently holds.
///
/// An unloaded track yields [`Track::placeholder`].
pub fn to_track(track: &dyn NativeTrack) -> Track {
    let uri = track.uri();
    if !track.is_loaded() {
        return Track::placeholder(uri);
    }
    let album = track.album().as_ref().and_then(to_album);
    Track {
        uri,
        name: track.name().unwrap_or_default(),
        artists: track.artists().iter().filter_map(to_artist).collect(),
        date: album.as_ref().and_then(|album| album.date.clone()),
        album,
        length: track.duration_ms(),
        track_no: track.index(),
        disc_no: track.disc(),
        bitrate: None,
    }
}

pub fn to_track_node(track: &dyn NativeTrack) -> BrowseNode {
    let name = if track.is_loaded() {
        track.name().unwrap_or_default()
    } else {
        LOADING_NAME.to_owned()
    };
    BrowseNode::track(track.uri(), name)
}
