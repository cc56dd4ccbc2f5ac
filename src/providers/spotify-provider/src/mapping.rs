use crate::models::{WebAlbum, WebArtist, WebTrack};
use spotcat_core::{Album, Artist, Track};

pub fn web_to_artist(artist: &WebArtist) -> Artist {
    Artist {
        uri: artist.uri.clone(),
        name: artist.name.clone(),
    }
}

/// Albums carry only the release year so web and native albums agree.
pub fn web_to_album(album: &WebAlbum) -> Album {
    Album {
        uri: album.uri.clone(),
        name: album.name.clone(),
        artists: album.artists.iter().map(web_to_artist).collect(),
        date: album
            .release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty() && *year != "0000")
            .map(str::to_owned),
    }
}

pub fn web_to_track(track: &WebTrack) -> Track {
    let album = track.album.as_ref().map(web_to_album);
    Track {
        uri: track.uri.clone(),
        name: track.name.clone(),
        artists: track.artists.iter().map(web_to_artist).collect(),
        date: album.as_ref().and_then(|album| album.date.clone()),
        album,
        length: track.duration_ms,
        track_no: track.track_number,
        disc_no: track.disc_number,
        bitrate: None,
    }
}
