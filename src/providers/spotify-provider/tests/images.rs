mod support;

use spotcat_core::{Image, ImageSource, Library};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use support::{fast_config, library, FakeSearchApi, FakeSession};

/// Serves a cover for album URIs only and remembers what it was asked.
#[derive(Default)]
struct AlbumCovers {
    asked: Mutex<Vec<String>>,
}

impl ImageSource for AlbumCovers {
    fn get_images(&self, uris: &[String]) -> HashMap<String, Vec<Image>> {
        self.asked.lock().unwrap().extend(uris.iter().cloned());
        uris.iter()
            .filter(|uri| uri.starts_with("spotify:album:"))
            .map(|uri| {
                let image = Image {
                    uri: format!("https://i.scdn.co/image/{}", &uri["spotify:album:".len()..]),
                    width: Some(640),
                    height: Some(640),
                };
                (uri.clone(), vec![image])
            })
            .collect()
    }
}

#[test]
fn images_come_from_the_installed_source() {
    let covers = Arc::new(AlbumCovers::default());
    let (library, _) = library(
        fast_config(),
        FakeSession::default(),
        &FakeSearchApi::with_json("{}"),
    );
    let library = library.with_images(Arc::clone(&covers) as Arc<dyn ImageSource>);

    let uris = vec!["spotify:album:arrival".to_owned(), "spotify:track:dq".to_owned()];
    let images = library.get_images(&uris);

    assert_eq!(images, covers.get_images(&uris));
    assert_eq!(images.len(), 1);
    assert_eq!(
        images["spotify:album:arrival"][0].uri,
        "https://i.scdn.co/image/arrival"
    );
    assert_eq!(covers.asked.lock().unwrap()[..2], uris[..]);
}

#[test]
fn default_library_knows_no_images() {
    let (library, _) = library(
        fast_config(),
        FakeSession::default(),
        &FakeSearchApi::with_json("{}"),
    );
    let images = library.get_images(&["spotify:album:arrival".to_owned()]);
    assert!(images.is_empty());
}
