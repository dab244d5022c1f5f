//! Rows flagged `is_deleted` by another tool stay in the database but must be
//! invisible to every read and rejected as a parent by every write.

mod test_helpers;

use music_catalog::db;
use music_catalog::CatalogError;
use test_helpers::*;

fn ids<T>(items: &[T], id: impl Fn(&T) -> i64) -> Vec<i64> {
    items.iter().map(id).collect()
}

#[test]
fn test_soft_deleted_album_is_hidden() {
    let test = TestCatalog::signed_in("alice");
    let seed = seed(&test.catalog);
    test.soft_delete("albums", seed.abbey_road.id);

    let albums = db::fetch_albums(test.conn()).unwrap();
    assert_eq!(ids(&albums, |a| a.id), vec![seed.imagine_album.id]);
    assert!(db::fetch_albums_for_artist(test.conn(), seed.beatles.id)
        .unwrap()
        .is_empty());
    assert!(db::fetch_album(test.conn(), seed.abbey_road.id)
        .unwrap_err()
        .is_not_found());

    let (_, names) = test.catalog.albums().unwrap();
    assert_eq!(names, vec!["Imagine (1971)"]);

    let summary = db::fetch_summary(test.conn()).unwrap();
    assert_eq!(summary.albums, 1);
    assert_eq!(test.count("albums"), 2);
}

#[test]
fn test_track_cannot_be_added_to_soft_deleted_album() {
    let test = TestCatalog::new();
    let seed = seed(&test.catalog);
    test.soft_delete("albums", seed.abbey_road.id);

    let err = db::create_track(test.conn(), "Because", seed.abbey_road.id, 165).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { entity: "album", .. }));

    let err = db::update_track(test.conn(), seed.imagine.id, "Imagine", seed.abbey_road.id, 183)
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { entity: "album", .. }));
    assert_eq!(test.count("tracks"), 4);
}

#[test]
fn test_album_cannot_be_added_to_soft_deleted_artist() {
    let test = TestCatalog::new();
    let seed = seed(&test.catalog);
    test.soft_delete("artists", seed.lennon.id);

    let err = db::create_album(test.conn(), "Mind Games", seed.lennon.id, 1973).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { entity: "artist", .. }));

    let artists = db::fetch_artists(test.conn()).unwrap();
    assert_eq!(ids(&artists, |a| a.id), vec![seed.beatles.id]);
    assert_eq!(db::fetch_summary(test.conn()).unwrap().artists, 1);
    assert_eq!(test.count("albums"), 2);
}

#[test]
fn test_soft_deleted_track_is_hidden() {
    let test = TestCatalog::signed_in("alice");
    let seed = seed(&test.catalog);
    let playlist = test.catalog.create_playlist(&test.session, "Mix").unwrap();
    db::add_track_to_playlist(test.conn(), playlist.id, seed.something.id).unwrap();
    db::add_track_to_playlist(test.conn(), playlist.id, seed.imagine.id).unwrap();

    test.soft_delete("tracks", seed.something.id);

    let tracks = db::fetch_tracks(test.conn()).unwrap();
    assert!(!ids(&tracks, |t| t.id).contains(&seed.something.id));
    assert_eq!(tracks.len(), 3);

    let on_album = db::fetch_tracks_for_album(test.conn(), seed.abbey_road.id).unwrap();
    assert_eq!(on_album, vec![seed.come_together.clone()]);

    let members = db::fetch_tracks_for_playlist(test.conn(), playlist.id).unwrap();
    assert_eq!(members, vec![seed.imagine.clone()]);

    let available = db::fetch_tracks_not_in_playlist(test.conn(), playlist.id).unwrap();
    let available = ids(&available, |t| t.id);
    assert!(!available.contains(&seed.something.id));
    assert_eq!(available.len(), 2);

    assert_eq!(db::fetch_summary(test.conn()).unwrap().tracks, 3);
}

#[test]
fn test_soft_deleted_track_cannot_join_a_playlist() {
    let test = TestCatalog::signed_in("alice");
    let seed = seed(&test.catalog);
    let playlist = test.catalog.create_playlist(&test.session, "Mix").unwrap();
    test.soft_delete("tracks", seed.jealous_guy.id);

    let err = test
        .catalog
        .add_track_to_playlist(&test.session, playlist.id, seed.jealous_guy.id)
        .unwrap_err();

    assert!(matches!(err, CatalogError::NotFound { entity: "track", .. }));
    assert_eq!(test.count("playlist_tracks"), 0);
}

#[test]
fn test_soft_deleted_playlist_is_hidden() {
    let test = TestCatalog::signed_in("alice");
    let seed = seed(&test.catalog);
    let user_id = test.session.current_user().unwrap().id;
    let kept = test.catalog.create_playlist(&test.session, "Kept").unwrap();
    let gone = test.catalog.create_playlist(&test.session, "Gone").unwrap();

    test.soft_delete("playlists", gone.id);

    assert_eq!(db::fetch_playlists(test.conn(), user_id).unwrap(), vec![kept]);
    let (_, names) = test.catalog.playlists(&test.session).unwrap();
    assert_eq!(names, vec!["Kept"]);

    let err = db::add_track_to_playlist(test.conn(), gone.id, seed.imagine.id).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { entity: "playlist", .. }));
    assert!(db::rename_playlist(test.conn(), gone.id, "Back")
        .unwrap_err()
        .is_not_found());

    assert_eq!(db::fetch_summary(test.conn()).unwrap().playlists, 1);
    assert_eq!(test.count("playlists"), 2);
}
