//! Persistence layer split by entity. Each function wraps one query (or one
//! transaction for the cascading deletes) over a borrowed connection.

mod albums;
mod artists;
mod connection;
pub(crate) mod guards;
mod playlists;
mod summary;
mod tracks;
mod users;

pub use albums::{
    create_album, delete_album, fetch_album, fetch_albums, fetch_albums_for_artist, update_album,
};
pub use artists::{create_artist, delete_artist, fetch_artist, fetch_artists, update_artist};
pub use connection::{ensure_schema, open_catalog, open_in_memory};
pub use playlists::{
    add_track_to_playlist, create_playlist, delete_playlist, fetch_playlist, fetch_playlists,
    fetch_tracks_for_playlist, fetch_tracks_not_in_playlist, remove_track_from_playlist,
    rename_playlist,
};
pub use summary::fetch_summary;
pub use tracks::{
    create_track, delete_track, fetch_track, fetch_tracks, fetch_tracks_for_album, update_track,
};
pub use users::{fetch_credentials, insert_user};
