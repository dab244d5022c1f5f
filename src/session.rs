//! Per-window state: who is signed in and what is currently selected. The
//! value is owned by the caller and passed into [`crate::Catalog`] methods
//! that need an identity or a selection.

use crate::error::{CatalogError, Result};
use crate::models::{Playlist, Track, User};

#[derive(Debug, Default, Clone)]
pub struct Session {
    user: Option<User>,
    selected_playlist: Option<Playlist>,
    selected_track: Option<Track>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `user`. Any selection left over from a previous
    /// user is dropped.
    pub fn sign_in(&mut self, user: User) {
        self.clear_selection();
        self.user = Some(user);
    }

    /// Forget the user and everything they had selected.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.clear_selection();
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The signed-in user, or `NotSignedIn`.
    pub fn current_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(CatalogError::NotSignedIn)
    }

    pub fn select_playlist(&mut self, playlist: Playlist) {
        self.selected_playlist = Some(playlist);
    }

    pub fn select_track(&mut self, track: Track) {
        self.selected_track = Some(track);
    }

    pub fn selected_playlist(&self) -> Option<&Playlist> {
        self.selected_playlist.as_ref()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.selected_track.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selected_playlist = None;
        self.selected_track = None;
    }

    pub fn deselect_playlist(&mut self) {
        self.selected_playlist = None;
    }

    pub fn deselect_track(&mut self) {
        self.selected_track = None;
    }

    /// Both halves of the "add selected track to selected playlist" action.
    pub(crate) fn selected_pair(&self) -> Result<(&Playlist, &Track)> {
        match (&self.selected_playlist, &self.selected_track) {
            (Some(playlist), Some(track)) => Ok((playlist, track)),
            _ => Err(CatalogError::validation("select a playlist and a track first")),
        }
    }
}
