use std::sync::Arc;

use crate::model::TrackId;
use crate::repo::{PlayContext, PlayerRepo};

use super::observable::Observable;
use super::scope::ScopeHandle;

/// Fire-and-forget play actions for a screen.
///
/// Playback happens on the user's active device; the only state kept here is
/// the error of the last attempt, if any.
#[derive(Clone)]
pub struct Playback {
    player: PlayerRepo,
    scope: ScopeHandle,
    error: Arc<Observable<Option<String>>>,
}

impl Playback {
    pub fn new(player: PlayerRepo, scope: ScopeHandle) -> Self {
        Self {
            player,
            scope,
            error: Arc::new(Observable::new(None)),
        }
    }

    pub fn error(&self) -> &Observable<Option<String>> {
        &self.error
    }

    pub fn play(&self, context: PlayContext) {
        let this = self.clone();
        self.scope.launch(async move {
            let result = this.player.play_context(&context).await;
            this.publish(result);
        });
    }

    pub fn play_track(&self, id: TrackId) {
        let this = self.clone();
        self.scope.launch(async move {
            let result = this.player.play_tracks(std::slice::from_ref(&id)).await;
            this.publish(result);
        });
    }

    fn publish(&self, result: crate::error::Result<()>) {
        match result {
            Ok(()) => self.error.set(None),
            Err(e) => self.error.set(Some(self.scope.session().describe(&e))),
        }
    }
}
