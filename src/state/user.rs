use std::sync::Arc;

use crate::model::{PlaylistId, PlaylistListItem, User, UserId};

use super::pager::{page_fetcher, PageCursor, Pager};
use super::resource::Resource;
use super::scope::ScreenScope;
use super::{Navigator, ScreenContext};

/// A user's profile and public playlists.
pub struct UserScreen {
    pub user: Resource<User>,
    pub playlists: Pager<PlaylistListItem>,
    navigator: Arc<dyn Navigator>,
    _scope: ScreenScope,
}

impl UserScreen {
    pub fn open(ctx: &ScreenContext, id: UserId) -> Self {
        let scope = ctx.scope();

        let repo = ctx.repos.users.clone();
        let user_id = id.clone();
        let user = Resource::load(scope.handle(), move || {
            let repo = repo.clone();
            let id = user_id.clone();
            async move { repo.get_user(&id).await }
        });

        let repo = ctx.repos.playlists.clone();
        let playlists = Pager::start(
            scope.handle(),
            ctx.page,
            page_fetcher(move |cursor: PageCursor| {
                let repo = repo.clone();
                let id = id.clone();
                async move { repo.get_user_playlists(&id, cursor.page).await }
            }),
        );

        Self {
            user,
            playlists,
            navigator: ctx.navigator.clone(),
            _scope: scope,
        }
    }

    pub fn on_load_playlists(&self) {
        self.playlists.load_more();
    }

    pub fn on_playlist_click(&self, id: &PlaylistId) {
        self.navigator.open_playlist(id.clone());
    }
}
