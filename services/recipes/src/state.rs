use sea_orm::DatabaseConnection;

use crate::infra::blob::FilesystemBlobStore;
use crate::infra::db::{
    DbCommentRepository, DbFavoriteRepository, DbRatingRepository, DbRecipeRepository,
    DbUserRepository,
};
use crate::infra::feed::ChangeFeed;
use crate::infra::forum::HttpForumGateway;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub blobs: FilesystemBlobStore,
    pub forum: HttpForumGateway,
    pub feed: ChangeFeed,
    pub session_secret: String,
}

impl AppState {
    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn rating_repo(&self) -> DbRatingRepository {
        DbRatingRepository {
            db: self.db.clone(),
        }
    }

    pub fn favorite_repo(&self) -> DbFavoriteRepository {
        DbFavoriteRepository {
            db: self.db.clone(),
        }
    }

    pub fn comment_repo(&self) -> DbCommentRepository {
        DbCommentRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn blob_store(&self) -> FilesystemBlobStore {
        self.blobs.clone()
    }

    pub fn forum_gateway(&self) -> HttpForumGateway {
        self.forum.clone()
    }

    pub fn notifier(&self) -> ChangeFeed {
        self.feed.clone()
    }
}
