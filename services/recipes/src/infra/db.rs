use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, sea_query::OnConflict,
};

use pantry_domain::favorite::FavoritesSet;
use pantry_domain::id::{CommentId, RecipeId, UserId};
use pantry_domain::pagination::PageRequest;
use pantry_domain::rating::{Rating, RatingValue};
use pantry_domain::user::UserRole;
use pantry_recipes_schema::{comments, favorites, ratings, recipes, users};

use crate::domain::repository::{
    CommentRepository, FavoriteRepository, RatingRepository, RecipeRepository, UserRepository,
};
use crate::domain::types::{Comment, Recipe, User};
use crate::error::RecipesServiceError;

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

impl RecipeRepository for DbRecipeRepository {
    async fn list(&self, page: PageRequest) -> Result<Vec<Recipe>, RecipesServiceError> {
        let models = recipes::Entity::find()
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list recipes")?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipesServiceError> {
        let model = recipes::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find recipe by id")?;
        Ok(model.map(recipe_from_model))
    }

    async fn find_by_ids(&self, ids: &[RecipeId]) -> Result<Vec<Recipe>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = recipes::Entity::find()
            .filter(recipes::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .order_by_desc(recipes::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("find recipes by ids")?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn create(&self, recipe: &Recipe) -> Result<(), RecipesServiceError> {
        recipes::ActiveModel {
            id: Set(recipe.id.0),
            title: Set(recipe.title.clone()),
            description: Set(recipe.description.clone()),
            image_url: Set(recipe.image_url.clone()),
            video_url: Set(recipe.video_url.clone()),
            ingredients: Set(recipe.ingredients.clone()),
            steps: Set(recipe.steps.clone()),
            created_at: Set(recipe.created_at),
            updated_at: Set(recipe.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create recipe")?;
        Ok(())
    }

    async fn update(&self, recipe: &Recipe) -> Result<bool, RecipesServiceError> {
        let result = recipes::Entity::update_many()
            .set(recipes::ActiveModel {
                title: Set(recipe.title.clone()),
                description: Set(recipe.description.clone()),
                image_url: Set(recipe.image_url.clone()),
                video_url: Set(recipe.video_url.clone()),
                ingredients: Set(recipe.ingredients.clone()),
                steps: Set(recipe.steps.clone()),
                updated_at: Set(recipe.updated_at),
                ..Default::default()
            })
            .filter(recipes::Column::Id.eq(recipe.id.0))
            .exec(&self.db)
            .await
            .context("update recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, RecipesServiceError> {
        // ratings and comments cascade via foreign keys
        let result = recipes::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }
}

fn recipe_from_model(model: recipes::Model) -> Recipe {
    Recipe {
        id: RecipeId(model.id),
        title: model.title,
        description: model.description,
        image_url: model.image_url,
        video_url: model.video_url,
        ingredients: model.ingredients,
        steps: model.steps,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Rating repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRatingRepository {
    pub db: DatabaseConnection,
}

impl RatingRepository for DbRatingRepository {
    async fn list_for_recipe(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<Rating>, RecipesServiceError> {
        let models = ratings::Entity::find()
            .filter(ratings::Column::RecipeId.eq(recipe_id.0))
            .all(&self.db)
            .await
            .context("list ratings for recipe")?;
        models.into_iter().map(rating_from_model).collect()
    }

    async fn upsert(&self, recipe_id: RecipeId, rating: Rating) -> Result<(), RecipesServiceError> {
        ratings::Entity::insert(ratings::ActiveModel {
            recipe_id: Set(recipe_id.0),
            user_id: Set(rating.user_id.0),
            half_stars: Set(i16::from(rating.value.half_stars())),
            updated_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([ratings::Column::RecipeId, ratings::Column::UserId])
                .update_columns([ratings::Column::HalfStars, ratings::Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("upsert rating")?;
        Ok(())
    }
}

fn rating_from_model(model: ratings::Model) -> Result<Rating, RecipesServiceError> {
    let value = u8::try_from(model.half_stars)
        .ok()
        .and_then(RatingValue::from_half_stars)
        .with_context(|| format!("stored rating out of range: {}", model.half_stars))?;
    Ok(Rating {
        user_id: UserId(model.user_id),
        value,
    })
}

// ── Favorite repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFavoriteRepository {
    pub db: DatabaseConnection,
}

impl FavoriteRepository for DbFavoriteRepository {
    async fn list(&self, user_id: UserId) -> Result<FavoritesSet, RecipesServiceError> {
        let models = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id.0))
            .all(&self.db)
            .await
            .context("list favorites")?;
        Ok(models.into_iter().map(|m| RecipeId(m.recipe_id)).collect())
    }

    async fn contains(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<bool, RecipesServiceError> {
        let model = favorites::Entity::find_by_id((user_id.0, recipe_id.0))
            .one(&self.db)
            .await
            .context("find favorite")?;
        Ok(model.is_some())
    }

    async fn add(&self, user_id: UserId, recipe_id: RecipeId) -> Result<bool, RecipesServiceError> {
        let inserted = favorites::Entity::insert(favorites::ActiveModel {
            user_id: Set(user_id.0),
            recipe_id: Set(recipe_id.0),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("add favorite")?;
        Ok(inserted > 0)
    }

    async fn remove(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<bool, RecipesServiceError> {
        let result = favorites::Entity::delete_many()
            .filter(favorites::Column::UserId.eq(user_id.0))
            .filter(favorites::Column::RecipeId.eq(recipe_id.0))
            .exec(&self.db)
            .await
            .context("remove favorite")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Comment repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCommentRepository {
    pub db: DatabaseConnection,
}

impl CommentRepository for DbCommentRepository {
    async fn list_for_recipe(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<Comment>, RecipesServiceError> {
        let models = comments::Entity::find()
            .filter(comments::Column::RecipeId.eq(recipe_id.0))
            .order_by_desc(comments::Column::CreatedAt)
            .order_by_desc(comments::Column::Id)
            .all(&self.db)
            .await
            .context("list comments for recipe")?;
        Ok(models.into_iter().map(comment_from_model).collect())
    }

    async fn append(&self, comment: &Comment) -> Result<(), RecipesServiceError> {
        comments::ActiveModel {
            id: Set(comment.id.0),
            recipe_id: Set(comment.recipe_id.0),
            user_id: Set(comment.user_id.0),
            display_name: Set(comment.display_name.clone()),
            content: Set(comment.content.clone()),
            created_at: Set(comment.created_at),
        }
        .insert(&self.db)
        .await
        .context("append comment")?;
        Ok(())
    }
}

fn comment_from_model(model: comments::Model) -> Comment {
    Comment {
        id: CommentId(model.id),
        recipe_id: RecipeId(model.recipe_id),
        user_id: UserId(model.user_id),
        display_name: model.display_name,
        content: model.content,
        created_at: model.created_at,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RecipesServiceError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }
}

fn user_from_model(model: users::Model) -> User {
    let role = u8::try_from(model.role)
        .ok()
        .and_then(UserRole::from_u8)
        .unwrap_or_else(|| {
            tracing::warn!(user_id = %model.id, role = model.role, "unknown role, treating as standard");
            UserRole::Standard
        });
    User {
        id: UserId(model.id),
        display_name: model.display_name,
        role,
    }
}
