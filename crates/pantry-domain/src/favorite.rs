//! Favorite-set membership.
//!
//! A user's favorites are a set of recipe ids. Mutations are expressed as
//! single-element changes ([`FavoriteChange`]) so that a store can apply
//! them with its own atomic add/remove primitive. Writing back a whole set
//! built from a local copy would drop elements added concurrently by the
//! same user's other sessions.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::id::RecipeId;

/// Snapshot of one user's favorite recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FavoritesSet {
    recipe_ids: BTreeSet<RecipeId>,
}

/// A single-element mutation of a favorite set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    /// Add the recipe if absent; no-op if present.
    Add(RecipeId),
    /// Remove the recipe if present; no-op if absent.
    Remove(RecipeId),
}

impl FavoriteChange {
    /// The change that flips membership of `recipe_id` given its current state.
    pub fn toggle(currently_favorite: bool, recipe_id: RecipeId) -> Self {
        if currently_favorite {
            Self::Remove(recipe_id)
        } else {
            Self::Add(recipe_id)
        }
    }

    pub fn recipe_id(self) -> RecipeId {
        match self {
            Self::Add(id) | Self::Remove(id) => id,
        }
    }

    /// Membership of the recipe after this change is applied.
    pub fn resulting_membership(self) -> bool {
        matches!(self, Self::Add(_))
    }
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, recipe_id: RecipeId) -> bool {
        self.recipe_ids.contains(&recipe_id)
    }

    /// Apply a single-element change. Returns `true` if the set changed.
    pub fn apply(&mut self, change: FavoriteChange) -> bool {
        match change {
            FavoriteChange::Add(id) => self.recipe_ids.insert(id),
            FavoriteChange::Remove(id) => self.recipe_ids.remove(&id),
        }
    }

    pub fn len(&self) -> usize {
        self.recipe_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipe_ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RecipeId> + '_ {
        self.recipe_ids.iter().copied()
    }
}

impl FromIterator<RecipeId> for FavoritesSet {
    fn from_iter<I: IntoIterator<Item = RecipeId>>(iter: I) -> Self {
        Self {
            recipe_ids: iter.into_iter().collect(),
        }
    }
}

/// Set-membership test.
pub fn is_favorite(set: &FavoritesSet, recipe_id: RecipeId) -> bool {
    set.contains(recipe_id)
}
