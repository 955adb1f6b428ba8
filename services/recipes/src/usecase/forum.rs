use crate::domain::repository::ForumGateway;
use crate::domain::types::{ForumCategory, NewThread, Thread, ThreadSummary, Viewer};
use crate::error::RecipesServiceError;

/// Split a comma-separated tag string into trimmed, non-empty tags.
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

fn required(value: &str, field: &'static str) -> Result<String, RecipesServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecipesServiceError::EmptyField(field));
    }
    Ok(trimmed.to_owned())
}

// ── Reads ────────────────────────────────────────────────────────────────────

pub struct GetForumCategoriesUseCase<G: ForumGateway> {
    pub gateway: G,
}

impl<G: ForumGateway> GetForumCategoriesUseCase<G> {
    pub async fn execute(&self) -> Result<Vec<ForumCategory>, RecipesServiceError> {
        self.gateway.categories().await
    }
}

pub struct GetCategoryThreadsUseCase<G: ForumGateway> {
    pub gateway: G,
}

impl<G: ForumGateway> GetCategoryThreadsUseCase<G> {
    pub async fn execute(
        &self,
        category_id: &str,
    ) -> Result<Vec<ThreadSummary>, RecipesServiceError> {
        self.gateway.threads_in_category(category_id).await
    }
}

pub struct GetThreadUseCase<G: ForumGateway> {
    pub gateway: G,
}

impl<G: ForumGateway> GetThreadUseCase<G> {
    pub async fn execute(&self, thread_id: &str) -> Result<Thread, RecipesServiceError> {
        self.gateway.thread(thread_id).await
    }
}

// ── CreateThread ─────────────────────────────────────────────────────────────

pub struct CreateThreadInput {
    pub title: String,
    pub content: String,
    /// Comma-separated.
    pub tags: String,
    pub category: String,
}

pub struct CreateThreadUseCase<G: ForumGateway> {
    pub gateway: G,
}

impl<G: ForumGateway> CreateThreadUseCase<G> {
    pub async fn execute(
        &self,
        viewer: &Viewer,
        input: CreateThreadInput,
    ) -> Result<NewThread, RecipesServiceError> {
        let user_id = viewer.require_user()?;
        let thread = NewThread {
            title: required(&input.title, "title")?,
            content: required(&input.content, "content")?,
            tags: split_tags(&input.tags),
            category: required(&input.category, "category")?,
            user_id,
        };
        self.gateway.create_thread(&thread).await?;
        tracing::info!(%user_id, category = %thread.category, "forum thread created");
        Ok(thread)
    }
}

// ── AddThreadComment ─────────────────────────────────────────────────────────

pub struct AddThreadCommentUseCase<G: ForumGateway> {
    pub gateway: G,
}

impl<G: ForumGateway> AddThreadCommentUseCase<G> {
    /// Post a comment and return the refreshed thread.
    pub async fn execute(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<Thread, RecipesServiceError> {
        if content.trim().is_empty() {
            return Err(RecipesServiceError::EmptyField("content"));
        }
        self.gateway.add_comment(thread_id, content).await?;
        self.gateway.thread(thread_id).await
    }
}
