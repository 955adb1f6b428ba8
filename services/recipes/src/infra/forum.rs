use anyhow::anyhow;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::repository::ForumGateway;
use crate::domain::types::{ForumCategory, NewThread, Thread, ThreadSummary};
use crate::error::RecipesServiceError;

/// reqwest client for the external forum REST service.
#[derive(Clone)]
pub struct HttpForumGateway {
    client: Client,
    base_url: Url,
}

/// What a 404 from the forum means for a request.
#[derive(Clone, Copy)]
enum Target {
    /// A specific thread; 404 means it does not exist.
    Thread,
    /// A listing or creation endpoint; 404 means the forum is misconfigured.
    Service,
}

#[derive(Serialize)]
struct AddCommentBody<'a> {
    content: &'a str,
}

fn unavailable(error: impl Into<anyhow::Error>) -> RecipesServiceError {
    RecipesServiceError::ForumUnavailable(error.into())
}

impl HttpForumGateway {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RecipesServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| unavailable(anyhow!("forum base url cannot carry a path")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn check(response: Response, target: Target) -> Result<Response, RecipesServiceError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND && matches!(target, Target::Thread) {
            return Err(RecipesServiceError::ThreadNotFound);
        }
        if !status.is_success() {
            return Err(unavailable(anyhow!("forum responded with {status}")));
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        target: Target,
    ) -> Result<T, RecipesServiceError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "forum request");
        let response = self.client.get(url).send().await.map_err(unavailable)?;
        Self::check(response, target)?
            .json::<T>()
            .await
            .map_err(unavailable)
    }

    async fn post_json<B: Serialize>(
        &self,
        segments: &[&str],
        target: Target,
        body: &B,
    ) -> Result<(), RecipesServiceError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "forum request");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(unavailable)?;
        Self::check(response, target)?;
        Ok(())
    }
}

impl ForumGateway for HttpForumGateway {
    async fn categories(&self) -> Result<Vec<ForumCategory>, RecipesServiceError> {
        self.get_json(&["categories"], Target::Service).await
    }

    async fn threads_in_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<ThreadSummary>, RecipesServiceError> {
        self.get_json(&["threads", "category", category_id], Target::Service)
            .await
    }

    async fn thread(&self, thread_id: &str) -> Result<Thread, RecipesServiceError> {
        self.get_json(&["threads", thread_id], Target::Thread).await
    }

    async fn create_thread(&self, thread: &NewThread) -> Result<(), RecipesServiceError> {
        self.post_json(&["threads", "create"], Target::Service, thread)
            .await
    }

    async fn add_comment(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<(), RecipesServiceError> {
        self.post_json(
            &["threads", thread_id, "add-comment"],
            Target::Thread,
            &AddCommentBody { content },
        )
        .await
    }
}
