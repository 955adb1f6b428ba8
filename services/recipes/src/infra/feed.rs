//! In-process change feed backing live comment and rating subscriptions.
//!
//! One broadcast channel exists per recipe while anyone is watching it.
//! Notifications carry no data: a subscriber that hears about a change
//! re-reads the full snapshot, so a lagged receiver loses nothing by
//! skipping ahead.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures::stream::{self, BoxStream, Stream, StreamExt};
use tokio::sync::broadcast::{self, error::RecvError};

use pantry_domain::id::RecipeId;

use crate::domain::repository::ChangeNotifier;
use crate::error::RecipesServiceError;

const CHANNEL_CAPACITY: usize = 16;

/// What changed under a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedTopic {
    Comments,
    Rating,
}

#[derive(Clone, Default)]
pub struct ChangeFeed {
    channels: Arc<Mutex<HashMap<RecipeId, broadcast::Sender<FeedTopic>>>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    fn channels(&self) -> MutexGuard<'_, HashMap<RecipeId, broadcast::Sender<FeedTopic>>> {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn watch(&self, recipe_id: RecipeId) -> broadcast::Receiver<FeedTopic> {
        self.channels()
            .entry(recipe_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Drop the recipe's channel once its last receiver is gone.
    fn release(&self, recipe_id: RecipeId) {
        let mut channels = self.channels();
        if channels
            .get(&recipe_id)
            .is_some_and(|sender| sender.receiver_count() == 0)
        {
            channels.remove(&recipe_id);
        }
    }

    /// Wake every subscriber of `recipe_id` watching `topic`.
    pub fn publish(&self, recipe_id: RecipeId, topic: FeedTopic) {
        let mut channels = self.channels();
        let abandoned = channels
            .get(&recipe_id)
            .is_some_and(|sender| sender.send(topic).is_err());
        if abandoned {
            channels.remove(&recipe_id);
        }
    }

    /// Number of recipes currently watched.
    pub fn channel_count(&self) -> usize {
        self.channels().len()
    }

    /// Start a live subscription.
    ///
    /// The stream yields `load()` immediately, then again after every
    /// change to `topic` under `recipe_id`. It never ends on its own;
    /// dropping it unsubscribes.
    pub fn subscribe<T, F, Fut>(
        &self,
        recipe_id: RecipeId,
        topic: FeedTopic,
        load: F,
    ) -> Subscription<T>
    where
        T: Send + 'static,
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, RecipesServiceError>> + Send + 'static,
    {
        let state = SubscriptionState {
            receiver: self.watch(recipe_id),
            topic,
            load,
            primed: false,
        };
        let inner = stream::unfold(state, |mut state| async move {
            if state.primed && !state.wait_for_change().await {
                return None;
            }
            state.primed = true;
            let snapshot = (state.load)().await;
            Some((snapshot, state))
        })
        .boxed();

        tracing::debug!(%recipe_id, ?topic, "live subscription started");
        Subscription {
            inner,
            _guard: SubscriptionGuard {
                feed: self.clone(),
                recipe_id,
            },
        }
    }
}

impl ChangeNotifier for ChangeFeed {
    fn comments_changed(&self, recipe_id: RecipeId) {
        self.publish(recipe_id, FeedTopic::Comments);
    }

    fn rating_changed(&self, recipe_id: RecipeId) {
        self.publish(recipe_id, FeedTopic::Rating);
    }
}

struct SubscriptionState<F> {
    receiver: broadcast::Receiver<FeedTopic>,
    topic: FeedTopic,
    load: F,
    primed: bool,
}

impl<F> SubscriptionState<F> {
    /// Returns `false` once the channel is closed.
    async fn wait_for_change(&mut self) -> bool {
        loop {
            match self.receiver.recv().await {
                Ok(topic) if topic == self.topic => return true,
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "live subscriber lagged, re-reading snapshot");
                    return true;
                }
                Err(RecvError::Closed) => return false,
            }
        }
    }
}

struct SubscriptionGuard {
    feed: ChangeFeed,
    recipe_id: RecipeId,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.feed.release(self.recipe_id);
        tracing::debug!(recipe_id = %self.recipe_id, "live subscription ended");
    }
}

/// A cancellable stream of full snapshots.
pub struct Subscription<T> {
    // Declared before the guard so the receiver is gone when the guard
    // checks for remaining subscribers.
    inner: BoxStream<'static, Result<T, RecipesServiceError>>,
    _guard: SubscriptionGuard,
}

impl<T> Stream for Subscription<T> {
    type Item = Result<T, RecipesServiceError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}
