//! Request coalescing for concurrent cache misses.
//!
//! The first caller for a match spawns the upstream fetch and parks a shared
//! handle to it here; callers arriving while it runs await the same handle.
//! The spawned task clears its own slot when the fetch finishes, so the slot
//! never outlives the fetch even when every waiter has gone away.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::{FetchError, MatchFetcher};
use crate::models::{MatchId, MatchRecord};

/// Outcome shared between all waiters of one fetch
pub type SharedFetchResult = Result<MatchRecord, Arc<FetchError>>;

type SharedFetch = Shared<BoxFuture<'static, SharedFetchResult>>;

struct PendingFetch {
    /// Distinguishes this fetch from later ones for the same match
    generation: u64,
    fetch: SharedFetch,
}

#[derive(Default)]
struct Registry {
    next_generation: u64,
    pending: HashMap<MatchId, PendingFetch>,
}

/// Registry of fetches currently running, keyed by match
#[derive(Default)]
pub struct InFlightFetches {
    registry: Arc<Mutex<Registry>>,
}

impl InFlightFetches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch `id`, joining a running fetch for the same match if there is one
    pub async fn fetch(&self, id: MatchId, fetcher: Arc<dyn MatchFetcher>) -> SharedFetchResult {
        let fetch = {
            let mut registry = self.registry.lock().await;

            match registry.pending.get(&id) {
                Some(running) => {
                    debug!(match_id = %id, "Joining in-flight fetch");
                    running.fetch.clone()
                }
                None => {
                    let generation = registry.next_generation;
                    registry.next_generation += 1;

                    let fetch = self.spawn_fetch(id, generation, fetcher);
                    registry.pending.insert(
                        id,
                        PendingFetch {
                            generation,
                            fetch: fetch.clone(),
                        },
                    );
                    fetch
                }
            }
        };

        fetch.await
    }

    /// Run the fetch on its own task; it removes its slot once done
    fn spawn_fetch(
        &self,
        id: MatchId,
        generation: u64,
        fetcher: Arc<dyn MatchFetcher>,
    ) -> SharedFetch {
        let registry = Arc::clone(&self.registry);

        // The slot is inserted under the registry lock held by the caller,
        // so the task cannot finish its cleanup before the insert
        let task = tokio::spawn(async move {
            let result = fetcher.fetch_match(id).await.map_err(Arc::new);

            let mut registry = registry.lock().await;
            if registry
                .pending
                .get(&id)
                .is_some_and(|p| p.generation == generation)
            {
                registry.pending.remove(&id);
            }

            result
        });

        async move {
            task.await.unwrap_or_else(|e| {
                warn!(match_id = %id, "Fetch task failed: {}", e);
                Err(Arc::new(FetchError::Task(e.to_string())))
            })
        }
        .boxed()
        .shared()
    }

    /// No fetch is running
    pub async fn is_empty(&self) -> bool {
        self.registry.lock().await.pending.is_empty()
    }
}
