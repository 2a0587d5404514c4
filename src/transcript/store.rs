//! Process-wide transcript cache.
//!
//! Entries live until [`TranscriptStore::clear`] is called. There is no TTL and
//! no size bound. Failed fetches are never cached, so the next lookup retries.

use super::{Transcript, TranscriptFetcher};
use crate::error::{Result, TutorError};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, instrument, warn};

/// A fetch that concurrent callers for the same video share.
type InflightFetch = Shared<BoxFuture<'static, std::result::Result<Transcript, String>>>;

/// Read-only snapshot of the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatus {
    /// Number of cached transcripts.
    pub count: usize,
    /// Cached video IDs, sorted.
    pub video_ids: Vec<String>,
    /// Sum of cached transcript lengths in characters.
    pub total_chars: usize,
}

struct StoreInner {
    fetcher: Arc<dyn TranscriptFetcher>,
    entries: RwLock<HashMap<String, Transcript>>,
    inflight: Mutex<HashMap<String, InflightFetch>>,
}

impl StoreInner {
    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<String, Transcript>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<String, Transcript>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_inflight(&self) -> MutexGuard<'_, HashMap<String, InflightFetch>> {
        self.inflight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Transcript cache with fetch-on-miss.
///
/// Cloning is cheap and every clone shares the same entries.
#[derive(Clone)]
pub struct TranscriptStore {
    inner: Arc<StoreInner>,
}

impl TranscriptStore {
    /// Create an empty store backed by the given fetcher.
    pub fn new(fetcher: Arc<dyn TranscriptFetcher>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                fetcher,
                entries: RwLock::new(HashMap::new()),
                inflight: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Return the cached transcript, if any. Never fetches.
    pub fn get(&self, video_id: &str) -> Option<Transcript> {
        self.inner.read_entries().get(video_id).cloned()
    }

    /// Whether a transcript is cached for the video.
    pub fn contains(&self, video_id: &str) -> bool {
        self.inner.read_entries().contains_key(video_id)
    }

    /// Number of cached transcripts.
    pub fn len(&self) -> usize {
        self.inner.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached transcript or fetch, cache, and return it.
    ///
    /// Concurrent callers for the same uncached video share a single upstream
    /// fetch and all observe its outcome.
    #[instrument(skip(self))]
    pub async fn get_or_fetch(&self, video_id: &str) -> Result<Transcript> {
        if let Some(transcript) = self.get(video_id) {
            debug!("Using cached transcript for video: {}", video_id);
            return Ok(transcript);
        }

        let pending = {
            let mut inflight = self.inner.lock_inflight();

            // A fetch may have completed between the lookup above and taking the lock.
            if let Some(transcript) = self.get(video_id) {
                return Ok(transcript);
            }

            inflight
                .entry(video_id.to_string())
                .or_insert_with(|| self.start_fetch(video_id))
                .clone()
        };

        pending.await.map_err(|reason| {
            warn!("Error fetching transcript for {}: {}", video_id, reason);
            TutorError::TranscriptUnavailable {
                video_id: video_id.to_string(),
                reason,
            }
        })
    }

    fn start_fetch(&self, video_id: &str) -> InflightFetch {
        let inner = Arc::clone(&self.inner);
        let video_id = video_id.to_string();

        async move {
            info!("Fetching new transcript for video: {}", video_id);

            // A panicking fetcher must still release the in-flight slot below.
            let fetched = AssertUnwindSafe(inner.fetcher.fetch(&video_id))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    Err(TutorError::TranscriptFetch(
                        "transcript fetcher panicked".to_string(),
                    ))
                });

            let outcome = match fetched {
                Ok(entries) => {
                    let transcript = Transcript::from_entries(&entries);
                    if transcript.is_blank() {
                        Err("transcript is empty".to_string())
                    } else {
                        inner
                            .write_entries()
                            .insert(video_id.clone(), transcript.clone());
                        info!(
                            "Transcript cached for video: {} ({} chars)",
                            video_id,
                            transcript.char_count()
                        );
                        Ok(transcript)
                    }
                }
                Err(e) => Err(e.to_string()),
            };

            inner.lock_inflight().remove(&video_id);
            outcome
        }
        .boxed()
        .shared()
    }

    /// Snapshot of what is currently cached.
    pub fn status(&self) -> CacheStatus {
        let entries = self.inner.read_entries();

        let mut video_ids: Vec<String> = entries.keys().cloned().collect();
        video_ids.sort();

        CacheStatus {
            count: entries.len(),
            video_ids,
            total_chars: entries.values().map(Transcript::char_count).sum(),
        }
    }

    /// Remove every cached transcript and return how many there were.
    pub fn clear(&self) -> usize {
        let removed = std::mem::take(&mut *self.inner.write_entries()).len();
        info!("Cache cleared, removed {} transcripts", removed);
        removed
    }
}
