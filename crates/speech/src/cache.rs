//! Content-addressed audio cache
//!
//! Maps `(normalized text, voice id)` to synthesized audio. Keys are hashed
//! so two requests differing only in case or punctuation hit the same
//! entry. Capacity is bounded; eviction is pure LRU-by-insertion-order.
//! `put` never fails the caller: on store exhaustion it evicts a bounded
//! batch of oldest entries and retries once, then proceeds uncached.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ports::BlobStore;
use crate::types::{AudioData, AudioFormat};

/// Configuration for the audio cache
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AudioCacheConfig {
    /// Maximum number of entries
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// How many oldest entries one failed `set` evicts before retrying
    #[serde(default = "default_eviction_batch")]
    pub eviction_batch: usize,
}

impl Default for AudioCacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            eviction_batch: default_eviction_batch(),
        }
    }
}

const fn default_capacity() -> usize {
    128
}

const fn default_eviction_batch() -> usize {
    8
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Current number of entries
    pub entries: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 - 1.0)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Content-addressed store for synthesized prompts
///
/// Shared across sessions within one process; get/put are atomic with
/// respect to the insertion-order ledger (no partial-entry visibility).
pub struct AudioCache {
    store: Arc<dyn BlobStore>,
    config: AudioCacheConfig,
    /// Keys in insertion order; front is oldest
    ledger: Mutex<VecDeque<String>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for AudioCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioCache")
            .field("entries", &self.ledger.lock().len())
            .field("capacity", &self.config.capacity)
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl AudioCache {
    /// Create an empty cache over a backing store
    #[must_use]
    pub fn new(store: Arc<dyn BlobStore>, config: AudioCacheConfig) -> Self {
        Self {
            store,
            config,
            ledger: Mutex::new(VecDeque::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Create a cache over a store that may already hold entries
    ///
    /// Pre-existing keys are adopted into the ledger in listing order;
    /// their original insertion order is not recoverable from the store.
    pub async fn open(store: Arc<dyn BlobStore>, config: AudioCacheConfig) -> Self {
        let cache = Self::new(store, config);
        match cache.store.keys().await {
            Ok(keys) => {
                let mut ledger = cache.ledger.lock();
                ledger.extend(keys.into_iter().filter(|k| k.starts_with(KEY_PREFIX)));
            },
            Err(e) => warn!(error = %e, "could not adopt persisted cache entries"),
        }
        cache
    }

    /// Look up synthesized audio; local lookup only, no provider I/O
    pub async fn get(&self, text: &str, voice_id: &str) -> Option<AudioData> {
        let key = cache_key(text, voice_id);
        match self.store.get(&key).await {
            Ok(Some(bytes)) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "audio cache hit");
                Some(AudioData::new(bytes, CACHED_FORMAT))
            },
            Ok(None) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "audio cache miss");
                None
            },
            Err(e) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, error = %e, "audio cache read failed");
                None
            },
        }
    }

    /// Store synthesized audio
    ///
    /// Overwrites any entry under the same key. Never raises to the
    /// caller; a failed write degrades to "not cached".
    pub async fn put(&self, text: &str, voice_id: &str, audio: &AudioData) {
        let key = cache_key(text, voice_id);

        // Overwrite semantics: drop any existing ledger slot, then make
        // room so insertion never exceeds capacity.
        let victims = {
            let mut ledger = self.ledger.lock();
            if let Some(pos) = ledger.iter().position(|k| k == &key) {
                ledger.remove(pos);
            }
            let mut victims = Vec::new();
            while ledger.len() >= self.config.capacity {
                if let Some(oldest) = ledger.pop_front() {
                    victims.push(oldest);
                } else {
                    break;
                }
            }
            victims
        };
        self.delete_all(&victims).await;

        if self.try_set(&key, audio).await {
            self.ledger.lock().push_back(key);
            return;
        }

        // Storage exhausted: evict a bounded batch of oldest entries and
        // retry exactly once.
        let batch = {
            let mut ledger = self.ledger.lock();
            let count = self.config.eviction_batch.min(ledger.len());
            ledger.drain(..count).collect::<Vec<_>>()
        };
        warn!(
            key = %key,
            evicted = batch.len(),
            "audio cache write failed; evicting oldest entries and retrying"
        );
        self.delete_all(&batch).await;

        if self.try_set(&key, audio).await {
            self.ledger.lock().push_back(key);
        } else {
            warn!(key = %key, "audio cache write failed twice; proceeding uncached");
        }
    }

    /// Cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.ledger.lock().len() as u64,
        }
    }

    async fn try_set(&self, key: &str, audio: &AudioData) -> bool {
        match self.store.set(key, audio.data().to_vec()).await {
            Ok(()) => {
                debug!(key = %key, size = audio.size_bytes(), "audio cached");
                true
            },
            Err(e) => {
                debug!(key = %key, error = %e, "audio cache write failed");
                false
            },
        }
    }

    async fn delete_all(&self, keys: &[String]) {
        for key in keys {
            if let Err(e) = self.store.delete(key).await {
                warn!(key = %key, error = %e, "audio cache eviction failed");
            }
        }
    }
}

const KEY_PREFIX: &str = "tts:";

/// Cached payloads are cloud TTS output, which is always MP3
const CACHED_FORMAT: AudioFormat = AudioFormat::Mp3;

/// Derive the content-addressed key for a prompt
///
/// The text is normalized (case, punctuation and diacritics do not affect
/// pronunciation identity) and hashed; the voice id keeps entries for
/// different voices apart.
fn cache_key(text: &str, voice_id: &str) -> String {
    let normalized = domain::phonetics::normalize(text);
    let digest = blake3::hash(normalized.as_bytes());
    format!("{KEY_PREFIX}{voice_id}:{}", digest.to_hex())
}
