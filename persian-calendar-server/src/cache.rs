use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;
use tokio::sync::RwLock;
use tokio::task;
use tokio::time::{sleep, Duration};

pub struct Config {
    pub enabled: bool,
    pub ttl: Duration,
}

/// Values shared behind `Arc`, each dropped `ttl` after it was inserted.
pub struct Cache<K, V> {
    enabled: bool,
    inner: RwLock<HashMap<K, (u64, Arc<V>)>>,
    generation: AtomicU64,
    ttl: Duration,
}

impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + std::fmt::Debug + 'static,
    V: Send + Sync + 'static,
{
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self {
            enabled: config.enabled,
            ttl: config.ttl,
            generation: AtomicU64::new(0),
            inner: Default::default(),
        })
    }

    pub async fn insert(self: Arc<Self>, key: K, value: V) -> Arc<V> {
        let arcd = Arc::new(value);
        if !self.enabled {
            return arcd;
        }

        // Re-inserting a key restarts its clock; older timers must not
        // evict the fresher entry.
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);

        self.inner
            .write()
            .await
            .insert(key.clone(), (generation, Arc::clone(&arcd)));

        let self_clone = Arc::clone(&self);
        task::spawn(async move {
            sleep(self_clone.ttl).await;

            let mut inner = self_clone.inner.write().await;
            if inner.get(&key).is_some_and(|(current, _)| *current == generation) {
                debug!("Evicting cache entry {key:?}");
                inner.remove(&key);
            }
        });

        arcd
    }

    pub async fn get(&self, key: &K) -> Option<Arc<V>> {
        if !self.enabled {
            return None;
        }

        self.inner
            .read()
            .await
            .get(key)
            .map(|(_, value)| Arc::clone(value))
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
