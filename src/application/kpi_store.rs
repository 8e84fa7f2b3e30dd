// KPI store - Authoritative collection, change notification and simulated updates
use crate::domain::error::KpiError;
use crate::domain::kpi::{KpiId, KpiRecord, KpiType, KpiValue, validate_collection};
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(30);

const MIN_UPDATE_INTERVAL: Duration = Duration::from_millis(10);

/// Largest relative change a single tick applies (total width, centred on 0).
const MAX_VARIATION: f64 = 0.1;

type Callback = Arc<dyn Fn(&Arc<[KpiRecord]>) + Send + Sync>;

struct StoreInner {
    records: RwLock<Arc<[KpiRecord]>>,
    /// Held across swap and notify so subscribers see replacements in store order
    publish: Mutex<()>,
    subscribers: Mutex<Vec<(u64, Callback)>>,
    next_subscriber: AtomicU64,
    updater: Mutex<Option<JoinHandle<()>>>,
    update_interval: Duration,
}

impl StoreInner {
    fn unsubscribe(&self, id: u64) {
        lock(&self.subscribers).retain(|(sub_id, _)| *sub_id != id);
    }
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        let slot = self.updater.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared handle to the KPI collection.
///
/// Every change replaces the whole collection and is pushed to subscribers
/// synchronously, in the order they subscribed.
#[derive(Clone)]
pub struct KpiStore {
    inner: Arc<StoreInner>,
}

/// Keeps a store callback registered until dropped.
pub struct Subscription {
    id: u64,
    store: Weak<StoreInner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.unsubscribe(self.id);
        }
    }
}

impl KpiStore {
    pub fn new(records: Vec<KpiRecord>, update_interval: Duration) -> Result<Self, KpiError> {
        validate_collection(&records)?;
        Ok(Self {
            inner: Arc::new(StoreInner {
                records: RwLock::new(records.into()),
                publish: Mutex::new(()),
                subscribers: Mutex::new(Vec::new()),
                next_subscriber: AtomicU64::new(0),
                updater: Mutex::new(None),
                update_interval,
            }),
        })
    }

    pub fn get_all(&self) -> Arc<[KpiRecord]> {
        self.inner
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get(&self, id: &KpiId) -> Option<KpiRecord> {
        self.get_all().iter().find(|r| &r.id == id).cloned()
    }

    pub fn by_type(&self, kind: KpiType) -> Vec<KpiRecord> {
        self.get_all()
            .iter()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect()
    }

    /// Swap in a new collection and notify subscribers.
    ///
    /// An invalid collection is rejected and the current one is kept.
    /// Concurrent replacements are published one at a time, so the last
    /// collection a subscriber sees is the one the store holds. Callbacks
    /// must not call `replace` themselves.
    pub fn replace(&self, records: Vec<KpiRecord>) -> Result<(), KpiError> {
        validate_collection(&records)?;
        let records: Arc<[KpiRecord]> = records.into();
        let _publishing = lock(&self.inner.publish);

        *self
            .inner
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner) = records.clone();

        // Callbacks run without the subscriber lock so they may subscribe or drop subscriptions
        let callbacks: Vec<Callback> = lock(&self.inner.subscribers)
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();

        tracing::debug!(
            kpis = records.len(),
            subscribers = callbacks.len(),
            "Published KPI collection"
        );

        for callback in callbacks {
            callback(&records);
        }

        Ok(())
    }

    /// Register a callback for every future replacement.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Arc<[KpiRecord]>) + Send + Sync + 'static,
    {
        let id = self.inner.next_subscriber.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.subscribers).push((id, Arc::new(callback)));
        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner.subscribers).len()
    }

    /// Start the periodic perturbation task. Must run inside a tokio runtime.
    ///
    /// Returns `false` without spawning when the task is already running.
    pub fn start_simulated_updates(&self) -> bool {
        let mut slot = lock(&self.inner.updater);
        if slot.as_ref().is_some_and(|handle| !handle.is_finished()) {
            tracing::debug!("Simulated updates already running");
            return false;
        }

        // tokio rejects a zero period
        let period = self.inner.update_interval.max(MIN_UPDATE_INTERVAL);
        let weak = Arc::downgrade(&self.inner);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                KpiStore { inner }.apply_tick();
            }
        });

        tracing::info!(interval_ms = period.as_millis() as u64, "Started simulated KPI updates");
        *slot = Some(handle);
        true
    }

    pub fn stop_simulated_updates(&self) {
        if let Some(handle) = lock(&self.inner.updater).take() {
            handle.abort();
            tracing::info!("Stopped simulated KPI updates");
        }
    }

    pub fn is_updating(&self) -> bool {
        lock(&self.inner.updater)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn apply_tick(&self) {
        let next = perturb(&self.get_all(), &mut rand::rng());
        if let Err(e) = self.replace(next) {
            tracing::warn!("Rejected simulated KPI update: {}", e);
        }
    }
}

/// Apply one random step of up to ±5% to every numeric value.
///
/// New values are floored at 0 and rounded to two decimals; the old value
/// moves to `previous_value`. Text values are left untouched.
pub fn perturb<R: Rng>(records: &[KpiRecord], rng: &mut R) -> Vec<KpiRecord> {
    records
        .iter()
        .map(|record| {
            let Some(value) = record.value.as_number() else {
                return record.clone();
            };

            let delta = (rng.random::<f64>() - 0.5) * MAX_VARIATION;
            let next = (value * (1.0 + delta)).max(0.0);

            let mut updated = record.clone();
            updated.previous_value = Some(value);
            updated.value = KpiValue::Number((next * 100.0).round() / 100.0);
            updated
        })
        .collect()
}
