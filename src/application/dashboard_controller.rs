// Dashboard controller - View selection state bound to the KPI store
use crate::application::kpi_store::{KpiStore, Subscription};
use crate::domain::kpi::{KpiId, KpiRecord};
use crate::domain::summary::{SummaryStats, summarize};
use crate::domain::view::{
    KpiFilter, RenderKind, Theme, ViewMode, apply_filter, card_render_kind, trend_summary_text,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

pub const EXPORT_FILE_NAME: &str = "kpi-data.json";
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub refresh_delay: Duration,
    pub simulate_updates: bool,
    pub filter: KpiFilter,
    pub view_mode: ViewMode,
    pub theme: Theme,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            refresh_delay: DEFAULT_REFRESH_DELAY,
            simulate_updates: false,
            filter: KpiFilter::default(),
            view_mode: ViewMode::default(),
            theme: Theme::default(),
        }
    }
}

/// Everything the renderer needs for one frame of the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub filter: KpiFilter,
    pub view_mode: ViewMode,
    pub theme: Theme,
    pub render_kind: RenderKind,
    pub is_loading: bool,
    pub kpis: Vec<KpiRecord>,
    pub summary: SummaryStats,
    pub trend_summary: String,
    pub last_updated: DateTime<Utc>,
}

struct ViewState {
    records: Arc<[KpiRecord]>,
    filtered: Vec<KpiRecord>,
    summary: SummaryStats,
    filter: KpiFilter,
    view_mode: ViewMode,
    theme: Theme,
    is_loading: bool,
    last_updated: DateTime<Utc>,
}

impl ViewState {
    fn load(&mut self, records: Arc<[KpiRecord]>) {
        self.filtered = apply_filter(&records, self.filter);
        self.summary = summarize(&records);
        self.records = records;
        self.last_updated = Utc::now();
    }
}

fn lock(state: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the UI selection for one dashboard session.
///
/// Dropping the controller releases its store subscription and, when it
/// started them, stops the simulated updates.
pub struct DashboardController {
    store: KpiStore,
    state: Arc<Mutex<ViewState>>,
    refresh_delay: Duration,
    owns_updates: bool,
    _subscription: Subscription,
}

impl DashboardController {
    pub fn attach(store: KpiStore, settings: ControllerSettings) -> Self {
        let records = store.get_all();
        let state = Arc::new(Mutex::new(ViewState {
            filtered: apply_filter(&records, settings.filter),
            summary: summarize(&records),
            records,
            filter: settings.filter,
            view_mode: settings.view_mode,
            theme: settings.theme,
            is_loading: false,
            last_updated: Utc::now(),
        }));

        let weak = Arc::downgrade(&state);
        let subscription = store.subscribe(move |records| {
            if let Some(state) = weak.upgrade() {
                lock(&state).load(records.clone());
            }
        });

        let owns_updates = settings.simulate_updates && store.start_simulated_updates();

        tracing::debug!(
            filter = ?settings.filter,
            view_mode = ?settings.view_mode,
            theme = ?settings.theme,
            "Dashboard controller attached"
        );

        Self {
            store,
            state,
            refresh_delay: settings.refresh_delay,
            owns_updates,
            _subscription: subscription,
        }
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let state = lock(&self.state);
        DashboardSnapshot {
            filter: state.filter,
            view_mode: state.view_mode,
            theme: state.theme,
            render_kind: card_render_kind(state.view_mode),
            is_loading: state.is_loading,
            kpis: state.filtered.clone(),
            summary: state.summary,
            trend_summary: trend_summary_text(&state.summary),
            last_updated: state.last_updated,
        }
    }

    pub fn summary(&self) -> SummaryStats {
        lock(&self.state).summary
    }

    pub fn set_filter(&self, filter: KpiFilter) {
        let mut state = lock(&self.state);
        state.filter = filter;
        state.filtered = apply_filter(&state.records, filter);
    }

    pub fn set_view_mode(&self, mode: ViewMode) {
        lock(&self.state).view_mode = mode;
    }

    pub fn set_theme(&self, theme: Theme) {
        lock(&self.state).theme = theme;
    }

    /// Mark the view as loading and reload it from the store after the
    /// configured delay. Each call schedules its own reload.
    pub fn refresh(&self) -> JoinHandle<()> {
        lock(&self.state).is_loading = true;

        let weak = Arc::downgrade(&self.state);
        let store = self.store.clone();
        let delay = self.refresh_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(shared) = weak.upgrade() else {
                tracing::debug!("Refresh skipped, controller already released");
                return;
            };
            let mut state = lock(&shared);
            state.load(store.get_all());
            state.is_loading = false;
        })
    }

    /// Pretty-printed JSON of the full, unfiltered collection.
    pub fn export(&self) -> serde_json::Result<Vec<u8>> {
        let records = lock(&self.state).records.clone();
        export_snapshot(&records)
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        if self.owns_updates {
            self.store.stop_simulated_updates();
        }
    }
}

pub fn export_snapshot(records: &[KpiRecord]) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec_pretty(records)
}

/// Key the renderer uses to keep card identity across updates.
pub fn track_key(record: &KpiRecord) -> &KpiId {
    &record.id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::kpi_store::DEFAULT_UPDATE_INTERVAL;
    use crate::domain::kpi::{KpiType, KpiValue, Trend};

    fn three_records() -> Vec<KpiRecord> {
        vec![
            KpiRecord::new("visitors", "Visitors", 89456.0, KpiType::Metric).with_trend(Trend::Up, 17.3),
            KpiRecord::new("stock", "Stock", 87.0, KpiType::Progress)
                .with_target(100.0)
                .with_trend(Trend::Up, 5.0),
            KpiRecord::new("reach", "Reach", 234567.0, KpiType::Chart)
                .with_trend(Trend::Down, 18.3)
                .with_chart(vec![1.0, 2.0], &["W1", "W2"]),
        ]
    }

    fn store() -> KpiStore {
        KpiStore::new(three_records(), DEFAULT_UPDATE_INTERVAL).unwrap()
    }

    fn fast_settings() -> ControllerSettings {
        ControllerSettings {
            refresh_delay: Duration::from_millis(10),
            ..ControllerSettings::default()
        }
    }

    #[test]
    fn test_filter_and_summary_scenario() {
        let controller = DashboardController::attach(store(), fast_settings());

        controller.set_filter(KpiFilter::Progress);
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.kpis.len(), 1);
        assert_eq!(snapshot.kpis[0].kind, KpiType::Progress);

        let summary = snapshot.summary;
        assert_eq!(summary.total_kpis, 3);
        assert_eq!(summary.up_trends, 2);
        assert_eq!(summary.down_trends, 1);
        assert_eq!(summary.neutral_trends, 0);
    }

    #[test]
    fn test_selection_changes_are_independent() {
        let controller = DashboardController::attach(store(), fast_settings());

        controller.set_view_mode(ViewMode::List);
        controller.set_theme(Theme::Dark);
        controller.set_filter(KpiFilter::Chart);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.view_mode, ViewMode::List);
        assert_eq!(snapshot.render_kind, RenderKind::Detailed);
        assert_eq!(snapshot.theme, Theme::Dark);
        assert_eq!(snapshot.filter, KpiFilter::Chart);
        assert_eq!(snapshot.kpis.len(), 1);

        controller.set_filter(KpiFilter::All);
        assert_eq!(controller.snapshot().kpis.len(), 3);
        assert_eq!(controller.snapshot().view_mode, ViewMode::List);
    }

    #[test]
    fn test_store_replacement_updates_view_and_summary() {
        let store = store();
        let controller = DashboardController::attach(store.clone(), fast_settings());

        let mut next = three_records();
        next[2].trend = Some(Trend::Up);
        next[0].value = KpiValue::Number(1.0);
        store.replace(next).unwrap();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.kpis[0].value, KpiValue::Number(1.0));
        assert_eq!(snapshot.summary.up_trends, 3);
        assert!(snapshot.trend_summary.contains('3'));
    }

    #[tokio::test]
    async fn test_refresh_toggles_loading() {
        let controller = DashboardController::attach(store(), fast_settings());
        assert!(!controller.snapshot().is_loading);

        let first = controller.refresh();
        let second = controller.refresh();
        assert!(controller.snapshot().is_loading);

        first.await.unwrap();
        second.await.unwrap();
        assert!(!controller.snapshot().is_loading);
    }

    #[tokio::test]
    async fn test_refresh_after_teardown_is_noop() {
        let store = store();
        let controller = DashboardController::attach(store.clone(), fast_settings());
        let pending = controller.refresh();
        drop(controller);

        pending.await.unwrap();
        assert_eq!(store.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_drop_releases_subscription_and_updates() {
        let store = store();
        let settings = ControllerSettings {
            simulate_updates: true,
            ..fast_settings()
        };

        let controller = DashboardController::attach(store.clone(), settings);
        assert_eq!(store.subscriber_count(), 1);
        assert!(store.is_updating());

        drop(controller);
        assert_eq!(store.subscriber_count(), 0);
        assert!(!store.is_updating());
    }

    #[tokio::test]
    async fn test_drop_leaves_foreign_update_task_running() {
        let store = store();
        store.start_simulated_updates();

        let settings = ControllerSettings {
            simulate_updates: true,
            ..fast_settings()
        };
        drop(DashboardController::attach(store.clone(), settings));

        assert!(store.is_updating());
        store.stop_simulated_updates();
    }

    #[test]
    fn test_export_is_pretty_json_of_full_collection() {
        let controller = DashboardController::attach(store(), fast_settings());
        controller.set_filter(KpiFilter::Metric);

        let bytes = controller.export().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("[\n  {\n    \"id\": \"visitors\""));

        let parsed: Vec<KpiRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, three_records());
    }

    #[test]
    fn test_track_key_is_stable_id() {
        let mut record = three_records().remove(0);
        record.title = "Renamed".to_string();
        assert_eq!(track_key(&record).as_str(), "visitors");
    }
}
