// Card and dashboard view models handed to the renderer
use crate::application::dashboard_controller::{DashboardSnapshot, track_key};
use crate::domain::format::{
    ChartSeries, NumberLocale, chart_series, format_value, progress_percentage, trend_class,
    trend_icon,
};
use crate::domain::kpi::{KpiRecord, KpiType, KpiValue};
use crate::domain::summary::SummaryStats;
use crate::domain::view::{KpiFilter, RenderKind, Theme, ViewMode};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDisplay {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<String>,
    pub trend_icon: &'static str,
    pub trend_class: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSeries>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub key: String,
    pub kpi: KpiRecord,
    pub display: CardDisplay,
}

impl CardView {
    pub fn new(kpi: KpiRecord, locale: NumberLocale) -> Self {
        let display = CardDisplay {
            value: format_value(&kpi.value, kpi.is_percentage, locale),
            previous_value: kpi
                .previous_value
                .map(|p| format_value(&KpiValue::Number(p), kpi.is_percentage, locale)),
            trend_icon: trend_icon(kpi.trend),
            trend_class: trend_class(kpi.trend),
            progress_percentage: (kpi.kind == KpiType::Progress)
                .then(|| progress_percentage(&kpi.value, kpi.target)),
            chart: chart_series(&kpi),
        };

        Self {
            key: track_key(&kpi).as_str().to_owned(),
            kpi,
            display,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOptions {
    pub filters: Vec<SelectOption>,
    pub view_modes: Vec<SelectOption>,
    pub themes: Vec<SelectOption>,
}

impl SelectOptions {
    fn all() -> Self {
        fn option(value: &'static str, label: &'static str, icon: &'static str) -> SelectOption {
            SelectOption { value, label, icon }
        }

        Self {
            filters: KpiFilter::ALL_OPTIONS
                .iter()
                .map(|f| option(f.as_str(), f.label(), f.icon()))
                .collect(),
            view_modes: ViewMode::ALL_OPTIONS
                .iter()
                .map(|m| option(m.as_str(), m.label(), m.icon()))
                .collect(),
            themes: Theme::ALL_OPTIONS
                .iter()
                .map(|t| option(t.as_str(), t.label(), t.icon()))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub filter: KpiFilter,
    pub view_mode: ViewMode,
    pub theme: Theme,
    pub render_kind: RenderKind,
    pub is_loading: bool,
    pub summary: SummaryStats,
    pub trend_summary: String,
    pub last_updated: DateTime<Utc>,
    pub cards: Vec<CardView>,
    pub options: SelectOptions,
}

impl DashboardView {
    pub fn new(snapshot: DashboardSnapshot, locale: NumberLocale) -> Self {
        Self {
            filter: snapshot.filter,
            view_mode: snapshot.view_mode,
            theme: snapshot.theme,
            render_kind: snapshot.render_kind,
            is_loading: snapshot.is_loading,
            summary: snapshot.summary,
            trend_summary: snapshot.trend_summary,
            last_updated: snapshot.last_updated,
            cards: snapshot
                .kpis
                .into_iter()
                .map(|kpi| CardView::new(kpi, locale))
                .collect(),
            options: SelectOptions::all(),
        }
    }
}
