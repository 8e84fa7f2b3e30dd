// View selection state and the pure functions deriving what gets rendered
use super::error::ParseError;
use super::kpi::{KpiRecord, KpiType};
use super::summary::SummaryStats;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiFilter {
    #[default]
    All,
    Metric,
    Progress,
    Comparison,
    Chart,
}

impl KpiFilter {
    pub const ALL_OPTIONS: [KpiFilter; 5] = [
        KpiFilter::All,
        KpiFilter::Metric,
        KpiFilter::Progress,
        KpiFilter::Comparison,
        KpiFilter::Chart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self.kpi_type() {
            None => "all",
            Some(kind) => kind.as_str(),
        }
    }

    /// The KPI type this filter selects, `None` for `All`.
    pub fn kpi_type(&self) -> Option<KpiType> {
        match self {
            KpiFilter::All => None,
            KpiFilter::Metric => Some(KpiType::Metric),
            KpiFilter::Progress => Some(KpiType::Progress),
            KpiFilter::Comparison => Some(KpiType::Comparison),
            KpiFilter::Chart => Some(KpiType::Chart),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KpiFilter::All => "All KPIs",
            KpiFilter::Metric => "Metrics",
            KpiFilter::Progress => "Progress",
            KpiFilter::Comparison => "Comparisons",
            KpiFilter::Chart => "Charts",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            KpiFilter::All => "■",
            KpiFilter::Metric => "▲",
            KpiFilter::Progress => "●",
            KpiFilter::Comparison => "⇄",
            KpiFilter::Chart => "▼",
        }
    }
}

impl FromStr for KpiFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(KpiFilter::All),
            "metric" => Ok(KpiFilter::Metric),
            "progress" => Ok(KpiFilter::Progress),
            "comparison" => Ok(KpiFilter::Comparison),
            "chart" => Ok(KpiFilter::Chart),
            other => Err(ParseError::new("filter", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Compact,
}

impl ViewMode {
    pub const ALL_OPTIONS: [ViewMode; 3] = [ViewMode::Grid, ViewMode::List, ViewMode::Compact];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
            ViewMode::Compact => "compact",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Grid => "Grid",
            ViewMode::List => "List",
            ViewMode::Compact => "Compact",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ViewMode::Grid => "▦",
            ViewMode::List => "≡",
            ViewMode::Compact => "▪",
        }
    }
}

impl FromStr for ViewMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            "compact" => Ok(ViewMode::Compact),
            other => Err(ParseError::new("view mode", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Gradient,
}

impl Theme {
    pub const ALL_OPTIONS: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Gradient];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Gradient => "gradient",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Gradient => "Gradient",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "○",
            Theme::Dark => "●",
            Theme::Gradient => "◐",
        }
    }
}

impl FromStr for Theme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "gradient" => Ok(Theme::Gradient),
            other => Err(ParseError::new("theme", other)),
        }
    }
}

/// Visual density of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    Default,
    Compact,
    Detailed,
}

/// Stable filter: keeps the relative order of `records`.
pub fn apply_filter(records: &[KpiRecord], filter: KpiFilter) -> Vec<KpiRecord> {
    match filter.kpi_type() {
        None => records.to_vec(),
        Some(kind) => records.iter().filter(|r| r.kind == kind).cloned().collect(),
    }
}

pub fn card_render_kind(mode: ViewMode) -> RenderKind {
    match mode {
        ViewMode::Compact => RenderKind::Compact,
        ViewMode::List => RenderKind::Detailed,
        ViewMode::Grid => RenderKind::Default,
    }
}

/// One-line headline comparing improving and declining KPIs.
pub fn trend_summary_text(stats: &SummaryStats) -> String {
    if stats.up_trends > stats.down_trends {
        format!("▲ {} KPIs trending up", stats.up_trends)
    } else if stats.down_trends > stats.up_trends {
        format!("▼ {} KPIs need attention", stats.down_trends)
    } else {
        "◆ Balanced performance".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<KpiRecord> {
        vec![
            KpiRecord::new("a", "A", 1.0, KpiType::Metric),
            KpiRecord::new("b", "B", 2.0, KpiType::Progress),
            KpiRecord::new("c", "C", 3.0, KpiType::Metric),
            KpiRecord::new("d", "D", 4.0, KpiType::Chart),
        ]
    }

    #[test]
    fn test_apply_filter_all_is_identity() {
        let records = records();
        assert_eq!(apply_filter(&records, KpiFilter::All), records);
        assert!(apply_filter(&[], KpiFilter::All).is_empty());
    }

    #[test]
    fn test_apply_filter_is_stable() {
        let records = records();
        for filter in KpiFilter::ALL_OPTIONS.into_iter().skip(1) {
            let filtered = apply_filter(&records, filter);
            assert!(filtered.iter().all(|r| Some(r.kind) == filter.kpi_type()));

            let expected: Vec<&str> = records
                .iter()
                .filter(|r| Some(r.kind) == filter.kpi_type())
                .map(|r| r.id.as_str())
                .collect();
            let actual: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
            assert_eq!(actual, expected);
        }

        let metrics = apply_filter(&records, KpiFilter::Metric);
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].id.as_str(), "a");
        assert_eq!(metrics[1].id.as_str(), "c");
        assert!(apply_filter(&records, KpiFilter::Comparison).is_empty());
    }

    #[test]
    fn test_card_render_kind() {
        assert_eq!(card_render_kind(ViewMode::Compact), RenderKind::Compact);
        assert_eq!(card_render_kind(ViewMode::List), RenderKind::Detailed);
        assert_eq!(card_render_kind(ViewMode::Grid), RenderKind::Default);
    }

    #[test]
    fn test_trend_summary_text_branches() {
        let mut stats = SummaryStats {
            total_kpis: 5,
            up_trends: 3,
            down_trends: 1,
            neutral_trends: 1,
            average_trend_percentage: 0.0,
        };
        assert!(trend_summary_text(&stats).contains('3'));
        assert!(trend_summary_text(&stats).starts_with('▲'));

        stats.up_trends = 1;
        stats.down_trends = 3;
        assert!(trend_summary_text(&stats).starts_with('▼'));
        assert!(trend_summary_text(&stats).contains('3'));

        stats.down_trends = 1;
        assert!(trend_summary_text(&stats).starts_with('◆'));
    }

    #[test]
    fn test_parse_selection_values() {
        assert_eq!("chart".parse::<KpiFilter>(), Ok(KpiFilter::Chart));
        assert_eq!("list".parse::<ViewMode>(), Ok(ViewMode::List));
        assert_eq!("gradient".parse::<Theme>(), Ok(Theme::Gradient));

        let err = "mosaic".parse::<ViewMode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown view mode: mosaic");
    }
}
