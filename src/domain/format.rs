// Display formatting for KPI values, progress and trends
use super::kpi::{KpiRecord, KpiValue, Trend};
use serde::{Deserialize, Serialize};

const DEFAULT_CHART_COLOR: &str = "#4F46E5";
/// Hex alpha suffix appended to the chart color for the area fill.
const CHART_FILL_ALPHA: &str = "20";

/// Separators used when a number is rendered with thousands grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberLocale {
    #[default]
    En,
    De,
}

impl NumberLocale {
    fn separators(&self) -> (char, char) {
        match self {
            NumberLocale::En => (',', '.'),
            NumberLocale::De => ('.', ','),
        }
    }

    /// Thousands-grouped rendering with at most three fraction digits.
    pub fn group(&self, value: f64) -> String {
        let (group_sep, decimal_sep) = self.separators();
        let text = format!("{:.3}", value.abs());
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let frac_part = frac_part.trim_end_matches('0');

        let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
        let is_zero = int_part.chars().chain(frac_part.chars()).all(|c| c == '0');
        if value < 0.0 && !is_zero {
            out.push('-');
        }
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                out.push(group_sep);
            }
            out.push(ch);
        }
        if !frac_part.is_empty() {
            out.push(decimal_sep);
            out.push_str(frac_part);
        }
        out
    }
}

/// Format a KPI value for display.
///
/// Strings pass through unchanged. Percentages get a `%` suffix without
/// scaling. Large magnitudes are abbreviated, checking millions before
/// thousands, so exactly 1,000,000 renders as `1.0M`.
pub fn format_value(value: &KpiValue, is_percentage: bool, locale: NumberLocale) -> String {
    let n = match value {
        KpiValue::Text(text) => return text.clone(),
        KpiValue::Number(n) => *n,
    };

    if is_percentage {
        format!("{n}%")
    } else if n >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        locale.group(n)
    }
}

/// Share of `target` reached by `value`, clamped to at most 100.
///
/// Returns 0 when the value is not numeric or the target is absent or zero.
/// Negative values are not clamped.
pub fn progress_percentage(value: &KpiValue, target: Option<f64>) -> f64 {
    match (value.as_number(), target) {
        (Some(v), Some(t)) if t != 0.0 => (v / t * 100.0).min(100.0),
        _ => 0.0,
    }
}

pub fn trend_icon(trend: Option<Trend>) -> &'static str {
    match trend {
        Some(Trend::Up) => "↗",
        Some(Trend::Down) => "↘",
        Some(Trend::Neutral) | None => "→",
    }
}

pub fn trend_class(trend: Option<Trend>) -> &'static str {
    match trend {
        Some(Trend::Up) => "trend-up",
        Some(Trend::Down) => "trend-down",
        Some(Trend::Neutral) | None => "trend-neutral",
    }
}

/// Line-chart input handed to the renderer for a card with samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub border_color: String,
    pub fill_color: String,
}

pub fn chart_series(record: &KpiRecord) -> Option<ChartSeries> {
    let data = record.chart_data.as_ref()?;
    let border_color = record
        .color
        .clone()
        .unwrap_or_else(|| DEFAULT_CHART_COLOR.to_string());
    let fill_color = format!("{border_color}{CHART_FILL_ALPHA}");

    Some(ChartSeries {
        labels: record.chart_labels.clone().unwrap_or_default(),
        data: data.clone(),
        border_color,
        fill_color,
    })
}
