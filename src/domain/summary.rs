// Summary statistics derived from a KPI collection
use super::kpi::{KpiRecord, Trend};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_kpis: usize,
    pub up_trends: usize,
    pub down_trends: usize,
    pub neutral_trends: usize,
    pub average_trend_percentage: f64,
}

/// Count records per trend and average their trend percentages.
///
/// Records without a trend count toward `total_kpis` only. An absent
/// `trend_percentage` contributes 0 to the average, and an empty
/// collection averages to 0.
pub fn summarize(records: &[KpiRecord]) -> SummaryStats {
    let mut stats = SummaryStats {
        total_kpis: records.len(),
        ..SummaryStats::default()
    };

    let mut percentage_sum = 0.0;
    for record in records {
        match record.trend {
            Some(Trend::Up) => stats.up_trends += 1,
            Some(Trend::Down) => stats.down_trends += 1,
            Some(Trend::Neutral) => stats.neutral_trends += 1,
            None => {}
        }
        percentage_sum += record.trend_percentage.unwrap_or(0.0);
    }

    if !records.is_empty() {
        stats.average_trend_percentage = percentage_sum / records.len() as f64;
    }

    stats
}
