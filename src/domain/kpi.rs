// KPI domain models
use super::error::{KpiError, ParseError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Stable identity of a KPI, independent of its display title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KpiId(String);

impl KpiId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KpiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current value of a KPI: either a number or a pre-formatted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KpiValue {
    Number(f64),
    Text(String),
}

impl KpiValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            KpiValue::Number(n) => Some(*n),
            KpiValue::Text(_) => None,
        }
    }
}

impl From<f64> for KpiValue {
    fn from(value: f64) -> Self {
        KpiValue::Number(value)
    }
}

impl From<&str> for KpiValue {
    fn from(value: &str) -> Self {
        KpiValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiType {
    Metric,
    Progress,
    Chart,
    Comparison,
}

impl KpiType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KpiType::Metric => "metric",
            KpiType::Progress => "progress",
            KpiType::Chart => "chart",
            KpiType::Comparison => "comparison",
        }
    }
}

impl FromStr for KpiType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(KpiType::Metric),
            "progress" => Ok(KpiType::Progress),
            "chart" => Ok(KpiType::Chart),
            "comparison" => Ok(KpiType::Comparison),
            other => Err(ParseError::new("KPI type", other)),
        }
    }
}

/// One dashboard tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiRecord {
    pub id: KpiId,
    pub title: String,
    pub value: KpiValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_percentage: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_percentage: Option<f64>,
    #[serde(rename = "type")]
    pub kind: KpiType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl KpiRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        value: impl Into<KpiValue>,
        kind: KpiType,
    ) -> Self {
        Self {
            id: KpiId::new(id),
            title: title.into(),
            value: value.into(),
            previous_value: None,
            target: None,
            unit: None,
            icon: None,
            color: None,
            is_percentage: false,
            trend: None,
            trend_percentage: None,
            kind,
            chart_data: None,
            chart_labels: None,
            description: None,
        }
    }

    pub fn with_previous_value(mut self, previous: f64) -> Self {
        self.previous_value = Some(previous);
        self
    }

    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn with_trend(mut self, trend: Trend, percentage: f64) -> Self {
        self.trend = Some(trend);
        self.trend_percentage = Some(percentage);
        self
    }

    pub fn with_chart(mut self, data: Vec<f64>, labels: &[&str]) -> Self {
        self.chart_data = Some(data);
        self.chart_labels = Some(labels.iter().map(|l| l.to_string()).collect());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn percentage(mut self) -> Self {
        self.is_percentage = true;
        self
    }
}

/// Check the invariants every collection held by the store must satisfy.
pub fn validate_collection(records: &[KpiRecord]) -> Result<(), KpiError> {
    let mut ids = HashSet::with_capacity(records.len());
    let mut titles = HashSet::with_capacity(records.len());

    for record in records {
        if !ids.insert(&record.id) {
            return Err(KpiError::DuplicateId(record.id.to_string()));
        }
        if !titles.insert(record.title.as_str()) {
            return Err(KpiError::DuplicateTitle(record.title.clone()));
        }

        if let (Some(data), Some(labels)) = (&record.chart_data, &record.chart_labels) {
            if data.len() != labels.len() {
                return Err(KpiError::ChartLengthMismatch {
                    id: record.id.to_string(),
                    data: data.len(),
                    labels: labels.len(),
                });
            }
        }

        if let Some(pct) = record.trend_percentage {
            if !pct.is_finite() || pct < 0.0 {
                return Err(KpiError::InvalidTrendPercentage {
                    id: record.id.to_string(),
                    value: pct,
                });
            }
        }

        let mut numbers = record
            .value
            .as_number()
            .into_iter()
            .chain(record.previous_value)
            .chain(record.target);
        if numbers.any(|n| !n.is_finite()) {
            return Err(KpiError::NonFiniteValue(record.id.to_string()));
        }
    }

    Ok(())
}
