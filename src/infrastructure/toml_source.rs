// KPI seed collection read from a TOML file
use crate::application::kpi_source::KpiSource;
use crate::domain::kpi::KpiRecord;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    kpis: Vec<KpiRecord>,
}

/// Reads `[[kpis]]` tables using the same field names as the JSON export.
#[derive(Debug, Clone)]
pub struct TomlKpiSource {
    path: PathBuf,
    name: String,
}

impl TomlKpiSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl KpiSource for TomlKpiSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> anyhow::Result<Vec<KpiRecord>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read KPI seed file {}", self.name))?;
        parse_seed(&text).with_context(|| format!("Invalid KPI seed file {}", self.name))
    }
}

pub fn parse_seed(text: &str) -> anyhow::Result<Vec<KpiRecord>> {
    let file: SeedFile = toml::from_str(text).context("Failed to parse KPI seed TOML")?;
    Ok(file.kpis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kpi::{KpiType, KpiValue, Trend};

    const SEED: &str = r##"
        [[kpis]]
        id = "new-customers"
        title = "New Customers"
        value = 1247
        target = 1500
        trend = "up"
        trendPercentage = 8.5
        type = "progress"

        [[kpis]]
        id = "status"
        title = "Status"
        value = "n/a"
        type = "metric"

        [[kpis]]
        id = "reach"
        title = "Reach"
        value = 234567.5
        type = "chart"
        color = "#8B5CF6"
        chartData = [1, 2.5]
        chartLabels = ["W1", "W2"]
    "##;

    #[test]
    fn test_parse_seed() {
        let kpis = parse_seed(SEED).unwrap();
        assert_eq!(kpis.len(), 3);

        assert_eq!(kpis[0].value, KpiValue::Number(1247.0));
        assert_eq!(kpis[0].target, Some(1500.0));
        assert_eq!(kpis[0].trend, Some(Trend::Up));
        assert_eq!(kpis[0].kind, KpiType::Progress);

        assert_eq!(kpis[1].value, KpiValue::Text("n/a".to_string()));
        assert_eq!(kpis[2].chart_data, Some(vec![1.0, 2.5]));
    }

    #[test]
    fn test_parse_seed_rejects_unknown_type() {
        let bad = "[[kpis]]\nid = \"x\"\ntitle = \"X\"\nvalue = 1\ntype = \"gauge\"\n";
        assert!(parse_seed(bad).is_err());
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let source = TomlKpiSource::new("does/not/exist.toml");
        let err = source.load().await.unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
