// Source trait for the initial KPI collection
use crate::domain::kpi::KpiRecord;
use async_trait::async_trait;

#[async_trait]
pub trait KpiSource: Send + Sync {
    /// Human-readable name used in logs
    fn name(&self) -> &str;

    /// Load the collection the dashboard is seeded with
    async fn load(&self) -> anyhow::Result<Vec<KpiRecord>>;
}
