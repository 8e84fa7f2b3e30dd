// Built-in mock KPI collection
use crate::application::kpi_source::KpiSource;
use crate::domain::kpi::{KpiRecord, KpiType, Trend};
use async_trait::async_trait;

const WEEKS: [&str; 5] = ["Week 1", "Week 2", "Week 3", "Week 4", "Week 5"];

#[derive(Debug, Clone, Default)]
pub struct MockKpiSource;

#[async_trait]
impl KpiSource for MockKpiSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn load(&self) -> anyhow::Result<Vec<KpiRecord>> {
        Ok(mock_kpis())
    }
}

pub fn mock_kpis() -> Vec<KpiRecord> {
    vec![
        KpiRecord::new("total-revenue", "Total Revenue", 2547890.0, KpiType::Comparison)
            .with_previous_value(2234567.0)
            .with_unit("€")
            .with_icon("$")
            .with_trend(Trend::Up, 14.2)
            .with_color("#10B981")
            .with_description("Monthly total revenue")
            .with_chart(
                vec![1800000.0, 1950000.0, 2100000.0, 2234567.0, 2547890.0],
                &["Jan", "Feb", "Mar", "Apr", "May"],
            ),
        KpiRecord::new("new-customers", "New Customers", 1247.0, KpiType::Progress)
            .with_target(1500.0)
            .with_unit("")
            .with_icon("👤")
            .with_trend(Trend::Up, 8.5)
            .with_color("#3B82F6")
            .with_description("Won this month"),
        KpiRecord::new("conversion-rate", "Conversion Rate", 3.42, KpiType::Metric)
            .with_previous_value(3.18)
            .with_unit("%")
            .with_icon("↗")
            .with_trend(Trend::Up, 7.5)
            .with_color("#8B5CF6")
            .with_description("Website to sale")
            .percentage(),
        KpiRecord::new("active-users", "Active Users", 45678.0, KpiType::Chart)
            .with_previous_value(42341.0)
            .with_unit("")
            .with_icon("⚡")
            .with_trend(Trend::Up, 7.9)
            .with_color("#F59E0B")
            .with_description("Last 30 days")
            .with_chart(vec![38000.0, 39500.0, 41200.0, 42341.0, 45678.0], &WEEKS),
        KpiRecord::new("average-order-value", "Average Order Value", 156.78, KpiType::Comparison)
            .with_previous_value(143.22)
            .with_unit("€")
            .with_icon("💳")
            .with_trend(Trend::Up, 9.5)
            .with_color("#EF4444")
            .with_description("Per order"),
        KpiRecord::new("customer-satisfaction", "Customer Satisfaction", 4.8, KpiType::Progress)
            .with_target(5.0)
            .with_unit("/5")
            .with_icon("★")
            .with_trend(Trend::Up, 2.1)
            .with_color("#F97316")
            .with_description("Average rating"),
        KpiRecord::new("marketing-spend", "Marketing Spend", 45230.0, KpiType::Comparison)
            .with_previous_value(52100.0)
            .with_unit("€")
            .with_icon("📊")
            .with_trend(Trend::Down, 13.2)
            .with_color("#06B6D4")
            .with_description("Spent this month"),
        KpiRecord::new("marketing-roi", "Marketing ROI", 340.0, KpiType::Metric)
            .with_previous_value(285.0)
            .with_unit("%")
            .with_icon("🎯")
            .with_trend(Trend::Up, 19.3)
            .with_color("#84CC16")
            .with_description("Return on investment")
            .percentage(),
        KpiRecord::new("website-visitors", "Website Visitors", 89456.0, KpiType::Chart)
            .with_previous_value(76234.0)
            .with_unit("")
            .with_icon("🌐")
            .with_trend(Trend::Up, 17.3)
            .with_color("#6366F1")
            .with_description("Unique visitors")
            .with_chart(vec![65000.0, 68500.0, 72100.0, 76234.0, 89456.0], &WEEKS),
        KpiRecord::new("inventory-level", "Inventory Level", 87.0, KpiType::Progress)
            .with_target(100.0)
            .with_unit("%")
            .with_icon("📦")
            .with_trend(Trend::Down, 5.2)
            .with_color("#DC2626")
            .with_description("Products available")
            .percentage(),
        KpiRecord::new("support-tickets", "Support Tickets", 23.0, KpiType::Comparison)
            .with_previous_value(31.0)
            .with_unit("")
            .with_icon("🎧")
            .with_trend(Trend::Down, 25.8)
            .with_color("#059669")
            .with_description("Open tickets"),
        KpiRecord::new("social-reach", "Social Media Reach", 234567.0, KpiType::Chart)
            .with_previous_value(198234.0)
            .with_unit("")
            .with_icon("📱")
            .with_trend(Trend::Up, 18.3)
            .with_color("#8B5CF6")
            .with_description("People reached")
            .with_chart(vec![180000.0, 185000.0, 192000.0, 198234.0, 234567.0], &WEEKS),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kpi::validate_collection;
    use crate::domain::summary::summarize;

    #[tokio::test]
    async fn test_mock_collection_is_valid() {
        let kpis = MockKpiSource.load().await.unwrap();
        assert_eq!(kpis.len(), 12);
        assert_eq!(validate_collection(&kpis), Ok(()));
    }

    #[test]
    fn test_mock_collection_summary() {
        let stats = summarize(&mock_kpis());
        assert_eq!(stats.total_kpis, 12);
        assert_eq!(stats.up_trends, 9);
        assert_eq!(stats.down_trends, 3);
        assert_eq!(stats.neutral_trends, 0);
    }
}
