use crate::application::dashboard_controller::{ControllerSettings, DEFAULT_REFRESH_DELAY};
use crate::application::kpi_store::DEFAULT_UPDATE_INTERVAL;
use crate::domain::format::NumberLocale;
use crate::domain::view::{KpiFilter, Theme, ViewMode};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub updates: UpdateSettings,
    pub view: ViewSettings,
    pub seed: SeedSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UpdateSettings {
    pub enabled: bool,
    pub interval_secs: u64,
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: DEFAULT_UPDATE_INTERVAL.as_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ViewSettings {
    pub refresh_delay_ms: u64,
    pub default_filter: KpiFilter,
    pub default_view_mode: ViewMode,
    pub default_theme: Theme,
    pub locale: NumberLocale,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            refresh_delay_ms: DEFAULT_REFRESH_DELAY.as_millis() as u64,
            default_filter: KpiFilter::All,
            default_view_mode: ViewMode::Grid,
            default_theme: Theme::Light,
            locale: NumberLocale::En,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SeedSettings {
    /// TOML seed file; the built-in mock collection is used when unset
    pub path: Option<String>,
}

impl DashboardConfig {
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.updates.interval_secs)
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            refresh_delay: Duration::from_millis(self.view.refresh_delay_ms),
            simulate_updates: self.updates.enabled,
            filter: self.view.default_filter,
            view_mode: self.view.default_view_mode,
            theme: self.view.default_theme,
        }
    }
}

/// Load `config/dashboard.toml` (optional) with `KPI_` environment overrides,
/// e.g. `KPI_UPDATES__INTERVAL_SECS=5`.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("KPI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
