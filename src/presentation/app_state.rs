// Application state for HTTP handlers
use crate::application::dashboard_controller::DashboardController;
use crate::application::kpi_store::KpiStore;
use crate::application::streaming_service::StreamingService;
use crate::domain::format::NumberLocale;

pub struct AppState {
    pub store: KpiStore,
    pub controller: DashboardController,
    pub streaming_service: StreamingService,
    pub locale: NumberLocale,
}
