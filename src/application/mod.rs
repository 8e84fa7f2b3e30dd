// Application layer - Stateful use cases over the KPI domain
pub mod dashboard_controller;
pub mod kpi_source;
pub mod kpi_store;
pub mod streaming_service;
