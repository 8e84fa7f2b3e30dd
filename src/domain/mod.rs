// Domain layer - KPI model and the pure logic built on it
pub mod error;
pub mod format;
pub mod kpi;
pub mod summary;
pub mod view;
