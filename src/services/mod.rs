pub mod analytics_service;
pub mod comparison_service;
pub mod csv_export_service;
