//! Backend contract for esgview: KPI payload types, report bundles, and the
//! HTTP client that talks to the KPI/report service.

pub mod client;
pub mod config;
pub mod error;
pub mod kpi;
pub mod report;

pub use client::BackendClient;
pub use config::BackendConfig;
pub use error::{ApiError, ApiResult};
pub use kpi::{KpiResponse, TrainingBreakdownEntry, WorkforceEntry};
pub use report::{ReportBundle, ReportFile, ReportFormat, ReportRequest};
