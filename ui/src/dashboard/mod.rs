mod cards;
pub use cards::MetricCards;

mod charts;
pub use charts::{TrainingHoursChart, WorkforceDonut};

mod export;
pub use export::{report_request, ReportExportMenu};

mod upload;
pub use upload::{UploadButton, UploadProgress};

use api::{ApiError, BackendClient, BackendConfig};
use dioxus::prelude::*;
use thiserror::Error;

use crate::core::materialize::MaterializeError;
use crate::core::snapshot::KpiSnapshot;

/// Anything that can go wrong during a single dashboard action.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("couldn't read {0}")]
    Read(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}

/// Client built from the environment, or from defaults if that fails.
pub fn backend_client() -> BackendClient {
    let config = BackendConfig::from_env().unwrap_or_else(|err| {
        tracing::error!(%err, "invalid backend configuration; using defaults");
        BackendConfig::default()
    });
    tracing::info!(base_url = %config.base_url, "backend configured");
    BackendClient::new(config)
}

/// Provide a [`BackendClient`] to the component tree and ping the backend
/// once so it is awake by the time the first workbook is uploaded.
pub fn use_backend_provider() -> BackendClient {
    let client = use_context_provider(backend_client);

    use_hook(|| {
        let client = client.clone();
        spawn(async move {
            if let Err(err) = client.wake_up().await {
                tracing::warn!(%err, "backend wake-up failed");
            }
        });
    });

    client
}

/// The dashboard's single KPI slot.
#[derive(Clone, Copy, PartialEq)]
pub struct SnapshotSlot(pub Signal<Option<KpiSnapshot>>);

/// Hoist the KPI slot above the router. Shells that remount their routed
/// subtree on language switch call this so an upload survives the switch.
pub fn provide_snapshot_slot() -> SnapshotSlot {
    use_context_provider(|| SnapshotSlot(Signal::new(None)))
}

/// The hoisted slot if a shell provided one, otherwise a slot local to the
/// calling component.
pub fn use_snapshot_slot() -> Signal<Option<KpiSnapshot>> {
    let hoisted = try_use_context::<SnapshotSlot>();
    let local = use_signal(|| None);
    hoisted.map(|slot| slot.0).unwrap_or(local)
}
