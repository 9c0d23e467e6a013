use dioxus::prelude::*;

use crate::components::{Notice, NoticeBanner};
use crate::core::format::format_clock;
use crate::core::normalize::{headline_metrics, training_series, workforce_series};
use crate::dashboard::{
    use_snapshot_slot, MetricCards, ReportExportMenu, TrainingHoursChart, UploadButton,
    UploadProgress, WorkforceDonut,
};
use crate::t;

/// KPI dashboard. Every chart and card is derived from the snapshot slot on
/// render, falling back to sample data until the first successful upload.
#[component]
pub fn Dashboard() -> Element {
    let snapshot = use_snapshot_slot();
    let notice = use_signal(|| None::<Notice>);
    let uploading = use_signal(|| false);

    let current = snapshot();
    let kpi = current.as_ref().map(|snap| snap.kpi());
    let metrics = headline_metrics(kpi);
    let training = training_series(kpi);
    let workforce = workforce_series(kpi);

    let status = match &current {
        Some(snap) => t!("dashboard-updated-at", time = format_clock(snap.timestamp())),
        None => t!("dashboard-sample-data"),
    };

    rsx! {
        section { class: "page page-dashboard",
            div { class: "dashboard__header",
                div {
                    h1 { {t!("dashboard-title")} }
                    p { class: "dashboard__status", "{status}" }
                }
                div { class: "dashboard__actions",
                    ReportExportMenu { snapshot, notice }
                    UploadButton { snapshot, notice, busy: uploading }
                }
            }

            UploadProgress { busy: uploading }
            NoticeBanner { notice }

            MetricCards { metrics }

            div { class: "dashboard__charts",
                TrainingHoursChart { series: training }
                WorkforceDonut { slices: workforce }
            }
        }
    }
}
