use api::{BackendClient, BackendConfig, KpiResponse, ReportFormat, ReportRequest};
use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::components::Notice;
use crate::core::materialize::{self, Delivery};
use crate::core::snapshot::KpiSnapshot;
use crate::dashboard::DashboardError;
use crate::t;

/// Body for `POST /report` built from the current snapshot.
pub fn report_request(kpi: &KpiResponse, config: &BackendConfig, year: i32) -> ReportRequest {
    ReportRequest {
        kpi_data: kpi.clone(),
        company_id: config.company_id,
        year,
        company_name: config.company_name.clone(),
    }
}

/// A report needs uploaded data. Without it the user gets a warning and no
/// request goes out.
pub(crate) fn download_gate(snapshot: Option<&KpiSnapshot>) -> Result<&KpiSnapshot, Notice> {
    snapshot.ok_or_else(|| Notice::Warning(t!("notice-upload-first")))
}

#[component]
pub fn ReportExportMenu(
    snapshot: Signal<Option<KpiSnapshot>>,
    notice: Signal<Option<Notice>>,
) -> Element {
    let client = use_context::<BackendClient>();
    let busy = use_signal(|| false);

    let pdf_client = client.clone();
    let docx_client = client;

    rsx! {
        details { class: "export-menu",
            summary {
                class: "button",
                "aria-disabled": "{busy()}",
                if busy() {
                    span { class: "spinner", aria_hidden: "true" }
                    {t!("export-busy")}
                } else {
                    {t!("export-button")}
                }
            }
            div { class: "export-menu__items",
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: busy(),
                    onclick: move |_| start_download(pdf_client.clone(), ReportFormat::Pdf, snapshot, notice, busy),
                    {t!("export-pdf")}
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: busy(),
                    onclick: move |_| start_download(docx_client.clone(), ReportFormat::Docx, snapshot, notice, busy),
                    {t!("export-docx")}
                }
            }
        }
    }
}

fn start_download(
    client: BackendClient,
    format: ReportFormat,
    snapshot: Signal<Option<KpiSnapshot>>,
    mut notice: Signal<Option<Notice>>,
    mut busy: Signal<bool>,
) {
    if busy() {
        return;
    }

    let current = snapshot();
    let kpi = match download_gate(current.as_ref()) {
        Ok(kpi) => kpi.clone(),
        Err(warning) => {
            tracing::info!(%format, "download requested before any upload");
            notice.set(Some(warning));
            return;
        }
    };

    busy.set(true);
    spawn(async move {
        match download_report(&client, &kpi, format).await {
            Ok(Delivery::Saved { filename, location }) => {
                let message = match location {
                    Some(path) => t!("notice-report-saved-to", path = path),
                    None => t!("notice-report-saved", filename = filename),
                };
                notice.set(Some(Notice::Success(message)));
            }
            Ok(Delivery::Missing) => {}
            Err(err) => {
                tracing::error!(%format, %err, "report download failed");
                notice.set(Some(Notice::Error(t!(
                    "notice-report-error",
                    error = err.to_string()
                ))));
            }
        }
        busy.set(false);
    });
}

async fn download_report(
    client: &BackendClient,
    kpi: &KpiSnapshot,
    format: ReportFormat,
) -> Result<Delivery, DashboardError> {
    let year = OffsetDateTime::now_utc().year();
    let request = report_request(kpi.kpi(), client.config(), year);
    let bundle = client.request_report(&request, format).await?;

    let mut sink = materialize::platform_sink()?;
    Ok(materialize::materialize(&bundle, format, &mut sink)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::WorkforceEntry;

    #[test]
    fn download_without_snapshot_is_a_warning() {
        crate::i18n::init();
        match download_gate(None) {
            Err(Notice::Warning(message)) => assert!(!message.is_empty()),
            other => panic!("expected a warning, got {other:?}"),
        }
    }

    #[test]
    fn download_with_snapshot_uses_it() {
        let snapshot = KpiSnapshot::new(KpiResponse::default());
        let gated = download_gate(Some(&snapshot)).unwrap();
        assert_eq!(*gated, snapshot);
    }

    #[test]
    fn request_carries_snapshot_and_company() {
        let kpi = KpiResponse {
            workforce_by_gender: Some(vec![WorkforceEntry::new("Female", 9)]),
            ..KpiResponse::default()
        };
        let config = BackendConfig {
            company_id: 7,
            company_name: "Acme".into(),
            ..BackendConfig::default()
        };

        let request = report_request(&kpi, &config, 2026);

        assert_eq!(request.kpi_data, kpi);
        assert_eq!(request.company_id, 7);
        assert_eq!(request.company_name, "Acme");
        assert_eq!(request.year, 2026);
    }
}
