use api::BackendClient;
use dioxus::prelude::*;

use crate::components::Notice;
use crate::core::snapshot::KpiSnapshot;
use crate::core::timing::sleep_ms;
use crate::dashboard::DashboardError;
use crate::t;

const STAGE_INTERVAL_MS: u32 = 1000;

/// Message keys shown while an upload is in flight, in order. The last
/// stage sticks until the upload finishes.
pub(crate) const UPLOAD_STAGES: [&str; 6] = [
    "stage-uploading",
    "stage-computing",
    "stage-generating",
    "stage-coffee",
    "stage-croissant",
    "stage-done",
];

pub(crate) fn next_stage(current: usize) -> usize {
    (current + 1).min(UPLOAD_STAGES.len() - 1)
}

/// Key for the file input. Bumping the attempt swaps in a fresh element, so
/// picking the same workbook again still fires `onchange`.
pub(crate) fn input_key(attempt: u32) -> String {
    format!("workbook-input-{attempt}")
}

fn stage_label(index: usize) -> String {
    match UPLOAD_STAGES.get(index).copied().unwrap_or("stage-done") {
        "stage-uploading" => t!("stage-uploading"),
        "stage-computing" => t!("stage-computing"),
        "stage-generating" => t!("stage-generating"),
        "stage-coffee" => t!("stage-coffee"),
        "stage-croissant" => t!("stage-croissant"),
        _ => t!("stage-done"),
    }
}

/// Workbook picker. A successful upload replaces the snapshot wholesale;
/// a failed one leaves it untouched.
#[component]
pub fn UploadButton(
    mut snapshot: Signal<Option<KpiSnapshot>>,
    mut notice: Signal<Option<Notice>>,
    mut busy: Signal<bool>,
) -> Element {
    let client = use_context::<BackendClient>();
    let mut attempt = use_signal(|| 0u32);
    let input_id = input_key(attempt());
    let class_name = if busy() {
        "button button--primary is-busy"
    } else {
        "button button--primary"
    };

    let onchange = move |evt: FormEvent| {
        if busy() {
            return;
        }
        let client = client.clone();
        busy.set(true);
        spawn(async move {
            match upload_selected(&client, evt).await {
                Ok(Some(kpi)) => {
                    snapshot.set(Some(KpiSnapshot::new(kpi)));
                    notice.set(Some(Notice::Success(t!("notice-upload-success"))));
                }
                Ok(None) => tracing::debug!("file dialog closed without a selection"),
                Err(err) => {
                    tracing::error!(%err, "workbook upload failed");
                    notice.set(Some(Notice::Error(t!(
                        "notice-upload-error",
                        error = err.to_string()
                    ))));
                }
            }
            busy.set(false);
            attempt += 1;
        });
    };

    rsx! {
        label { class: "{class_name}",
            input {
                key: "{input_id}",
                r#type: "file",
                accept: ".xlsx",
                class: "visually-hidden",
                disabled: busy(),
                onchange: onchange,
            }
            if busy() {
                span { class: "spinner", aria_hidden: "true" }
                {t!("upload-busy")}
            } else {
                {t!("upload-button")}
            }
        }
    }
}

async fn upload_selected(
    client: &BackendClient,
    evt: FormEvent,
) -> Result<Option<api::KpiResponse>, DashboardError> {
    let Some(engine) = evt.files() else {
        return Ok(None);
    };
    let Some(name) = engine.files().into_iter().next() else {
        return Ok(None);
    };

    let bytes = engine
        .read_file(&name)
        .await
        .ok_or_else(|| DashboardError::Read(name.clone()))?;
    tracing::info!(file = %name, bytes = bytes.len(), "uploading workbook");

    let kpi = client.upload_workbook(&name, bytes).await?;
    Ok(Some(kpi))
}

/// Rotating status line shown while `busy` is set.
#[component]
pub fn UploadProgress(busy: Signal<bool>) -> Element {
    let mut stage = use_signal(|| 0usize);

    use_future(move || async move {
        loop {
            sleep_ms(STAGE_INTERVAL_MS).await;
            if *busy.peek() {
                let current = *stage.peek();
                stage.set(next_stage(current));
            } else if *stage.peek() != 0 {
                stage.set(0);
            }
        }
    });

    if !busy() {
        return rsx! {};
    }

    rsx! {
        p { class: "upload-progress", role: "status",
            span { class: "spinner", aria_hidden: "true" }
            "{stage_label(stage())}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_advance_and_stick_on_last() {
        assert_eq!(next_stage(0), 1);
        assert_eq!(next_stage(4), 5);
        assert_eq!(next_stage(5), 5);
        assert_eq!(next_stage(42), 5);
    }

    #[test]
    fn each_attempt_gets_a_distinct_input() {
        assert_ne!(input_key(0), input_key(1));
        assert_eq!(input_key(3), input_key(3));
    }

    #[test]
    fn every_stage_has_a_label() {
        crate::i18n::init();
        for index in 0..UPLOAD_STAGES.len() {
            assert!(!stage_label(index).is_empty());
        }
        assert_eq!(stage_label(99), stage_label(UPLOAD_STAGES.len() - 1));
    }
}
