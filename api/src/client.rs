//! HTTP client for the KPI/report backend.
//!
//! Calls are single-shot: no retries and no client-side timeout. A failure is
//! reported to the caller, who surfaces it once and lets the user try again.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::BackendConfig;
use crate::error::{ApiError, ApiResult};
use crate::kpi::{KpiResponse, UploadResponse};
use crate::report::{ReportBundle, ReportFormat, ReportRequest};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Upload a workbook and return the KPI payload computed from it.
    pub async fn upload_workbook(&self, filename: &str, bytes: Vec<u8>) -> ApiResult<KpiResponse> {
        let url = self.config.upload_url();
        tracing::info!(%url, filename, size = bytes.len(), "uploading workbook");

        let part = Part::bytes(bytes)
            .file_name(filename.to_owned())
            .mime_str(XLSX_MIME)?;
        let form = Form::new().part("file", part);

        let response = self.http.post(&url).multipart(form).send().await?;
        let body: UploadResponse = read_json(response).await?;
        Ok(body.kpi_result)
    }

    /// Ask the backend to render reports for `request`. `format` is only used
    /// to attribute a flat single-file response.
    pub async fn request_report(
        &self,
        request: &ReportRequest,
        format: ReportFormat,
    ) -> ApiResult<ReportBundle> {
        let url = self.config.report_url();
        tracing::info!(
            %url,
            %format,
            company_id = request.company_id,
            year = request.year,
            "requesting report"
        );

        let response = self.http.post(&url).json(request).send().await?;
        let body: Value = read_json(response).await?;
        ReportBundle::from_response(body, format)
    }

    /// Ping the backend so a cold instance starts spinning up.
    pub async fn wake_up(&self) -> ApiResult<()> {
        let url = &self.config.wake_url;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        tracing::debug!(%url, "backend awake");
        Ok(())
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "backend returned an error status");
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::kpi::WorkforceEntry;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(BackendConfig {
            base_url: server.uri(),
            wake_url: format!("{}/", server.uri()),
            ..BackendConfig::default()
        })
    }

    fn sample_request() -> ReportRequest {
        ReportRequest {
            kpi_data: KpiResponse {
                workforce_by_gender: Some(vec![WorkforceEntry::new("Male", 10)]),
                ..KpiResponse::default()
            },
            company_id: 1,
            year: 2026,
            company_name: "Company 1".into(),
        }
    }

    #[tokio::test]
    async fn upload_sends_file_field_and_parses_kpis() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/upload"))
            .and(body_string_contains("name=\"file\""))
            .and(body_string_contains("filename=\"people.xlsx\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kpi_result": {
                    "Total Workforce by Gender": [
                        { "gender": "Male", "employee_count": 100 },
                        { "gender": "Female", "employee_count": 100 }
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let kpi = client_for(&server)
            .upload_workbook("people.xlsx", vec![0x50, 0x4b, 0x03, 0x04])
            .await
            .unwrap();

        assert_eq!(kpi.workforce_entries().len(), 2);
    }

    #[tokio::test]
    async fn upload_error_status_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(500).set_body_string("sheet missing"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .upload_workbook("people.xlsx", Vec::new())
            .await
            .unwrap_err();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "sheet missing");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn report_posts_request_body_and_parses_keyed_bundle() {
        let server = MockServer::start().await;
        let request = sample_request();

        Mock::given(method("POST"))
            .and(path("/report"))
            .and(body_json(json!({
                "kpi_data": {
                    "Total Workforce by Gender": [{ "gender": "Male", "employee_count": 10 }]
                },
                "company_id": 1,
                "year": 2026,
                "company_name": "Company 1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "files": {
                    "pdf": { "filename": "esg.pdf", "content": "JVBERg==" },
                    "docx": { "filename": "esg.docx", "content": "UEsDBA==" }
                }
            })))
            .mount(&server)
            .await;

        let bundle = client_for(&server)
            .request_report(&request, ReportFormat::Pdf)
            .await
            .unwrap();

        assert_eq!(bundle.get(ReportFormat::Docx).unwrap().filename, "esg.docx");
    }

    #[tokio::test]
    async fn report_accepts_flat_bundle() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/report"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "file": { "name": "esg.pdf", "base64": "JVBERg==" }
            })))
            .mount(&server)
            .await;

        let bundle = client_for(&server)
            .request_report(&sample_request(), ReportFormat::Pdf)
            .await
            .unwrap();

        assert_eq!(bundle.get(ReportFormat::Pdf).unwrap().content, "JVBERg==");
        assert!(bundle.get(ReportFormat::Docx).is_none());
    }

    #[tokio::test]
    async fn report_with_invalid_json_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/report"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .request_report(&sample_request(), ReportFormat::Docx)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn wake_up_reports_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.wake_up().await,
            Err(ApiError::Status { status: 503, .. })
        ));
        assert!(client.wake_up().await.is_ok());
    }
}
