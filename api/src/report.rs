//! Report generation contract (`POST /report`).
//!
//! The canonical response is keyed by format:
//!
//! ```text
//! { "files": { "pdf": { "filename": "...", "content": "<base64>" }, "docx": { ... } } }
//! ```
//!
//! Older backends answered with a single flat entry, `{ "file": { "name", "base64" } }`,
//! holding whatever format was asked for. Both are accepted and normalized into a
//! [`ReportBundle`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiResult;
use crate::kpi::KpiResponse;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Pdf,
    Docx,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 2] = [ReportFormat::Pdf, ReportFormat::Docx];

    pub fn tag(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Docx => "docx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ReportFormat::Pdf => PDF_MIME,
            ReportFormat::Docx => DOCX_MIME,
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "docx" => Ok(ReportFormat::Docx),
            other => Err(format!("unsupported report format `{other}`")),
        }
    }
}

/// One encoded document as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFile {
    #[serde(alias = "name")]
    pub filename: String,
    /// Base64 (standard alphabet) document bytes.
    #[serde(alias = "base64")]
    pub content: String,
}

impl ReportFile {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireBundle {
    Keyed { files: BTreeMap<String, Value> },
    Flat { file: ReportFile },
}

/// Encoded documents keyed by format. Lives for a single download request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportBundle {
    files: BTreeMap<ReportFormat, ReportFile>,
}

impl ReportBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, format: ReportFormat, file: ReportFile) -> Self {
        self.files.insert(format, file);
        self
    }

    /// Parse a `/report` response body. A flat single-file body is attributed
    /// to `requested`. In a keyed body, unknown formats and null or malformed
    /// entries are skipped so the remaining files stay usable.
    pub fn from_response(body: Value, requested: ReportFormat) -> ApiResult<Self> {
        let wire: WireBundle = serde_json::from_value(body)?;
        let mut bundle = ReportBundle::new();

        match wire {
            WireBundle::Keyed { files } => {
                for (tag, entry) in files {
                    let Ok(format) = tag.parse::<ReportFormat>() else {
                        tracing::debug!(%tag, "skipping unknown report format");
                        continue;
                    };
                    if entry.is_null() {
                        tracing::debug!(%format, "report entry is null");
                        continue;
                    }
                    match serde_json::from_value::<ReportFile>(entry) {
                        Ok(file) => {
                            bundle.files.insert(format, file);
                        }
                        Err(err) => tracing::debug!(%format, %err, "skipping malformed report entry"),
                    }
                }
            }
            WireBundle::Flat { file } => {
                tracing::debug!(format = %requested, "report response used the flat single-file shape");
                bundle.files.insert(requested, file);
            }
        }

        Ok(bundle)
    }

    pub fn get(&self, format: ReportFormat) -> Option<&ReportFile> {
        self.files.get(&format)
    }

    pub fn formats(&self) -> impl Iterator<Item = ReportFormat> + '_ {
        self.files.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Body of `POST /report`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRequest {
    pub kpi_data: KpiResponse,
    pub company_id: i64,
    pub year: i32,
    pub company_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_tags_and_mime_types() {
        assert_eq!(ReportFormat::Pdf.tag(), "pdf");
        assert_eq!(ReportFormat::Docx.mime_type(), DOCX_MIME);
        assert_eq!(" DOCX ".parse::<ReportFormat>(), Ok(ReportFormat::Docx));
        assert!("html".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn keyed_bundle_maps_each_format() {
        let bundle = ReportBundle::from_response(
            json!({
                "files": {
                    "pdf": { "filename": "report.pdf", "content": "AAEC" },
                    "docx": { "filename": "report.docx", "content": "AwQF" }
                }
            }),
            ReportFormat::Pdf,
        )
        .unwrap();

        assert_eq!(bundle.get(ReportFormat::Pdf).unwrap().filename, "report.pdf");
        assert_eq!(bundle.get(ReportFormat::Docx).unwrap().content, "AwQF");
        assert_eq!(bundle.formats().count(), 2);
    }

    #[test]
    fn keyed_bundle_skips_unknown_formats() {
        let bundle = ReportBundle::from_response(
            json!({ "files": { "html": { "filename": "r.html", "content": "" } } }),
            ReportFormat::Pdf,
        )
        .unwrap();
        assert!(bundle.is_empty());
    }

    #[test]
    fn null_sibling_does_not_spoil_the_bundle() {
        let bundle = ReportBundle::from_response(
            json!({ "files": {
                "pdf": { "filename": "r.pdf", "content": "AQID" },
                "docx": null
            } }),
            ReportFormat::Pdf,
        )
        .unwrap();

        assert_eq!(bundle.get(ReportFormat::Pdf).unwrap().filename, "r.pdf");
        assert!(bundle.get(ReportFormat::Docx).is_none());
    }

    #[test]
    fn differently_shaped_entries_are_skipped() {
        let bundle = ReportBundle::from_response(
            json!({ "files": {
                "html": { "url": "x" },
                "docx": { "filename": 7 },
                "pdf": { "name": "r.pdf", "base64": "AQID" }
            } }),
            ReportFormat::Pdf,
        )
        .unwrap();

        assert_eq!(bundle.formats().collect::<Vec<_>>(), [ReportFormat::Pdf]);
        assert_eq!(bundle.get(ReportFormat::Pdf).unwrap().content, "AQID");
    }

    #[test]
    fn flat_bundle_is_attributed_to_requested_format() {
        let bundle = ReportBundle::from_response(
            json!({ "file": { "name": "esg.docx", "base64": "AAEC" } }),
            ReportFormat::Docx,
        )
        .unwrap();

        assert!(bundle.get(ReportFormat::Pdf).is_none());
        let file = bundle.get(ReportFormat::Docx).unwrap();
        assert_eq!(file.filename, "esg.docx");
        assert_eq!(file.content, "AAEC");
    }

    #[test]
    fn unrecognized_body_is_a_decode_error() {
        let result = ReportBundle::from_response(json!({ "status": "ok" }), ReportFormat::Pdf);
        assert!(matches!(result, Err(crate::ApiError::Decode(_))));
    }

    #[test]
    fn report_request_serializes_backend_field_names() {
        let request = ReportRequest {
            kpi_data: KpiResponse::default(),
            company_id: 1,
            year: 2026,
            company_name: "Company 1".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({ "kpi_data": {}, "company_id": 1, "year": 2026, "company_name": "Company 1" })
        );
    }
}
