//! Report materialization: base64 payload from a [`ReportBundle`] → bytes →
//! a saved file named by the backend.
//!
//! The sink is a trait so the dispatch logic stays platform-agnostic. Web
//! builds hand the bytes to the browser as a download; native builds write
//! into the app's export directory.

use api::report::{ReportBundle, ReportFormat};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("report payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("couldn't save report: {0}")]
    Save(String),
}

/// Decoded document bytes tagged with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBlob {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

impl ReportBlob {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Outcome of a download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Saved under `filename`. `location` is the on-disk path for native
    /// saves and `None` when the browser owns the download.
    Saved {
        filename: String,
        location: Option<String>,
    },
    /// The bundle had no entry for the requested format; nothing was saved.
    Missing,
}

pub trait ReportSink {
    fn save(&mut self, filename: &str, blob: &ReportBlob) -> Result<Option<String>, MaterializeError>;
}

pub fn decode_report(content: &str, mime_type: &'static str) -> Result<ReportBlob, MaterializeError> {
    // Line-wrapped payloads are common; whitespace anywhere is not data.
    let compact: String = content.split_ascii_whitespace().collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(ReportBlob { bytes, mime_type })
}

/// Decode the entry for `format` and hand it to `sink`.
///
/// A missing entry is not an error: it yields [`Delivery::Missing`] without
/// touching the sink. A decode failure aborts before anything is saved.
pub fn materialize<S: ReportSink + ?Sized>(
    bundle: &ReportBundle,
    format: ReportFormat,
    sink: &mut S,
) -> Result<Delivery, MaterializeError> {
    let Some(file) = bundle.get(format) else {
        tracing::warn!(%format, "report bundle has no entry for requested format");
        return Ok(Delivery::Missing);
    };

    let blob = decode_report(&file.content, format.mime_type())?;
    let location = sink.save(&file.filename, &blob)?;
    tracing::info!(%format, filename = %file.filename, bytes = blob.len(), "report saved");

    Ok(Delivery::Saved {
        filename: file.filename.clone(),
        location,
    })
}

#[cfg(target_arch = "wasm32")]
pub type PlatformSink = BrowserDownload;

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformSink = ExportDirectory;

#[cfg(target_arch = "wasm32")]
pub fn platform_sink() -> Result<PlatformSink, MaterializeError> {
    Ok(BrowserDownload)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn platform_sink() -> Result<PlatformSink, MaterializeError> {
    ExportDirectory::from_project_dirs()
}

/// Triggers a browser "save as" through a temporary object URL.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDownload;

#[cfg(target_arch = "wasm32")]
impl ReportSink for BrowserDownload {
    fn save(&mut self, filename: &str, blob: &ReportBlob) -> Result<Option<String>, MaterializeError> {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let fail = |msg: &str| MaterializeError::Save(msg.to_string());

        let array = js_sys::Uint8Array::from(blob.bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(blob.mime_type);
        let js_blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| fail("Failed to create blob"))?;
        let url = Url::create_object_url_with_blob(&js_blob)
            .map_err(|_| fail("Unable to create download"))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| fail("Document unavailable"))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| fail("Unable to create anchor"))?
            .dyn_into()
            .map_err(|_| fail("Anchor cast failed"))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or_else(|| fail("Missing body"))?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }
}

/// Writes reports into a directory, by default `<data dir>/exports`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct ExportDirectory {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl ExportDirectory {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_project_dirs() -> Result<Self, MaterializeError> {
        let dirs = directories::ProjectDirs::from("com", "Esgview", "Esgview").ok_or_else(|| {
            MaterializeError::Save("Unable to determine export directory".to_string())
        })?;
        Ok(Self::new(dirs.data_dir().join("exports")))
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ReportSink for ExportDirectory {
    fn save(&mut self, filename: &str, blob: &ReportBlob) -> Result<Option<String>, MaterializeError> {
        use std::fs;
        use std::path::Path;

        // Only the final component is used so a name like `a/b.pdf` stays inside the export dir.
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| MaterializeError::Save(format!("unusable filename `{filename}`")))?;

        fs::create_dir_all(&self.dir).map_err(|err| MaterializeError::Save(err.to_string()))?;
        let path = self.dir.join(name);
        fs::write(&path, &blob.bytes).map_err(|err| MaterializeError::Save(err.to_string()))?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}
