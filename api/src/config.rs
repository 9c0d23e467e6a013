//! Backend endpoint and company settings.
//!
//! Native builds read the process environment (after a best-effort `.env`
//! load). Web builds cannot see the environment at runtime, so the same
//! variables are captured at compile time.

use crate::error::{ApiError, ApiResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_WAKE_URL: &str = "https://triple-i-backend.onrender.com";
pub const DEFAULT_COMPANY_ID: i64 = 1;
pub const DEFAULT_COMPANY_NAME: &str = "Company 1";

#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Base URL for `/upload` and `/report`, without a trailing slash.
    pub base_url: String,
    /// URL pinged once at startup so a sleeping backend is warm by the first upload.
    pub wake_url: String,
    pub company_id: i64,
    pub company_name: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            wake_url: DEFAULT_WAKE_URL.to_owned(),
            company_id: DEFAULT_COMPANY_ID,
            company_name: DEFAULT_COMPANY_NAME.to_owned(),
        }
    }
}

impl BackendConfig {
    pub fn from_env() -> ApiResult<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = dotenvy::dotenv();
        }

        let company_id = match lookup("ESGVIEW_COMPANY_ID") {
            Some(raw) => raw.trim().parse().map_err(|e| {
                ApiError::Config(format!("invalid ESGVIEW_COMPANY_ID `{raw}`: {e}"))
            })?,
            None => DEFAULT_COMPANY_ID,
        };

        Ok(Self {
            base_url: trim_url(get_var_or("ESGVIEW_BACKEND_URL", DEFAULT_BASE_URL)),
            wake_url: trim_url(get_var_or("ESGVIEW_WAKE_URL", DEFAULT_WAKE_URL)),
            company_id,
            company_name: get_var_or("ESGVIEW_COMPANY_NAME", DEFAULT_COMPANY_NAME),
        })
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url)
    }

    pub fn report_url(&self) -> String {
        format!("{}/report", self.base_url)
    }
}

fn get_var_or(key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_owned())
}

#[cfg(not(target_arch = "wasm32"))]
fn lookup(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(target_arch = "wasm32")]
fn lookup(key: &str) -> Option<String> {
    let baked = match key {
        "ESGVIEW_BACKEND_URL" => option_env!("ESGVIEW_BACKEND_URL"),
        "ESGVIEW_WAKE_URL" => option_env!("ESGVIEW_WAKE_URL"),
        "ESGVIEW_COMPANY_ID" => option_env!("ESGVIEW_COMPANY_ID"),
        "ESGVIEW_COMPANY_NAME" => option_env!("ESGVIEW_COMPANY_NAME"),
        _ => None,
    };
    baked.map(str::to_owned).filter(|v| !v.trim().is_empty())
}

fn trim_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_owned()
}
