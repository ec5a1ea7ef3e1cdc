use crate::error::{LmsError, Result};
use crate::transport::TransportConfig;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECONDS: f64 = 100.0;
pub const DEFAULT_IMAGE_PNG_FILE: &str = "./testdata/files/image.png";
pub const DEFAULT_RESULTS_DIR: &str = "./lms-results";

#[derive(Debug, Clone, PartialEq)]
pub struct LmsConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub image_png_file: PathBuf,
    pub results_dir: PathBuf,
}

impl LmsConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Try to load .env file if it exists (ignore if it doesn't)
        let _ = dotenvy::dotenv();

        let base_url =
            env::var("LMS_HTTP_CLIENT_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());

        let timeout = match env::var("LMS_HTTP_CLIENT_TIMEOUT") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => Duration::from_secs_f64(DEFAULT_TIMEOUT_SECONDS),
        };

        let image_png_file = env::var("LMS_TEST_DATA_IMAGE_PNG_FILE")
            .unwrap_or_else(|_| DEFAULT_IMAGE_PNG_FILE.to_string());

        let results_dir =
            env::var("LMS_RESULTS_DIR").unwrap_or_else(|_| DEFAULT_RESULTS_DIR.to_string());

        Self::new(base_url, Some(timeout), Some(image_png_file.into()), Some(results_dir.into()))
    }

    /// Create a new configuration with explicit values
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
        image_png_file: Option<PathBuf>,
        results_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(LmsError::Config(format!(
                "LMS_HTTP_CLIENT_URL must be an http(s) URL, got '{}'",
                base_url
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: timeout.unwrap_or_else(|| Duration::from_secs_f64(DEFAULT_TIMEOUT_SECONDS)),
            image_png_file: image_png_file.unwrap_or_else(|| DEFAULT_IMAGE_PNG_FILE.into()),
            results_dir: results_dir.unwrap_or_else(|| DEFAULT_RESULTS_DIR.into()),
        })
    }

    /// Transport settings shared by the public client and every session.
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig::new(self.base_url.clone(), self.timeout)
    }

    /// Absolute URL under which the server publishes an uploaded file.
    pub fn static_url(&self, directory: &str, filename: &str) -> String {
        format!("{}/static/{}/{}", self.base_url, directory, filename)
    }

    /// `key=value` lines describing the run environment.
    pub fn environment_properties(&self) -> String {
        [
            format!("http_client.url={}", self.base_url),
            format!("http_client.timeout={}", self.timeout.as_secs_f64()),
            format!("test_data.image_png_file={}", self.image_png_file.display()),
            format!("results_dir={}", self.results_dir.display()),
            format!("os_info={}, {}", env::consts::OS, env::consts::ARCH),
        ]
        .join("\n")
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .map(Duration::from_secs_f64)
        .ok_or_else(|| {
            LmsError::Config(format!(
                "LMS_HTTP_CLIENT_TIMEOUT must be a positive number of seconds, got '{}'",
                raw
            ))
        })
}
