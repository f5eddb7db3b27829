/// Blocking HTTP client for the scheduling backend.
///
/// Uses the synchronous `ureq` client. Provides:
///
/// - **Generate**: multipart upload of the GA input plus the trimester,
///   decoded into [`MetricsResponse`].
/// - **Download**: fetch an exported artifact and write it to disk.
pub mod multipart;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::ClientConfig;
use crate::endpoints::Endpoints;
use crate::error::GenerateError;
use crate::metrics::MetricsResponse;
use crate::trimester::Trimester;

use multipart::{MultipartForm, guess_content_type};

/// File chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn read(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { name, bytes })
    }
}

/// Synchronous client bound to one backend origin.
#[derive(Debug)]
pub struct ScheduleClient {
    agent: ureq::Agent,
    endpoints: Endpoints,
}

impl ScheduleClient {
    pub fn new(backend_url: &str, config: &ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build();
        Self {
            agent,
            endpoints: Endpoints::new(backend_url),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// `POST /generate_schedule` with the upload and trimester.
    pub fn generate(
        &self,
        url: &str,
        upload: &UploadFile,
        trimester: Trimester,
    ) -> Result<MetricsResponse, GenerateError> {
        let form = MultipartForm::new()
            .file(
                "file",
                &upload.name,
                guess_content_type(&upload.name),
                &upload.bytes,
            )
            .text("trimester", trimester.as_str());
        let content_type = form.content_type();

        let response = self
            .agent
            .post(url)
            .set("Content-Type", &content_type)
            .send_bytes(&form.finish())
            .map_err(classify_error)?;

        response
            .into_json::<MetricsResponse>()
            .map_err(|e| GenerateError::Decode(e.to_string()))
    }

    /// Download an artifact into `out_dir`, returning the written path.
    ///
    /// The file is named after the server's `Content-Disposition` when it
    /// provides one.
    pub fn download(&self, url: &str, fallback_name: &str, out_dir: &Path) -> Result<PathBuf> {
        let response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => {
                anyhow::anyhow!("download failed: {url} returned HTTP {code}")
            }
            other => anyhow::anyhow!("download failed: {url}: {other}"),
        })?;

        let name = response
            .header("Content-Disposition")
            .and_then(attachment_file_name)
            .unwrap_or_else(|| fallback_name.to_string());

        fs::create_dir_all(out_dir)
            .with_context(|| format!("failed to create {}", out_dir.display()))?;
        let path = out_dir.join(name);

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .context("failed reading download body")?;
        fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;

        Ok(path)
    }
}

fn classify_error(err: ureq::Error) -> GenerateError {
    match err {
        ureq::Error::Status(code, _) => GenerateError::HttpStatus(code),
        ureq::Error::Transport(t) => GenerateError::Network(t.to_string()),
    }
}

/// File name from a `Content-Disposition` header, without any directory.
pub fn attachment_file_name(header: &str) -> Option<String> {
    let raw = header.split(';').map(str::trim).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("filename")
            .then(|| value.trim().trim_matches('"').to_string())
    })?;

    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if base.is_empty() || base == "." || base == ".." {
        None
    } else {
        Some(base.to_string())
    }
}
