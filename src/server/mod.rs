//! Local dev server for the dashboard.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - The dashboard page and the schedule checker page
//! - The wasm-pack output under `/pkg/`
//! - A pass-through to the scheduling backend for generate, download and
//!   check requests, so the page can keep using relative URLs
//!
//! Launched via `timetable-dash serve` (default: `http://127.0.0.1:8080`).

mod frontend;
mod proxy;

use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::config::{ClientConfig, ServerConfig};
use crate::endpoints::{CHECK_PATH, DOWNLOAD_EXCEL_PATH, DOWNLOAD_JSON_PATH, Endpoints, GENERATE_PATH};

use proxy::Forwarded;

type HttpResponse = Response<Cursor<Vec<u8>>>;

/// Where a request is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    Index,
    CheckPage,
    /// File under `pkg_dir`, relative path already validated.
    Static(PathBuf),
    /// Forward unchanged to the backend.
    Backend,
    NotFound,
}

/// A request with its body read up-front.
#[derive(Debug)]
struct Incoming {
    method: Method,
    url: String,
    content_type: Option<String>,
    body: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Dev server state: the backend to forward to and the wasm bundle to serve.
pub struct DevServer {
    backend: Endpoints,
    pkg_dir: PathBuf,
    agent: ureq::Agent,
}

impl DevServer {
    pub fn new(server: &ServerConfig, client: &ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(client.timeout_ms))
            .build();
        Self {
            backend: Endpoints::new(&server.backend_url),
            pkg_dir: PathBuf::from(&server.pkg_dir),
            agent,
        }
    }

    /// Start serving on `addr`.
    ///
    /// Blocks the current thread. Handles requests sequentially (sufficient
    /// for a local single-user dashboard). A failing request is answered
    /// with a JSON error and the server keeps going: 400 for an unreadable
    /// body, 502 when the backend fails, 500 otherwise.
    pub fn serve(&self, addr: &str, open: bool) -> Result<()> {
        let server = Server::http(addr)
            .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

        println!("timetable-dash running at http://{addr}");
        println!("Forwarding API requests to {}", self.backend.base());
        if !self.pkg_dir.join("timetable_dash.js").exists() {
            println!(
                "warning: {} has no wasm bundle; run `wasm-pack build --target web` first",
                self.pkg_dir.display()
            );
        }
        println!("Press Ctrl+C to stop.\n");

        if open {
            let _ = open_browser(&format!("http://{addr}"));
        }

        for mut request in server.incoming_requests() {
            let method = request.method().clone();
            let url = request.url().to_string();

            let content_type = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Content-Type"))
                .map(|h| h.value.as_str().to_string());

            let response = match read_body(&method, request.as_reader()) {
                Ok(body) => {
                    let incoming = Incoming {
                        method: method.clone(),
                        url: url.clone(),
                        content_type,
                        body,
                    };
                    self.dispatch(&incoming)
                        .unwrap_or_else(|e| json_error(500, &format!("{e:#}")))
                }
                Err(e) => json_error(400, &format!("failed to read request body: {e}")),
            };
            let status = response.status_code().0;
            let _ = request.respond(response);

            println!(
                "{} {} {} {}",
                method,
                url,
                status,
                chrono::Local::now().format("%H:%M:%S")
            );
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Router
    // -----------------------------------------------------------------------

    fn dispatch(&self, req: &Incoming) -> Result<HttpResponse> {
        match route(&req.method, &req.url) {
            Route::Index => html(frontend::INDEX_HTML),
            Route::CheckPage => html(frontend::CHECK_HTML),
            Route::Static(rel) => self.serve_static(&rel),
            Route::Backend => match proxy::forward(
                &self.agent,
                &self.backend,
                req.method.as_str(),
                &req.url,
                req.content_type.as_deref(),
                &req.body,
            ) {
                Ok(forwarded) => into_response(forwarded),
                Err(e) => Ok(json_error(502, &format!("{e:#}"))),
            },
            Route::NotFound => Ok(json_error(404, "not found")),
        }
    }

    fn serve_static(&self, rel: &Path) -> Result<HttpResponse> {
        let path = self.pkg_dir.join(rel);
        if !path.is_file() {
            return Ok(json_error(404, "not found"));
        }
        let bytes =
            std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Response::from_data(bytes)
            .with_header(header("Content-Type", static_content_type(rel))?)
            .with_status_code(StatusCode(200)))
    }
}

/// Read the request body for methods that carry one; other methods get an
/// empty body without touching the reader.
fn read_body(method: &Method, reader: &mut dyn Read) -> std::io::Result<Vec<u8>> {
    let mut body = Vec::new();
    if matches!(method, Method::Put | Method::Post | Method::Patch) {
        reader.read_to_end(&mut body)?;
    }
    Ok(body)
}

/// Resolve a method and URL to a route. The query string is ignored.
fn route(method: &Method, url: &str) -> Route {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Route::Index,
        (&Method::Get, p) if p == CHECK_PATH => Route::CheckPage,
        (&Method::Post, p) if p == CHECK_PATH || p == GENERATE_PATH => Route::Backend,
        (&Method::Get, p) if p == DOWNLOAD_EXCEL_PATH || p == DOWNLOAD_JSON_PATH => {
            Route::Backend
        }
        (&Method::Get, p) => match p.strip_prefix("/pkg/").and_then(safe_relative_path) {
            Some(rel) => Route::Static(rel),
            None => Route::NotFound,
        },
        _ => Route::NotFound,
    }
}

/// A relative path made only of normal components, or `None`.
fn safe_relative_path(raw: &str) -> Option<PathBuf> {
    if raw.is_empty() || raw.contains('\\') {
        return None;
    }
    let path = Path::new(raw);
    path.components()
        .all(|c| matches!(c, Component::Normal(_)))
        .then(|| path.to_path_buf())
}

fn static_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("ts") => "application/typescript",
        Some("json") => "application/json",
        Some("css") => "text/css; charset=utf-8",
        Some("html") => "text/html; charset=utf-8",
        _ => "application/octet-stream",
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn into_response(forwarded: Forwarded) -> Result<HttpResponse> {
    let mut resp =
        Response::from_data(forwarded.body).with_status_code(StatusCode(forwarded.status));
    if let Some(ct) = &forwarded.content_type {
        resp.add_header(header("Content-Type", ct)?);
    }
    if let Some(cd) = &forwarded.content_disposition {
        resp.add_header(header("Content-Disposition", cd)?);
    }
    Ok(resp)
}

fn html(page: &str) -> Result<HttpResponse> {
    Ok(Response::from_data(page.as_bytes().to_vec())
        .with_header(header("Content-Type", "text/html; charset=utf-8")?)
        .with_status_code(StatusCode(200)))
}

/// JSON `{"error": ...}` response.
fn json_error(status: u16, message: &str) -> HttpResponse {
    let body = serde_json::json!({ "error": message }).to_string();
    let resp = Response::from_data(body.into_bytes()).with_status_code(StatusCode(status));
    match header("Content-Type", "application/json; charset=utf-8") {
        Ok(h) => resp.with_header(h),
        Err(_) => resp,
    }
}

fn header(field: &str, value: &str) -> Result<Header> {
    Header::from_bytes(field.as_bytes(), value.as_bytes())
        .map_err(|_| anyhow::anyhow!("invalid header {field}: {value}"))
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_served_locally() {
        assert_eq!(route(&Method::Get, "/"), Route::Index);
        assert_eq!(route(&Method::Get, "/index.html"), Route::Index);
        assert_eq!(route(&Method::Get, "/check"), Route::CheckPage);
    }

    #[test]
    fn api_calls_go_to_backend() {
        assert_eq!(route(&Method::Post, "/generate_schedule"), Route::Backend);
        assert_eq!(route(&Method::Get, "/download_excel?trimester=1"), Route::Backend);
        assert_eq!(route(&Method::Get, "/download_json?trimester=3"), Route::Backend);
        assert_eq!(route(&Method::Post, "/check"), Route::Backend);
    }

    #[test]
    fn wrong_method_is_not_found() {
        assert_eq!(route(&Method::Get, "/generate_schedule"), Route::NotFound);
        assert_eq!(route(&Method::Delete, "/"), Route::NotFound);
        assert_eq!(route(&Method::Get, "/nope"), Route::NotFound);
    }

    #[test]
    fn pkg_files_are_static() {
        assert_eq!(
            route(&Method::Get, "/pkg/timetable_dash_bg.wasm"),
            Route::Static(PathBuf::from("timetable_dash_bg.wasm"))
        );
        assert_eq!(
            route(&Method::Get, "/pkg/snippets/a.js?v=2"),
            Route::Static(PathBuf::from("snippets/a.js"))
        );
    }

    #[test]
    fn pkg_traversal_is_rejected() {
        assert_eq!(route(&Method::Get, "/pkg/../Cargo.toml"), Route::NotFound);
        assert_eq!(route(&Method::Get, "/pkg//etc/passwd"), Route::NotFound);
        assert_eq!(route(&Method::Get, "/pkg/"), Route::NotFound);
        assert!(safe_relative_path("./a").is_none());
        assert!(safe_relative_path("a\\..\\b").is_none());
    }

    #[test]
    fn static_types() {
        assert_eq!(
            static_content_type(Path::new("timetable_dash.js")),
            "application/javascript"
        );
        assert_eq!(
            static_content_type(Path::new("timetable_dash_bg.wasm")),
            "application/wasm"
        );
        assert_eq!(
            static_content_type(Path::new("README")),
            "application/octet-stream"
        );
    }

    #[test]
    fn unknown_route_dispatches_json_404() {
        let server = DevServer::new(&ServerConfig::default(), &ClientConfig::default());
        let resp = server
            .dispatch(&Incoming {
                method: Method::Get,
                url: "/missing".into(),
                content_type: None,
                body: Vec::new(),
            })
            .unwrap();
        assert_eq!(resp.status_code(), StatusCode(404));
    }

    struct ResetReader;

    impl Read for ResetReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset",
            ))
        }
    }

    #[test]
    fn unreadable_upload_body_is_an_error() {
        assert!(read_body(&Method::Post, &mut ResetReader).is_err());
        assert!(read_body(&Method::Get, &mut ResetReader).unwrap().is_empty());

        let mut ok: &[u8] = b"payload";
        assert_eq!(read_body(&Method::Post, &mut ok).unwrap(), b"payload");
    }

    #[test]
    fn backend_failure_is_a_bad_gateway() {
        let server = DevServer::new(
            &ServerConfig {
                backend_url: "http://127.0.0.1:9".into(),
                ..ServerConfig::default()
            },
            &ClientConfig {
                timeout_ms: 500,
                ..ClientConfig::default()
            },
        );
        let resp = server
            .dispatch(&Incoming {
                method: Method::Get,
                url: "/download_json?trimester=1".into(),
                content_type: None,
                body: Vec::new(),
            })
            .unwrap();
        assert_eq!(resp.status_code(), StatusCode(502));
    }

    #[test]
    fn missing_static_file_is_404() {
        let server = DevServer::new(
            &ServerConfig {
                pkg_dir: "/definitely/not/a/pkg".into(),
                ..ServerConfig::default()
            },
            &ClientConfig::default(),
        );
        let resp = server
            .dispatch(&Incoming {
                method: Method::Get,
                url: "/pkg/timetable_dash.js".into(),
                content_type: None,
                body: Vec::new(),
            })
            .unwrap();
        assert_eq!(resp.status_code(), StatusCode(404));
    }
}
