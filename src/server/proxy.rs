//! Forwarding of API requests to the scheduling backend.

use std::io::Read;

use anyhow::{Context, Result, bail};

use crate::endpoints::Endpoints;

/// Upper bound on a forwarded response body (exported workbooks included).
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Backend answer, reduced to what the browser needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Forwarded {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

/// Send the request to the backend and capture its response.
///
/// Non-success statuses are passed through as they are; only transport
/// failures become errors.
pub(super) fn forward(
    agent: &ureq::Agent,
    backend: &Endpoints,
    method: &str,
    path_and_query: &str,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<Forwarded> {
    let url = backend.join(path_and_query);
    let mut request = agent.request(method, &url);
    if let Some(ct) = content_type {
        request = request.set("Content-Type", ct);
    }

    let result = if body.is_empty() && method != "POST" {
        request.call()
    } else {
        request.send_bytes(body)
    };

    let response = match result {
        Ok(resp) => resp,
        Err(ureq::Error::Status(_, resp)) => resp,
        Err(ureq::Error::Transport(t)) => {
            return Err(anyhow::anyhow!("backend unreachable at {url}: {t}"));
        }
    };

    capture(response).with_context(|| format!("failed reading response from {url}"))
}

fn capture(response: ureq::Response) -> Result<Forwarded> {
    let status = response.status();
    let content_type = response.header("Content-Type").map(str::to_string);
    let content_disposition = response.header("Content-Disposition").map(str::to_string);

    let body = read_capped(response.into_reader(), MAX_BODY_BYTES)?;

    Ok(Forwarded {
        status,
        content_type,
        content_disposition,
        body,
    })
}

/// Read the whole body, failing instead of truncating past `limit` bytes.
fn read_capped(reader: impl Read, limit: u64) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut body)?;
    if body.len() as u64 > limit {
        bail!("response body exceeds {limit} bytes");
    }
    Ok(body)
}
