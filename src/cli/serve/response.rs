//! HTTP responders. Every response carries an explicit cache policy.

use super::cache;
use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Bytes escaped in a Location path: controls, space, and the delimiters
/// that would terminate or re-scope the path. Non-ASCII is always escaped.
const LOCATION_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'#');

/// Respond with a static file under the given cache policy.
pub fn respond_file(request: Request, path: &Path, cache: Vec<Header>) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type, cache);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, cache, body)
}

/// Respond with a temporary redirect to the fingerprinted URL.
///
/// 302 with the no-cache set: the mapping changes whenever the asset
/// does, so the redirect itself must never be cached.
pub fn respond_redirect(request: Request, location: &str) -> Result<()> {
    let location_header = Header::from_bytes("Location", encode_location(location).as_bytes())
        .map_err(|()| anyhow::anyhow!("invalid redirect location: {location}"))?;

    let mut response = Response::empty(StatusCode(302)).with_header(location_header);
    for header in cache::none() {
        response.add_header(header);
    }
    request.respond(response)?;
    Ok(())
}

/// Respond to the health check.
pub fn respond_health(request: Request) -> Result<()> {
    use crate::utils::mime::types::JSON;
    let body = br#"{"status":"ok"}"#.to_vec();

    if is_head_request(&request) {
        return send_head(request, 200, JSON, cache::none());
    }
    send_body(request, 200, JSON, cache::none(), body)
}

/// Respond with 404 Not Found.
pub fn respond_not_found(request: Request) -> Result<()> {
    use crate::utils::mime::types::PLAIN;

    if is_head_request(&request) {
        return send_head(request, 404, PLAIN, cache::none());
    }
    send_body(request, 404, PLAIN, cache::none(), b"404 Not Found".to_vec())
}

/// Respond with 405 for anything but GET and HEAD.
pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    use crate::utils::mime::types::PLAIN;

    let mut response = Response::from_data(b"405 Method Not Allowed".to_vec())
        .with_status_code(StatusCode(405))
        .with_header(make_header("Content-Type", PLAIN))
        .with_header(make_header("Allow", "GET, HEAD"));
    for header in cache::none() {
        response.add_header(header);
    }
    request.respond(response)?;
    Ok(())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    use crate::utils::mime::types::PLAIN;
    send_body(
        request,
        503,
        PLAIN,
        cache::none(),
        b"503 Service Unavailable".to_vec(),
    )
}

/// Percent-encode a redirect target, keeping path separators intact.
fn encode_location(location: &str) -> String {
    utf8_percent_encode(location, LOCATION_ESCAPE).to_string()
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(
    request: Request,
    status: u16,
    content_type: &'static str,
    cache: Vec<Header>,
) -> Result<()> {
    let mut response = Response::empty(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    for header in cache {
        response.add_header(header);
    }
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    cache: Vec<Header>,
    body: Vec<u8>,
) -> Result<()> {
    let mut response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    for header in cache {
        response.add_header(header);
    }
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
