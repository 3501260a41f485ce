//! HTTP server for the fingerprinted asset tree.
//!
//! Request routing, in order:
//! 1. `/healthz` answers the health check.
//! 2. URLs under the mount prefix are served from disk; paths registered
//!    as fingerprinted get the forever-cache set, everything else on disk
//!    gets no-cache.
//! 3. Logical paths known to the index are redirected (302) to their
//!    fingerprinted URLs.
//! 4. Everything else is a 404.

mod cache;
mod lifecycle;
mod path;
mod response;

use crate::{asset::FingerprintIndex, config::Config, core, debug, log};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tiny_http::{Header, Method, Request, Server};

/// Everything a request handler needs, shared across the worker pool.
struct ServeContext {
    /// Assets root on disk.
    root: PathBuf,
    /// Normalized URL prefix the root is mounted under.
    prefix: String,
    /// Sealed logical -> fingerprinted mapping.
    index: FingerprintIndex,
}

/// Build the index, then serve it until shutdown.
///
/// The build runs to completion before the listener binds, so requests
/// can never observe a half-fingerprinted tree, and a failed build never
/// leaves a bound socket behind.
pub fn run(config: &Config) -> Result<()> {
    let index = super::build::build_index(config)?;

    let ctx = Arc::new(ServeContext {
        root: config.assets.root.clone(),
        prefix: crate::asset::normalize_prefix(&config.assets.url_prefix),
        index,
    });

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    core::register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);

    run_request_loop(&server, ctx);
    Ok(())
}

fn run_request_loop(server: &Server, ctx: Arc<ServeContext>) {
    // Use thread pool to handle requests concurrently
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .expect("failed to create thread pool");

    for request in server.incoming_requests() {
        let ctx = Arc::clone(&ctx);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &ctx) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

/// Handle a single HTTP request
fn handle_request(request: Request, ctx: &ServeContext) -> Result<()> {
    // Early exit if shutdown requested
    if core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_method_not_allowed(request);
    }

    let url = format!("/{}", path::normalize_url(request.url()));

    if url == "/healthz" {
        return response::respond_health(request);
    }

    // Serve from disk; only registered fingerprinted paths are immutable
    if let Some(rel) = path::strip_url_prefix(&url, &ctx.prefix)
        && let Some(file) = path::resolve_file(rel, &ctx.root)
    {
        return response::respond_file(request, &file, cache_policy(ctx, &url));
    }

    // Logical path: send the client to the fingerprinted URL
    if let Some(fingerprinted) = ctx.index.get(&url) {
        debug!("serve"; "{} -> {}", url, fingerprinted);
        return response::respond_redirect(request, fingerprinted);
    }

    response::respond_not_found(request)
}

/// Cache policy for a URL that resolved to a file on disk.
///
/// Forever-cache only for registered fingerprinted paths; any other
/// on-disk file can change bytes without changing its URL.
fn cache_policy(ctx: &ServeContext, url: &str) -> Vec<Header> {
    if ctx.index.is_fingerprinted(url) {
        cache::forever()
    } else {
        cache::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ServeContext {
        let mut index = FingerprintIndex::new();
        index.insert(
            "/static/css/site.css".into(),
            "/static/css/site.66189abc248d80832e458ee37e93c9e8.css".into(),
        );
        ServeContext {
            root: PathBuf::from("static"),
            prefix: String::from("/static"),
            index,
        }
    }

    fn cache_control(headers: &[Header]) -> String {
        headers
            .iter()
            .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case("Cache-Control"))
            .map(|h| h.value.to_string())
            .unwrap()
    }

    #[test]
    fn test_cache_policy_forever_only_for_registered_paths() {
        let ctx = context();

        // Registered fingerprinted value: immutable for a year
        let policy = cache_policy(&ctx, "/static/css/site.66189abc248d80832e458ee37e93c9e8.css");
        assert!(cache_control(&policy).contains("immutable"));

        // The logical path resolves on disk too, but its bytes can change
        let policy = cache_policy(&ctx, "/static/css/site.css");
        assert!(cache_control(&policy).contains("no-store"));

        // Fingerprint-shaped but never registered: still no-cache
        let policy = cache_policy(&ctx, "/static/css/other.00000000000000000000000000000000.css");
        assert!(cache_control(&policy).contains("no-store"));
    }
}
