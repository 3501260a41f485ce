//! Graceful shutdown state.
//!
//! A `SHUTDOWN` flag flipped by the Ctrl+C handler, and the listener
//! handle the handler needs to unblock the request loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tiny_http::Server;

/// Flipped once Ctrl+C arrives; request handlers answer 503 afterwards.
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Listener handle, filled in after serve binds.
static SERVER: OnceLock<Arc<Server>> = OnceLock::new();

/// Install the Ctrl+C handler. Call once, before anything blocks.
///
/// While the build still runs nothing is bound, so the handler exits the
/// process outright; once [`register_server`] has run it unblocks the
/// request loop instead and lets serve wind down.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        match SERVER.get() {
            Some(server) => {
                crate::log!("serve"; "shutting down...");
                server.unblock();
            }
            // Build phase, nothing bound to drain
            None => std::process::exit(0),
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to install Ctrl+C handler: {e}"))
}

/// Hand the bound listener to the shutdown handler.
///
/// Call between binding and the first `incoming_requests` iteration.
pub fn register_server(server: Arc<Server>) {
    let _ = SERVER.set(server);
}

/// Has shutdown been requested?
///
/// Relaxed is enough here; a request racing the flag just completes
/// normally before the loop stops.
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_flag() {
        SHUTDOWN.store(false, Ordering::SeqCst);
        assert!(!is_shutdown());

        SHUTDOWN.store(true, Ordering::SeqCst);
        assert!(is_shutdown());

        SHUTDOWN.store(false, Ordering::SeqCst);
    }
}
