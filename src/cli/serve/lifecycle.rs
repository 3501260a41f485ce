//! Listener binding.

use crate::log;
use anyhow::{Result, anyhow};
use std::net::{IpAddr, SocketAddr};
use tiny_http::Server;

/// How many consecutive ports to try before giving up.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind the listener, walking up from `base_port` while ports are taken.
///
/// Returns the server together with the address it actually bound, which
/// may sit up to [`MAX_PORT_RETRIES`] - 1 above the requested port.
pub fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let mut last_err = None;

    for port in (0..MAX_PORT_RETRIES).map(|offset| base_port.saturating_add(offset)) {
        let addr = SocketAddr::new(interface, port);
        match Server::http(addr) {
            Ok(server) => {
                if port != base_port {
                    log!("serve"; "port {base_port} busy, bound {port} instead");
                }
                return Ok((server, addr));
            }
            Err(e) => last_err = Some(e),
        }
    }

    Err(anyhow!(
        "no free port in {}-{}: {}",
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_err.map_or_else(|| String::from("unknown error"), |e| e.to_string())
    ))
}
