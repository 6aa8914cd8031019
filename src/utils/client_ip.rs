use std::net::{IpAddr, SocketAddr};

use actix_web::HttpRequest;

/// Visitor IP, honouring `Forwarded`/`X-Forwarded-For` from the reverse proxy.
pub fn client_ip(req: &HttpRequest) -> Option<String> {
    let conn = req.connection_info();
    conn.realip_remote_addr().and_then(parse_ip)
}

/// Accepts bare addresses and `ip:port` pairs.
pub fn parse_ip(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(ip) = raw.parse::<IpAddr>() {
        return Some(ip.to_string());
    }
    raw.parse::<SocketAddr>().ok().map(|addr| addr.ip().to_string())
}
