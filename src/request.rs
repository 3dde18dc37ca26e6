//! The request abstraction validators run against.

use axum::body::Bytes;
use axum::http::Method;
use std::collections::HashMap;
use std::net::SocketAddr;

/// One inbound webhook delivery, as seen by a validator.
///
/// The remote address is kept as the string the transport reported; the
/// IP check parses it and treats anything unparseable as untrusted rather
/// than failing the whole call.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    pub method: Method,
    pub remote_ip: String,
    pub query: HashMap<String, String>,
    pub body: Bytes,
}

impl IncomingRequest {
    pub fn new(
        method: Method,
        remote_ip: impl Into<String>,
        query: HashMap<String, String>,
        body: impl Into<Bytes>,
    ) -> Self {
        Self {
            method,
            remote_ip: remote_ip.into(),
            query,
            body: body.into(),
        }
    }

    /// Builds a request from the pieces an axum handler already has in
    /// hand: the method, the peer address from `ConnectInfo`, the query
    /// map from `Query`, and the raw body `Bytes`.
    pub fn from_parts(
        method: Method,
        peer: SocketAddr,
        query: HashMap<String, String>,
        body: Bytes,
    ) -> Self {
        Self {
            method,
            remote_ip: peer.ip().to_string(),
            query,
            body,
        }
    }
}
