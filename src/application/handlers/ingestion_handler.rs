use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, Method, Uri},
    response::IntoResponse,
};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::application::services::bridge_service::{BridgeService, InboundReport};
use crate::domain::entities::ingestion_record::RequestMeta;
use crate::domain::services::wire_protocol::CONTENT_TYPE;

/// Address used when neither proxy headers nor the socket identify the caller.
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// Terminal poll: store the status report, answer with pending commands.
///
/// Always `200 OK` with a `text/plain` body, whatever the request contained.
pub async fn ingest_status_report(
    State(service): State<Arc<BridgeService>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> impl IntoResponse {
    let peer = connect_info.map(|ConnectInfo(addr)| addr);
    let source_address = client_address(&headers, peer);

    let body = match axum::body::to_bytes(body, service.config.max_body_bytes).await {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => Err(e.to_string()),
    };

    let inbound = InboundReport {
        source_address,
        request: RequestMeta {
            method: method.to_string(),
            path: uri.path().to_string(),
            headers: header_pairs(&headers),
        },
        body,
    };

    let reply = service.ingest(inbound);
    ([(header::CONTENT_TYPE, CONTENT_TYPE)], reply.body)
}

/// Best-effort caller address: `X-Real-Ip`, then the first `X-Forwarded-For`
/// hop, then the socket peer.
pub fn client_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let from_header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    from_header("x-real-ip")
        .or_else(|| from_header("x-forwarded-for"))
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string())
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}
