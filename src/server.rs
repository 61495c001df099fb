//! The JSON HTTP endpoints and the static demo page.
//!
//! The route table follows the frontend contract: health/status probes, the latest finger count,
//! a frame-processing endpoint for clients that run the pose estimator themselves, and the
//! embedded page. Routing is a pure function from request to response value so it can be tested
//! without sockets.

use std::io::{self, Read};
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::json;
use tiny_http::{Header, Method, Response, Server};

use crate::{
    hand::{fingers, landmark::Landmark},
    snapshot::SnapshotCell,
};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// 1x1 transparent PNG served as favicon, to keep browsers from logging 404s.
static FAVICON: Lazy<Vec<u8>> = Lazy::new(|| {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode("iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==")
        .expect("static favicon data")
});

/// A response before it hits the wire: status code, content type and body.
#[derive(Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl ApiResponse {
    fn json(status: u16, value: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: value.to_string().into_bytes(),
        }
    }
}

#[derive(Deserialize)]
struct ProcessFrameRequest {
    #[serde(rename = "frameData")]
    frame_data: Option<String>,
    /// Landmark lists of hands the client detected itself, 21 points each.
    #[serde(default)]
    landmarks: Vec<Vec<Landmark>>,
}

/// Routes a single request. `body` is only consulted for POST endpoints.
pub fn handle(cell: &SnapshotCell, method: &Method, path: &str, body: &str) -> ApiResponse {
    match (method, path) {
        (Method::Get, "/") => ApiResponse {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body: INDEX_HTML.into(),
        },
        (Method::Get, "/api/health") => ApiResponse::json(
            200,
            json!({
                "status": "healthy",
                "service": "finger-counter-backend",
                "version": env!("CARGO_PKG_VERSION"),
            }),
        ),
        (Method::Get, "/api/status") => {
            ApiResponse::json(200, json!({ "game_status": "ready", "ready": true }))
        }
        (Method::Get, "/api/fingers") => match cell.latest() {
            Some(snapshot) => match serde_json::to_value(snapshot.as_ref()) {
                Ok(value) => ApiResponse::json(200, value),
                Err(e) => ApiResponse::json(500, json!({ "error": e.to_string() })),
            },
            None => ApiResponse::json(503, json!({ "error": "no result available" })),
        },
        (Method::Post, "/api/process-frame") => process_frame_route(cell, body),
        (Method::Get, "/favicon.ico") => ApiResponse {
            status: 200,
            content_type: "image/png",
            body: FAVICON.clone(),
        },
        (Method::Options, _) => ApiResponse {
            status: 204,
            content_type: "text/plain",
            body: Vec::new(),
        },
        _ => ApiResponse::json(404, json!({ "error": "Not found" })),
    }
}

fn process_frame_route(cell: &SnapshotCell, body: &str) -> ApiResponse {
    let request: ProcessFrameRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(_) => return ApiResponse::json(400, json!({ "error": "No frame data provided" })),
    };

    if !request.landmarks.is_empty() {
        // The client ran the pose estimator itself; classify its landmarks directly.
        let mut finger_count = 0u32;
        let mut extended = Vec::new();
        let mut palm_facing = false;
        for landmarks in &request.landmarks {
            match fingers::classify_landmarks(landmarks) {
                Ok(result) => {
                    finger_count += u32::from(result.extended_count());
                    extended = result.extended_fingers().collect::<Vec<_>>();
                    palm_facing = result.palm_facing_camera();
                }
                Err(e) => return ApiResponse::json(400, json!({ "error": e.to_string() })),
            }
        }
        return ApiResponse::json(
            200,
            json!({
                "finger_count": finger_count,
                "extended_fingers": extended,
                "palm_facing": palm_facing,
                "success": true,
            }),
        );
    }

    if request.frame_data.is_none() {
        return ApiResponse::json(400, json!({ "error": "No frame data provided" }));
    }

    // Raw frames are handled by the camera pipeline; answer with the latest known result.
    let response = match cell.latest() {
        Some(snapshot) => json!({
            "finger_count": snapshot.finger_count,
            "extended_fingers": snapshot.extended_fingers,
            "palm_facing": snapshot.palm_facing,
            "success": true,
        }),
        None => json!({
            "finger_count": 0,
            "extended_fingers": [],
            "palm_facing": false,
            "success": true,
        }),
    };
    ApiResponse::json(200, response)
}

/// Serves the API on `addr`, blocking the calling thread forever.
pub fn serve(addr: &str, cell: Arc<SnapshotCell>) -> Result<(), crate::Error> {
    let server = Server::http(addr)
        .map_err(|e| -> crate::Error { format!("failed to bind {addr}: {e}").into() })?;
    log::info!("listening on http://{addr}");

    for mut request in server.incoming_requests() {
        let mut body = String::new();
        let response = match request.as_reader().read_to_string(&mut body) {
            Ok(_) => handle(&cell, request.method(), request.url(), &body),
            Err(e) => {
                log::warn!("failed to read request body: {e}");
                ApiResponse::json(400, json!({ "error": "unreadable request body" }))
            }
        };
        if let Err(e) = respond(request, response) {
            log::warn!("failed to send response: {e}");
        }
    }
    Ok(())
}

fn respond(request: tiny_http::Request, api: ApiResponse) -> io::Result<()> {
    let mut response = Response::from_data(api.body).with_status_code(api.status);
    let headers = [
        ("Content-Type", api.content_type),
        // The frontend may be served from another origin (the original deployed it separately).
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Headers", "Content-Type"),
        ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
    ];
    for (key, value) in headers {
        if let Ok(header) = Header::from_bytes(key.as_bytes(), value.as_bytes()) {
            response.add_header(header);
        }
    }
    request.respond(response)
}
