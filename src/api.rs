//! REST API for the packing service.
//!
//! Provides HTTP endpoints for communication with callers. Uses Axum as the
//! web framework and supports CORS and Server-Sent Events streaming.

use std::collections::HashSet;
use std::sync::OnceLock;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tower_http::cors::{Any, CorsLayer};
use utoipa::{OpenApi, ToSchema};

use crate::config::ApiConfig;
use crate::domain::{Bed, BoxSpec, DomainError, Settings};
use crate::engine::{self, PackEvent, PackResult};

#[derive(Clone)]
struct ApiState;

static OPENAPI_DOC: OnceLock<utoipa::openapi::OpenApi> = OnceLock::new();

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8" />
        <title>StackTics API Docs</title>
        <link
            rel="stylesheet"
            href="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui.css"
            integrity="sha384-wxLW6kwyHktdDGr6Pv1zgm/VGJh99lfUbzSn6HNHBENZlCN7W602k9VkGdxuFvPn"
            crossorigin="anonymous"
        />
    </head>
    <body>
        <div id="swagger-ui"></div>
        <script
            src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-bundle.js"
            integrity="sha384-wmyclcVGX/WhUkdkATwhaK1X1JtiNrr2EoYJ+diV3vj4v6OC5yCeSu+yW13SYJep"
            crossorigin="anonymous"
        ></script>
        <script
            src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-standalone-preset.js"
            integrity="sha384-2YH8WDRaj7V2OqU/trsmzSagmk/E2SutiCsGkdgoQwC9pNUJV1u/141DHB6jgs8t"
            crossorigin="anonymous"
        ></script>
        <script>
            window.onload = function () {
                const ui = SwaggerUIBundle({
                    url: "/docs/openapi.json",
                    dom_id: "#swagger-ui",
                    presets: [SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset],
                    layout: "StandaloneLayout",
                });
                window.ui = ui;
            };
        </script>
    </body>
    </html>"##;

fn openapi_doc() -> &'static utoipa::openapi::OpenApi {
    OPENAPI_DOC.get_or_init(ApiDoc::openapi)
}

/// Request body for `POST /optimize` and `POST /optimize/stream`.
#[derive(Deserialize, ToSchema)]
pub struct OptimizeRequest {
    pub bed: Bed,
    pub boxes: Vec<BoxSpec>,
    pub settings: Settings,
}

/// Response body for `POST /optimize`.
#[derive(Serialize, ToSchema)]
pub struct OptimizeResponse {
    pub placements: Vec<crate::domain::BoxPlacement>,
    pub unplaced_box_ids: Vec<String>,
    pub metrics: crate::engine::Metrics,
}

impl From<PackResult> for OptimizeResponse {
    fn from(result: PackResult) -> Self {
        Self {
            placements: result.placements,
            unplaced_box_ids: result.unplaced_box_ids,
            metrics: result.metrics,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub app: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    pub field: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Vec<ErrorDetail>,
}

fn json_rejection_response(err: JsonRejection) -> Response {
    let message = err.to_string();
    let body = ErrorResponse {
        error: "validation_error".to_string(),
        message: message.clone(),
        details: vec![ErrorDetail {
            field: "request".to_string(),
            message,
            kind: "malformed_json".to_string(),
        }],
    };
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
}

fn domain_error_response(err: DomainError) -> Response {
    let message = err.to_string();
    let body = ErrorResponse {
        error: "validation_error".to_string(),
        message: message.clone(),
        details: vec![ErrorDetail {
            field: err.field(),
            message,
            kind: "domain_error".to_string(),
        }],
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

/// Validates a parsed request against domain invariants (spec §3, §6's
/// "well-formed request" precondition): positive dimensions, unique box
/// IDs, sane settings. The engine itself assumes all of this already holds.
fn validate_request(request: &OptimizeRequest) -> Result<(), DomainError> {
    request.bed.validate()?;
    request.settings.validate()?;

    let mut seen = HashSet::with_capacity(request.boxes.len());
    for spec in &request.boxes {
        spec.validate()?;
        if !seen.insert(spec.id.clone()) {
            return Err(DomainError::DuplicateBoxId(spec.id.clone()));
        }
    }

    let usable_length = request.bed.length - 2.0 * (request.bed.margin + request.settings.margin);
    let usable_width = request.bed.width - 2.0 * (request.bed.margin + request.settings.margin);
    if usable_length <= 0.0 || usable_width <= 0.0 {
        return Err(DomainError::InvalidMargin {
            field: "settings.margin".to_string(),
            message: "combined margins leave no usable footprint".to_string(),
        });
    }

    Ok(())
}

fn parse_optimize_request(
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<OptimizeRequest, Response> {
    let Json(request) = payload.map_err(json_rejection_response)?;
    validate_request(&request).map_err(domain_error_response)?;
    Ok(request)
}

#[derive(OpenApi)]
#[openapi(
    paths(handle_optimize, handle_optimize_stream, handle_health),
    components(schemas(
        OptimizeRequest,
        OptimizeResponse,
        HealthResponse,
        ErrorResponse,
        ErrorDetail,
        Bed,
        BoxSpec,
        Settings,
        crate::domain::BoxPlacement,
        crate::domain::Placement,
        crate::domain::Orientation,
        crate::engine::Metrics,
    )),
    tags((name = "packing", description = "Endpoints for under-bed packing optimization"))
)]
struct ApiDoc;

/// Starts the API server. Blocks until the server is terminated.
pub async fn start_api_server(config: ApiConfig) {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let state = ApiState;

    let app = Router::new()
        .route("/optimize", post(handle_optimize))
        .route("/optimize/stream", post(handle_optimize_stream))
        .route("/health", get(handle_health))
        .route("/docs/openapi.json", get(serve_openapi_json))
        .route("/docs", get(serve_openapi_ui))
        .layer(cors)
        .with_state(state);

    let addr = config.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            panic!("❌ Could not bind API server to {}: {}", addr, err);
        }
    };

    let display_host = config.display_host().to_string();
    println!("🚀 Server running on http://{}:{}", display_host, config.port());
    if config.binds_to_all_interfaces() && config.uses_default_host() {
        println!("💡 Local access: http://localhost:{}", config.port());
    }
    println!("📦 API Endpoints:");
    println!("   - POST /optimize");
    println!("   - POST /optimize/stream");
    println!("   - GET  /health");
    println!("📑 Documentation:");
    println!("   - GET /docs");
    println!("   - GET /docs/openapi.json");

    if let Err(err) = axum::serve(listener, app).await {
        eprintln!("❌ API server terminated with an error: {err}");
    }
}

/// Handler for `GET /health`.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse)),
    tag = "packing"
)]
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        app: "StackTics".to_string(),
    })
}

/// Handler for `POST /optimize`.
#[utoipa::path(
    post,
    path = "/optimize",
    request_body = OptimizeRequest,
    responses(
        (status = 200, description = "Packing plan computed", body = OptimizeResponse),
        (status = 422, description = "Malformed request body", body = ErrorResponse),
        (status = 400, description = "Request failed domain validation", body = ErrorResponse),
    ),
    tag = "packing"
)]
async fn handle_optimize(
    State(_state): State<ApiState>,
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match parse_optimize_request(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    println!("📥 New optimize request: {} boxes", request.boxes.len());
    let result = engine::optimize_packing(&request.bed, &request.boxes, &request.settings);
    println!(
        "📦 Result: {} placed, {} unplaced",
        result.metrics.placed_boxes,
        result.unplaced_box_ids.len()
    );

    (StatusCode::OK, Json(OptimizeResponse::from(result))).into_response()
}

/// Handler for `POST /optimize/stream` (SSE). Streams pack events as they
/// happen so a caller can visualize placements incrementally instead of
/// waiting for the full result.
#[utoipa::path(
    post,
    path = "/optimize/stream",
    request_body = OptimizeRequest,
    responses(
        (
            status = 200,
            description = "Streams pack events in real time",
            content_type = "text/event-stream",
            body = String
        ),
        (status = 422, description = "Malformed request body", body = ErrorResponse),
        (status = 400, description = "Request failed domain validation", body = ErrorResponse),
    ),
    tag = "packing"
)]
async fn handle_optimize_stream(
    State(_state): State<ApiState>,
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match parse_optimize_request(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let (tx, rx) = mpsc::channel::<String>(32);

    tokio::task::spawn_blocking(move || {
        engine::optimize_packing_with_progress(
            &request.bed,
            &request.boxes,
            &request.settings,
            |event: PackEvent| {
                if let Ok(json) = serde_json::to_string(&event) {
                    if tx.blocking_send(json).is_err() {
                        // Receiver has closed the stream; remaining events are discarded.
                        return;
                    }
                }
            },
        );
    });

    let stream =
        ReceiverStream::new(rx).map(|msg| Ok::<_, std::convert::Infallible>(Event::default().data(msg)));
    Sse::new(stream)
        .keep_alive(
            KeepAlive::new()
                .interval(std::time::Duration::from_secs(10))
                .text("keep-alive"),
        )
        .into_response()
}

async fn serve_openapi_json() -> impl IntoResponse {
    Json(openapi_doc())
}

async fn serve_openapi_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}
