use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use lungmap_api::config::ServerConfig;
use lungmap_api::routes;
use lungmap_api::state::AppState;
use lungmap_sparql::{MultipleResults, SparqlClient};
use lungmap_storage::MemoryObjectStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// The SPARQL endpoint points at a port nothing listens on, so any test
/// that accidentally reaches the gateway fails fast with an upstream
/// error instead of hanging.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        sparql_endpoint: "http://127.0.0.1:1/sparql".to_string(),
        sparql_on_multiple: MultipleResults::FailFast,
        s3_bucket: "test-bucket".to_string(),
    }
}

/// Build the full application router backed by an in-memory object store.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_store(pool, Arc::new(MemoryObjectStore::new()))
}

/// Build the full application router with all middleware layers, using
/// the given database pool and object store.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app_with_store(pool: PgPool, store: Arc<MemoryObjectStore>) -> Router {
    let config = test_config();

    let sparql = Arc::new(SparqlClient::new(
        config.sparql_endpoint.clone(),
        config.sparql_on_multiple,
    ));

    let state = AppState {
        pool,
        config: Arc::new(config),
        sparql,
        store,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers (tower::ServiceExt::oneshot, no TCP listener)
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST with an empty body (action endpoints like train and ingest).
pub async fn post(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Database fixtures
// ---------------------------------------------------------------------------

use lungmap_db::models::experiment::{Experiment, UpsertExperiment};
use lungmap_db::models::image::{CreateImage, Image};
use lungmap_db::models::image_set::{CreateImageSet, ImageSet};
use lungmap_db::repositories::{ExperimentRepo, ImageRepo, ImageSetRepo};

/// Seed an experiment row directly, bypassing the ingest pipeline.
pub async fn create_experiment(pool: &PgPool, experiment_id: &str) -> Experiment {
    ExperimentRepo::upsert(
        pool,
        &UpsertExperiment {
            experiment_id: experiment_id.to_string(),
            platform: Some("ISH".to_string()),
            experiment_type: Some("in situ hybridization".to_string()),
            sex: Some("male".to_string()),
            release_date: Some("2016-01-15".to_string()),
            organism: Some("Mus musculus".to_string()),
            age_label: Some("P01".to_string()),
        },
    )
    .await
    .expect("experiment fixture should insert")
}

/// Seed an image set row directly.
pub async fn create_image_set(pool: &PgPool, name: &str) -> ImageSet {
    ImageSetRepo::get_or_create(
        pool,
        &CreateImageSet {
            name: name.to_string(),
            magnification: "20X".to_string(),
            species: "Mus musculus".to_string(),
            development_stage: Some("P01".to_string()),
        },
    )
    .await
    .expect("image set fixture should insert")
}

/// Seed an image row (metadata only, cache unpopulated).
pub async fn create_image(
    pool: &PgPool,
    image_set_id: i64,
    experiment_id: i64,
    name: &str,
    s3_key: &str,
) -> Image {
    ImageRepo::get_or_create(
        pool,
        &CreateImage {
            s3_key: s3_key.to_string(),
            image_name: name.to_string(),
            external_image_id: format!("IMG_{name}"),
            image_set_id,
            experiment_id,
            x_scaling: Some("0.25".to_string()),
            y_scaling: Some("0.25".to_string()),
        },
    )
    .await
    .expect("image fixture should insert")
}

/// Encode a small gradient raster as PNG bytes, suitable for seeding the
/// in-memory object store.
pub fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 9 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
    });
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}
