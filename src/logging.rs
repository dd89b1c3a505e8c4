//! Tracing setup and per-request logging.
//!
//! Every request runs inside a `request` span carrying a request id, the
//! method and the matched route. `authenticate` fills in `user_id` on the
//! same span, so permission denials logged by the gate are attributed to a
//! user.

use std::path::Path;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, error, field, info, info_span, warn};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, filter::LevelFilter, fmt, layer::SubscriberExt,
    util::SubscriberInitExt,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const DEFAULT_LOG_DIR: &str = "storage/logs";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn route_of(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string())
}

fn log_completion(status: StatusCode, latency_ms: u64) {
    let status_code = status.as_u16();
    if status.is_server_error() {
        error!(status = status_code, latency_ms, "Server error");
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        warn!(status = status_code, latency_ms, "Access refused");
    } else if status.is_client_error() {
        warn!(status = status_code, latency_ms, "Client error");
    } else {
        info!(status = status_code, latency_ms, "Request completed");
    }
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "request",
        %request_id,
        method = %req.method(),
        path = %route_of(&req),
        user_id = field::Empty,
    );

    let mut response = next.run(req).instrument(span.clone()).await;

    let latency_ms = start.elapsed().as_millis() as u64;
    span.in_scope(|| log_completion(response.status(), latency_ms));

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn console_layer() -> BoxedLayer {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,backoffice_db=info,tower_http=warn,axum::rejection=trace",
            env!("CARGO_CRATE_NAME")
        ))
    });

    fmt::layer()
        .with_target(false)
        .compact()
        .with_filter(filter)
        .boxed()
}

/// Daily error log and daily JSON log under `dir`.
fn file_layers(dir: &Path) -> std::io::Result<Vec<BoxedLayer>> {
    std::fs::create_dir_all(dir)?;

    let errors = fmt::layer()
        .with_writer(tracing_appender::rolling::daily(dir, "backoffice-error.log"))
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(LevelFilter::ERROR)
        .boxed();

    let json = fmt::layer()
        .json()
        .with_writer(tracing_appender::rolling::daily(dir, "backoffice.json"))
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(LevelFilter::INFO)
        .boxed();

    Ok(vec![errors, json])
}

/// Installs the global subscriber.
///
/// Log files go to `LOG_DIR` (default `storage/logs`); if it cannot be
/// created only the console layer is installed.
pub fn init_tracing() -> anyhow::Result<()> {
    let dir = std::env::var("LOG_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());

    let mut layers = vec![console_layer()];
    let file_error = match file_layers(Path::new(&dir)) {
        Ok(file_layers) => {
            layers.extend(file_layers);
            None
        }
        Err(e) => Some(e),
    };

    tracing_subscriber::registry().with(layers).try_init()?;

    match file_error {
        Some(e) => warn!(error = %e, dir = %dir, "Logging to console only"),
        None => info!(dir = %dir, "Tracing initialized"),
    }
    Ok(())
}
