//! Prometheus metrics.
//!
//! HTTP traffic is measured by [`metrics_middleware`]; domain events go
//! through [`record`]. Both are no-ops when `OBSERVABILITY_ENABLED` is
//! `false` or `0`.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use backoffice_core::{Action, Module};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tracing::error;

const REQUEST_DURATION: &str = "http_request_duration_seconds";
const LATENCY_BUCKETS: [f64; 10] = [0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5];

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| !v.eq_ignore_ascii_case("false") && v != "0")
            .unwrap_or(true)
    })
}

/// Something worth counting that happened in a service or gate.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    LoginSucceeded { role: Option<&'a str> },
    LoginFailed,
    TokenIssued,
    AccessDenied { module: Module, action: Action },
    UserCreated,
    RoleCreated,
}

pub fn record(event: Event<'_>) {
    if !is_observability_enabled() {
        return;
    }

    match event {
        Event::LoginSucceeded { role } => counter!(
            "user_logins_total",
            "status" => "success",
            "role" => role.unwrap_or("none").to_string()
        )
        .increment(1),
        Event::LoginFailed => counter!("user_logins_total", "status" => "failure").increment(1),
        Event::TokenIssued => counter!("session_tokens_issued_total").increment(1),
        Event::AccessDenied { module, action } => counter!(
            "authorization_denied_total",
            "module" => module.as_str(),
            "action" => action.as_str()
        )
        .increment(1),
        Event::UserCreated => counter!("users_created_total").increment(1),
        Event::RoleCreated => counter!("roles_created_total").increment(1),
    }
}

/// Installs the Prometheus recorder and spawns its upkeep task.
///
/// Returns `None` when observability is disabled or a recorder is already
/// installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(REQUEST_DURATION.to_string()), &LATENCY_BUCKETS)
        .and_then(|builder| builder.install_recorder())
        .inspect_err(|e| error!(error = %e, "Failed to install Prometheus recorder"))
        .ok()?;

    let upkeep = handle.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(5));
        loop {
            interval.tick().await;
            upkeep.run_upkeep();
        }
    });

    Some(handle)
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let active = gauge!("http_requests_active");
    active.increment(1.0);
    let response = next.run(req).await;
    active.decrement(1.0);

    let status = response.status().as_u16().to_string();
    counter!("http_requests_total", "method" => method.clone(), "route" => route.clone(), "status" => status)
        .increment(1);
    histogram!(REQUEST_DURATION, "method" => method, "route" => route)
        .record(start.elapsed().as_secs_f64());

    response
}

/// Router served on the metrics port.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}
