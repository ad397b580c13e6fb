use std::sync::OnceLock;
use std::time::{Duration, Instant};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

static METRICS_ENABLED: OnceLock<bool> = OnceLock::new();

/// Whether metrics are recorded. Fixed by the first call to [`init_metrics`];
/// reads `METRICS_ENABLED` if that never happened.
pub fn is_metrics_enabled() -> bool {
    *METRICS_ENABLED.get_or_init(|| escola_config::ApiConfig::from_env().metrics_enabled)
}

/// Installs the Prometheus recorder and its upkeep task.
/// Returns `None` when metrics are disabled.
///
/// # Errors
///
/// Fails if a recorder is already installed.
pub fn init_metrics(enabled: bool) -> anyhow::Result<Option<PrometheusHandle>> {
    let enabled = *METRICS_ENABLED.get_or_init(|| enabled);
    if !enabled {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0,
            ],
        )?
        .install_recorder()?;

    // Upkeep drains histogram buckets
    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Records request count, latency and in-flight requests.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_metrics_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router exposing `/metrics` in the Prometheus text format.
pub fn metrics_app<S>(handle: PrometheusHandle) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Domain counters

pub fn track_record_created(entity: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("escola_records_created_total", "entity" => entity).increment(1);
}

pub fn track_record_deleted(entity: &'static str, removed: u64) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("escola_records_deleted_total", "entity" => entity).increment(removed);
}

/// `outcome` is one of `enrolled`, `already_enrolled`, `unknown_student`, `unknown_class`.
pub fn track_enrollment(outcome: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("escola_enrollments_total", "outcome" => outcome).increment(1);
}

pub fn track_access_denied(reason: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("escola_access_denied_total", "reason" => reason).increment(1);
}

pub fn track_login(success: bool) {
    if !is_metrics_enabled() {
        return;
    }
    let status = if success { "success" } else { "failure" };
    counter!("escola_logins_total", "status" => status).increment(1);
}
