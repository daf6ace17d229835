use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use lazy_static::lazy_static;
use prometheus::{IntCounterVec, Opts};

use crate::{Result, ServerError};

lazy_static! {
    pub static ref DISPATCH_RESULTS: IntCounterVec = IntCounterVec::new(
        Opts::new("webhook_dispatch_results", "Webhook dispatch results"),
        &["result"]
    )
    .expect("static metric definition");
}

pub(crate) fn build_metrics_handler() -> Result<PrometheusMetrics> {
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .build()
        .map_err(|e| ServerError::MetricsBuildError { source: e })?;

    setup_process_metrics(&prometheus)?;

    prometheus
        .registry
        .register(Box::new(DISPATCH_RESULTS.clone()))
        .map_err(|e| ServerError::MetricsRegisterError { source: e })?;

    Ok(prometheus)
}

#[cfg(unix)]
fn setup_process_metrics(metrics: &PrometheusMetrics) -> Result<()> {
    use prometheus::process_collector::ProcessCollector;

    metrics
        .registry
        .register(Box::new(ProcessCollector::for_self()))
        .map_err(|e| ServerError::MetricsRegisterError { source: e })
}

#[cfg(not(unix))]
fn setup_process_metrics(_metrics: &PrometheusMetrics) -> Result<()> {
    tracing::warn!("Process metrics are not supported on this platform.");
    Ok(())
}
