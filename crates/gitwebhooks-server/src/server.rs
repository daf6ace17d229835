//! Server module.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};
use actix_web_prom::PrometheusMetrics;
use gitwebhooks_config::{Config, SharedSnapshot};
use gitwebhooks_core::{DeploymentExecutor, ProcessExecutor};
use tracing::info;

use crate::{
    health::health_check_route, metrics::build_metrics_handler, reload::watch_reload_signal,
    webhook::webhook_route, Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Current platforms and repositories.
    pub snapshot: Arc<SharedSnapshot>,
    /// Command launcher.
    pub executor: Box<dyn DeploymentExecutor>,
}

impl AppContext {
    /// Create new app context, launching commands through the system shell.
    pub fn new(config: Config) -> Self {
        Self::new_with_executor(config, Box::new(ProcessExecutor::new()))
    }

    /// Create new app context using a custom executor.
    pub fn new_with_executor(config: Config, executor: Box<dyn DeploymentExecutor>) -> Self {
        let snapshot = Arc::new(SharedSnapshot::new(config.snapshot.clone()));

        Self {
            config,
            snapshot,
            executor,
        }
    }
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
    prometheus: PrometheusMetrics,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let max_body_size = context.config.server.max_body_size;

    App::new()
        .app_data(context)
        .app_data(web::PayloadConfig::new(max_body_size))
        .wrap(prometheus)
        .wrap(Logger::default())
        .service(
            web::resource("/health")
                .route(web::get().to(health_check_route))
                .default_service(web::to(webhook_route)),
        )
        .default_service(web::to(webhook_route))
}

/// Run webhook server.
pub async fn run_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        repositories = context.config.snapshot.repositories.len(),
        message = "Starting webhook server",
    );

    run_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let prometheus = build_metrics_handler()?;
    let workers_count = context.config.server.workers_count;

    tokio::spawn(watch_reload_signal(
        context.config.clone(),
        context.snapshot.clone(),
    ));

    let context = Data::new(context);
    let mut server =
        HttpServer::new(move || build_actix_app(context.clone(), prometheus.clone()));

    if let Some(workers) = workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(ip_with_port)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })
}
