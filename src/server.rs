use crate::cli::ServeArgs;
use crate::infra::{
    seed_demo_data, AppState, InMemoryCatalog, InMemoryDirectory, InMemoryStudentRepository,
};
use crate::routes::with_support_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use student_support::config::AppConfig;
use student_support::error::AppError;
use student_support::support::SupportService;
use student_support::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let students = InMemoryStudentRepository::default();
    let catalog = InMemoryCatalog::default();
    let directory = InMemoryDirectory::default();
    // The --catalog-csv flag wins over APP_CATALOG_CSV.
    let catalog_csv = args.catalog_csv.take().or(config.seed.catalog_csv.clone());
    let seeded = seed_demo_data(&students, &catalog, &directory, catalog_csv)?;
    let service = Arc::new(SupportService::new(Arc::new(students), Arc::new(catalog)));

    let app = with_support_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        seeded_student = %seeded.student_id.0,
        "learning support service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
