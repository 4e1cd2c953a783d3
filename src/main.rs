use std::sync::Arc;

use chrono::Local;
use tracing_subscriber::EnvFilter;

use water_delivery_tracker::config::Config;
use water_delivery_tracker::dashboard::export::{Report, ReportKind};
use water_delivery_tracker::dashboard::filter::DeliveryFilter;
use water_delivery_tracker::error::AppError;
use water_delivery_tracker::models::session::Session;
use water_delivery_tracker::notify::TracingNotifier;
use water_delivery_tracker::observability::metrics::Metrics;
use water_delivery_tracker::storage::FileStorage;
use water_delivery_tracker::store::Store;

fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let storage = Arc::new(FileStorage::open(&config.data_dir)?);
    tracing::info!(data_dir = %config.data_dir.display(), "file storage ready");

    let store = Store::open(storage, Arc::new(TracingNotifier), Metrics::new())?;

    match store.session() {
        Session::Anonymous => tracing::info!("no active session"),
        Session::Admin => tracing::info!("admin session restored"),
        Session::Driver(driver) => {
            tracing::info!(driver_id = %driver.id, driver = %driver.name, "driver session restored")
        }
    }

    let deliveries = DeliveryFilter::default().apply(store.deliveries());
    let report = Report::build(
        ReportKind::Deliveries,
        &deliveries,
        Local::now().naive_local(),
        config.report_rows_per_page,
    )?;
    tracing::info!(
        file_name = %report.file_name,
        rows = report.row_count(),
        pages = report.pages.len(),
        "delivery report rendered"
    );
    println!("{}", report.render());

    Ok(())
}
