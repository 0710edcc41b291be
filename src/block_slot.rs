use std::env;

use chrono::NaiveDate;
use color_eyre::eyre::{eyre, Result, WrapErr};
use dotenv::dotenv;
use sportzone_client::{ApiClient, ClientConfig};
use sportzone_core::session::Session;
use sportzone_dashboard::{BlockForm, VenueDashboard};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Blocks court time from the command line.
///
/// Reads `BLOCK_VENUE_ID`, `BLOCK_COURT_ID`, `BLOCK_DATE` (YYYY-MM-DD),
/// `BLOCK_START` and `BLOCK_END` (HH:MM). An end at or before the start
/// blocks through to the next day.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ClientConfig::from_env()?;
    let session = Session::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let venue_id = required_id("BLOCK_VENUE_ID")?;
    let court_id = required_id("BLOCK_COURT_ID")?;
    let date = NaiveDate::parse_from_str(&required("BLOCK_DATE")?, "%Y-%m-%d")
        .wrap_err("BLOCK_DATE must be formatted YYYY-MM-DD")?;
    let form = BlockForm::new(court_id, date, required("BLOCK_START")?, required("BLOCK_END")?);

    let api = ApiClient::new(config)?.with_session(&session);
    let mut dashboard = VenueDashboard::new(api, session)?;
    dashboard.load(venue_id).await?;

    let record = dashboard.block_slot(&form).await?;
    info!(
        "Blocked court {} from {} to {}",
        record.court_id, record.start_time, record.end_time
    );

    Ok(())
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| eyre!("{} environment variable not set", name))
}

fn required_id(name: &str) -> Result<i64> {
    required(name)?
        .parse::<i64>()
        .wrap_err_with(|| format!("{} must be a valid integer", name))
}
