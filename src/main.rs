use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use sportzone_client::{ApiClient, ClientConfig};
use sportzone_core::{models::user::Role, session::Session};
use sportzone_dashboard::{AdminDashboard, OwnerDashboard};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

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

    info!("Connecting to {} as user {} ({})", config.api_url, session.user_id, session.role);
    let api = ApiClient::new(config)?.with_session(&session);

    match session.role {
        Role::Admin => {
            let mut dashboard = AdminDashboard::new(api, session)?;
            dashboard.refresh().await?;
            info!(
                "{} users, {} venues, {} upcoming bookings",
                dashboard.total_users, dashboard.total_venues, dashboard.total_bookings
            );
            for venue in &dashboard.venues {
                info!("Venue {} {} [{:?}]", venue.id, venue.name, venue.status);
            }
        }
        Role::VenueOwner => {
            let mut dashboard = OwnerDashboard::new(api, session)?;
            dashboard.load().await?;
            for venue in &dashboard.venues {
                info!(
                    "Venue {} {} [{:?}] with {} courts",
                    venue.id,
                    venue.name,
                    venue.status,
                    venue.courts.len()
                );
            }
        }
        Role::User => return Err(eyre!("The dashboard is only available to admins and venue owners")),
    }

    Ok(())
}
