use apartment_accountant::{
    api,
    intake::CapacityMode,
    router::IntakeRouter,
    session::InMemorySessionStore,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mode = match std::env::var("CAPACITY_MODE").as_deref() {
        Ok("fixed") => CapacityMode::FixedTwelve,
        _ => CapacityMode::RoomsAndHall,
    };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(8080);

    info!(?mode, port, "Apartment accountant API starting");

    let store = Arc::new(InMemorySessionStore::new());
    let router = Arc::new(IntakeRouter::new(store, mode));

    api::start_server(router, port).await
}
