use apartment_accountant::{
    intake::CapacityMode,
    router::IntakeRouter,
    session::InMemorySessionStore,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

/// Console driver: one local session, stdin in, stdout out.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
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
    info!(?mode, "Apartment accountant console starting");

    let store = Arc::new(InMemorySessionStore::new());
    let router = IntakeRouter::new(store, mode);

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(b"Type /start to begin, /cancel to abort, Ctrl-D to quit.\n")
        .await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let replies = router.handle_message("console", &line).await?;
        for reply in replies {
            stdout.write_all(reply.as_bytes()).await?;
            stdout.write_all(b"\n\n").await?;
        }
        stdout.flush().await?;
    }

    Ok(())
}
