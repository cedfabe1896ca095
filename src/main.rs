mod telemetry;

use tracing::{debug, error};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine: variables may come from the real environment.
    let dotenv = dotenvy::dotenv();

    telemetry::init();

    if let Err(err) = dotenv {
        debug!(error = %err, "no .env file loaded");
    }

    if let Err(err) = api::start().await {
        error!(error = %err, "backend stopped with an error");
        return Err(err.into());
    }

    Ok(())
}
