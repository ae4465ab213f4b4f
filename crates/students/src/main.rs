use anyhow::Context;
use students::config::{AppSettings, DEFAULT_SETTINGS_FILE};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let settings = AppSettings::load(DEFAULT_SETTINGS_FILE)
        .context("Failed to load application settings")?;

    let mut stdout = std::io::stdout().lock();
    students::run(&settings, &mut stdout).await?;

    Ok(())
}
