use rbt_config::Config;
use rbt_menu::Menu;
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter.
const LOG_ENV_VAR: &str = "RBT_LOG";

fn init_tracing() {
    // Logs go to stderr so they never interleave with the menu on stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Optional first argument: configuration file
    let explicit = env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load(explicit.as_deref())?;
    info!(?config, "configuration loaded");

    let mut menu = Menu::stdio(config)?;
    menu.run()?;

    Ok(())
}
