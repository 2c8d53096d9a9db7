use tradelog::commands::Cli;
use tradelog::libs::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if is_debug_mode() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tradelog=debug"));
        tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
    }

    Cli::menu().await
}
