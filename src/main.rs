use std::process::ExitCode;

use steam_to_csv::Config;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr; RUST_LOG overrides the default level.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    let result = Config::from_env().and_then(|config| steam_to_csv::run(&config));
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Export failed");
            ExitCode::FAILURE
        }
    }
}
