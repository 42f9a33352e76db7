//! Export a Steam user's owned games to a CSV file.
//!
//! The pipeline is linear: fetch the owned-games document, decode it, derive
//! display fields for every game, then write the CSV. Any failure aborts the
//! run before the output file is touched.

pub mod config;
pub mod csv_export;
pub mod error;
pub mod model;
pub mod steam;
pub mod transform;

use tracing::{info, instrument};

pub use config::{Config, DisplayZone};
pub use error::Error;
pub use model::owned_game::OwnedGame;
pub use steam::SteamApi;

/// Run one export with the given configuration. Returns the number of rows written.
#[instrument(level = "info", skip(config), fields(steam_id = %config.steam_id, output = %config.output_path.display()))]
pub fn run(config: &Config) -> Result<usize, Error> {
    config.validate()?;
    let zone = config.display_zone()?;

    let api = SteamApi::from_config(config);
    let mut games = api.fetch_owned_games()?;
    transform::process_owned_games(&mut games, zone)?;
    csv_export::write_csv_file(&games, &config.output_path)?;

    info!(rows = games.len(), "Export complete");
    Ok(games.len())
}
