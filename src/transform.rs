use chrono::DateTime;
use tracing::{info, instrument};

use crate::config::DisplayZone;
use crate::error::Error;
use crate::model::owned_game::OwnedGame;

pub const NEVER_PLAYED: &str = "Never";
pub const STORE_URL_PREFIX: &str = "https://store.steampowered.com/app/";

/// Convert minutes to hours, rounded to two decimals.
///
/// Rounding goes through a `{:.2}` render and a re-parse, so ties resolve on
/// the exact binary value, half to even (0.125 h becomes 0.12).
pub fn round_hours(minutes: f64) -> Result<f64, Error> {
    let formatted = format!("{:.2}", minutes / 60.0);
    formatted.parse::<f64>().map_err(|source| Error::Rounding { formatted, source })
}

/// Canonical store page for an app.
pub fn store_url(appid: u64) -> String {
    format!("{STORE_URL_PREFIX}{appid}")
}

/// Human "last played" text. Zero timestamps and zero rounded hours both read as "Never".
pub fn format_last_played(appid: u64, timestamp: i64, hours: f64, zone: DisplayZone) -> Result<String, Error> {
    if timestamp == 0 || hours == 0.0 {
        return Ok(NEVER_PLAYED.to_string());
    }
    let dt = DateTime::from_timestamp(timestamp, 0).ok_or(Error::Timestamp { appid, timestamp })?;
    Ok(zone.format_date(dt))
}

/// Fill in the derived fields of every game, in place and in order.
/// On error the slice may be partially transformed; callers abort the run.
#[instrument(level = "info", skip(games), fields(game_count = games.len()))]
pub fn process_owned_games(games: &mut [OwnedGame], zone: DisplayZone) -> Result<(), Error> {
    let mut total_hours = 0.0;
    for game in games.iter_mut() {
        let hours = round_hours(game.playtime_forever)?;
        game.playtime_forever = hours;
        game.formatted_last_played = format_last_played(game.appid, game.rtime_last_played, hours, zone)?;
        game.steam_url = store_url(game.appid);
        total_hours += hours;
    }
    info!(game_count = games.len(), total_hours, "Transformed owned games");
    Ok(())
}
