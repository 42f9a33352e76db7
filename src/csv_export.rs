use std::io::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::error::Error;
use crate::model::owned_game::OwnedGame;

/// Output columns, in `OwnedGame` field order.
pub const HEADER: [&str; 11] = [
    "AppId",
    "Name",
    "Total Playtime",
    "ImgIconUrl",
    "PlaytimeWindowsForever",
    "PlaytimeMacForever",
    "PlaytimeLinuxForever",
    "PlaytimeDeckForever",
    "RTimeLastPlayed",
    "Last Time Played",
    "Steam URL",
];

fn row(game: &OwnedGame) -> [String; 11] {
    [
        game.appid.to_string(),
        game.name.clone(),
        format!("{:.2}", game.playtime_forever),
        game.img_icon_url.clone(),
        game.playtime_windows_forever.to_string(),
        game.playtime_mac_forever.to_string(),
        game.playtime_linux_forever.to_string(),
        game.playtime_deck_forever.to_string(),
        game.rtime_last_played.to_string(),
        game.formatted_last_played.clone(),
        game.steam_url.clone(),
    ]
}

/// Write the header and one row per game to `out`.
pub fn write_csv<W: Write>(games: &[OwnedGame], out: W) -> Result<(), Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    writer.write_record(HEADER)?;
    for game in games {
        writer.write_record(row(game))?;
    }
    writer.flush()?;
    Ok(())
}

/// Render the whole CSV document in memory.
pub fn to_csv(games: &[OwnedGame]) -> Result<String, Error> {
    let mut buf = Vec::new();
    write_csv(games, &mut buf)?;
    String::from_utf8(buf).map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Create (or truncate) `path` and write the CSV to it.
/// The document is rendered before the file is touched, so a serialization
/// failure leaves any previous file intact.
#[instrument(level = "info", skip(games), fields(rows = games.len(), path = %path.display()))]
pub fn write_csv_file(games: &[OwnedGame], path: &Path) -> Result<(), Error> {
    let csv = to_csv(games)?;
    std::fs::write(path, csv.as_bytes())?;
    info!(rows = games.len(), bytes = csv.len(), path = %path.display(), "Wrote CSV");
    Ok(())
}
