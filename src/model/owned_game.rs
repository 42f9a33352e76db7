use serde::{Deserialize, Serialize};

/// Top-level document returned by `IPlayerService/GetOwnedGames/v1`.
#[derive(Debug, Serialize, Deserialize)]
pub struct OwnedGamesResponse {
    pub response: OwnedGames,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OwnedGames {
    // Private profiles come back as an empty `response` object.
    #[serde(default)]
    pub game_count: u64,
    #[serde(default)]
    pub games: Vec<OwnedGame>,
}

/// One owned title. Playtimes are in minutes as decoded; after
/// `transform::process_owned_games` runs, `playtime_forever` holds rounded hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedGame {
    pub appid: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub playtime_forever: f64,
    #[serde(default)]
    pub img_icon_url: String,
    #[serde(default)]
    pub playtime_windows_forever: f64,
    #[serde(default)]
    pub playtime_mac_forever: f64,
    #[serde(default)]
    pub playtime_linux_forever: f64,
    #[serde(default)]
    pub playtime_deck_forever: f64,
    #[serde(default)]
    pub rtime_last_played: i64,
    // Derived fields, filled in by the transformer.
    #[serde(skip_deserializing)]
    pub formatted_last_played: String,
    #[serde(skip_deserializing)]
    pub steam_url: String,
}
