use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{error, info, info_span, instrument, warn};

use crate::config::Config;
use crate::error::Error;
use crate::model::owned_game::{OwnedGame, OwnedGamesResponse};

/// Inclusion/exclusion flags sent with every owned-games request.
const OWNED_GAMES_FLAGS: [(&str, &str); 5] = [
    ("include_appinfo", "true"),
    ("include_extended_appinfo", "true"),
    ("include_played_free_games", "true"),
    ("include_free_sub", "true"),
    ("skip_unvetted_apps", "true"),
];

/// Build the GetOwnedGames URL for `steam_id`, authenticated with `api_key`.
pub fn owned_games_url(base_url: &str, api_key: &str, steam_id: &str) -> Result<String, Error> {
    let mut url = String::with_capacity(base_url.len() + 192);
    url.push_str(base_url);
    if !base_url.contains('?') {
        url.push('?');
    } else if !base_url.ends_with(['?', '&']) {
        url.push('&');
    }

    let mut first = true;
    let mut push_param = |name: &str, value: &str| {
        if !first {
            url.push('&');
        }
        first = false;
        url.push_str(name);
        url.push('=');
        url.extend(utf8_percent_encode(value, NON_ALPHANUMERIC));
    };
    push_param("key", api_key);
    push_param("steamid", steam_id);
    for (name, value) in OWNED_GAMES_FLAGS {
        push_param(name, value);
    }

    url.parse::<ureq::http::Uri>()?;
    Ok(url)
}

/// Decode a GetOwnedGames JSON body.
#[instrument(level = "info", skip(body), fields(bytes = body.len()))]
pub fn decode_owned_games(body: &str) -> Result<Vec<OwnedGame>, Error> {
    let doc = serde_json::from_str::<OwnedGamesResponse>(body)?;
    let owned = doc.response;
    if owned.game_count != owned.games.len() as u64 {
        warn!(game_count = owned.game_count, decoded = owned.games.len(), "game_count does not match number of games");
    }
    info!(game_count = owned.games.len(), "Decoded owned games");
    Ok(owned.games)
}

/// Client for the Steam Web API owned-games endpoint.
#[derive(Clone)]
pub struct SteamApi {
    api_url: String,
    api_key: String,
    steam_id: String,
}

impl SteamApi {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>, steam_id: impl Into<String>) -> Self {
        Self { api_url: api_url.into(), api_key: api_key.into(), steam_id: steam_id.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone(), config.api_key.clone(), config.steam_id.clone())
    }

    /// GET the owned-games document and return its body.
    /// Anything but a 200 is an error carrying the status code.
    pub fn fetch_owned_games_body(&self) -> Result<String, Error> {
        let url = owned_games_url(&self.api_url, &self.api_key, &self.steam_id)?;
        let response = {
            let _span = info_span!("steam_fetch", api_url = %self.api_url, steam_id = %self.steam_id).entered();
            ureq::get(url.as_str()).call()
        };
        let response = match response {
            Ok(response) => response,
            Err(e) => {
                let e = Error::from(e);
                error!(error = %e, api_url = %self.api_url, "Owned games request failed");
                return Err(e);
            }
        };

        let status = response.status().as_u16();
        if status != 200 {
            error!(status, "Unexpected status from owned games endpoint");
            return Err(Error::HttpStatus { status });
        }

        // The body reader is dropped at the end of this scope on every path.
        let mut body = response.into_body();
        match body.read_to_string() {
            Ok(text) => {
                info!(status, bytes = text.len(), "Fetched owned games");
                Ok(text)
            }
            Err(e) => {
                error!(error = %e, "Failed to read response body");
                Err(Error::from(e))
            }
        }
    }

    /// Fetch and decode the owned games list.
    pub fn fetch_owned_games(&self) -> Result<Vec<OwnedGame>, Error> {
        let body = self.fetch_owned_games_body()?;
        decode_owned_games(&body)
    }
}

// Keeps the key out of `{:?}` output.
impl std::fmt::Debug for SteamApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SteamApi")
            .field("api_url", &self.api_url)
            .field("steam_id", &self.steam_id)
            .finish_non_exhaustive()
    }
}
