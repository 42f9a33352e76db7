mod common;

use steam_to_csv::steam::{SteamApi, decode_owned_games, owned_games_url};
use steam_to_csv::Error;

#[test]
fn builds_owned_games_url_with_all_parameters() {
    let url = owned_games_url("https://api.steampowered.com/IPlayerService/GetOwnedGames/v1/", "ABC123", "76561197988460908")
        .expect("url");
    assert_eq!(
        url,
        "https://api.steampowered.com/IPlayerService/GetOwnedGames/v1/?key=ABC123&steamid=76561197988460908\
         &include_appinfo=true&include_extended_appinfo=true&include_played_free_games=true\
         &include_free_sub=true&skip_unvetted_apps=true"
    );
}

#[test]
fn decodes_sample_response() {
    let games = decode_owned_games(common::sample_body()).expect("decode");
    assert_eq!(games.len(), 4);
    assert_eq!(games[0].appid, 440);
    assert_eq!(games[0].name, "Team Fortress 2");
    assert_eq!(games[0].playtime_forever, 125.0);
    assert_eq!(games[0].rtime_last_played, 1_700_000_000);
    // Missing platform fields default to zero
    assert_eq!(games[3].playtime_deck_forever, 0.0);
    assert!(games[0].formatted_last_played.is_empty());
    assert!(games[0].steam_url.is_empty());
}

#[test]
fn empty_response_object_decodes_to_no_games() {
    let games = decode_owned_games(r#"{"response":{}}"#).expect("decode");
    assert!(games.is_empty());
}

#[test]
fn malformed_json_is_a_decode_error() {
    let err = decode_owned_games(r#"{"response": {"games": [ {"appid": "#).unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "error was: {:?}", err);
    assert!(err.to_string().starts_with("error in reading HTTP response body"), "error was: {}", err);
}

#[test]
fn wrong_shape_is_a_decode_error() {
    let err = decode_owned_games(r#"{"games": []}"#).unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "error was: {:?}", err);
}

#[test]
fn fetches_and_decodes_from_server() {
    let server = common::serve_once(200, "OK", common::sample_body());
    let api = SteamApi::new(server.url.clone(), "secret-key", "42");

    let games = api.fetch_owned_games().expect("fetch");

    assert_eq!(games.len(), 4);
    let request_line = server.request_line();
    assert!(request_line.starts_with("GET /IPlayerService/GetOwnedGames/v1/?key=secret%2Dkey&steamid=42&"), "request was: {}", request_line);
    assert!(request_line.contains("skip_unvetted_apps=true"), "request was: {}", request_line);
}

#[test]
fn forbidden_status_is_reported_with_code() {
    let server = common::serve_once(403, "Forbidden", "<html>Forbidden</html>");
    let api = SteamApi::new(server.url.clone(), "bad-key", "42");

    let err = api.fetch_owned_games_body().unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 403 }), "error was: {:?}", err);
    assert!(err.to_string().contains("403"), "error was: {}", err);
    server.request_line();
}

#[test]
fn non_200_success_status_is_rejected() {
    let server = common::serve_once(204, "No Content", "");
    let api = SteamApi::new(server.url.clone(), "key", "42");

    let err = api.fetch_owned_games_body().unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 204 }), "error was: {:?}", err);
    server.request_line();
}

#[test]
fn connection_refused_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let api = SteamApi::new(format!("http://127.0.0.1:{}/", port), "key", "42");

    let err = api.fetch_owned_games_body().unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "error was: {:?}", err);
}

#[test]
fn debug_output_hides_api_key() {
    let api = SteamApi::new("http://localhost/", "super-secret", "42");
    let dbg = format!("{:?}", api);
    assert!(dbg.contains("SteamApi"));
    assert!(!dbg.contains("super-secret"), "debug was: {}", dbg);
}
