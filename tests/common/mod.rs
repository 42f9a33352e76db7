#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

/// A local HTTP server that answers exactly one request with a canned response.
pub struct OneShotServer {
    pub url: String,
    handle: JoinHandle<String>,
}

impl OneShotServer {
    /// Wait for the request to be served and return its request line.
    pub fn request_line(self) -> String {
        self.handle.join().expect("server thread panicked")
    }
}

pub fn serve_once(status: u16, reason: &str, body: &str) -> OneShotServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let url = format!("http://{}/IPlayerService/GetOwnedGames/v1/", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("read request line");
        loop {
            let mut line = String::new();
            let n = reader.read_line(&mut line).expect("read header");
            if n == 0 || line == "\r\n" {
                break;
            }
        }
        stream.write_all(response.as_bytes()).expect("write response");
        stream.flush().expect("flush response");
        request_line.trim_end().to_string()
    });
    OneShotServer { url, handle }
}

pub fn sample_body() -> &'static str {
    include_str!("../sample_owned_games.json")
}
