//! Error type shared by every stage of the export pipeline.

/// Errors that abort an export run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} variable not present in env")]
    MissingCredential(&'static str),

    #[error("invalid configuration for {name}: {reason}")]
    InvalidConfig { name: &'static str, reason: String },

    #[error("failed to build request URL: {0}")]
    RequestConstruction(#[from] ureq::http::uri::InvalidUri),

    #[error("unexpected HTTP GET return code: {status}")]
    HttpStatus { status: u16 },

    #[error("request failed: {0}")]
    Transport(#[source] ureq::Error),

    #[error("error in reading HTTP response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to round playtime {formatted:?}: {source}")]
    Rounding {
        formatted: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("last played timestamp {timestamp} of app {appid} is out of range")]
    Timestamp { appid: u64, timestamp: i64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => Error::HttpStatus { status },
            other => Error::Transport(other),
        }
    }
}
