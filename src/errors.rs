use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Client error: status code: {status_code}, body: {body}")]
    ClientRequest { status_code: u16, body: String },
    #[error("Json parse error: {0}")]
    JsonParse(String),
    #[error("No data for {symbol}. Try a valid ticker like AAPL or TSLA.")]
    NoData { symbol: String },
    #[error("Node set must contain at least one node")]
    EmptyNodeSet,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Network(e.to_string())
    }
}
