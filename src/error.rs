use std::result::Result as StdResult;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("Failed to execute http request:\n{0}")]
    Transport(reqwest::Error),
    #[error("Failed to parse response body as json.\n{0:?}")]
    Protocol(anyhow::Error),
    #[error("Endpoint returned rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Invalid shape in rpc response.\n{0:?}")]
    Decoding(anyhow::Error),
}

pub type Result<T> = StdResult<T, Error>;
