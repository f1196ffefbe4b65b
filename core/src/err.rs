use constants::{GENERAL_ERROR, SYNTAX_ERROR, UNABLE_TO_CONNECT};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No Server specified")]
    MissingServer,
    #[error("No APIToken or Username+Password specified")]
    MissingCredentials,
    #[error("invalid value for '{key}': {detail}")]
    InvalidOption { key: &'static str, detail: String },
    #[error("Error acquiring API token: status {0}")]
    TokenStatus(u16),
    #[error("Error updating category list: {0}")]
    CategoryList(String),
    #[error("{0}")]
    Syntax(String),
    #[error("Unable to fetch parts: {0}")]
    Parts(#[from] PartsError),
}

/// Failures observed while turning a parsed query into rows. Wrapped by
/// [`Error::Parts`] so every query-time diagnostic leads with the same
/// message prefix.
#[derive(Error, Debug)]
pub enum PartsError {
    #[error("Category does not exist: {0}")]
    UnknownCategory(String),
    #[error("Invalid filter column '{0}'")]
    InvalidFilterColumn(String),
    #[error("'pk' is not a number")]
    PkNotANumber,
    #[error("was unable to convert 'pk' to an int64: {0}")]
    PkNotAnInt64(serde_json::Number),
    #[error("{0}")]
    Http(String),
}

impl Error {
    pub fn get_sql_state(&self) -> &'static str {
        match self {
            Error::MissingServer
            | Error::MissingCredentials
            | Error::InvalidOption { .. }
            | Error::TokenStatus(_)
            | Error::CategoryList(_) => UNABLE_TO_CONNECT,
            Error::Syntax(_) => SYNTAX_ERROR,
            Error::Parts(_) => GENERAL_ERROR,
        }
    }

    pub fn code(&self) -> i32 {
        // The inventory API reports failures over HTTP status codes which are
        // already part of the message text; there is no separate native code.
        0
    }
}
