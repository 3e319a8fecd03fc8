use std::fmt;

use crate::provider::ApiErrors;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    HttpError(String),
    ParseError(String),
    IoError(std::io::Error),
    Api(ApiErrors),
    Provider(String),
    InvalidResource(String),
    UnparseableId(String),
    AmbiguousId(String),
}

impl Error {
    /// True when the API answered with "records not found" (70002).
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Api(errors) => errors.first_code() == Some(ApiErrors::RECORDS_NOT_FOUND),
            _ => false,
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::HttpError(e) => write!(f, "HTTP error: {}", e),
            Error::ParseError(e) => write!(f, "Parse error: {}", e),
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::Api(e) => write!(f, "API error: {}", e),
            Error::Provider(e) => write!(f, "{}", e),
            Error::InvalidResource(e) => write!(f, "invalid resource: {}", e),
            Error::UnparseableId(id) => {
                write!(f, "unexpected format of ID ({:?}), expected name.zone", id)
            }
            Error::AmbiguousId(id) => write!(
                f,
                "multiple segments of ID ({:?}) are valid DNS names, cannot resolve and import",
                id
            ),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Error {
        Error::HttpError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::ParseError(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Error {
        Error::ParseError(err.to_string())
    }
}
