use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::record::{RRSet, RRSetKey};

/// Record set operations of a DNS management API.
#[async_trait]
pub trait RRSetApi: Send + Sync {
    async fn select(&self, key: &RRSetKey) -> Result<Vec<RRSet>>;
    async fn create(&self, key: &RRSetKey, rrset: &RRSet) -> Result<()>;
    async fn update(&self, key: &RRSetKey, rrset: &RRSet) -> Result<()>;
    async fn delete(&self, key: &RRSetKey) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiError {
    #[serde(rename = "errorCode")]
    pub code: i64,

    #[serde(rename = "errorMessage", default)]
    pub message: String,
}

/// Error list returned by the API on a failed request.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct ApiErrors(pub Vec<ApiError>);

impl ApiErrors {
    pub const RECORDS_NOT_FOUND: i64 = 70002;

    pub fn first_code(&self) -> Option<i64> {
        self.0.first().map(|e| e.code)
    }
}

impl fmt::Display for ApiErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msgs: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect();
        write!(f, "[{}]", msgs.join(", "))
    }
}
