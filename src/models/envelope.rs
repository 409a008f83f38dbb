use serde::{Deserialize, Serialize};

use super::Masthead;

/// JSON wrapper returned by mutating endpoints on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub message: String,
    #[serde(rename = "return")]
    pub ret: T,
}

impl<T> Envelope<T> {
    pub fn new(message: impl Into<String>, ret: T) -> Self {
        Self {
            message: message.into(),
            ret,
        }
    }
}

/// Response body for delete endpoints, echoing the removed key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deleted<T> {
    #[serde(rename = "Deleted")]
    pub deleted: T,
}

/// Response body for the masthead endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MastheadResponse {
    #[serde(rename = "Masthead")]
    pub masthead: Masthead,
}
