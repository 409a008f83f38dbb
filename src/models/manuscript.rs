use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A submitted manuscript, keyed by title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manuscript {
    pub title: String,
    pub author: String,
    pub author_email: String,
    pub text: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub editor_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing a manuscript. Create and update take the
/// same full record, keyed by `title`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManuscriptInput {
    pub title: String,
    pub author: String,
    pub author_email: String,
    pub text: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub editor_email: String,
}
