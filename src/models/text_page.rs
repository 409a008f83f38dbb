use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A page of journal text (about page, submission guidelines, and so on),
/// keyed by its page number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPage {
    pub page_number: String,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a text page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTextPageInput {
    pub title: String,
    pub text: String,
    pub page_number: String,
}

/// Input for replacing a text page's title and body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTextPageInput {
    pub page_number: String,
    pub title: String,
    pub text: String,
}
