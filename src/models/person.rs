use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person involved in the journal: editors, authors, referees.
///
/// People are keyed by email. One person can hold several roles at once
/// (an editor may also referee), so `roles` is a set of codes rather than
/// a single value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub affiliation: String,
    pub email: String,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A journal role, serialized as its two-letter code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "AU")]
    Author,
    #[serde(rename = "CE")]
    ConsultingEditor,
    #[serde(rename = "ED")]
    Editor,
    #[serde(rename = "ME")]
    ManagingEditor,
    #[serde(rename = "RE")]
    Referee,
}

/// Roles that appear on the journal's masthead, in display order.
pub const MASTHEAD_ROLES: [Role; 3] = [Role::ConsultingEditor, Role::Editor, Role::ManagingEditor];

impl Role {
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Author => "AU",
            Self::ConsultingEditor => "CE",
            Self::Editor => "ED",
            Self::ManagingEditor => "ME",
            Self::Referee => "RE",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "AU" => Some(Self::Author),
            "CE" => Some(Self::ConsultingEditor),
            "ED" => Some(Self::Editor),
            "ME" => Some(Self::ManagingEditor),
            "RE" => Some(Self::Referee),
            _ => None,
        }
    }

    /// Human-readable title used in masthead listings.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Author => "Author",
            Self::ConsultingEditor => "Consulting Editor",
            Self::Editor => "Editor",
            Self::ManagingEditor => "Managing Editor",
            Self::Referee => "Referee",
        }
    }

    pub fn is_masthead(&self) -> bool {
        MASTHEAD_ROLES.contains(self)
    }
}

/// Masthead listing: role title mapped to member names.
pub type Masthead = BTreeMap<String, Vec<String>>;

/// Input for creating a person.
///
/// `roles` carries a single role code; further roles are attached through
/// the add-role endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePersonInput {
    pub name: String,
    pub affiliation: String,
    pub email: String,
    pub roles: String,
}

/// Input for updating one attribute of a person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePersonInput {
    pub email: String,
    /// Attribute to change; see [`PersonField`].
    pub field: String,
    pub value: String,
}

/// Input for attaching or removing a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleChangeInput {
    pub email: String,
    pub role: String,
}

/// The person attributes an update request may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonField {
    Name,
    Affiliation,
}

impl PersonField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "affiliation" => Some(Self::Affiliation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Affiliation => "affiliation",
        }
    }
}
