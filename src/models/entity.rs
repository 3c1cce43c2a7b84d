//! Organizational entity model

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GroupCode
// ---------------------------------------------------------------------------

/// Organizational tier of an entity.
///
/// Only `Division`-tier entities (individual schools) are paginated and
/// searched; the other tiers load in full per parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i16)]
pub enum GroupCode {
    Unknown = 0,
    /// Provincial office
    Region = 1,
    /// District-level sub-office
    Subregion = 2,
    /// Individual school
    Division = 3,
    /// Partner organization
    Partner = 4,
}

impl From<i16> for GroupCode {
    fn from(v: i16) -> Self {
        match v {
            1 => GroupCode::Region,
            2 => GroupCode::Subregion,
            3 => GroupCode::Division,
            4 => GroupCode::Partner,
            _ => GroupCode::Unknown,
        }
    }
}

impl From<GroupCode> for i16 {
    fn from(g: GroupCode) -> Self {
        g as i16
    }
}

impl std::fmt::Display for GroupCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GroupCode::Unknown => "unknown",
            GroupCode::Region => "region",
            GroupCode::Subregion => "subregion",
            GroupCode::Division => "division",
            GroupCode::Partner => "partner",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A record in one of the organizational lists (office, school, partner
/// unit) or any other pickable list served through the fetch port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: i64,
    pub name: String,
    pub group_code: GroupCode,
}

impl Entity {
    pub fn new(id: i64, name: impl Into<String>, group_code: GroupCode) -> Self {
        Self {
            id,
            name: name.into(),
            group_code,
        }
    }
}
