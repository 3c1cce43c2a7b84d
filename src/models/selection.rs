//! Hierarchical selection path

use serde::{Deserialize, Serialize};

use super::entity::GroupCode;

/// Depth of the organizational hierarchy behind the division picker.
///
/// Four-tier deployments interpose a sub-office between the provincial
/// office and the school; three-tier deployments go straight from region to
/// school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hierarchy {
    ThreeTier,
    FourTier,
}

/// The staff's current position in the hierarchy filter.
///
/// Invariants: `subregion_id` is set only under a region; `division_id` only
/// under a subregion (four-tier) or a region (three-tier). Mutations go
/// through the selection controller, which clears descendants whenever an
/// ancestor changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPath {
    pub region_id: Option<i64>,
    pub subregion_id: Option<i64>,
    pub division_id: Option<i64>,
}

impl SelectionPath {
    /// True when no tier is selected
    pub fn is_empty(&self) -> bool {
        self.region_id.is_none() && self.subregion_id.is_none() && self.division_id.is_none()
    }

    /// Check the ancestor invariants for the given hierarchy depth
    pub fn is_consistent(&self, hierarchy: Hierarchy) -> bool {
        if self.subregion_id.is_some() && self.region_id.is_none() {
            return false;
        }
        match hierarchy {
            Hierarchy::FourTier => {
                !(self.division_id.is_some() && self.subregion_id.is_none())
            }
            Hierarchy::ThreeTier => {
                self.subregion_id.is_none()
                    && !(self.division_id.is_some() && self.region_id.is_none())
            }
        }
    }
}

/// Persisted picker state: active tier plus the path within it.
///
/// Serialized as JSON through the selection persistence port so a reopened
/// session starts where the operator left off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub tier: GroupCode,
    pub path: SelectionPath,
}
