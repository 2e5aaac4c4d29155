use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::ModelTable;

// ---------------------------------------------------------------------------
// Visibility: groups of models, each with its own on/off switch
// ---------------------------------------------------------------------------

/// Flat set of model names that take part in the plot.
pub type VisibilityFilter = BTreeSet<String>;

/// A model listed inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub name: String,
    pub is_visible: bool,
}

/// A user-defined group of models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelGroup {
    pub name: String,
    pub is_visible: bool,
    pub models: Vec<GroupMember>,
}

impl ModelGroup {
    /// A visible group holding every model of `table`, all visible.
    pub fn from_table(name: &str, table: &ModelTable) -> Self {
        ModelGroup {
            name: name.to_string(),
            is_visible: true,
            models: table
                .names()
                .map(|n| GroupMember {
                    name: n.to_string(),
                    is_visible: true,
                })
                .collect(),
        }
    }

    /// Flip visibility of one member. Returns `false` if the model is not
    /// part of the group.
    pub fn set_model_visible(&mut self, model: &str, visible: bool) -> bool {
        match self.models.iter_mut().find(|m| m.name == model) {
            Some(member) => {
                member.is_visible = visible;
                true
            }
            None => false,
        }
    }

    /// Set every member's visibility at once.
    pub fn set_all_visible(&mut self, visible: bool) {
        for member in &mut self.models {
            member.is_visible = visible;
        }
    }
}

/// Collapse the two-level structure into the included model names.
///
/// A model is included when its group is visible *and* the model itself is
/// visible within that group. A model listed in several groups is included
/// if any one of them qualifies.
pub fn included_models(groups: &[ModelGroup]) -> VisibilityFilter {
    groups
        .iter()
        .filter(|g| g.is_visible)
        .flat_map(|g| g.models.iter())
        .filter(|m| m.is_visible)
        .map(|m| m.name.clone())
        .collect()
}
