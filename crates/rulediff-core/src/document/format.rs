//! Rule file wire format
//!
//! Defines the serialized structure shared by the YAML and JSON encodings.
//! Unknown keys (`apiVersion`, `kind`, ...) are ignored.

use crate::model::scalar;
use crate::model::{DocumentLayout, RuleDocument, RuleGroup};
use serde::Deserialize;

/// Top-level rule file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleFile {
    /// Resource metadata
    #[serde(default)]
    pub metadata: Option<ObjectMeta>,

    /// Resource body holding the wrapped groups
    #[serde(default)]
    pub spec: Option<SpecBody>,

    /// Root-level groups of a plain rule file
    #[serde(default, deserialize_with = "scalar::null_as_default")]
    pub groups: Vec<RuleGroup>,
}

/// Resource metadata; only the name is read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectMeta {
    #[serde(default, deserialize_with = "scalar::optional_text")]
    pub name: Option<String>,
}

/// Resource body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecBody {
    #[serde(default, deserialize_with = "scalar::null_as_default")]
    pub groups: Vec<RuleGroup>,
}

/// Both `spec.groups` and root `groups` were populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictingLayouts {
    pub wrapped_groups: usize,
    pub root_level_groups: usize,
}

impl std::fmt::Display for ConflictingLayouts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} groups under 'spec.groups' and {} under root 'groups'",
            self.wrapped_groups, self.root_level_groups
        )
    }
}

/// The single populated group list of a file
enum GroupLayout {
    Wrapped(Vec<RuleGroup>),
    RootLevel(Vec<RuleGroup>),
}

impl GroupLayout {
    fn resolve(
        wrapped: Vec<RuleGroup>,
        root_level: Vec<RuleGroup>,
    ) -> Result<Self, ConflictingLayouts> {
        match (wrapped.is_empty(), root_level.is_empty()) {
            (false, false) => Err(ConflictingLayouts {
                wrapped_groups: wrapped.len(),
                root_level_groups: root_level.len(),
            }),
            (true, false) => Ok(GroupLayout::RootLevel(root_level)),
            // Nothing populated reads as an empty resource
            (_, true) => Ok(GroupLayout::Wrapped(wrapped)),
        }
    }
}

impl TryFrom<RuleFile> for RuleDocument {
    type Error = ConflictingLayouts;

    fn try_from(file: RuleFile) -> Result<Self, Self::Error> {
        let wrapped = file.spec.map(|spec| spec.groups).unwrap_or_default();
        let document = match GroupLayout::resolve(wrapped, file.groups)? {
            GroupLayout::Wrapped(groups) => RuleDocument::new(DocumentLayout::Wrapped, groups),
            GroupLayout::RootLevel(groups) => RuleDocument::new(DocumentLayout::RootLevel, groups),
        };

        Ok(match file.metadata.and_then(|meta| meta.name) {
            Some(name) => document.with_name(name),
            None => document,
        })
    }
}
