//! The top-level parsed rule document

use crate::model::rule::{Expression, Rule, RuleGroup};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Which of the two accepted shapes the groups were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentLayout {
    /// Groups nested under `spec.groups` (a PrometheusRule resource)
    Wrapped,
    /// Groups under a root-level `groups` key (a plain rule file)
    RootLevel,
}

/// Encoding a document was successfully decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceEncoding {
    Yaml,
    Json,
}

/// A parsed rule file in its canonical shape.
///
/// Whatever layout the file used, the groups end up in one ordered list;
/// the layout is kept only as provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDocument {
    layout: DocumentLayout,
    encoding: SourceEncoding,
    name: Option<String>,
    source: Option<PathBuf>,
    groups: Vec<RuleGroup>,
}

impl RuleDocument {
    pub fn new(layout: DocumentLayout, groups: Vec<RuleGroup>) -> Self {
        Self {
            layout,
            encoding: SourceEncoding::Yaml,
            name: None,
            source: None,
            groups,
        }
    }

    /// Wrapped-layout document built directly from groups
    pub fn from_groups(groups: Vec<RuleGroup>) -> Self {
        Self::new(DocumentLayout::Wrapped, groups)
    }

    pub(crate) fn with_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Record the file the document was read from
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn layout(&self) -> DocumentLayout {
        self.layout
    }

    pub fn encoding(&self) -> SourceEncoding {
        self.encoding
    }

    /// `metadata.name` of the resource, if present
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }

    /// Every rule with its owning group, in document order
    pub fn rules(&self) -> impl Iterator<Item = (&RuleGroup, &Rule)> {
        self.groups
            .iter()
            .flat_map(|group| group.rules.iter().map(move |rule| (group, rule)))
    }

    pub(crate) fn expressions_mut(&mut self) -> impl Iterator<Item = &mut Expression> {
        self.groups
            .iter_mut()
            .flat_map(|group| group.rules.iter_mut().map(|rule| &mut rule.expr))
    }

    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(|g| g.rules.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
