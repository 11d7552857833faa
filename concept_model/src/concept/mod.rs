//! Concept records - the nodes of the knowledge-dependency graph.

mod example;

pub use example::*;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;

use crate::{Category, Level};

/// Unique identifier for concepts within one dataset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptId(pub String);

impl ConceptId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ConceptId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConceptId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ConceptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which cross-reference list an id was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// Strong dependency: must be understood first.
    Prerequisite,
    /// Weak, contextual dependency.
    Related,
    /// Practice example reference.
    Example,
}

/// A single addressable unit of mathematical knowledge.
///
/// Immutable once a dataset is loaded. `prerequisites` and `related` both
/// describe edges pointing *into* this concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptNode {
    pub id: ConceptId,

    pub name: String,

    /// Display text; may contain inline math delimited by `$`.
    pub description: String,

    pub category: Category,

    pub level: Level,

    /// Ordered ids of concepts that must precede this one.
    #[serde(default)]
    pub prerequisites: Vec<ConceptId>,

    /// Ordered ids of concepts associated with this one.
    #[serde(default)]
    pub related: Vec<ConceptId>,

    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// Supplementary material outside the core curriculum.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_extended: bool,

    /// External subject this concept bridges to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_discipline: Option<String>,

    #[serde(default, alias = "examples", skip_serializing_if = "Vec::is_empty")]
    pub example_ids: Vec<ExampleId>,
}

impl ConceptNode {
    /// Create a concept at the given level with the matching category.
    pub fn new(id: impl Into<String>, name: impl Into<String>, level: Level) -> Self {
        Self {
            id: ConceptId::new(id),
            name: name.into(),
            description: String::new(),
            category: level.category(),
            level,
            prerequisites: Vec::new(),
            related: Vec::new(),
            tags: BTreeSet::new(),
            is_extended: false,
            cross_discipline: None,
            example_ids: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_prerequisite(mut self, id: impl Into<String>) -> Self {
        self.prerequisites.push(ConceptId::new(id));
        self
    }

    pub fn with_related(mut self, id: impl Into<String>) -> Self {
        self.related.push(ConceptId::new(id));
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_example(mut self, id: impl Into<String>) -> Self {
        self.example_ids.push(ExampleId::new(id));
        self
    }

    /// Mark as supplementary material.
    pub fn extended(mut self) -> Self {
        self.is_extended = true;
        self
    }

    pub fn with_cross_discipline(mut self, subject: impl Into<String>) -> Self {
        self.cross_discipline = Some(subject.into());
        self
    }

    /// Check whether `id` appears in either dependency list.
    pub fn depends_on(&self, id: &str) -> bool {
        self.prerequisites
            .iter()
            .chain(&self.related)
            .any(|dep| dep.as_str() == id)
    }

    /// Iterate both dependency lists, tagged with their kind.
    pub fn references(&self) -> impl Iterator<Item = (&ConceptId, ReferenceKind)> {
        self.prerequisites
            .iter()
            .map(|id| (id, ReferenceKind::Prerequisite))
            .chain(self.related.iter().map(|id| (id, ReferenceKind::Related)))
    }
}
