//! Navigation - cross-reference resolution for the detail panel.
//!
//! Forward references come straight from a concept's own lists; reverse
//! references (dependents) come from the repository's reverse index. Ids that
//! do not resolve are omitted.

mod camera;
mod selection;

pub use camera::*;
pub use selection::*;

use concept_model::{split_math, ConceptNode, Example, Segment};
use serde::Serialize;

use crate::repository::ConceptRepository;

/// Everything the detail panel shows for one concept.
#[derive(Debug, Clone, Serialize)]
pub struct DetailPanel<'a> {
    pub node: &'a ConceptNode,
    /// Description split into plain and inline-math runs.
    pub description: Vec<Segment<'a>>,
    pub prerequisites: Vec<&'a ConceptNode>,
    pub related: Vec<&'a ConceptNode>,
    pub dependents: Vec<&'a ConceptNode>,
    pub examples: Vec<&'a Example>,
}

/// Resolves id-based cross-references against one repository.
#[derive(Debug, Clone, Copy)]
pub struct NavigationResolver<'a> {
    repository: &'a ConceptRepository,
}

impl<'a> NavigationResolver<'a> {
    pub fn new(repository: &'a ConceptRepository) -> Self {
        Self { repository }
    }

    /// Resolved prerequisites of `id`, in list order.
    pub fn prerequisites_of(&self, id: &str) -> Vec<&'a ConceptNode> {
        let repo = self.repository;
        repo.get_by_id(id)
            .map(|node| {
                node.prerequisites
                    .iter()
                    .filter_map(|p| repo.get_by_id(p.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolved related concepts of `id`, in list order.
    pub fn related_of(&self, id: &str) -> Vec<&'a ConceptNode> {
        let repo = self.repository;
        repo.get_by_id(id)
            .map(|node| {
                node.related
                    .iter()
                    .filter_map(|r| repo.get_by_id(r.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Concepts that list `id` as a prerequisite or related concept.
    pub fn dependents_of(&self, id: &str) -> Vec<&'a ConceptNode> {
        self.repository.dependents(id).collect()
    }

    /// Resolved practice examples of `id`, in list order.
    pub fn examples_of(&self, id: &str) -> Vec<&'a Example> {
        let repo = self.repository;
        repo.get_by_id(id)
            .map(|node| {
                node.example_ids
                    .iter()
                    .filter_map(|e| repo.example(e.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Assemble the detail panel bundle, or `None` for an unknown id.
    pub fn detail(&self, id: &str) -> Option<DetailPanel<'a>> {
        let node = self.repository.get_by_id(id)?;
        Some(DetailPanel {
            node,
            description: split_math(&node.description),
            prerequisites: self.prerequisites_of(id),
            related: self.related_of(id),
            dependents: self.dependents_of(id),
            examples: self.examples_of(id),
        })
    }
}
