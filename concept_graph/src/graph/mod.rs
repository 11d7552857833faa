//! Graph derivation - nodes and typed edges from concept dependency lists.

use concept_model::{ConceptId, ConceptNode, ReferenceKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

use crate::repository::ConceptRepository;

/// Strength of a dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Must-precede dependency.
    Prerequisite,
    /// Contextual, non-blocking association.
    Related,
}

/// A directed edge pointing from a dependency into the concept that lists it.
///
/// Identity is the full `(source, target, kind)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: ConceptId,
    pub target: ConceptId,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            source: ConceptId::new(source),
            target: ConceptId::new(target),
            kind,
        }
    }
}

/// The full, unfiltered graph of a repository.
#[derive(Debug, Clone, Default)]
pub struct ConceptGraph<'a> {
    /// Concepts in repository order.
    pub nodes: Vec<&'a ConceptNode>,
    /// Deduplicated edges in discovery order.
    pub edges: Vec<Edge>,
}

impl<'a> ConceptGraph<'a> {
    /// Check that every edge endpoint is one of the graph's nodes.
    pub fn is_closed(&self) -> bool {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges
            .iter()
            .all(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
    }

    /// Edges of one kind.
    pub fn edges_of_kind(&self, kind: EdgeKind) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.kind == kind).collect()
    }
}

/// Derives a [`ConceptGraph`] from a repository.
pub struct GraphBuilder<'a> {
    repository: &'a ConceptRepository,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(repository: &'a ConceptRepository) -> Self {
        Self { repository }
    }

    /// Build the node and edge set.
    ///
    /// # Algorithm
    ///
    /// 1. Nodes are all repository concepts, order preserved
    /// 2. Each prerequisite id `P` of concept `N` yields `P -> N (prerequisite)`
    /// 3. Each related id `R` of concept `N` yields `R -> N (related)`
    /// 4. Ids that do not resolve are dropped
    /// 5. Repeated `(source, target, kind)` triples collapse to the first
    pub fn build(&self) -> ConceptGraph<'a> {
        let nodes: Vec<&'a ConceptNode> = self.repository.all().iter().collect();

        let mut seen: HashSet<Edge> = HashSet::new();
        let mut edges = Vec::new();
        let mut dropped = 0usize;

        for node in &nodes {
            for (dependency, reference) in node.references() {
                if !self.repository.contains(dependency.as_str()) {
                    trace!(concept = %node.id, missing = %dependency, "dropping dangling edge");
                    dropped += 1;
                    continue;
                }

                let kind = match reference {
                    ReferenceKind::Prerequisite => EdgeKind::Prerequisite,
                    ReferenceKind::Related => EdgeKind::Related,
                    ReferenceKind::Example => continue,
                };
                let edge = Edge {
                    source: dependency.clone(),
                    target: node.id.clone(),
                    kind,
                };
                if seen.insert(edge.clone()) {
                    edges.push(edge);
                }
            }
        }

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            dropped,
            "concept graph built"
        );
        ConceptGraph { nodes, edges }
    }
}
