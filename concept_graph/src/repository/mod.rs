//! Concept repository - id-indexed, read-only access to one dataset.

use concept_model::{ConceptId, ConceptNode, Dataset, Example, ExampleId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Immutable concept set for the selected subject.
///
/// All indexes are built once in [`ConceptRepository::load`]. Lookups of
/// unknown ids return `None`; callers must never assume an id resolves.
#[derive(Debug, Clone, Default)]
pub struct ConceptRepository {
    dataset: Arc<Dataset>,

    /// Concept id -> position in `dataset.nodes`.
    concept_index: HashMap<ConceptId, usize>,

    /// Example id -> position in `dataset.examples`.
    example_index: HashMap<ExampleId, usize>,

    /// Reverse index: referenced id -> positions of concepts listing it as a
    /// prerequisite or related concept, in dataset order.
    dependents: HashMap<ConceptId, Vec<usize>>,
}

impl ConceptRepository {
    /// Index a dataset.
    pub fn load(dataset: impl Into<Arc<Dataset>>) -> Self {
        let mut dataset = dataset.into();

        let has_duplicates = {
            let mut seen = HashSet::with_capacity(dataset.nodes.len());
            dataset.nodes.iter().any(|node| !seen.insert(node.id.as_str()))
        };
        if has_duplicates {
            // Only the first concept with a given id is kept, everywhere.
            let mut kept = HashSet::new();
            Arc::make_mut(&mut dataset).nodes.retain(|node| {
                let first = kept.insert(node.id.clone());
                if !first {
                    warn!(concept = %node.id, "duplicate concept id ignored");
                }
                first
            });
        }

        let concept_index: HashMap<ConceptId, usize> = dataset
            .nodes
            .iter()
            .enumerate()
            .map(|(pos, node)| (node.id.clone(), pos))
            .collect();

        let mut example_index = HashMap::with_capacity(dataset.examples.len());
        for (pos, example) in dataset.examples.iter().enumerate() {
            example_index.entry(example.id.clone()).or_insert(pos);
        }

        let mut dependents: HashMap<ConceptId, Vec<usize>> = HashMap::new();
        for (pos, node) in dataset.nodes.iter().enumerate() {
            for (id, _) in node.references() {
                let entry = dependents.entry(id.clone()).or_default();
                // Listed in both prerequisites and related counts once.
                if entry.last() != Some(&pos) {
                    entry.push(pos);
                }
            }
        }

        let dangling = dataset.dangling_references();
        for reference in &dangling {
            debug!(
                concept = %reference.concept,
                missing = %reference.missing,
                kind = ?reference.kind,
                "dangling reference"
            );
        }
        info!(
            topic = dataset.topic.as_deref().unwrap_or("-"),
            concepts = concept_index.len(),
            examples = example_index.len(),
            dangling = dangling.len(),
            "concept repository built"
        );

        Self {
            dataset,
            concept_index,
            example_index,
            dependents,
        }
    }

    /// Get a concept by id.
    pub fn get_by_id(&self, id: &str) -> Option<&ConceptNode> {
        self.concept_index
            .get(id)
            .and_then(|pos| self.dataset.nodes.get(*pos))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.concept_index.contains_key(id)
    }

    /// All concepts in dataset order.
    pub fn all(&self) -> &[ConceptNode] {
        &self.dataset.nodes
    }

    /// Get an example by id.
    pub fn example(&self, id: &str) -> Option<&Example> {
        self.example_index
            .get(id)
            .and_then(|pos| self.dataset.examples.get(*pos))
    }

    pub fn examples(&self) -> &[Example] {
        &self.dataset.examples
    }

    /// Concepts listing `id` as a prerequisite or related concept.
    pub fn dependents(&self, id: &str) -> impl Iterator<Item = &ConceptNode> {
        self.dependents
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .filter_map(|pos| self.dataset.nodes.get(*pos))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn len(&self) -> usize {
        self.dataset.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.nodes.is_empty()
    }
}

impl From<Dataset> for ConceptRepository {
    fn from(dataset: Dataset) -> Self {
        Self::load(dataset)
    }
}
