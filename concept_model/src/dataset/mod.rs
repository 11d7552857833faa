//! Datasets - the complete, read-only content of one subject.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::{ConceptId, ConceptNode, Example, ModelError, ModelResult, ReferenceKind};

/// A cross-reference that does not resolve within its dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// Concept holding the reference.
    pub concept: ConceptId,
    /// Id that failed to resolve.
    pub missing: String,
    pub kind: ReferenceKind,
}

/// All concepts and examples of one subject.
///
/// Loaded once per subject selection and never mutated afterwards. Datasets
/// never reference each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    pub nodes: Vec<ConceptNode>,

    #[serde(default)]
    pub examples: Vec<Example>,
}

impl Dataset {
    /// Create a dataset from nodes and examples without metadata.
    pub fn new(nodes: Vec<ConceptNode>, examples: Vec<Example>) -> Self {
        Self {
            nodes,
            examples,
            ..Self::default()
        }
    }

    /// Parse and validate a dataset from JSON text.
    pub fn from_json_str(json: &str) -> ModelResult<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Read, parse, and validate a dataset file.
    pub fn from_file(path: &Path) -> ModelResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&content)?;

        info!(
            path = %path.display(),
            nodes = dataset.nodes.len(),
            examples = dataset.examples.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Check structural invariants.
    ///
    /// Rejects duplicate concept or example ids and any concept whose category
    /// does not match its level. Dangling references are not checked here; see
    /// [`Dataset::dangling_references`].
    pub fn validate(&self) -> ModelResult<()> {
        let mut concept_ids = HashSet::new();
        for node in &self.nodes {
            if !concept_ids.insert(node.id.as_str()) {
                return Err(ModelError::DuplicateConcept(node.id.clone()));
            }
            if node.category.level() != node.level {
                return Err(ModelError::CategoryLevelMismatch {
                    id: node.id.clone(),
                    category: node.category,
                    level: node.level,
                });
            }
        }

        let mut example_ids = HashSet::new();
        for example in &self.examples {
            if !example_ids.insert(example.id.as_str()) {
                return Err(ModelError::DuplicateExample(example.id.clone()));
            }
        }

        Ok(())
    }

    /// List every prerequisite, related, or example id that does not resolve.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let concept_ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let example_ids: HashSet<&str> = self.examples.iter().map(|e| e.id.as_str()).collect();

        let mut dangling = Vec::new();
        for node in &self.nodes {
            for (id, kind) in node.references() {
                if !concept_ids.contains(id.as_str()) {
                    dangling.push(DanglingReference {
                        concept: node.id.clone(),
                        missing: id.to_string(),
                        kind,
                    });
                }
            }
            for id in &node.example_ids {
                if !example_ids.contains(id.as_str()) {
                    dangling.push(DanglingReference {
                        concept: node.id.clone(),
                        missing: id.to_string(),
                        kind: ReferenceKind::Example,
                    });
                }
            }
        }
        dangling
    }
}
