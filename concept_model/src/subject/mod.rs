//! The subject catalog - which datasets exist and how they are presented.

mod registry;

pub use registry::*;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::path::Path;

use crate::{ModelError, ModelResult};

/// Identifier of a subject area, e.g. `"trigonometry"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SubjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SubjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub description: String,
    /// Dataset file name, relative to the data directory.
    pub data_file: String,
    /// Color tag used by the subject selector.
    pub color: String,
    pub icon: String,
}

impl Subject {
    pub fn new(
        id: &str,
        name: &str,
        description: &str,
        color: &str,
        icon: &str,
    ) -> Self {
        Self {
            id: SubjectId::from(id),
            name: name.to_string(),
            description: description.to_string(),
            data_file: format!("{}.json", id),
            color: color.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Fixed, ordered list of selectable subjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct SubjectCatalog {
    subjects: Vec<Subject>,
}

/// Catalog as written on disk, before duplicate checks.
#[derive(Deserialize)]
struct RawCatalog {
    subjects: Vec<Subject>,
}

impl TryFrom<RawCatalog> for SubjectCatalog {
    type Error = ModelError;

    fn try_from(raw: RawCatalog) -> ModelResult<Self> {
        Self::new(raw.subjects)
    }
}

impl SubjectCatalog {
    /// Create a catalog, rejecting duplicate subject ids.
    pub fn new(subjects: Vec<Subject>) -> ModelResult<Self> {
        let mut seen = HashSet::new();
        for subject in &subjects {
            if !seen.insert(subject.id.as_str()) {
                return Err(ModelError::DuplicateSubject(subject.id.clone()));
            }
        }
        Ok(Self { subjects })
    }

    /// The catalog shipped with the application.
    pub fn builtin() -> Self {
        Self {
            subjects: vec![
                Subject::new("trigonometry", "Trigonometry", "Trigonometric ratios, functions, identities and applications", "blue", "📐"),
                Subject::new("vector", "Vectors", "Plane and space vectors, dot product, cross product", "purple", "➡️"),
                Subject::new("function", "Functions", "Linear, quadratic, exponential, logarithmic and trigonometric functions", "green", "📈"),
                Subject::new("algebra", "Algebra", "Equations, inequalities, sequences, series, polynomials", "orange", "🔢"),
                Subject::new("probability", "Combinatorics & Probability", "Permutations, combinations, probability, conditional probability, expectation", "pink", "🎲"),
                Subject::new("geometry", "Geometry", "Plane, solid and coordinate geometry, conic sections", "cyan", "📏"),
                Subject::new("statistics", "Statistics", "Data summaries, central tendency, dispersion, correlation and regression", "indigo", "📊"),
                Subject::new("calculus", "Calculus", "Limits, derivatives, integrals, differential equations", "rose", "∫"),
                Subject::new("linear-algebra", "Linear Algebra", "Matrix operations, determinants, vector spaces, eigenvalues", "teal", "⊕"),
                Subject::new("discrete-math", "Discrete Mathematics", "Logic, sets, relations, graph theory, number theory", "lime", "🔗"),
            ],
        }
    }

    /// Parse a catalog from TOML with a `[[subjects]]` array.
    pub fn from_toml_str(content: &str) -> ModelResult<Self> {
        let raw: RawCatalog = toml::from_str(content)?;
        Self::try_from(raw)
    }

    /// Read a catalog TOML file.
    pub fn from_file(path: &Path) -> ModelResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn get(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

impl Default for SubjectCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
