//! Practice examples referenced by concepts.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;

use super::ConceptId;

/// Unique identifier for examples within one dataset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExampleId(pub String);

impl ExampleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ExampleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExampleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Question format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleType {
    /// Multiple choice; `options` is populated.
    Choice,
    /// Calculation.
    Calc,
    Proof,
}

/// A practice item owned by a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub id: ExampleId,
    pub title: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub answer: String,
    pub solution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub difficulty: Difficulty,
    #[serde(rename = "type")]
    pub example_type: ExampleType,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Concepts this example exercises.
    #[serde(default)]
    pub related_nodes: Vec<ConceptId>,
}

impl Example {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        difficulty: Difficulty,
        example_type: ExampleType,
    ) -> Self {
        Self {
            id: ExampleId::new(id),
            title: title.into(),
            question: String::new(),
            options: None,
            answer: String::new(),
            solution: String::new(),
            hint: None,
            difficulty,
            example_type,
            tags: BTreeSet::new(),
            related_nodes: Vec::new(),
        }
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = question.into();
        self
    }

    pub fn with_answer(mut self, answer: impl Into<String>, solution: impl Into<String>) -> Self {
        self.answer = answer.into();
        self.solution = solution.into();
        self
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn is_choice(&self) -> bool {
        self.example_type == ExampleType::Choice
    }
}
