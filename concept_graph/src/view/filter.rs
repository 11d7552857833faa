//! Focus filtering - which concepts render, and which render as context.

use concept_model::{ConceptNode, Level};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::debug;

use crate::error::GraphError;
use crate::graph::{ConceptGraph, Edge};

/// The user-selected lens over the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "FocusRepr", into = "String")]
pub enum FocusLevel {
    /// Every concept at full emphasis.
    #[default]
    All,
    /// One level in focus, its neighbours dimmed, everything else hidden.
    Level(Level),
}

impl FocusLevel {
    /// Whether a concept at `level` is shown, and if so whether as context.
    ///
    /// Returns `None` for hidden levels, `Some(false)` for focused ones, and
    /// `Some(true)` for adjacent context.
    pub fn classify(self, level: Level) -> Option<bool> {
        match self {
            FocusLevel::All => Some(false),
            FocusLevel::Level(focus) if focus == level => Some(false),
            FocusLevel::Level(focus) if focus.distance(level) == 1 => Some(true),
            FocusLevel::Level(_) => None,
        }
    }
}

impl TryFrom<u8> for FocusLevel {
    type Error = GraphError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::new(value)
            .map(FocusLevel::Level)
            .ok_or_else(|| GraphError::InvalidFocusLevel(value.to_string()))
    }
}

impl FromStr for FocusLevel {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(FocusLevel::All);
        }
        trimmed
            .parse::<u8>()
            .ok()
            .and_then(Level::new)
            .map(FocusLevel::Level)
            .ok_or_else(|| GraphError::InvalidFocusLevel(s.to_string()))
    }
}

impl TryFrom<String> for FocusLevel {
    type Error = GraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Accepted wire forms: `"all"`, `"2"`, or a bare `2`.
#[derive(Deserialize)]
#[serde(untagged)]
enum FocusRepr {
    Number(u8),
    Text(String),
}

impl TryFrom<FocusRepr> for FocusLevel {
    type Error = GraphError;

    fn try_from(repr: FocusRepr) -> Result<Self, Self::Error> {
        match repr {
            FocusRepr::Number(n) => FocusLevel::try_from(n),
            FocusRepr::Text(s) => s.parse(),
        }
    }
}

impl From<FocusLevel> for String {
    fn from(focus: FocusLevel) -> Self {
        focus.to_string()
    }
}

impl std::fmt::Display for FocusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FocusLevel::All => f.write_str("all"),
            FocusLevel::Level(level) => write!(f, "{}", level),
        }
    }
}

/// A concept that survived filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilteredNode<'a> {
    pub node: &'a ConceptNode,
    /// Shown as dimmed context one level away from the focus.
    pub is_adjacent: bool,
}

/// The visible subgraph for one focus level.
#[derive(Debug, Clone, Default)]
pub struct FilteredGraph<'a> {
    /// Focused concepts first, then adjacent context, each in graph order.
    pub nodes: Vec<FilteredNode<'a>>,
    /// Edges whose endpoints are both visible.
    pub edges: Vec<Edge>,
}

impl<'a> FilteredGraph<'a> {
    pub fn get(&self, id: &str) -> Option<&FilteredNode<'a>> {
        self.nodes.iter().find(|n| n.node.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Computes the visible subgraph for a focus level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewFilter {
    focus: FocusLevel,
}

impl ViewFilter {
    pub fn new(focus: FocusLevel) -> Self {
        Self { focus }
    }

    pub fn focus(&self) -> FocusLevel {
        self.focus
    }

    /// Filter a graph.
    ///
    /// With `All`, every node passes undimmed. With a level `F`, nodes at `F`
    /// pass undimmed, nodes at `F-1` and `F+1` pass as adjacent context, and
    /// all others are removed. Edges are kept only when both endpoints
    /// remain; closure is re-checked here rather than inherited from the
    /// builder.
    pub fn apply<'a>(&self, graph: &ConceptGraph<'a>) -> FilteredGraph<'a> {
        let mut focused = Vec::new();
        let mut context = Vec::new();
        for node in &graph.nodes {
            match self.focus.classify(node.level) {
                Some(false) => focused.push(FilteredNode {
                    node: *node,
                    is_adjacent: false,
                }),
                Some(true) => context.push(FilteredNode {
                    node: *node,
                    is_adjacent: true,
                }),
                None => {}
            }
        }
        focused.extend(context);
        let nodes = focused;

        let visible: HashSet<&str> = nodes.iter().map(|n| n.node.id.as_str()).collect();
        let edges: Vec<Edge> = graph
            .edges
            .iter()
            .filter(|e| visible.contains(e.source.as_str()) && visible.contains(e.target.as_str()))
            .cloned()
            .collect();

        debug!(
            focus = %self.focus,
            nodes = nodes.len(),
            edges = edges.len(),
            "view filtered"
        );
        FilteredGraph { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeKind, GraphBuilder};
    use crate::repository::ConceptRepository;
    use concept_model::Dataset;

    fn ladder() -> ConceptRepository {
        ConceptRepository::load(Dataset::new(
            vec![
                ConceptNode::new("l1", "L1", Level::FOUNDATIONAL),
                ConceptNode::new("l2", "L2", Level::CORE).with_prerequisite("l1"),
                ConceptNode::new("l3", "L3", Level::ADVANCED)
                    .with_prerequisite("l2")
                    .with_prerequisite("l1"),
                ConceptNode::new("l4", "L4", Level::INTEGRATIVE)
                    .with_prerequisite("l3")
                    .with_related("l1"),
            ],
            Vec::new(),
        ))
    }

    fn ids<'a>(filtered: &'a FilteredGraph<'_>) -> Vec<(&'a str, bool)> {
        filtered
            .nodes
            .iter()
            .map(|n| (n.node.id.as_str(), n.is_adjacent))
            .collect()
    }

    #[test]
    fn test_focus_level_parsing() {
        assert_eq!("all".parse::<FocusLevel>().unwrap(), FocusLevel::All);
        assert_eq!("ALL".parse::<FocusLevel>().unwrap(), FocusLevel::All);
        assert_eq!(
            "3".parse::<FocusLevel>().unwrap(),
            FocusLevel::Level(Level::ADVANCED)
        );
        assert!(matches!(
            "0".parse::<FocusLevel>(),
            Err(GraphError::InvalidFocusLevel(_))
        ));
        assert!("5".parse::<FocusLevel>().is_err());
        assert!("two".parse::<FocusLevel>().is_err());
        assert!(FocusLevel::try_from(9u8).is_err());
    }

    #[test]
    fn test_focus_level_serde() {
        let focus: FocusLevel = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(focus, FocusLevel::Level(Level::CORE));
        assert_eq!(serde_json::to_string(&FocusLevel::All).unwrap(), "\"all\"");
    }

    #[test]
    fn test_focus_level_from_number() {
        let focus: FocusLevel = serde_json::from_str("3").unwrap();
        assert_eq!(focus, FocusLevel::Level(Level::ADVANCED));
        assert!(serde_json::from_str::<FocusLevel>("0").is_err());
        assert!(serde_json::from_str::<FocusLevel>("5").is_err());
        assert!(serde_json::from_str::<FocusLevel>("300").is_err());
    }

    #[test]
    fn test_all_is_identity() {
        let repo = ladder();
        let graph = GraphBuilder::new(&repo).build();
        let filtered = ViewFilter::new(FocusLevel::All).apply(&graph);

        assert_eq!(filtered.nodes.len(), graph.nodes.len());
        assert!(filtered.nodes.iter().all(|n| !n.is_adjacent));
        assert_eq!(filtered.edges, graph.edges);
    }

    #[test]
    fn test_middle_focus() {
        let repo = ladder();
        let graph = GraphBuilder::new(&repo).build();
        let filtered = ViewFilter::new(FocusLevel::Level(Level::CORE)).apply(&graph);

        assert_eq!(ids(&filtered), vec![("l2", false), ("l1", true), ("l3", true)]);
        // l4 is hidden, so its edges go with it.
        assert_eq!(
            filtered.edges,
            vec![
                Edge::new("l1", "l2", EdgeKind::Prerequisite),
                Edge::new("l2", "l3", EdgeKind::Prerequisite),
                Edge::new("l1", "l3", EdgeKind::Prerequisite),
            ]
        );
    }

    #[test]
    fn test_boundary_focus_levels() {
        let repo = ladder();
        let graph = GraphBuilder::new(&repo).build();

        let bottom = ViewFilter::new(FocusLevel::Level(Level::FOUNDATIONAL)).apply(&graph);
        assert_eq!(ids(&bottom), vec![("l1", false), ("l2", true)]);

        let top = ViewFilter::new(FocusLevel::Level(Level::INTEGRATIVE)).apply(&graph);
        assert_eq!(ids(&top), vec![("l4", false), ("l3", true)]);
        assert_eq!(top.edges, vec![Edge::new("l3", "l4", EdgeKind::Prerequisite)]);
    }

    #[test]
    fn test_levels_stay_within_window() {
        let repo = ladder();
        let graph = GraphBuilder::new(&repo).build();

        for level in Level::ALL {
            let filtered = ViewFilter::new(FocusLevel::Level(level)).apply(&graph);
            for node in &filtered.nodes {
                assert!(node.node.level.distance(level) <= 1);
            }
            for edge in &filtered.edges {
                assert!(filtered.contains(edge.source.as_str()));
                assert!(filtered.contains(edge.target.as_str()));
            }
        }
    }

    #[test]
    fn test_empty_focus_level() {
        let repo = ConceptRepository::load(Dataset::new(
            vec![ConceptNode::new("only", "Only", Level::FOUNDATIONAL)],
            Vec::new(),
        ));
        let graph = GraphBuilder::new(&repo).build();
        let filtered = ViewFilter::new(FocusLevel::Level(Level::INTEGRATIVE)).apply(&graph);

        assert!(filtered.is_empty());
        assert!(filtered.edges.is_empty());
    }
}
