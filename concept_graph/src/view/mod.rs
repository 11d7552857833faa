//! View derivation - the renderer-facing graph.
//!
//! The pipeline is plain function composition, re-run on every change:
//! 1. **Build**: repository -> full node/edge set
//! 2. **Filter**: full graph + focus level -> visible subgraph
//! 3. **Encode**: visible subgraph -> styled node and edge views

mod encoder;
mod filter;

pub use encoder::*;
pub use filter::*;

use concept_model::{ConceptId, Level};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::graph::{EdgeKind, GraphBuilder};
use crate::repository::ConceptRepository;

/// A styled concept, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: ConceptId,
    pub label: String,
    pub level: Level,
    pub is_adjacent: bool,
    pub is_extended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_discipline: Option<String>,
    pub style: NodeStyle,
}

/// A styled edge, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeView {
    pub source: ConceptId,
    pub target: ConceptId,
    pub kind: EdgeKind,
    pub style: EdgeStyle,
}

/// Everything the renderer receives for one filter state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewGraph {
    pub focus: FocusLevel,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

impl ViewGraph {
    pub fn node(&self, id: &str) -> Option<&NodeView> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// JSON payload for a JavaScript renderer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl VisualEncoder {
    /// Style every visible node and edge.
    pub fn encode(&self, filtered: &FilteredGraph<'_>, focus: FocusLevel) -> ViewGraph {
        let levels: HashMap<&str, u8> = filtered
            .nodes
            .iter()
            .map(|n| (n.node.id.as_str(), n.node.level.get()))
            .collect();

        let nodes = filtered
            .nodes
            .iter()
            .map(|n| NodeView {
                id: n.node.id.clone(),
                label: n.node.name.clone(),
                level: n.node.level,
                is_adjacent: n.is_adjacent,
                is_extended: n.node.is_extended,
                cross_discipline: n.node.cross_discipline.clone(),
                style: self.encode_node(n.node.level.get(), n.is_adjacent, n.node.is_extended),
            })
            .collect();

        let edges = filtered
            .edges
            .iter()
            .filter_map(|e| {
                let source = *levels.get(e.source.as_str())?;
                let target = *levels.get(e.target.as_str())?;
                Some(EdgeView {
                    source: e.source.clone(),
                    target: e.target.clone(),
                    kind: e.kind,
                    style: self.encode_edge(e.kind, source, target),
                })
            })
            .collect();

        ViewGraph {
            focus,
            nodes,
            edges,
        }
    }
}

/// Run the whole pipeline: `encode(filter(build(repository), focus))`.
pub fn derive_view(
    repository: &ConceptRepository,
    focus: FocusLevel,
    encoder: &VisualEncoder,
) -> ViewGraph {
    let graph = GraphBuilder::new(repository).build();
    let filtered = ViewFilter::new(focus).apply(&graph);
    encoder.encode(&filtered, focus)
}
