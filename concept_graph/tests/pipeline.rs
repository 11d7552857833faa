//! End-to-end derivation and session tests over the public API.

use std::collections::BTreeSet;
use std::fs;

use concept_graph::{
    derive_view, ConceptRepository, EdgeKind, FocusLevel, GraphBuilder, GraphConfig,
    NavigationResolver, RenderCommand, RenderMode, Session, ViewEvent, ViewFilter, ViewGraph,
    VisualEncoder,
};
use concept_model::{
    ConceptId, ConceptNode, Dataset, DatasetRegistry, Level, Subject, SubjectCatalog, SubjectId,
};

/// A(1), B(2, prerequisites=[A]), C(3, related=[B]).
fn abc() -> ConceptRepository {
    ConceptRepository::load(Dataset::new(
        vec![
            ConceptNode::new("A", "A", Level::FOUNDATIONAL),
            ConceptNode::new("B", "B", Level::CORE).with_prerequisite("A"),
            ConceptNode::new("C", "C", Level::ADVANCED).with_related("B"),
        ],
        Vec::new(),
    ))
}

fn node_set(view: &ViewGraph) -> BTreeSet<(String, bool)> {
    view.nodes
        .iter()
        .map(|n| (n.id.to_string(), n.is_adjacent))
        .collect()
}

fn edge_set(view: &ViewGraph) -> BTreeSet<(String, String, EdgeKind)> {
    view.edges
        .iter()
        .map(|e| (e.source.to_string(), e.target.to_string(), e.kind))
        .collect()
}

fn edge(source: &str, target: &str, kind: EdgeKind) -> (String, String, EdgeKind) {
    (source.to_string(), target.to_string(), kind)
}

#[test]
fn test_focus_two_keeps_edges_into_context() {
    let repo = abc();
    let view = derive_view(&repo, FocusLevel::Level(Level::CORE), &VisualEncoder::default());

    assert_eq!(
        node_set(&view),
        BTreeSet::from([
            ("A".to_string(), true),
            ("B".to_string(), false),
            ("C".to_string(), true),
        ])
    );
    assert_eq!(
        edge_set(&view),
        BTreeSet::from([
            edge("A", "B", EdgeKind::Prerequisite),
            edge("B", "C", EdgeKind::Related),
        ])
    );

    // Edge opacity does not depend on endpoint adjacency.
    let related = view.edges.iter().find(|e| e.kind == EdgeKind::Related).unwrap();
    assert_eq!(related.style.opacity, 0.4);
}

#[test]
fn test_focus_one_has_no_lower_context() {
    let repo = abc();
    let view = derive_view(
        &repo,
        FocusLevel::Level(Level::FOUNDATIONAL),
        &VisualEncoder::default(),
    );

    assert_eq!(
        node_set(&view),
        BTreeSet::from([("A".to_string(), false), ("B".to_string(), true)])
    );
    assert_eq!(
        edge_set(&view),
        BTreeSet::from([edge("A", "B", EdgeKind::Prerequisite)])
    );
}

#[test]
fn test_empty_focus_level_is_empty_graph() {
    let repo = ConceptRepository::load(Dataset::new(
        vec![ConceptNode::new("A", "A", Level::FOUNDATIONAL)],
        Vec::new(),
    ));
    let view = derive_view(
        &repo,
        FocusLevel::Level(Level::INTEGRATIVE),
        &VisualEncoder::default(),
    );
    assert!(view.is_empty());
}

#[test]
fn test_ghost_prerequisite_adds_nothing() {
    let clean = abc();
    let haunted = ConceptRepository::load(Dataset::new(
        vec![
            ConceptNode::new("A", "A", Level::FOUNDATIONAL),
            ConceptNode::new("B", "B", Level::CORE)
                .with_prerequisite("A")
                .with_prerequisite("ghost"),
            ConceptNode::new("C", "C", Level::ADVANCED).with_related("B"),
            ConceptNode::new("D", "D", Level::CORE).with_prerequisite("ghost"),
        ],
        Vec::new(),
    ));

    let clean_edges = GraphBuilder::new(&clean).build().edges;
    let haunted_graph = GraphBuilder::new(&haunted).build();

    assert!(haunted_graph.is_closed());
    assert!(haunted_graph
        .edges
        .iter()
        .all(|e| e.target.as_str() != "D"));
    assert_eq!(haunted_graph.edges, clean_edges);
}

#[test]
fn test_filtered_edges_stay_closed() {
    let repo = ConceptRepository::load(Dataset::new(
        vec![
            ConceptNode::new("a", "a", Level::FOUNDATIONAL),
            ConceptNode::new("b", "b", Level::CORE).with_prerequisite("a"),
            ConceptNode::new("c", "c", Level::ADVANCED)
                .with_prerequisite("a")
                .with_prerequisite("b"),
            ConceptNode::new("d", "d", Level::INTEGRATIVE)
                .with_prerequisite("a")
                .with_related("c"),
        ],
        Vec::new(),
    ));
    let graph = GraphBuilder::new(&repo).build();

    for focus in [1u8, 2, 3, 4] {
        let focus = FocusLevel::try_from(focus).unwrap();
        let filtered = ViewFilter::new(focus).apply(&graph);

        for node in &filtered.nodes {
            assert!(focus.classify(node.node.level).is_some());
        }
        for e in &filtered.edges {
            assert!(filtered.contains(e.source.as_str()), "{:?} at {}", e, focus);
            assert!(filtered.contains(e.target.as_str()), "{:?} at {}", e, focus);
        }
    }

    // Focus 1 drops the a→c and a→d skip-level edges.
    let filtered = ViewFilter::new(FocusLevel::Level(Level::FOUNDATIONAL)).apply(&graph);
    assert_eq!(filtered.edges.len(), 1);
}

#[test]
fn test_all_focus_is_identity() {
    let repo = abc();
    let graph = GraphBuilder::new(&repo).build();
    let filtered = ViewFilter::new(FocusLevel::All).apply(&graph);

    assert_eq!(filtered.nodes.len(), repo.len());
    assert!(filtered.nodes.iter().all(|n| !n.is_adjacent));
    assert_eq!(filtered.edges.len(), graph.edges.len());
}

#[test]
fn test_view_derivation_is_deterministic() {
    let repo = abc();
    let encoder = VisualEncoder::default();

    let first = derive_view(&repo, FocusLevel::Level(Level::CORE), &encoder);
    let second = derive_view(&repo, FocusLevel::Level(Level::CORE), &encoder);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_dependents_are_inverse_of_forward_lists() {
    let repo = abc();
    let nav = NavigationResolver::new(&repo);

    for n in repo.all() {
        let dependents = nav.dependents_of(n.id.as_str());
        for m in repo.all() {
            let listed = dependents.iter().any(|d| d.id == m.id);
            let forward = m.prerequisites.contains(&n.id) || m.related.contains(&n.id);
            assert_eq!(listed, forward, "{} / {}", n.id, m.id);
        }
    }
}

const TRIG_JSON: &str = r#"{
  "topic": "Trigonometry",
  "version": "1.0",
  "nodes": [
    {"id": "angle", "name": "Angle", "description": "Rotation measure", "category": "basic", "level": 1},
    {"id": "sine", "name": "Sine", "description": "Ratio $a/c$", "category": "core", "level": 2,
     "prerequisites": ["angle", "radian"], "examples": ["ex-sine"]}
  ],
  "examples": [
    {"id": "ex-sine", "title": "Sine of 30", "question": "$\\sin 30^\\circ$?", "answer": "1/2",
     "solution": "Half the hypotenuse", "difficulty": "easy", "type": "calc", "relatedNodes": ["sine"]}
  ]
}"#;

const VECTOR_JSON: &str = r#"{
  "nodes": [
    {"id": "vector", "name": "Vector", "description": "Magnitude and direction", "category": "basic", "level": 1}
  ]
}"#;

#[test]
fn test_session_over_json_datasets() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("trigonometry.json"), TRIG_JSON).unwrap();
    fs::write(dir.path().join("vector.json"), VECTOR_JSON).unwrap();

    let catalog = SubjectCatalog::new(vec![
        Subject::new("trigonometry", "Trigonometry", "", "blue", "📐"),
        Subject::new("vector", "Vectors", "", "purple", "➡️"),
    ])
    .unwrap();
    let registry = DatasetRegistry::from_catalog(&catalog, dir.path());
    let config = GraphConfig {
        data_dir: dir.path().to_path_buf(),
        ..GraphConfig::default()
    };
    let mut session = Session::new(&config, catalog, registry).unwrap();

    let start = session.start();
    assert_eq!(start[0], RenderCommand::SetMode { mode: RenderMode::TwoD });
    match &start[1] {
        RenderCommand::ShowGraph(view) => {
            assert_eq!(view.nodes.len(), 2);
            assert_eq!(view.edges.len(), 1);
        }
        other => panic!("unexpected command: {:?}", other),
    }

    session
        .handle(ViewEvent::NodeActivated {
            id: ConceptId::from("sine"),
        })
        .unwrap();
    let panel = session.panel().unwrap();
    assert_eq!(panel.prerequisites.len(), 1);
    assert_eq!(panel.examples[0].answer, "1/2");
    let json = serde_json::to_value(&panel).unwrap();
    assert_eq!(json["description"][1]["text"], "a/c");

    let commands = session
        .handle(ViewEvent::SubjectSelected {
            id: SubjectId::from("vector"),
        })
        .unwrap();
    assert_eq!(commands[0], RenderCommand::ClosePanel);
    assert_eq!(session.repository().len(), 1);
}

#[test]
fn test_session_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("trigonometry.json"), TRIG_JSON).unwrap();
    let config_path = dir.path().join("concept_map.toml");
    fs::write(
        &config_path,
        format!(
            "data_dir = {:?}\ndefault_focus = \"2\"\ndefault_mode = \"3d\"\n",
            dir.path().display().to_string()
        ),
    )
    .unwrap();

    let config = GraphConfig::from_file(&config_path).unwrap();
    let session = Session::from_config(&config).unwrap();

    assert_eq!(session.mode(), RenderMode::ThreeD);
    assert_eq!(session.catalog().len(), 10);
    let view = session.view();
    assert_eq!(view.focus, FocusLevel::Level(Level::CORE));
    assert_eq!(view.node("angle").map(|n| n.is_adjacent), Some(true));
}

#[test]
fn test_invalid_focus_rejected_at_boundary() {
    assert!("5".parse::<FocusLevel>().is_err());
    assert!("zero".parse::<FocusLevel>().is_err());
    assert_eq!("ALL".parse::<FocusLevel>().unwrap(), FocusLevel::All);
}
