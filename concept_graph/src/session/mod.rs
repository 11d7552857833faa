//! Session state - one active subject, focus, and selection per user.
//!
//! A session reacts to discrete [`ViewEvent`]s and answers with
//! [`RenderCommand`]s. The view graph is re-derived from scratch whenever it
//! is needed; there is no cached graph to invalidate.

mod renderer;

pub use renderer::*;

use concept_model::{ConceptId, DatasetRegistry, ModelError, SubjectCatalog, SubjectId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::GraphConfig;
use crate::error::{GraphError, GraphResult};
use crate::events::{RenderCommand, ViewEvent};
use crate::navigation::{
    CameraConfig, DetailPanel, NavigationResolver, Selection, Transition, Vec3,
};
use crate::repository::ConceptRepository;
use crate::view::{derive_view, FocusLevel, ViewGraph, VisualEncoder};

/// Unique identifier for sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which renderer draws the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Force-directed layout on a flat canvas.
    #[default]
    #[serde(rename = "2d")]
    TwoD,
    /// Force graph in 3D space.
    #[serde(rename = "3d")]
    ThreeD,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::TwoD => RenderMode::ThreeD,
            RenderMode::ThreeD => RenderMode::TwoD,
        }
    }
}

impl FromStr for RenderMode {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2d" => Ok(RenderMode::TwoD),
            "3d" => Ok(RenderMode::ThreeD),
            _ => Err(GraphError::InvalidRenderMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::TwoD => f.write_str("2d"),
            RenderMode::ThreeD => f.write_str("3d"),
        }
    }
}

/// Per-user view state over one loaded subject.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    catalog: SubjectCatalog,
    registry: DatasetRegistry,
    subject: SubjectId,
    repository: ConceptRepository,
    focus: FocusLevel,
    selection: Selection,
    mode: RenderMode,
    encoder: VisualEncoder,
    camera: CameraConfig,
}

impl Session {
    /// Start a session on the configured default subject.
    pub fn new(
        config: &GraphConfig,
        catalog: SubjectCatalog,
        mut registry: DatasetRegistry,
    ) -> GraphResult<Self> {
        config.validate()?;

        let subject = config.default_subject.clone();
        if !catalog.contains(subject.as_str()) {
            return Err(ModelError::UnknownSubject(subject).into());
        }
        let repository = ConceptRepository::load(registry.load(subject.as_str())?);

        let session = Self {
            id: SessionId::new(),
            catalog,
            registry,
            subject,
            repository,
            focus: config.default_focus,
            selection: Selection::Closed,
            mode: config.default_mode,
            encoder: VisualEncoder::new(config.encoding.clone()),
            camera: config.camera.clone(),
        };
        info!(session = %session.id, subject = %session.subject, "session started");
        Ok(session)
    }

    /// Start a session reading datasets from `config.data_dir`.
    pub fn from_config(config: &GraphConfig) -> GraphResult<Self> {
        let catalog = config.load_catalog()?;
        let registry = DatasetRegistry::from_catalog(&catalog, &config.data_dir);
        Self::new(config, catalog, registry)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    pub fn catalog(&self) -> &SubjectCatalog {
        &self.catalog
    }

    pub fn repository(&self) -> &ConceptRepository {
        &self.repository
    }

    pub fn focus(&self) -> FocusLevel {
        self.focus
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn navigator(&self) -> NavigationResolver<'_> {
        NavigationResolver::new(&self.repository)
    }

    /// The renderer-facing graph for the current subject and focus.
    pub fn view(&self) -> ViewGraph {
        derive_view(&self.repository, self.focus, &self.encoder)
    }

    /// Detail panel content for the open selection.
    pub fn panel(&self) -> Option<DetailPanel<'_>> {
        self.selection
            .current()
            .and_then(|id| self.navigator().detail(id.as_str()))
    }

    /// Whether a concept is drawn under the current focus.
    pub fn is_visible(&self, id: &str) -> bool {
        self.repository
            .get_by_id(id)
            .is_some_and(|node| self.focus.classify(node.level).is_some())
    }

    /// Commands for the initial render.
    pub fn start(&self) -> Vec<RenderCommand> {
        vec![
            RenderCommand::SetMode { mode: self.mode },
            RenderCommand::ShowGraph(self.view()),
        ]
    }

    /// Apply one inbound event.
    pub fn handle(&mut self, event: ViewEvent) -> GraphResult<Vec<RenderCommand>> {
        let commands = match event {
            ViewEvent::NodeActivated { id } => self.activate(&id),
            ViewEvent::PanelNavigate { id } => self.navigate(&id),
            ViewEvent::BackgroundClicked | ViewEvent::PanelClosed => self.close_panel(),
            ViewEvent::CameraReady { id, position } => self.camera_ready(&id, position),
            ViewEvent::FocusChanged { focus } => self.set_focus(focus),
            ViewEvent::SubjectSelected { id } => return self.select_subject(id.as_str()),
            ViewEvent::ResetView => vec![RenderCommand::FitAll {
                padding: self.camera.fit_padding,
                duration_ms: self.camera.fit_duration_ms,
            }],
            ViewEvent::ToggleMode => self.toggle_mode(),
        };
        Ok(commands)
    }

    /// Switch to another subject, closing the panel and keeping the focus.
    pub fn select_subject(&mut self, id: &str) -> GraphResult<Vec<RenderCommand>> {
        if self.subject.as_str() == id {
            return Ok(Vec::new());
        }
        if !self.catalog.contains(id) {
            return Err(ModelError::UnknownSubject(SubjectId::from(id)).into());
        }

        let dataset = self.registry.load(id)?;
        self.repository = ConceptRepository::load(dataset);
        self.subject = SubjectId::from(id);
        info!(session = %self.id, subject = id, "subject switched");

        let mut commands = Vec::new();
        if self.selection.close() == Transition::Closed {
            commands.push(RenderCommand::ClosePanel);
        }
        commands.push(RenderCommand::ShowGraph(self.view()));
        Ok(commands)
    }

    /// Change the focus level. The selection is kept.
    pub fn set_focus(&mut self, focus: FocusLevel) -> Vec<RenderCommand> {
        if self.focus == focus {
            return Vec::new();
        }
        self.focus = focus;
        info!(session = %self.id, focus = %focus, "focus changed");
        vec![RenderCommand::ShowGraph(self.view())]
    }

    pub fn toggle_mode(&mut self) -> Vec<RenderCommand> {
        self.mode = self.mode.toggled();
        info!(session = %self.id, mode = %self.mode, "render mode changed");
        vec![
            RenderCommand::SetMode { mode: self.mode },
            RenderCommand::ShowGraph(self.view()),
        ]
    }

    fn activate(&mut self, id: &ConceptId) -> Vec<RenderCommand> {
        if !self.repository.contains(id.as_str()) {
            warn!(concept = %id, "activation of unknown concept ignored");
            return Vec::new();
        }
        match self.selection.activate(id) {
            Transition::Opened(id) => vec![RenderCommand::OpenPanel { id }],
            _ => Vec::new(),
        }
    }

    fn navigate(&mut self, id: &ConceptId) -> Vec<RenderCommand> {
        if !self.repository.contains(id.as_str()) {
            warn!(concept = %id, "navigation to unknown concept ignored");
            return Vec::new();
        }
        let Transition::Opened(id) = self.selection.activate(id) else {
            return Vec::new();
        };

        // A concept hidden by the focus still opens in the panel; only the
        // camera stays put.
        let visible = self.is_visible(id.as_str());
        let mut commands = vec![RenderCommand::OpenPanel { id: id.clone() }];
        if visible {
            commands.push(match self.mode {
                RenderMode::TwoD => RenderCommand::CenterOn {
                    id,
                    zoom: self.camera.center_zoom,
                    duration_ms: self.camera.center_duration_ms,
                },
                RenderMode::ThreeD => RenderCommand::LocateNode { id },
            });
        }
        commands
    }

    fn close_panel(&mut self) -> Vec<RenderCommand> {
        match self.selection.close() {
            Transition::Closed => vec![RenderCommand::ClosePanel],
            _ => Vec::new(),
        }
    }

    fn camera_ready(&mut self, id: &ConceptId, position: Vec3) -> Vec<RenderCommand> {
        if self.mode != RenderMode::ThreeD || self.selection.current() != Some(id) {
            warn!(concept = %id, mode = %self.mode, "stale camera position ignored");
            return Vec::new();
        }
        vec![RenderCommand::MoveCamera {
            position: self.camera.focus_position(position),
            look_at: position,
            duration_ms: self.camera.focus_duration_ms,
        }]
    }
}
