//! Events exchanged with the external renderer and UI controls.

use concept_model::{ConceptId, SubjectId};
use serde::{Deserialize, Serialize};

use crate::navigation::Vec3;
use crate::session::RenderMode;
use crate::view::{FocusLevel, ViewGraph};

/// Inbound events from the renderer, the detail panel, and user controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ViewEvent {
    /// A node was clicked in the graph.
    NodeActivated { id: ConceptId },

    /// A cross-referenced concept was clicked inside the detail panel.
    PanelNavigate { id: ConceptId },

    /// Empty canvas was clicked.
    BackgroundClicked,

    /// The panel's close button was pressed.
    PanelClosed,

    /// The 3D renderer resolved the spatial position of a node.
    CameraReady { id: ConceptId, position: Vec3 },

    FocusChanged { focus: FocusLevel },

    SubjectSelected { id: SubjectId },

    ResetView,

    ToggleMode,
}

/// Outbound instructions for the renderer and panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RenderCommand {
    /// Replace the drawn graph; the renderer instance is rebuilt.
    ShowGraph(ViewGraph),

    /// Switch between the 2D and 3D renderer.
    SetMode { mode: RenderMode },

    /// 2D: center the viewport on a node.
    CenterOn {
        id: ConceptId,
        zoom: f64,
        duration_ms: u32,
    },

    /// 3D: ask the renderer for a node's position, answered by
    /// [`ViewEvent::CameraReady`].
    LocateNode { id: ConceptId },

    /// 3D: move the camera to `position`, looking at `look_at`.
    MoveCamera {
        position: Vec3,
        look_at: Vec3,
        duration_ms: u32,
    },

    /// Fit the whole graph into the viewport.
    FitAll { padding: u32, duration_ms: u32 },

    OpenPanel { id: ConceptId },

    ClosePanel,
}

impl RenderCommand {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            RenderCommand::ShowGraph(_) => "show_graph",
            RenderCommand::SetMode { .. } => "set_mode",
            RenderCommand::CenterOn { .. } => "center_on",
            RenderCommand::LocateNode { .. } => "locate_node",
            RenderCommand::MoveCamera { .. } => "move_camera",
            RenderCommand::FitAll { .. } => "fit_all",
            RenderCommand::OpenPanel { .. } => "open_panel",
            RenderCommand::ClosePanel => "close_panel",
        }
    }
}
