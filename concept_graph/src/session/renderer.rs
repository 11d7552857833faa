//! Lifecycle of the external renderer.
//!
//! The renderer owns a layout/physics loop and event listeners that outlive a
//! single call. A [`RendererSlot`] holds at most one live instance and always
//! stops and detaches the old one before building the next.

use tracing::{debug, info};

use super::RenderMode;
use crate::events::RenderCommand;
use crate::view::ViewGraph;

/// A mounted 2D or 3D renderer instance.
pub trait Renderer {
    /// Draw a graph. Called once, right after the instance is created.
    fn show(&mut self, graph: &ViewGraph);

    /// Apply a viewport or panel command.
    fn apply(&mut self, command: &RenderCommand);

    /// Halt any in-flight layout or camera animation.
    fn stop_animation(&mut self);

    /// Unhook callbacks that reference the current graph.
    fn detach_listeners(&mut self);
}

/// Creates renderer instances for a mode.
pub type RendererFactory = Box<dyn FnMut(RenderMode) -> Box<dyn Renderer>>;

/// Owns the single live renderer.
pub struct RendererSlot {
    factory: RendererFactory,
    mode: RenderMode,
    current: Option<Box<dyn Renderer>>,
    mounts: u64,
}

impl RendererSlot {
    pub fn new(mode: RenderMode, factory: RendererFactory) -> Self {
        Self {
            factory,
            mode,
            current: None,
            mounts: 0,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn is_mounted(&self) -> bool {
        self.current.is_some()
    }

    /// Number of instances created so far.
    pub fn mount_count(&self) -> u64 {
        self.mounts
    }

    /// Replace the live renderer with a fresh one showing `graph`.
    pub fn mount(&mut self, graph: &ViewGraph) {
        self.teardown();

        let mut renderer = (self.factory)(self.mode);
        renderer.show(graph);
        self.current = Some(renderer);
        self.mounts += 1;

        info!(
            mode = %self.mode,
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "renderer mounted"
        );
    }

    /// Stop, detach, and drop the live renderer, if any.
    pub fn teardown(&mut self) {
        if let Some(mut renderer) = self.current.take() {
            renderer.stop_animation();
            renderer.detach_listeners();
            drop(renderer);
            info!(mode = %self.mode, "renderer torn down");
        }
    }

    /// Route session output to the renderer.
    ///
    /// A new graph or mode always rebuilds the instance; everything else is
    /// forwarded to the live one.
    pub fn dispatch(&mut self, commands: &[RenderCommand]) {
        for command in commands {
            match command {
                RenderCommand::ShowGraph(graph) => self.mount(graph),
                RenderCommand::SetMode { mode } => {
                    if *mode != self.mode {
                        self.teardown();
                        self.mode = *mode;
                    }
                }
                other => {
                    if let Some(renderer) = self.current.as_mut() {
                        renderer.apply(other);
                    } else {
                        debug!(command = other.name(), "no renderer mounted");
                    }
                }
            }
        }
    }
}

impl Drop for RendererSlot {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for RendererSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererSlot")
            .field("mode", &self.mode)
            .field("mounted", &self.is_mounted())
            .field("mounts", &self.mounts)
            .finish()
    }
}
