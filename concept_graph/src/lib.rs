//! # Concept Graph
//!
//! Turns a subject dataset into something a graph renderer can draw, and
//! answers the navigation questions a study panel asks about it.
//!
//! ## Pipeline
//!
//! - **repository**: id-indexed, read-only view of one dataset
//! - **graph**: derives typed prerequisite/related edges from concept lists
//! - **view**: level-based focus filtering and per-element visual encoding
//! - **navigation**: prerequisites, dependents, examples, and panel selection
//! - **session**: per-user state that re-derives the view on every event
//!
//! Every derivation is a pure function of the dataset and the current
//! filter; nothing is cached between events.

pub mod config;
pub mod error;
pub mod events;
pub mod graph;
pub mod navigation;
pub mod repository;
pub mod session;
pub mod view;

pub use config::*;
pub use error::*;
pub use events::*;
pub use graph::*;
pub use navigation::*;
pub use repository::*;
pub use session::*;
pub use view::*;
