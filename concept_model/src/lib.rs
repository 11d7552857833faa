//! # Concept Model
//!
//! The data contract of the concept map. This crate holds everything that is
//! loaded from a subject dataset and nothing that is derived from it: concept
//! records, practice examples, curriculum levels, and the subject catalog that
//! selects which dataset is active.
//!
//! Graph derivation, filtering, and visual encoding live in `concept_graph`.

pub mod concept;
pub mod dataset;
pub mod error;
pub mod level;
pub mod markup;
pub mod subject;

pub use concept::*;
pub use dataset::*;
pub use error::*;
pub use level::*;
pub use markup::*;
pub use subject::*;
