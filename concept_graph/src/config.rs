//! Runtime configuration.
//!
//! Every field has a default, so an empty TOML file is a valid configuration.
//!
//! ```toml
//! data_dir = "data"
//! default_subject = "trigonometry"
//! default_focus = "all"
//! default_mode = "2d"
//!
//! [encoding]
//! adjacent_opacity = 0.3
//!
//! [camera]
//! focus_distance = 200.0
//! ```

use std::path::{Path, PathBuf};

use concept_model::{SubjectCatalog, SubjectId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GraphError, GraphResult};
use crate::navigation::CameraConfig;
use crate::session::RenderMode;
use crate::view::{EncodingConfig, FocusLevel};

/// Configuration for a concept map session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Directory holding one `{subject}.json` dataset per subject.
    pub data_dir: PathBuf,
    /// Optional TOML subject catalog; the built-in catalog is used when unset.
    pub catalog_file: Option<PathBuf>,
    pub default_subject: SubjectId,
    pub default_focus: FocusLevel,
    pub default_mode: RenderMode,
    pub encoding: EncodingConfig,
    pub camera: CameraConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            catalog_file: None,
            default_subject: SubjectId::from("trigonometry"),
            default_focus: FocusLevel::All,
            default_mode: RenderMode::TwoD,
            encoding: EncodingConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl GraphConfig {
    pub fn from_toml_str(content: &str) -> GraphResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| GraphError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file.
    pub fn from_file(path: &Path) -> GraphResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GraphError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), subject = %config.default_subject, "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> GraphResult<()> {
        self.encoding.validate().map_err(GraphError::Config)?;

        if self.camera.focus_distance <= 0.0 {
            return Err(GraphError::Config(
                "camera.focus_distance must be positive".into(),
            ));
        }
        if self.camera.center_zoom <= 0.0 {
            return Err(GraphError::Config(
                "camera.center_zoom must be positive".into(),
            ));
        }
        Ok(())
    }

    /// The subject catalog named by `catalog_file`, or the built-in one.
    pub fn load_catalog(&self) -> GraphResult<SubjectCatalog> {
        match &self.catalog_file {
            Some(path) => Ok(SubjectCatalog::from_file(path)?),
            None => {
                debug!("using built-in subject catalog");
                Ok(SubjectCatalog::builtin())
            }
        }
    }
}
