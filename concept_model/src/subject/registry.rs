//! Subject → dataset resolution.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::{SubjectCatalog, SubjectId};
use crate::{Dataset, ModelError, ModelResult};

/// Produces the dataset for one subject.
pub trait DatasetLoader {
    fn load(&self) -> ModelResult<Dataset>;
}

/// Loads a dataset from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    path: PathBuf,
}

impl JsonFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetLoader for JsonFileLoader {
    fn load(&self) -> ModelResult<Dataset> {
        Dataset::from_file(&self.path)
    }
}

/// Serves a dataset that is already in memory.
#[derive(Debug, Clone)]
pub struct InMemoryLoader {
    dataset: Dataset,
}

impl InMemoryLoader {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl DatasetLoader for InMemoryLoader {
    fn load(&self) -> ModelResult<Dataset> {
        self.dataset.validate()?;
        Ok(self.dataset.clone())
    }
}

/// Maps subject ids to their loaders and caches what has been loaded.
///
/// A subject is resolved by a single map lookup; adding a subject means
/// registering one more loader.
#[derive(Default)]
pub struct DatasetRegistry {
    loaders: HashMap<SubjectId, Box<dyn DatasetLoader>>,
    cache: HashMap<SubjectId, Arc<Dataset>>,
}

impl DatasetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a JSON file loader for every catalog entry under `data_dir`.
    pub fn from_catalog(catalog: &SubjectCatalog, data_dir: &Path) -> Self {
        let mut registry = Self::new();
        for subject in catalog.iter() {
            registry.register(
                subject.id.clone(),
                JsonFileLoader::new(data_dir.join(&subject.data_file)),
            );
        }
        registry
    }

    /// Register or replace the loader for a subject. Drops any cached copy.
    pub fn register(&mut self, id: SubjectId, loader: impl DatasetLoader + 'static) {
        self.cache.remove(&id);
        self.loaders.insert(id, Box::new(loader));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.loaders.contains_key(id)
    }

    /// Whether a subject's dataset is currently cached.
    pub fn is_cached(&self, id: &str) -> bool {
        self.cache.contains_key(id)
    }

    /// Get a subject's dataset, loading it on first use.
    pub fn load(&mut self, id: &str) -> ModelResult<Arc<Dataset>> {
        if let Some(dataset) = self.cache.get(id) {
            debug!(subject = id, "dataset cache hit");
            return Ok(Arc::clone(dataset));
        }

        let loader = self
            .loaders
            .get(id)
            .ok_or_else(|| ModelError::UnknownSubject(SubjectId::from(id)))?;
        let dataset = Arc::new(loader.load()?);

        info!(
            subject = id,
            nodes = dataset.nodes.len(),
            examples = dataset.examples.len(),
            "dataset loaded"
        );
        self.cache.insert(SubjectId::from(id), Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop a cached dataset so the next load reads it again.
    pub fn evict(&mut self, id: &str) -> bool {
        self.cache.remove(id).is_some()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl std::fmt::Debug for DatasetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut subjects: Vec<_> = self.loaders.keys().map(SubjectId::as_str).collect();
        subjects.sort_unstable();
        f.debug_struct("DatasetRegistry")
            .field("subjects", &subjects)
            .field("cached", &self.cache.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConceptNode, Level};
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingLoader {
        calls: Rc<Cell<u32>>,
    }

    impl DatasetLoader for CountingLoader {
        fn load(&self) -> ModelResult<Dataset> {
            self.calls.set(self.calls.get() + 1);
            Ok(Dataset::new(
                vec![ConceptNode::new("a", "A", Level::FOUNDATIONAL)],
                Vec::new(),
            ))
        }
    }

    #[test]
    fn test_unknown_subject() {
        let mut registry = DatasetRegistry::new();
        assert!(matches!(
            registry.load("nope"),
            Err(ModelError::UnknownSubject(id)) if id.as_str() == "nope"
        ));
    }

    #[test]
    fn test_load_is_cached() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = DatasetRegistry::new();
        registry.register(
            SubjectId::from("algebra"),
            CountingLoader {
                calls: Rc::clone(&calls),
            },
        );

        let first = registry.load("algebra").unwrap();
        let second = registry.load("algebra").unwrap();

        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.is_cached("algebra"));

        assert!(registry.evict("algebra"));
        registry.load("algebra").unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_in_memory_loader_validates() {
        let dataset = Dataset::new(
            vec![
                ConceptNode::new("a", "A", Level::FOUNDATIONAL),
                ConceptNode::new("a", "A", Level::FOUNDATIONAL),
            ],
            Vec::new(),
        );
        let mut registry = DatasetRegistry::new();
        registry.register(SubjectId::from("dup"), InMemoryLoader::new(dataset));

        assert!(matches!(
            registry.load("dup"),
            Err(ModelError::DuplicateConcept(_))
        ));
        assert!(!registry.is_cached("dup"));
    }

    #[test]
    fn test_from_catalog_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = Dataset::new(
            vec![ConceptNode::new("limit", "Limit", Level::FOUNDATIONAL)],
            Vec::new(),
        );
        std::fs::write(
            dir.path().join("calculus.json"),
            serde_json::to_string(&dataset).unwrap(),
        )
        .unwrap();

        let catalog = SubjectCatalog::builtin();
        let mut registry = DatasetRegistry::from_catalog(&catalog, dir.path());

        assert!(registry.contains("geometry"));
        let loaded = registry.load("calculus").unwrap();
        assert_eq!(loaded.nodes[0].id.as_str(), "limit");
        assert!(matches!(registry.load("geometry"), Err(ModelError::Io { .. })));
    }
}
