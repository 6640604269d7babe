use crate::error::ModelResult;
use crate::spec::Specification;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, warn};

/// A JSON file holding a set of specifications and the name of the root one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecDocument {
    pub root: String,
    #[serde(default)]
    pub specifications: Vec<Specification>,
}

impl SpecDocument {
    pub fn from_json(source: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: &Path) -> ModelResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// The root specification, searched among nested ones as well
    pub fn root_spec(&self) -> Option<&Specification> {
        fn find<'a>(specs: &'a [Specification], name: &str) -> Option<&'a Specification> {
            specs.iter().find_map(|spec| {
                if spec.name == name {
                    Some(spec)
                } else {
                    find(&spec.nested, name)
                }
            })
        }
        find(&self.specifications, &self.root)
    }

    pub fn catalog(&self) -> SpecCatalog {
        let mut catalog = SpecCatalog::new();
        for spec in &self.specifications {
            catalog.register(spec.clone());
        }
        catalog
    }
}

/// Named specifications available as embed targets
#[derive(Debug, Clone, Default)]
pub struct SpecCatalog {
    specs: HashMap<String, Rc<Specification>>,
}

impl SpecCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `spec` and every specification nested in it
    pub fn register(&mut self, spec: Specification) {
        for nested in &spec.nested {
            self.register(nested.clone());
        }
        debug!(spec = %spec.name, "Registering specification");
        if self.specs.contains_key(&spec.name) {
            warn!(spec = %spec.name, "Specification registered twice, keeping the latest");
        }
        self.specs.insert(spec.name.clone(), Rc::new(spec));
    }

    pub fn get(&self, name: &str) -> Option<Rc<Specification>> {
        self.specs.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
