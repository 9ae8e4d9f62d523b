use crate::error::{LockerError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One known module and the number of checkpoints it declares.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleCatalogEntry {
    #[serde(rename = "moduleID")]
    pub module_id: String,
    #[serde(rename = "moduleName")]
    pub module_name: String,
    #[serde(rename = "totalCheckPoints")]
    pub total_checkpoints: i64,
}

/// Authoritative module list. Loaded once and only ever read afterwards,
/// so a single instance can back any number of concurrent requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleCatalog {
    modules: Vec<ModuleCatalogEntry>,
}

impl ModuleCatalog {
    pub fn new(modules: Vec<ModuleCatalogEntry>) -> Self {
        Self { modules }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            LockerError::Catalog(format!("unable to open modules file {}: {}", path.display(), e))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let modules: Vec<ModuleCatalogEntry> = serde_json::from_reader(reader)
            .map_err(|e| LockerError::Catalog(format!("unable to decode module info: {}", e)))?;
        Ok(Self { modules })
    }

    pub fn modules(&self) -> &[ModuleCatalogEntry] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
