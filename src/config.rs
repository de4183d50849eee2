//! Structure catalog: named column layouts, stored as YAML
//!
//! ```yaml
//! structures:
//!   - name: "Соціоніка"
//!     name_column: B
//!     date_column: A
//!     data_columns: BS
//! ```

use crate::error::{ReportError, ReportResult};
use crate::types::ColumnStructure;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

pub const DEFAULT_CATALOG_FILE: &str = "structures.yaml";

/// One named test layout. `data_columns` is comma-delimited ("HA,HC").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureEntry {
    pub name: String,
    pub name_column: String,
    pub date_column: String,
    pub data_columns: String,
}

impl StructureEntry {
    pub fn new(name: &str, name_column: &str, date_column: &str, data_columns: &str) -> Self {
        Self {
            name: name.to_string(),
            name_column: name_column.to_string(),
            date_column: date_column.to_string(),
            data_columns: data_columns.to_string(),
        }
    }

    pub fn to_structure(&self) -> ColumnStructure {
        ColumnStructure::from_delimited(&self.name_column, &self.date_column, &self.data_columns)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureCatalog {
    #[serde(default)]
    pub structures: Vec<StructureEntry>,
}

impl StructureCatalog {
    /// Layouts shipped with the application.
    pub fn defaults() -> Self {
        Self {
            structures: vec![
                StructureEntry::new("Адаптивність 200", "C", "A", "HA,HC,HE,HG,HI,HK,HM,HO"),
                StructureEntry::new("Соціоніка", "B", "A", "BS"),
                StructureEntry::new(
                    "Акцентуація Особистості",
                    "B",
                    "A",
                    "GD,GF,GH,GJ,GL,GN,GP,GR,GT,GV,GX,GZ",
                ),
            ],
        }
    }

    /// Load a catalog file; a missing file yields [`StructureCatalog::defaults`].
    pub fn load(path: &Path) -> ReportResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "catalog not found, using defaults");
            return Ok(Self::defaults());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> ReportResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> ReportResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the catalog, replacing `path` atomically.
    pub fn save(&self, path: &Path) -> ReportResult<()> {
        let content = self.to_yaml()?;
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(path).map_err(|e| ReportError::Io(e.error))?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> ReportResult<&StructureEntry> {
        self.structures
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ReportError::StructureNotFound(name.to_string()))
    }

    pub fn add(&mut self, entry: StructureEntry) -> ReportResult<()> {
        if self.structures.iter().any(|s| s.name == entry.name) {
            return Err(ReportError::DuplicateStructure(entry.name));
        }
        self.structures.push(entry);
        Ok(())
    }

    /// Replace the entry with the same name, or append it.
    pub fn upsert(&mut self, entry: StructureEntry) {
        match self.structures.iter_mut().find(|s| s.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.structures.push(entry),
        }
    }

    pub fn remove(&mut self, name: &str) -> ReportResult<StructureEntry> {
        let idx = self
            .structures
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| ReportError::StructureNotFound(name.to_string()))?;
        Ok(self.structures.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let catalog = StructureCatalog::defaults();
        assert_eq!(catalog.structures.len(), 3);
        let socionics = catalog.get("Соціоніка").unwrap().to_structure();
        assert_eq!(socionics.name_column, "B");
        assert_eq!(socionics.date_column, "A");
        assert_eq!(socionics.data_columns, vec!["BS"]);
        let adaptivity = catalog.get("Адаптивність 200").unwrap().to_structure();
        assert_eq!(adaptivity.data_columns.len(), 8);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
structures:
  - name: "Тест"
    name_column: C
    date_column: A
    data_columns: "D,E"
"#;
        let catalog = StructureCatalog::from_yaml(yaml).unwrap();
        assert_eq!(
            catalog.get("Тест").unwrap(),
            &StructureEntry::new("Тест", "C", "A", "D,E")
        );
    }

    #[test]
    fn test_from_yaml_without_structures_key() {
        let catalog = StructureCatalog::from_yaml("{}").unwrap();
        assert!(catalog.structures.is_empty());
    }

    #[test]
    fn test_from_yaml_invalid() {
        let result = StructureCatalog::from_yaml("structures: [1, 2");
        assert!(matches!(result, Err(ReportError::Yaml(_))));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let catalog = StructureCatalog::load(&dir.path().join("structures.yaml")).unwrap();
        assert_eq!(catalog, StructureCatalog::defaults());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("structures.yaml");
        let mut catalog = StructureCatalog::default();
        catalog
            .add(StructureEntry::new("Тест", "C", "A", "D,E"))
            .unwrap();

        catalog.save(&path).unwrap();

        assert_eq!(StructureCatalog::load(&path).unwrap(), catalog);
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let mut catalog = StructureCatalog::defaults();
        let result = catalog.add(StructureEntry::new("Соціоніка", "C", "A", "D"));
        assert!(matches!(result, Err(ReportError::DuplicateStructure(_))));
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let mut catalog = StructureCatalog::defaults();
        catalog.upsert(StructureEntry::new("Соціоніка", "C", "A", "BT"));
        assert_eq!(catalog.structures.len(), 3);
        assert_eq!(catalog.get("Соціоніка").unwrap().data_columns, "BT");
    }

    #[test]
    fn test_remove() {
        let mut catalog = StructureCatalog::defaults();
        let removed = catalog.remove("Соціоніка").unwrap();
        assert_eq!(removed.name, "Соціоніка");
        assert!(catalog.get("Соціоніка").is_err());
        assert!(matches!(
            catalog.remove("Соціоніка"),
            Err(ReportError::StructureNotFound(_))
        ));
    }
}
